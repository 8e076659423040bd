//! Fill color.

mod color;

pub use color::{Color, ParseColorError};
