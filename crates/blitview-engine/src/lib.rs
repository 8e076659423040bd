//! blitview engine crate.
//!
//! A minimal GPU view: a compute kernel fills the drawable with a solid color,
//! a preloaded image is blitted on top, and the result is presented at a fixed
//! frame rate.

pub mod asset;
pub mod core;
pub mod device;
pub mod logging;
pub mod paint;
pub mod render;
pub mod time;
pub mod view;
pub mod window;

pub use crate::core::{AppControl, FrameCtx, ViewDelegate};
pub use crate::view::{ViewConfig, ViewController};
pub use crate::window::{Runtime, RuntimeConfig};
