//! The view controller: one-time pipeline setup plus the per-frame
//! fill → blit → present sequence.

mod config;
mod controller;

pub use config::ViewConfig;
pub use controller::{FrameOutcome, ViewController};
