//! Window + frame driver.
//!
//! Owns the `winit` EventLoop and Window, wires them to the GPU layer, and
//! paces redraws to the view's preferred frame rate.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
