//! Contract between the runtime (frame driver) and application code.
//!
//! The runtime owns the window, the GPU, and the `ViewController`; application
//! code plugs in through `ViewDelegate` and observes each frame via `FrameCtx`.

mod ctx;
mod delegate;

pub use ctx::{FrameCtx, WindowCtx};
pub use delegate::{AppControl, ViewDelegate};
