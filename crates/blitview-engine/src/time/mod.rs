//! Time subsystem.
//!
//! Provides frame timing utilities without coupling to the runtime:
//! - `FrameClock` measures the delta between presented frames
//! - `FramePacer` decides when the next frame is due for a target rate

mod frame_clock;
mod frame_pacer;

pub use frame_clock::{FrameClock, FrameTime};
pub use frame_pacer::FramePacer;
