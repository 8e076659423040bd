use winit::window::{Window, WindowId};

use crate::time::FrameTime;
use crate::window::RuntimeCtx;

/// Per-window handles and immutable window metadata.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

/// Per-frame context passed to `ViewDelegate::render_objects`.
pub struct FrameCtx<'a> {
    pub window: WindowCtx<'a>,
    pub time: FrameTime,
    /// Size of the presented drawable in physical pixels.
    pub drawable_size: (u32, u32),
    pub runtime: &'a mut RuntimeCtx,
}
