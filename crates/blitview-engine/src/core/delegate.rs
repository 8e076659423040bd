use winit::event::WindowEvent;

use crate::time::FrameTime;

use super::ctx::FrameCtx;

/// Control directive returned by delegate callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Hooks invoked by the runtime around each frame.
///
/// Call order per display tick:
/// 1. `update_logic` with the time since the previous frame
/// 2. the controller fills, blits and presents the drawable
/// 3. `render_objects` once the frame has been submitted
pub trait ViewDelegate {
    /// Advances application state before the frame is encoded.
    fn update_logic(&mut self, time: FrameTime) {
        let _ = time;
    }

    /// Called after the frame was submitted for presentation.
    fn render_objects(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let _ = ctx;
        AppControl::Continue
    }

    /// Called when the drawable is about to be resized (physical pixels).
    fn drawable_size_will_change(&mut self, size: (u32, u32)) {
        let _ = size;
    }

    /// Called for every window event before the runtime handles it.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }
}

/// No-op delegate: the view just fills, blits and presents.
impl ViewDelegate for () {}
