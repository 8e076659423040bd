use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::asset::ImageSource;
use crate::core::{AppControl, FrameCtx, ViewDelegate, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::paint::Color;
use crate::time::{FrameClock, FramePacer};
use crate::view::{FrameOutcome, ViewConfig, ViewController};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "blitview".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
        }
    }
}

/// Runtime context passed to the delegate.
///
/// Commands are buffered and applied after the current callback returns.
#[derive(Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }

    /// Changes the preferred frame rate; `0` disables pacing.
    pub fn set_target_fps(&mut self, fps: u32) {
        self.commands.push(Command::SetTargetFps(fps));
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.commands.push(Command::SetFillColor(color));
    }

    /// Replaces the overlay image; `ImageSource::None` removes it. A source
    /// that fails to load is logged and the current image stays.
    pub fn set_image(&mut self, source: ImageSource) {
        self.commands.push(Command::SetImage(source));
    }

    /// Moves the overlay's top-left corner, in drawable pixels.
    pub fn set_blit_origin(&mut self, x: u32, y: u32) {
        self.commands.push(Command::SetBlitOrigin(x, y));
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    SetTargetFps(u32),
    SetFillColor(Color),
    SetImage(ImageSource),
    SetBlitOrigin(u32, u32),
    Exit,
}

/// What the event loop should do before going idle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct RedrawSchedule {
    request_redraw: bool,
    control_flow: ControlFlow,
}

/// Decides the next redraw from the pacer.
///
/// A zero-sized (minimized) drawable never becomes due; the loop sleeps until
/// a window event, which a restore always produces.
fn redraw_schedule(
    drawable: PhysicalSize<u32>,
    pacer: &FramePacer,
    now: Instant,
) -> RedrawSchedule {
    if drawable.width == 0 || drawable.height == 0 {
        return RedrawSchedule {
            request_redraw: false,
            control_flow: ControlFlow::Wait,
        };
    }

    let due = pacer.is_due(now);
    let control_flow = match pacer.deadline() {
        Some(at) if !due => ControlFlow::WaitUntil(at),
        _ => ControlFlow::Wait,
    };

    RedrawSchedule {
        request_redraw: due,
        control_flow,
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and drives the view until it is closed.
    pub fn run<D>(
        runtime: RuntimeConfig,
        gpu_init: GpuInit,
        view: ViewConfig,
        delegate: D,
    ) -> Result<()>
    where
        D: ViewDelegate + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(runtime, gpu_init, view, delegate);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.setup_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    clock: FrameClock,
    pacer: FramePacer,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<D>
where
    D: ViewDelegate + 'static,
{
    runtime: RuntimeConfig,
    gpu_init: GpuInit,
    view: ViewConfig,
    delegate: D,

    entry: Option<WindowEntry>,
    controller: Option<ViewController>,

    /// Device acquisition failure, surfaced from `Runtime::run`.
    setup_error: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<D> AppState<D>
where
    D: ViewDelegate + 'static,
{
    fn new(runtime: RuntimeConfig, gpu_init: GpuInit, view: ViewConfig, delegate: D) -> Self {
        Self {
            runtime,
            gpu_init,
            view,
            delegate,
            entry: None,
            controller: None,
            setup_error: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.runtime.title.clone())
            .with_inner_size(self.runtime.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            clock: FrameClock::default(),
            pacer: FramePacer::new(self.view.preferred_fps),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()?;

        let controller = entry.with_gpu(|gpu| ViewController::new(gpu, &self.view));

        self.controller = Some(controller);
        self.entry = Some(entry);
        Ok(())
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        let Some(entry) = self.entry.as_mut() else { return };

        let size = (new_size.width, new_size.height);
        self.delegate.drawable_size_will_change(size);
        if let Some(controller) = self.controller.as_mut() {
            controller.drawable_size_will_change(size);
        }

        entry.with_gpu_mut(|gpu| gpu.resize(new_size));
        entry.with_clock_mut(|clock| clock.reset());
        entry.with_window(|w| w.request_redraw());
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId) {
        let (delegate, controller) = (&mut self.delegate, &mut self.controller);
        let (Some(entry), Some(controller)) = (self.entry.as_mut(), controller.as_mut()) else {
            return;
        };

        let mut runtime_ctx = RuntimeCtx::default();
        let mut control = AppControl::Continue;

        entry.with_mut(|fields| {
            let size = fields.gpu.size();
            if size.width == 0 || size.height == 0 {
                // Minimized; nothing to draw into.
                return;
            }

            let time = fields.clock.tick();
            delegate.update_logic(time);

            match controller.render(fields.gpu, fields.window) {
                FrameOutcome::Presented { size } => {
                    fields.pacer.frame_presented(Instant::now());

                    let mut ctx = FrameCtx {
                        window: WindowCtx {
                            id: window_id,
                            window: fields.window,
                        },
                        time,
                        drawable_size: size,
                        runtime: &mut runtime_ctx,
                    };
                    control = delegate.render_objects(&mut ctx);
                }
                FrameOutcome::Skipped => {}
                FrameOutcome::Fatal => control = AppControl::Exit,
            }
        });

        if control == AppControl::Exit {
            runtime_ctx.exit();
        }

        self.apply_commands(event_loop, runtime_ctx);
    }

    fn apply_commands(&mut self, event_loop: &ActiveEventLoop, mut ctx: RuntimeCtx) {
        for cmd in ctx.commands.drain(..) {
            match cmd {
                Command::SetTargetFps(fps) => {
                    if let Some(entry) = self.entry.as_mut() {
                        entry.with_pacer_mut(|p| p.set_target_fps(fps));
                        log::debug!("target frame rate set to {fps}");
                    }
                }
                Command::SetFillColor(color) => {
                    if let (Some(entry), Some(controller)) =
                        (self.entry.as_ref(), self.controller.as_mut())
                    {
                        entry.with_gpu(|gpu| controller.set_fill_color(gpu.queue(), color));
                    }
                }
                Command::SetImage(source) => {
                    if let (Some(entry), Some(controller)) =
                        (self.entry.as_ref(), self.controller.as_mut())
                    {
                        let loaded = entry.with_gpu(|gpu| {
                            controller.set_image(gpu.device(), gpu.queue(), &source)
                        });
                        if let Err(e) = loaded {
                            log::warn!("keeping current overlay image: {e:#}");
                        }
                    }
                }
                Command::SetBlitOrigin(x, y) => {
                    if let Some(controller) = self.controller.as_mut() {
                        controller.set_blit_origin(x, y);
                    }
                }
                Command::Exit => self.exit_requested = true,
            }
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }

    /// Drops GPU resources before the window they borrow from.
    fn teardown(&mut self) {
        self.controller = None;
        self.entry = None;
    }
}

impl<D> ApplicationHandler for AppState<D>
where
    D: ViewDelegate + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("failed to initialize view: {e:#}");
            self.setup_error = Some(e);
            self.request_exit(event_loop);
            return;
        }

        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.entry.as_ref() else {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        };

        let schedule = entry.with(|fields| {
            redraw_schedule(fields.gpu.size(), fields.pacer, Instant::now())
        });

        if schedule.request_redraw {
            entry.with_window(|w| w.request_redraw());
        }
        event_loop.set_control_flow(schedule.control_flow);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        if self.delegate.on_window_event(&event) == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        match &event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                self.teardown();
                self.request_exit(event_loop);
            }

            WindowEvent::Resized(new_size) => self.resize(*new_size),

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(new_size) =
                    self.entry.as_ref().map(|e| e.with_window(|w| w.inner_size()))
                {
                    self.resize(new_size);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop, window_id),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_ctx_buffers_commands_in_order() {
        let mut ctx = RuntimeCtx::default();
        ctx.set_target_fps(30);
        ctx.set_fill_color(Color::BLACK);
        ctx.set_image(ImageSource::None);
        ctx.set_blit_origin(4, 2);
        ctx.exit();

        assert_eq!(
            ctx.commands,
            vec![
                Command::SetTargetFps(30),
                Command::SetFillColor(Color::BLACK),
                Command::SetImage(ImageSource::None),
                Command::SetBlitOrigin(4, 2),
                Command::Exit,
            ]
        );
    }

    #[test]
    fn minimized_drawable_sleeps_instead_of_redrawing() {
        let pacer = FramePacer::new(60);
        let late = Instant::now() + std::time::Duration::from_secs(1);
        assert!(pacer.is_due(late));

        let minimized = [
            PhysicalSize::new(0, 0),
            PhysicalSize::new(0, 600),
            PhysicalSize::new(800, 0),
        ];
        for size in minimized {
            let schedule = redraw_schedule(size, &pacer, late);
            assert!(!schedule.request_redraw);
            assert_eq!(schedule.control_flow, ControlFlow::Wait);
        }
    }

    #[test]
    fn due_frame_requests_redraw() {
        let pacer = FramePacer::new(60);
        let late = Instant::now() + std::time::Duration::from_secs(1);

        let schedule = redraw_schedule(PhysicalSize::new(800, 600), &pacer, late);
        assert!(schedule.request_redraw);
        assert_eq!(schedule.control_flow, ControlFlow::Wait);
    }

    #[test]
    fn early_frame_waits_for_deadline() {
        let mut pacer = FramePacer::new(60);
        let now = Instant::now();
        pacer.frame_presented(now);

        let deadline = pacer.deadline().unwrap();
        assert!(deadline > now);

        let schedule = redraw_schedule(PhysicalSize::new(800, 600), &pacer, now);
        assert!(!schedule.request_redraw);
        assert_eq!(schedule.control_flow, ControlFlow::WaitUntil(deadline));
    }

    #[test]
    fn unpaced_view_redraws_continuously() {
        let pacer = FramePacer::new(0);
        let schedule = redraw_schedule(PhysicalSize::new(800, 600), &pacer, Instant::now());
        assert!(schedule.request_redraw);
        assert_eq!(schedule.control_flow, ControlFlow::Wait);
    }

    #[test]
    fn default_window_config() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.title, "blitview");
        assert_eq!(cfg.initial_size, LogicalSize::new(800.0, 600.0));
    }
}
