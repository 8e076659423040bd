use anyhow::Result;
use winit::window::Window;

use crate::asset::{ImageAsset, ImageSource, ImageTexture};
use crate::device::{Gpu, SurfaceErrorAction};
use crate::paint::Color;
use crate::render::{
    blit_region, encode_blit, Canvas, FillPass, PresentPass, RenderCtx, RenderTarget,
};

use super::ViewConfig;

/// Result of driving one frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    /// The drawable was filled, blitted and presented.
    Presented { size: (u32, u32) },
    /// No drawable this tick (surface reconfigured or timed out).
    Skipped,
    /// The surface is unusable; the runtime should shut down.
    Fatal,
}

/// Owns the pipelines and GPU resources of the view.
///
/// Built once after the device is acquired; `render` is then called on every
/// display tick with the window's `Gpu`.
pub struct ViewController {
    fill: FillPass,
    present: PresentPass,
    image: Option<ImageTexture>,
    blit_origin: (u32, u32),

    /// Recreated lazily when the drawable size changes.
    canvas: Option<Canvas>,
}

impl ViewController {
    /// Builds the fill and present pipelines and uploads the configured image.
    ///
    /// A missing or undecodable image is logged and the view runs with the
    /// fill color only.
    pub fn new(gpu: &Gpu<'_>, config: &ViewConfig) -> Self {
        Self::with_device(gpu.device(), gpu.queue(), gpu.surface_format(), config)
    }

    /// Same as [`ViewController::new`], for a device that does not own a
    /// window surface. Frames are then driven through [`ViewController::encode_frame`].
    pub fn with_device(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        config: &ViewConfig,
    ) -> Self {
        let fill = FillPass::new(device, config.fill_color);
        let present = PresentPass::new(device, surface_format);

        let image = match load_image(device, queue, &config.image) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("continuing without overlay image: {e:#}");
                None
            }
        };

        Self {
            fill,
            present,
            image,
            blit_origin: config.blit_origin,
            canvas: None,
        }
    }

    pub fn set_fill_color(&mut self, queue: &wgpu::Queue, color: Color) {
        self.fill.set_color(queue, color);
    }

    /// Replaces the overlay image; `ImageSource::None` removes it. On error
    /// the current image is kept.
    pub fn set_image(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        source: &ImageSource,
    ) -> Result<()> {
        self.image = load_image(device, queue, source)?;
        Ok(())
    }

    pub fn set_blit_origin(&mut self, x: u32, y: u32) {
        self.blit_origin = (x, y);
    }

    /// Drops the canvas if it no longer matches `size`.
    pub fn drawable_size_will_change(&mut self, size: (u32, u32)) {
        if self.canvas.as_ref().is_some_and(|c| !c.matches(size)) {
            self.canvas = None;
        }
    }

    /// Acquires a drawable, encodes fill → blit → present into one command
    /// buffer, and submits it.
    pub fn render(&mut self, gpu: &mut Gpu<'_>, window: &Window) -> FrameOutcome {
        let mut frame = match gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                log::debug!("drawable unavailable: {err}");
                return match gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => {
                        log::error!("surface error is unrecoverable");
                        FrameOutcome::Fatal
                    }
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        FrameOutcome::Skipped
                    }
                };
            }
        };

        let size = frame.drawable_size();
        let ctx = RenderCtx::new(gpu.device(), gpu.surface_format(), size);

        // RenderTarget borrows frame.encoder; dropped before submit() takes frame.
        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            self.encode_frame(&ctx, &mut target);
        }

        window.pre_present_notify();
        gpu.submit(frame);

        FrameOutcome::Presented { size }
    }

    /// Records the three passes of a frame into `target`.
    ///
    /// `target.color_view` must have the format the controller was built for.
    pub fn encode_frame(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        self.ensure_canvas(ctx);
        let Some(canvas) = self.canvas.as_ref() else { return };

        self.fill.encode(target.encoder, canvas.size());

        if let Some(image) = self.image.as_ref() {
            if let Some(region) = blit_region(image.size(), canvas.size(), self.blit_origin) {
                encode_blit(target.encoder, image.texture(), canvas.texture(), region);
            }
        }

        self.present.encode(target);
    }

    fn ensure_canvas(&mut self, ctx: &RenderCtx<'_>) {
        if self.canvas.as_ref().is_some_and(|c| c.matches(ctx.drawable_size)) {
            return;
        }

        let canvas = Canvas::new(ctx.device, ctx.drawable_size);
        self.fill.bind(ctx.device, &canvas);
        self.present.bind(ctx.device, &canvas);

        log::debug!(
            "canvas {}x{} created for {:?} drawable",
            canvas.size().0,
            canvas.size().1,
            ctx.surface_format
        );
        self.canvas = Some(canvas);
    }
}

fn load_image(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    source: &ImageSource,
) -> Result<Option<ImageTexture>> {
    let Some(asset) = ImageAsset::decode(source)? else {
        return Ok(None);
    };

    let texture = ImageTexture::upload(device, queue, &asset)?;
    log::info!("loaded overlay image {}x{}", asset.width, asset.height);
    Ok(Some(texture))
}
