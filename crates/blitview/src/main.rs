use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use blitview_engine::asset::ImageSource;
use blitview_engine::device::GpuInit;
use blitview_engine::logging::{init_logging, LoggingConfig};
use blitview_engine::paint::Color;
use blitview_engine::time::FrameTime;
use blitview_engine::{AppControl, FrameCtx, Runtime, RuntimeConfig, ViewConfig, ViewDelegate};

/// Image shown when `--image` is not given.
static DEFAULT_IMAGE: &[u8] = include_bytes!("../assets/p3.png");

/// Fills a window with a solid color from a compute kernel and blits an image on top.
#[derive(Debug, Parser)]
#[command(name = "blitview", version, about)]
struct Args {
    /// Image to blit over the fill (PNG, JPEG, ...). Defaults to the bundled p3.png.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Skip the image and show only the fill color.
    #[arg(long, conflicts_with = "image")]
    no_image: bool,

    /// Fill color as #rrggbb or #rrggbbaa.
    #[arg(long, default_value = "#ff0000")]
    color: Color,

    /// Preferred frames per second (0 = present as fast as the display allows).
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Image destination, x offset in physical pixels.
    #[arg(long, default_value_t = 0)]
    origin_x: u32,

    /// Image destination, y offset in physical pixels.
    #[arg(long, default_value_t = 0)]
    origin_y: u32,

    #[arg(long, default_value = "blitview")]
    title: String,

    #[arg(long, default_value_t = 800.0)]
    width: f64,

    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Log filter in env_logger syntax (overrides RUST_LOG).
    #[arg(long)]
    log: Option<String>,
}

impl Args {
    fn image_source(&self) -> ImageSource {
        match (&self.image, self.no_image) {
            (_, true) => ImageSource::None,
            (Some(path), false) => ImageSource::Path(path.clone()),
            (None, false) => ImageSource::Bytes(DEFAULT_IMAGE.into()),
        }
    }

    fn view_config(&self) -> ViewConfig {
        ViewConfig::default()
            .with_fill_color(self.color)
            .with_image(self.image_source())
            .with_blit_origin(self.origin_x, self.origin_y)
            .with_preferred_fps(self.fps)
    }

    fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: winit::dpi::LogicalSize::new(self.width, self.height),
        }
    }
}

/// Reports the achieved frame rate once per second and closes on Escape.
struct FrameRateReporter {
    window_start: Instant,
    frames: u32,
    accumulated_dt: f32,
}

impl FrameRateReporter {
    fn new() -> Self {
        Self {
            window_start: Instant::now(),
            frames: 0,
            accumulated_dt: 0.0,
        }
    }
}

impl ViewDelegate for FrameRateReporter {
    fn update_logic(&mut self, time: FrameTime) {
        self.accumulated_dt += time.dt;
    }

    fn render_objects(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        self.frames += 1;

        let elapsed = ctx.time.now.saturating_duration_since(self.window_start);
        if elapsed >= Duration::from_secs(1) {
            let (w, h) = ctx.drawable_size;
            log::debug!(
                "{:.1} fps, avg dt {:.2} ms, drawable {w}x{h}",
                self.frames as f64 / elapsed.as_secs_f64(),
                1000.0 * self.accumulated_dt / self.frames as f32,
            );
            self.window_start = ctx.time.now;
            self.frames = 0;
            self.accumulated_dt = 0.0;
        }

        AppControl::Continue
    }

    fn drawable_size_will_change(&mut self, size: (u32, u32)) {
        log::debug!("drawable size will change to {}x{}", size.0, size.1);
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                AppControl::Exit
            }
            _ => AppControl::Continue,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logging = LoggingConfig::default();
    if let Some(filter) = &args.log {
        logging = logging.with_filter(filter.clone());
    }
    init_logging(logging);

    log::info!(
        "starting blitview: fill {:?}, {} fps",
        args.color.to_array(),
        args.fps
    );

    Runtime::run(
        args.runtime_config(),
        GpuInit::default(),
        args.view_config(),
        FrameRateReporter::new(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_bundled_image_and_red_fill() {
        let args = Args::parse_from(["blitview"]);
        let cfg = args.view_config();
        assert!(matches!(cfg.image, ImageSource::Bytes(_)));
        assert_eq!(cfg.fill_color, Color::RED);
        assert_eq!(cfg.preferred_fps, 60);
    }

    #[test]
    fn image_path_and_origin() {
        let args = Args::parse_from([
            "blitview", "--image", "photo.png", "--origin-x", "16", "--origin-y", "8",
        ]);
        let cfg = args.view_config();
        assert!(matches!(cfg.image, ImageSource::Path(ref p) if p.ends_with("photo.png")));
        assert_eq!(cfg.blit_origin, (16, 8));
    }

    #[test]
    fn no_image_disables_overlay() {
        let cfg = Args::parse_from(["blitview", "--no-image"]).view_config();
        assert!(cfg.image.is_none());
    }

    #[test]
    fn color_and_fps_are_parsed() {
        let args = Args::parse_from(["blitview", "--color", "#0000ff", "--fps", "0"]);
        assert_eq!(args.color.to_array(), [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(args.view_config().preferred_fps, 0);
    }

    #[test]
    fn invalid_color_is_rejected() {
        assert!(Args::try_parse_from(["blitview", "--color", "red"]).is_err());
    }

    #[test]
    fn bundled_image_decodes() {
        let asset = blitview_engine::asset::ImageAsset::decode(&ImageSource::Bytes(
            DEFAULT_IMAGE.into(),
        ))
        .unwrap()
        .unwrap();
        assert_eq!(asset.size(), (256, 256));
    }

    #[test]
    fn reporter_ignores_unrelated_events() {
        let mut r = FrameRateReporter::new();
        assert_eq!(
            r.on_window_event(&WindowEvent::Focused(true)),
            AppControl::Continue
        );
    }
}
