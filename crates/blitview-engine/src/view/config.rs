use std::path::PathBuf;

use crate::asset::ImageSource;
use crate::paint::Color;

/// Preferred presentation rate when none is configured.
pub const DEFAULT_FPS: u32 = 60;

/// What the view draws and how often.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Color written by the compute fill.
    pub fill_color: Color,

    /// Image blitted over the fill each frame.
    pub image: ImageSource,

    /// Destination of the image's top-left corner, in physical pixels.
    pub blit_origin: (u32, u32),

    /// Target frames per second; `0` disables pacing.
    pub preferred_fps: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            fill_color: Color::RED,
            image: ImageSource::None,
            blit_origin: (0, 0),
            preferred_fps: DEFAULT_FPS,
        }
    }
}

impl ViewConfig {
    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    pub fn with_image(mut self, source: ImageSource) -> Self {
        self.image = source;
        self
    }

    pub fn with_image_path(self, path: impl Into<PathBuf>) -> Self {
        self.with_image(ImageSource::Path(path.into()))
    }

    pub fn with_blit_origin(mut self, x: u32, y: u32) -> Self {
        self.blit_origin = (x, y);
        self
    }

    pub fn with_preferred_fps(mut self, fps: u32) -> Self {
        self.preferred_fps = fps;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_red_at_sixty_fps() {
        let cfg = ViewConfig::default();
        assert_eq!(cfg.fill_color, Color::RED);
        assert_eq!(cfg.preferred_fps, 60);
        assert_eq!(cfg.blit_origin, (0, 0));
        assert!(cfg.image.is_none());
    }

    #[test]
    fn builder_sets_fields() {
        let cfg = ViewConfig::default()
            .with_image_path("p3.png")
            .with_blit_origin(10, 20)
            .with_preferred_fps(30)
            .with_fill_color(Color::BLACK);

        assert!(matches!(cfg.image, ImageSource::Path(ref p) if p.ends_with("p3.png")));
        assert_eq!(cfg.blit_origin, (10, 20));
        assert_eq!(cfg.preferred_fps, 30);
        assert_eq!(cfg.fill_color, Color::BLACK);
    }
}
