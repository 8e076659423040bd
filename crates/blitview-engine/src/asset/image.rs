use std::borrow::Cow;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::render::CANVAS_FORMAT;

/// Where the overlay image comes from.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ImageSource {
    /// No overlay; frames show the fill color only.
    #[default]
    None,
    /// Image file on disk; format is detected from the contents.
    Path(PathBuf),
    /// Encoded image bytes (PNG, JPEG, ...), typically from `include_bytes!`.
    Bytes(Cow<'static, [u8]>),
}

impl ImageSource {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Decoded RGBA8 image held in CPU memory.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8 rows, sRGB-encoded, top row first.
    pub pixels: Vec<u8>,
}

impl ImageAsset {
    /// Decodes `source`. Returns `Ok(None)` for [`ImageSource::None`].
    pub fn decode(source: &ImageSource) -> Result<Option<Self>> {
        let img = match source {
            ImageSource::None => return Ok(None),
            ImageSource::Path(path) => ::image::ImageReader::open(path)
                .with_context(|| format!("failed to open image {}", path.display()))?
                .with_guessed_format()
                .with_context(|| format!("failed to detect format of {}", path.display()))?
                .decode()
                .with_context(|| format!("failed to decode image {}", path.display()))?,
            ImageSource::Bytes(bytes) => ::image::load_from_memory(bytes)
                .context("failed to decode embedded image")?,
        };

        let rgba = img.into_rgba8();
        let (width, height) = rgba.dimensions();
        anyhow::ensure!(width > 0 && height > 0, "image has zero size");

        Ok(Some(Self {
            width,
            height,
            pixels: rgba.into_raw(),
        }))
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// GPU-resident copy of an [`ImageAsset`], in the canvas format so it can be
/// blitted without conversion.
pub struct ImageTexture {
    texture: wgpu::Texture,
    size: (u32, u32),
}

impl ImageTexture {
    pub fn upload(device: &wgpu::Device, queue: &wgpu::Queue, asset: &ImageAsset) -> Result<Self> {
        let max = device.limits().max_texture_dimension_2d;
        anyhow::ensure!(
            asset.width <= max && asset.height <= max,
            "image {}x{} exceeds max texture dimension {max}",
            asset.width,
            asset.height
        );

        let extent = wgpu::Extent3d {
            width: asset.width,
            height: asset.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("blitview image"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: CANVAS_FORMAT,
            usage: wgpu::TextureUsages::COPY_SRC | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &asset.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * asset.width),
                rows_per_image: Some(asset.height),
            },
            extent,
        );

        Ok(Self {
            texture,
            size: asset.size(),
        })
    }

    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba(px)));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn none_source_decodes_to_nothing() {
        assert!(ImageAsset::decode(&ImageSource::None).unwrap().is_none());
    }

    #[test]
    fn decodes_png_bytes_to_rgba8() {
        let bytes = png_bytes(3, 2, [10, 20, 30, 255]);
        let asset = ImageAsset::decode(&ImageSource::Bytes(bytes.into()))
            .unwrap()
            .unwrap();
        assert_eq!(asset.size(), (3, 2));
        assert_eq!(asset.pixels.len(), 3 * 2 * 4);
        assert_eq!(&asset.pixels[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn garbage_bytes_are_an_error() {
        let src = ImageSource::Bytes(Cow::Borrowed(b"not an image"));
        assert!(ImageAsset::decode(&src).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let src = ImageSource::Path(PathBuf::from("/definitely/not/here.png"));
        let err = ImageAsset::decode(&src).unwrap_err();
        assert!(format!("{err:#}").contains("failed to open image"));
    }

    #[test]
    fn decodes_from_path() {
        let path = std::env::temp_dir().join(format!("blitview-test-{}.png", std::process::id()));
        std::fs::write(&path, png_bytes(5, 4, [255, 0, 0, 255])).unwrap();

        let asset = ImageAsset::decode(&ImageSource::Path(path.clone()))
            .unwrap()
            .unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(asset.size(), (5, 4));
    }
}
