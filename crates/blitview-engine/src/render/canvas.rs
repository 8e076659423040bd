/// Storage format of the canvas.
///
/// `Rgba8Unorm` supports write-only storage access without extra features and
/// matches the layout of decoded RGBA8 images, so the blit is a plain copy.
pub const CANVAS_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Offscreen render target sized to the drawable.
///
/// The fill kernel writes into it, the image is copied onto it, and the
/// present pass reads it back. Swapchain textures are not guaranteed to allow
/// storage or copy usage, hence the intermediate.
///
/// The canvas holds sRGB-encoded bytes behind a single `Rgba8Unorm` view; no
/// reinterpreting view formats are declared, so it is creatable on downlevel
/// backends. Decoding for sRGB surfaces happens in the present shader.
pub struct Canvas {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    size: (u32, u32),
}

impl Canvas {
    /// Creates a canvas of `size` physical pixels (at least 1×1).
    pub fn new(device: &wgpu::Device, size: (u32, u32)) -> Self {
        let (width, height) = (size.0.max(1), size.1.max(1));

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("blitview canvas"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: CANVAS_FORMAT,
            usage: wgpu::TextureUsages::STORAGE_BINDING
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("blitview canvas view"),
            ..Default::default()
        });

        Self {
            texture,
            view,
            size: (width, height),
        }
    }

    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    /// Used both as the fill kernel's storage binding and the present pass's
    /// sampled binding; the two never share a pass.
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Whether this canvas can back a drawable of `size`.
    pub fn matches(&self, size: (u32, u32)) -> bool {
        self.size == (size.0.max(1), size.1.max(1))
    }
}
