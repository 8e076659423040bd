/// Portion of a source texture copied onto a destination.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BlitRegion {
    /// Top-left corner in the destination.
    pub dst_origin: (u32, u32),
    /// Copied width/height; the source is always read from (0, 0).
    pub extent: (u32, u32),
}

/// Computes the copy of a `src`-sized image placed at `origin` on a `dst`-sized
/// texture, clipped to the destination bounds.
///
/// Returns `None` when the clipped region is empty.
pub fn blit_region(src: (u32, u32), dst: (u32, u32), origin: (u32, u32)) -> Option<BlitRegion> {
    let width = src.0.min(dst.0.saturating_sub(origin.0));
    let height = src.1.min(dst.1.saturating_sub(origin.1));

    if width == 0 || height == 0 {
        return None;
    }

    Some(BlitRegion {
        dst_origin: origin,
        extent: (width, height),
    })
}

/// Records a texture-to-texture copy of `region` from `src` into `dst`.
///
/// Both textures must share a format (copies do not convert).
pub fn encode_blit(
    encoder: &mut wgpu::CommandEncoder,
    src: &wgpu::Texture,
    dst: &wgpu::Texture,
    region: BlitRegion,
) {
    encoder.copy_texture_to_texture(
        wgpu::TexelCopyTextureInfo {
            texture: src,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyTextureInfo {
            texture: dst,
            mip_level: 0,
            origin: wgpu::Origin3d {
                x: region.dst_origin.0,
                y: region.dst_origin.1,
                z: 0,
            },
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::Extent3d {
            width: region.extent.0,
            height: region.extent.1,
            depth_or_array_layers: 1,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_image_copies_whole() {
        let r = blit_region((100, 50), (800, 600), (0, 0)).unwrap();
        assert_eq!(r.extent, (100, 50));
        assert_eq!(r.dst_origin, (0, 0));
    }

    #[test]
    fn large_image_is_clipped_to_drawable() {
        let r = blit_region((2048, 2048), (800, 600), (0, 0)).unwrap();
        assert_eq!(r.extent, (800, 600));
    }

    #[test]
    fn offset_reduces_available_space() {
        let r = blit_region((500, 500), (800, 600), (400, 200)).unwrap();
        assert_eq!(r.extent, (400, 400));
        assert_eq!(r.dst_origin, (400, 200));
    }

    #[test]
    fn origin_outside_destination_copies_nothing() {
        assert_eq!(blit_region((10, 10), (800, 600), (800, 0)), None);
        assert_eq!(blit_region((10, 10), (800, 600), (0, 9000)), None);
    }

    #[test]
    fn empty_source_copies_nothing() {
        assert_eq!(blit_region((0, 10), (800, 600), (0, 0)), None);
    }
}
