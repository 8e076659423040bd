/// A single acquired drawable plus the command encoder recording into it.
///
/// Short-lived: holding the surface texture prevents acquisition of the next
/// drawable. Dropping it after submission presents.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl GpuFrame {
    /// Size of the acquired drawable in physical pixels.
    pub fn drawable_size(&self) -> (u32, u32) {
        let t = &self.surface_texture.texture;
        (t.width(), t.height())
    }
}
