/// How the window surface and logical device are set up.
///
/// The defaults target the widest range of adapters: an sRGB surface when one
/// is offered, vsync'd presentation and no optional features.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB surface format if the surface offers one.
    pub prefer_srgb: bool,

    /// `Fifo` is the only mode every surface must support; it also caps the
    /// frame rate at the display refresh.
    pub present_mode: wgpu::PresentMode,

    /// Requested compositing alpha mode; ignored when the surface lacks it.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Storage writes to `Rgba8Unorm` need no optional features.
    pub required_features: wgpu::Features,

    /// Baseline limits. Texture dimension limits are raised to what the
    /// adapter supports so large drawables and images still fit.
    pub required_limits: wgpu::Limits,

    /// Frames the surface may queue ahead of the display. Backends treat it
    /// as a request, not a guarantee.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_request_no_optional_capabilities() {
        let init = GpuInit::default();
        assert!(init.prefer_srgb);
        assert_eq!(init.present_mode, wgpu::PresentMode::Fifo);
        assert!(init.required_features.is_empty());
        // Compute with one storage texture must fit the requested baseline.
        assert!(init.required_limits.max_storage_textures_per_shader_stage >= 1);
        assert!(init.required_limits.max_compute_invocations_per_workgroup >= 64);
    }
}
