use super::canvas::Canvas;
use super::ctx::RenderTarget;

/// Fragment entry point for a surface format.
///
/// The canvas stores sRGB-encoded bytes. An sRGB surface encodes on write, so
/// its entry point decodes first; any other format receives the bytes as is.
pub fn fragment_entry_point(surface_format: wgpu::TextureFormat) -> &'static str {
    if surface_format.is_srgb() {
        "fs_main_srgb"
    } else {
        "fs_main"
    }
}

/// Render pass that copies the canvas onto the drawable.
///
/// The drawable's format is owned by the surface, so a render pass (rather
/// than a copy) performs the format conversion.
pub struct PresentPass {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: Option<wgpu::BindGroup>,
}

impl PresentPass {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("blitview present shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/present.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("blitview present bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: false },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("blitview present pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("blitview present pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(fragment_entry_point(surface_format)),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            bind_group_layout,
            bind_group: None,
        }
    }

    /// Binds the pass to `canvas`. Must be called whenever the canvas is recreated.
    pub fn bind(&mut self, device: &wgpu::Device, canvas: &Canvas) {
        self.bind_group = Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("blitview present bind group"),
            layout: &self.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(canvas.view()),
            }],
        }));
    }

    pub fn encode(&self, target: &mut RenderTarget<'_>) {
        let Some(bind_group) = self.bind_group.as_ref() else {
            log::debug!("PresentPass: not bound to a canvas; skipping");
            return;
        };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("blitview present pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.draw(0..3, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_surfaces_decode_the_canvas() {
        assert_eq!(
            fragment_entry_point(wgpu::TextureFormat::Bgra8UnormSrgb),
            "fs_main_srgb"
        );
        assert_eq!(
            fragment_entry_point(wgpu::TextureFormat::Rgba8UnormSrgb),
            "fs_main_srgb"
        );
    }

    #[test]
    fn linear_surfaces_pass_bytes_through() {
        assert_eq!(fragment_entry_point(wgpu::TextureFormat::Bgra8Unorm), "fs_main");
        assert_eq!(fragment_entry_point(wgpu::TextureFormat::Rgba16Float), "fs_main");
    }

    #[test]
    fn both_entry_points_exist_in_the_shader() {
        let src = include_str!("shaders/present.wgsl");
        assert!(src.contains("fn fs_main("));
        assert!(src.contains("fn fs_main_srgb("));
    }
}
