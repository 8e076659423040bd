use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::paint::Color;

use super::canvas::{Canvas, CANVAS_FORMAT};
use super::dispatch::{dispatch_size, WorkgroupSize};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct FillParams {
    color: [f32; 4],
}

/// Compute pass that fills the canvas with a solid color.
pub struct FillPass {
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    params_ubo: wgpu::Buffer,

    /// Bound to the current canvas; rebuilt by `bind` when the canvas changes.
    bind_group: Option<wgpu::BindGroup>,

    color: Color,
}

impl FillPass {
    pub fn new(device: &wgpu::Device, color: Color) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("blitview fill shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/fill.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("blitview fill bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::StorageTexture {
                        access: wgpu::StorageTextureAccess::WriteOnly,
                        format: CANVAS_FORMAT,
                        view_dimension: wgpu::TextureViewDimension::D2,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<FillParams>() as u64,
                        ),
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("blitview fill pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("blitview fill pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: Some("fill_main"),
            compilation_options: Default::default(),
            cache: None,
        });

        let params_ubo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("blitview fill params ubo"),
            contents: bytemuck::bytes_of(&FillParams {
                color: color.to_array(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            pipeline,
            bind_group_layout,
            params_ubo,
            bind_group: None,
            color,
        }
    }

    /// Updates the fill color; takes effect on the next submitted frame.
    pub fn set_color(&mut self, queue: &wgpu::Queue, color: Color) {
        if color == self.color {
            return;
        }
        self.color = color;
        queue.write_buffer(
            &self.params_ubo,
            0,
            bytemuck::bytes_of(&FillParams {
                color: color.to_array(),
            }),
        );
    }

    /// Binds the pass to `canvas`. Must be called whenever the canvas is recreated.
    pub fn bind(&mut self, device: &wgpu::Device, canvas: &Canvas) {
        self.bind_group = Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("blitview fill bind group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(canvas.view()),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: self.params_ubo.as_entire_binding(),
                },
            ],
        }));
    }

    /// Records one compute pass covering a `size` pixel grid.
    pub fn encode(&self, encoder: &mut wgpu::CommandEncoder, size: (u32, u32)) {
        let Some(bind_group) = self.bind_group.as_ref() else {
            log::debug!("FillPass: not bound to a canvas; skipping dispatch");
            return;
        };
        let Some((groups_x, groups_y)) = dispatch_size(size.0, size.1, WorkgroupSize::FILL) else {
            return;
        };

        let mut cpass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("blitview fill pass"),
            timestamp_writes: None,
        });
        cpass.set_pipeline(&self.pipeline);
        cpass.set_bind_group(0, bind_group, &[]);
        cpass.dispatch_workgroups(groups_x, groups_y, 1);
    }
}
