//! Letterboxed blit of the offscreen pick target to the swapchain, used by
//! the pick debug view.

use crate::data::{letterbox_quad, QuadVertex};
use crate::renderer::{shaders, targets::PickTargets, GfxError};
use wgpu::util::DeviceExt;

pub struct QuadBlitPipeline {
    pipeline: wgpu::RenderPipeline,
    bind: wgpu::BindGroup,
    vtx: wgpu::Buffer,
    /// Pick-target dimensions, kept for refits on window resize.
    source_size: (u32, u32),
}

impl QuadBlitPipeline {
    pub fn new(
        device: &wgpu::Device,
        surface_fmt: wgpu::TextureFormat,
        pick: &PickTargets,
        dest_size: winit::dpi::PhysicalSize<u32>,
    ) -> Result<Self, GfxError> {
        let module = shaders::load_module(device, "Quad")?;

        // Ids must never be interpolated and the color target matches the
        // output pixel grid anyway: nearest filtering, clamped addressing.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Blit Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Blit BGL"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let bind = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Blit Bind Group"),
            layout: &bind_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&pick.color),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let quad = letterbox_quad(
            pick.size.0 as i32,
            pick.size.1 as i32,
            dest_size.width.max(1),
            dest_size.height.max(1),
        );
        let vtx = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Blit Quad VB"),
            contents: bytemuck::cast_slice(&quad),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Blit PipelineLayout"),
            bind_group_layouts: &[&bind_layout],
            push_constant_ranges: &[],
        });

        let pipeline = shaders::link_pipeline(device, "Blit Pipeline", || {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Blit Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &module,
                    entry_point: "vs_main",
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<QuadVertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &[
                            wgpu::VertexAttribute {
                                shader_location: 0,
                                offset: 0,
                                format: wgpu::VertexFormat::Float32x2,
                            },
                            wgpu::VertexAttribute {
                                shader_location: 1,
                                offset: 8,
                                format: wgpu::VertexFormat::Float32x2,
                            },
                        ],
                    }],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleStrip,
                    ..Default::default()
                },
                depth_stencil: None,
                fragment: Some(wgpu::FragmentState {
                    module: &module,
                    entry_point: "fs_main",
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_fmt,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
            })
        })?;

        Ok(Self {
            pipeline,
            bind,
            vtx,
            source_size: pick.size,
        })
    }

    /// Refits the quad when the destination viewport changes.
    pub fn refit(&self, queue: &wgpu::Queue, dest_w: u32, dest_h: u32) {
        let quad = letterbox_quad(
            self.source_size.0 as i32,
            self.source_size.1 as i32,
            dest_w.max(1),
            dest_h.max(1),
        );
        queue.write_buffer(&self.vtx, 0, bytemuck::cast_slice(&quad));
    }

    pub fn draw<'a>(&'a self, rpass: &mut wgpu::RenderPass<'a>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind, &[]);
        rpass.set_vertex_buffer(0, self.vtx.slice(..));
        rpass.draw(0..4, 0..1);
    }
}
