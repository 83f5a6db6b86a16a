//! Point-cloud pipelines: the shaded on-screen pass and the pick pass that
//! writes ids into the integer attachment.

use crate::camera::Camera;
use crate::data::{PointCloudGpu, PointInstance, PointUniform};
use crate::renderer::{shaders, targets::PickTargets, GfxError};
use wgpu::util::DeviceExt;

/// On-screen point size in pixels.
const CLOUD_POINT_SIZE_PX: f32 = 7.0;

/// Pick-pass sprite size. Enlarged so the depth-tested, id-carrying sprites
/// tile the screen into nearest-point cells.
const PICK_SPRITE_SIZE_PX: f32 = 48.0;

/// Six corners of a unit quad, expanded per instance in the vertex stage.
const QUAD_CORNERS: [[f32; 2]; 6] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [1.0, 1.0],
    [-1.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
];

pub struct PointPipeline {
    pipeline: wgpu::RenderPipeline,
    pick_pipeline: wgpu::RenderPipeline,
    quad_vb: wgpu::Buffer,
    ubo: wgpu::Buffer,
    pick_ubo: wgpu::Buffer,
    bind: wgpu::BindGroup,
    pick_bind: wgpu::BindGroup,
}

impl PointPipeline {
    pub fn new(
        device: &wgpu::Device,
        surface_fmt: wgpu::TextureFormat,
        depth_fmt: wgpu::TextureFormat,
        pick: &PickTargets,
    ) -> Result<Self, GfxError> {
        let module = shaders::load_module(device, "Point")?;

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Point UBO Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<PointUniform>() as u64
                    ),
                },
                count: None,
            }],
        });

        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Point Quad VB"),
            contents: bytemuck::cast_slice(&QUAD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });

        // Vertex buffer layouts: quad corners + per-point instance data.
        let vbuf_layouts = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    shader_location: 0,
                    offset: 0,
                    format: wgpu::VertexFormat::Float32x2,
                }],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<PointInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        shader_location: 1,
                        offset: 0,
                        format: wgpu::VertexFormat::Float32x3,
                    },
                    wgpu::VertexAttribute {
                        shader_location: 2,
                        offset: 12,
                        format: wgpu::VertexFormat::Uint32,
                    },
                ],
            },
        ];

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Point PipelineLayout"),
            bind_group_layouts: &[&layout],
            push_constant_ranges: &[],
        });

        let depth_state = |format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        };

        let pipeline = shaders::link_pipeline(device, "Point Pipeline", || {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Point Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &module,
                    entry_point: "vs_main",
                    buffers: &vbuf_layouts,
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    ..Default::default()
                },
                depth_stencil: Some(depth_state(depth_fmt)),
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

        let pick_pipeline = shaders::link_pipeline(device, "Pick Pipeline", || {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Pick Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &module,
                    entry_point: "vs_main",
                    buffers: &vbuf_layouts,
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    ..Default::default()
                },
                depth_stencil: Some(depth_state(pick.depth_fmt)),
                fragment: Some(wgpu::FragmentState {
                    module: &module,
                    entry_point: "fs_pick",
                    targets: &[
                        Some(wgpu::ColorTargetState {
                            format: pick.color_fmt,
                            blend: None,
                            write_mask: wgpu::ColorWrites::ALL,
                        }),
                        Some(wgpu::ColorTargetState {
                            format: pick.id_fmt,
                            blend: None,
                            write_mask: wgpu::ColorWrites::ALL,
                        }),
                    ],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
            })
        })?;

        let make_ubo = |label| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: std::mem::size_of::<PointUniform>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };
        let ubo = make_ubo("Point UBO");
        let pick_ubo = make_ubo("Pick UBO");

        let make_bind = |label, buffer: &wgpu::Buffer| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            })
        };
        let bind = make_bind("Point Bind Group", &ubo);
        let pick_bind = make_bind("Pick Bind Group", &pick_ubo);

        Ok(Self {
            pipeline,
            pick_pipeline,
            quad_vb,
            ubo,
            pick_ubo,
            bind,
            pick_bind,
        })
    }

    fn uniform(camera: &Camera, viewport: [f32; 2], point_size_px: f32) -> PointUniform {
        PointUniform {
            view: camera.view.to_cols_array_2d(),
            model: camera.model.to_cols_array_2d(),
            model_view: camera.model_view.to_cols_array_2d(),
            projection: camera.proj.to_cols_array_2d(),
            viewport_size: viewport,
            point_size_px,
            _pad: 0.0,
        }
    }

    /// Uploads the matrices for the on-screen cloud pass.
    pub fn write_scene_uniform(&self, queue: &wgpu::Queue, camera: &Camera, viewport: [f32; 2]) {
        let u = Self::uniform(camera, viewport, CLOUD_POINT_SIZE_PX);
        queue.write_buffer(&self.ubo, 0, bytemuck::bytes_of(&u));
    }

    /// Uploads the matrices for the pick pass (enlarged sprites, pick-target
    /// viewport).
    pub fn write_pick_uniform(&self, queue: &wgpu::Queue, camera: &Camera, pick: &PickTargets) {
        let viewport = [pick.size.0 as f32, pick.size.1 as f32];
        let u = Self::uniform(camera, viewport, PICK_SPRITE_SIZE_PX);
        queue.write_buffer(&self.pick_ubo, 0, bytemuck::bytes_of(&u));
    }

    pub fn draw<'a>(&'a self, rpass: &mut wgpu::RenderPass<'a>, cloud: &'a PointCloudGpu) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind, &[]);
        rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
        rpass.set_vertex_buffer(1, cloud.vtx.slice(..));
        rpass.draw(0..6, 0..cloud.len);
    }

    pub fn draw_pick<'a>(&'a self, rpass: &mut wgpu::RenderPass<'a>, cloud: &'a PointCloudGpu) {
        rpass.set_pipeline(&self.pick_pipeline);
        rpass.set_bind_group(0, &self.pick_bind, &[]);
        rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
        rpass.set_vertex_buffer(1, cloud.vtx.slice(..));
        rpass.draw(0..6, 0..cloud.len);
    }
}
