//! Sprite pipelines: nailboard markers drawn over the cloud while dragging,
//! and the screen-space cursor sprite. Both share one WGSL module; the
//! cursor variant disables the depth test.

use crate::camera::Camera;
use crate::data::{CursorPoint, PointCloudGpu, PointInstance, SpriteUniform};
use crate::renderer::{shaders, GfxError};
use glam::Mat4;
use wgpu::util::DeviceExt;

const NAILBOARD_SPRITE_SIZE_PX: f32 = 64.0;
const CURSOR_SPRITE_SIZE_PX: f32 = 32.0;

const QUAD_CORNERS: [[f32; 2]; 6] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [1.0, 1.0],
    [-1.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
];

pub struct SpritePipeline {
    board_pipeline: wgpu::RenderPipeline,
    cursor_pipeline: wgpu::RenderPipeline,
    quad_vb: wgpu::Buffer,
    board_ubo: wgpu::Buffer,
    cursor_ubo: wgpu::Buffer,
    board_bind: wgpu::BindGroup,
    cursor_bind: wgpu::BindGroup,
}

impl SpritePipeline {
    pub fn new(
        device: &wgpu::Device,
        surface_fmt: wgpu::TextureFormat,
        depth_fmt: wgpu::TextureFormat,
    ) -> Result<Self, GfxError> {
        let module = shaders::load_module(device, "Sprite")?;

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Sprite UBO Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<SpriteUniform>() as u64
                    ),
                },
                count: None,
            }],
        });

        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Quad VB"),
            contents: bytemuck::cast_slice(&QUAD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });

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
            label: Some("Sprite PipelineLayout"),
            bind_group_layouts: &[&layout],
            push_constant_ranges: &[],
        });

        // The nailboard pass depth-tests against itself after a depth clear;
        // the cursor pass always draws on top.
        let make_pipeline = |label: &str, depth_compare| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
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
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: depth_fmt,
                    depth_write_enabled: depth_compare != wgpu::CompareFunction::Always,
                    depth_compare,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                fragment: Some(wgpu::FragmentState {
                    module: &module,
                    entry_point: "fs_main",
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_fmt,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
            })
        };

        let board_pipeline = shaders::link_pipeline(device, "Nailboard Pipeline", || {
            make_pipeline("Nailboard Pipeline", wgpu::CompareFunction::LessEqual)
        })?;
        let cursor_pipeline = shaders::link_pipeline(device, "Cursor Pipeline", || {
            make_pipeline("Cursor Pipeline", wgpu::CompareFunction::Always)
        })?;

        let make_ubo = |label| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: std::mem::size_of::<SpriteUniform>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };
        let board_ubo = make_ubo("Nailboard UBO");
        let cursor_ubo = make_ubo("Cursor UBO");

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
        let board_bind = make_bind("Nailboard Bind Group", &board_ubo);
        let cursor_bind = make_bind("Cursor Bind Group", &cursor_ubo);

        Ok(Self {
            board_pipeline,
            cursor_pipeline,
            quad_vb,
            board_ubo,
            cursor_ubo,
            board_bind,
            cursor_bind,
        })
    }

    /// Uploads the nailboard uniforms: scene matrices plus the screen-space
    /// mapping parameters.
    pub fn write_board_uniform(&self, queue: &wgpu::Queue, camera: &Camera, viewport: [f32; 2]) {
        let u = SpriteUniform {
            view: camera.view.to_cols_array_2d(),
            model: camera.model.to_cols_array_2d(),
            model_view: camera.model_view.to_cols_array_2d(),
            projection: camera.proj.to_cols_array_2d(),
            sprite_size: [NAILBOARD_SPRITE_SIZE_PX; 2],
            half_viewport: [viewport[0] / 2.0, viewport[1] / 2.0],
            inverse_viewport: [1.0 / viewport[0], 1.0 / viewport[1]],
            nailboard: 1,
            _pad: 0.0,
        };
        queue.write_buffer(&self.board_ubo, 0, bytemuck::bytes_of(&u));
    }

    /// Uploads the cursor uniforms: identity modelview under the screen-space
    /// orthographic projection.
    pub fn write_cursor_uniform(&self, queue: &wgpu::Queue, camera: &Camera, viewport: [f32; 2]) {
        let identity = Mat4::IDENTITY.to_cols_array_2d();
        let u = SpriteUniform {
            view: identity,
            model: identity,
            model_view: identity,
            projection: camera.ortho.to_cols_array_2d(),
            sprite_size: [CURSOR_SPRITE_SIZE_PX; 2],
            half_viewport: [viewport[0] / 2.0, viewport[1] / 2.0],
            inverse_viewport: [1.0 / viewport[0], 1.0 / viewport[1]],
            nailboard: 0,
            _pad: 0.0,
        };
        queue.write_buffer(&self.cursor_ubo, 0, bytemuck::bytes_of(&u));
    }

    /// Draws every cloud point as a square marker.
    pub fn draw_board<'a>(&'a self, rpass: &mut wgpu::RenderPass<'a>, cloud: &'a PointCloudGpu) {
        rpass.set_pipeline(&self.board_pipeline);
        rpass.set_bind_group(0, &self.board_bind, &[]);
        rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
        rpass.set_vertex_buffer(1, cloud.vtx.slice(..));
        rpass.draw(0..6, 0..cloud.len);
    }

    /// Draws the single cursor sprite.
    pub fn draw_cursor<'a>(&'a self, rpass: &mut wgpu::RenderPass<'a>, cursor: &'a CursorPoint) {
        rpass.set_pipeline(&self.cursor_pipeline);
        rpass.set_bind_group(0, &self.cursor_bind, &[]);
        rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
        rpass.set_vertex_buffer(1, cursor.vtx.slice(..));
        rpass.draw(0..6, 0..1);
    }
}
