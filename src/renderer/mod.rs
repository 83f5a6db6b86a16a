//! The rendering orchestrator. Owns the GPU context, render targets, shader
//! catalog, the three pipelines and the per-frame draw sequence.

pub mod context;
pub mod picking;
pub mod pipelines;
pub mod shaders;
pub mod targets;

use self::{
    context::GfxContext,
    picking::Picker,
    pipelines::{PointPipeline, QuadBlitPipeline, SpritePipeline},
    targets::{PickTargets, WindowDepth},
};
use crate::{
    camera::Camera,
    data::{CursorPoint, PointCloudGpu},
    input::InputState,
};
use std::sync::Arc;
use winit::window::Window;

/// Fatal initialization failures. All of these stem from static
/// configuration (shader text, formats, driver capabilities), so there is no
/// retry or degraded-mode path; the hosting entry point decides to
/// terminate.
#[derive(Debug, thiserror::Error)]
pub enum GfxError {
    #[error("can't find shader: {0}")]
    MissingShader(String),
    #[error("can't compile shader '{key}':\n{detail}")]
    ShaderCompile { key: String, detail: String },
    #[error("can't link pipeline '{label}':\n{detail}")]
    PipelineLink { label: String, detail: String },
    #[error("can't create render target: {0}")]
    TargetAllocation(String),
}

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.5,
    g: 0.6,
    b: 0.7,
    a: 1.0,
};

/// Owns all rendering-related state.
pub struct Renderer {
    pub gfx: GfxContext,
    window_depth: WindowDepth,
    pub pick_targets: PickTargets,
    points: PointPipeline,
    sprites: SpritePipeline,
    blit: QuadBlitPipeline,
    picker: Picker,
}

impl Renderer {
    /// One-time initialization. `pick_size` fixes the offscreen pick target
    /// for the process lifetime.
    pub async fn new(
        window: Arc<Window>,
        vsync: bool,
        pick_size: (u32, u32),
    ) -> anyhow::Result<Self> {
        let gfx = GfxContext::new(window, vsync).await?;
        let size = gfx.size;

        let window_depth = WindowDepth::new(&gfx.device, size);
        let pick_targets = PickTargets::new(&gfx.device, pick_size.0, pick_size.1)?;
        let points = PointPipeline::new(&gfx.device, gfx.config.format, window_depth.fmt, &pick_targets)?;
        let sprites = SpritePipeline::new(&gfx.device, gfx.config.format, window_depth.fmt)?;
        let blit = QuadBlitPipeline::new(&gfx.device, gfx.config.format, &pick_targets, size)?;
        let picker = Picker::new(&gfx.device);

        Ok(Self {
            gfx,
            window_depth,
            pick_targets,
            points,
            sprites,
            blit,
            picker,
        })
    }

    /// Follows the window size. The pick target and the camera's perspective
    /// projection are deliberately untouched.
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.gfx.resize(new_size);
            self.window_depth.resize(&self.gfx.device, new_size);
            self.blit.refit(&self.gfx.queue, new_size.width, new_size.height);
        }
    }

    /// The per-frame draw sequence:
    /// 1. the point cloud (or, in the pick debug view, the id-colored pick
    ///    pass letterboxed onto the swapchain),
    /// 2. after a depth clear: nailboard markers while dragging, then the
    ///    cursor sprite once any pointer event has been seen.
    pub fn render(
        &mut self,
        swap_view: &wgpu::TextureView,
        camera: &Camera,
        input: &InputState,
        cloud: &PointCloudGpu,
        cursor: &mut CursorPoint,
        show_pick_view: bool,
    ) {
        let queue = &self.gfx.queue;
        let viewport = [self.gfx.size.width as f32, self.gfx.size.height as f32];

        self.points.write_scene_uniform(queue, camera, viewport);
        if show_pick_view {
            self.points.write_pick_uniform(queue, camera, &self.pick_targets);
        }
        if input.dragging() {
            self.sprites.write_board_uniform(queue, camera, viewport);
        }
        if let Some((x, y)) = input.position() {
            cursor.set_position(queue, [x, y, 0.0]);
            self.sprites.write_cursor_uniform(queue, camera, viewport);
        }

        let mut encoder = self
            .gfx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        if show_pick_view {
            // Voronoi cells into the offscreen target...
            {
                let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Pick View Pass"),
                    color_attachments: &[
                        Some(wgpu::RenderPassColorAttachment {
                            view: &self.pick_targets.color,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                                store: wgpu::StoreOp::Store,
                            },
                        }),
                        Some(wgpu::RenderPassColorAttachment {
                            view: &self.pick_targets.id,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                                store: wgpu::StoreOp::Store,
                            },
                        }),
                    ],
                    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                        view: &self.pick_targets.depth,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
                self.points.draw_pick(&mut pass, cloud);
            }

            // ...then letterboxed onto the swapchain.
            {
                let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Blit Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: swap_view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
                self.blit.draw(&mut pass);
            }
        } else {
            // Pass 1: the shaded cloud.
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Cloud Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: swap_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.window_depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.points.draw(&mut pass, cloud);
        }

        // Pass 2: sprites composite over the scene; only depth restarts.
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Sprite Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: swap_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.window_depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if input.dragging() {
                self.sprites.draw_board(&mut pass, cloud);
            }
            // Nothing pointer-related is drawn before the first event.
            if input.position().is_some() {
                self.sprites.draw_cursor(&mut pass, cursor);
            }
        }

        self.gfx.queue.submit(std::iter::once(encoder.finish()));
    }

    /// Resolves the point under the window coordinate (x, y) via the ID
    /// buffer. The pick uniforms are written here so the pass sees the
    /// current frame's matrices.
    pub fn pick(
        &self,
        camera: &Camera,
        cloud: &PointCloudGpu,
        x: u32,
        y: u32,
    ) -> anyhow::Result<Option<u16>> {
        self.points
            .write_pick_uniform(&self.gfx.queue, camera, &self.pick_targets);
        self.picker
            .pick(&self.gfx, &self.pick_targets, &self.points, cloud, x, y)
    }
}
