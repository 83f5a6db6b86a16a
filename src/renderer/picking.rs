//! ID-buffer read-back: the pick extension.
//!
//! The pick pass draws every point as an enlarged, depth-tested sprite that
//! carries its id into the R16Uint attachment, so the texel under the cursor
//! names the nearest point. This module copies that one texel back to the CPU.

use crate::data::PointCloudGpu;
use crate::renderer::{context::GfxContext, pipelines::PointPipeline, targets::PickTargets};
use anyhow::{anyhow, Result};

pub struct Picker {
    staging: wgpu::Buffer,
}

impl Picker {
    pub fn new(device: &wgpu::Device) -> Self {
        let staging = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Pick Staging"),
            size: wgpu::COPY_BUFFER_ALIGNMENT.max(4),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });
        Self { staging }
    }

    /// Renders the pick pass into `targets` and returns the id of the point
    /// whose sprite covers the window coordinate (x, y), or `None` over
    /// empty space or outside the pick target.
    ///
    /// Blocks until the GPU finishes; acceptable for a demo picking once per
    /// click.
    pub fn pick(
        &self,
        gfx: &GfxContext,
        targets: &PickTargets,
        points: &PointPipeline,
        cloud: &PointCloudGpu,
        x: u32,
        y: u32,
    ) -> Result<Option<u16>> {
        if x >= targets.size.0 || y >= targets.size.1 {
            return Ok(None);
        }

        let mut encoder = gfx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Pick Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Pick Pass"),
                color_attachments: &[
                    Some(wgpu::RenderPassColorAttachment {
                        view: &targets.color,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                            store: wgpu::StoreOp::Store,
                        },
                    }),
                    Some(wgpu::RenderPassColorAttachment {
                        view: &targets.id,
                        resolve_target: None,
                        // Clear to 0 = "no point".
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                            store: wgpu::StoreOp::Store,
                        },
                    }),
                ],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &targets.depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            points.draw_pick(&mut pass, cloud);
        }

        // Single-texel copy; bytes_per_row may stay unset for one row.
        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &targets.id_tex,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &self.staging,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: None,
                    rows_per_image: None,
                },
            },
            wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
        );

        gfx.queue.submit(std::iter::once(encoder.finish()));

        let slice = self.staging.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        gfx.device.poll(wgpu::Maintain::Wait);
        rx.recv()
            .map_err(|_| anyhow!("pick read-back callback dropped"))??;

        let id = {
            let mapped = slice.get_mapped_range();
            u16::from_le_bytes([mapped[0], mapped[1]])
        };
        self.staging.unmap();

        Ok((id != 0).then_some(id))
    }
}
