//! Render target textures: the offscreen pick target (color + integer ID +
//! depth) and the depth buffer paired with the swapchain.

use crate::renderer::GfxError;

/// Offscreen pick render target. Sized once to the configured viewport and
/// kept for the process lifetime, independent of window resizes.
pub struct PickTargets {
    // Private textures - keep alive for the lifetime of the views. The ID
    // texture stays public because read-back copies from it.
    _color_tex: wgpu::Texture,
    pub id_tex: wgpu::Texture,
    _depth_tex: wgpu::Texture,

    pub color: wgpu::TextureView,
    pub id: wgpu::TextureView,
    pub depth: wgpu::TextureView,

    pub color_fmt: wgpu::TextureFormat,
    pub id_fmt: wgpu::TextureFormat,
    pub depth_fmt: wgpu::TextureFormat,

    /// (width, height) in texels.
    pub size: (u32, u32),
}

impl PickTargets {
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Result<Self, GfxError> {
        let tex_size = wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        };

        let color_fmt = wgpu::TextureFormat::Rgba8UnormSrgb;
        // Integer ids: never filtered, never blended.
        let id_fmt = wgpu::TextureFormat::R16Uint;
        let depth_fmt = wgpu::TextureFormat::Depth24Plus;

        let create_tex = |label: &str, format, usage| {
            device.create_texture(&wgpu::TextureDescriptor {
                label: Some(label),
                size: tex_size,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format,
                usage,
                view_formats: &[],
            })
        };

        // Allocation problems here mean a driver/configuration defect, not a
        // recoverable runtime condition; capture them as a fatal error.
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let color_tex = create_tex(
            "Pick Color Target",
            color_fmt,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        let id_tex = create_tex(
            "Pick ID Target",
            id_fmt,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        );
        let depth_tex = create_tex(
            "Pick Depth Target",
            depth_fmt,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(GfxError::TargetAllocation(err.to_string()));
        }

        Ok(Self {
            color: color_tex.create_view(&wgpu::TextureViewDescriptor::default()),
            id: id_tex.create_view(&wgpu::TextureViewDescriptor::default()),
            depth: depth_tex.create_view(&wgpu::TextureViewDescriptor::default()),
            _color_tex: color_tex,
            id_tex,
            _depth_tex: depth_tex,
            color_fmt,
            id_fmt,
            depth_fmt,
            size: (tex_size.width, tex_size.height),
        })
    }
}

/// Depth buffer for the direct-to-swapchain passes. Follows the window size.
pub struct WindowDepth {
    _tex: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub fmt: wgpu::TextureFormat,
}

impl WindowDepth {
    pub fn new(device: &wgpu::Device, size: winit::dpi::PhysicalSize<u32>) -> Self {
        let fmt = wgpu::TextureFormat::Depth24Plus;
        let tex = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Window Depth"),
            size: wgpu::Extent3d {
                width: size.width.max(1),
                height: size.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: fmt,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        Self {
            view: tex.create_view(&wgpu::TextureViewDescriptor::default()),
            _tex: tex,
            fmt,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, size: winit::dpi::PhysicalSize<u32>) {
        *self = Self::new(device, size);
    }
}
