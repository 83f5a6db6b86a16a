//! GPU data types shared by the pipelines. Layouts must match the WGSL
//! structs in `shaders/`.

/// Per-point instance data for both the cloud and the single cursor point.
/// Must match the instance inputs in `point.wgsl` and `sprite.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointInstance {
    pub position: [f32; 3],
    /// 1-based pick id; 0 is reserved for "no point" in the ID attachment.
    pub id: u32,
}

/// Quad vertex (position + texcoord) for the letterboxed blit, in
/// triangle-strip order.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub texcoord: [f32; 2],
}

/// Uniforms for the point-cloud program. Must match `PointUniform` in
/// `point.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointUniform {
    pub view: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub model_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub viewport_size: [f32; 2],
    pub point_size_px: f32,
    pub _pad: f32,
}

// Compile-time safety check: buffer size must match the WGSL-reflected size.
const _: [(); 272] = [(); core::mem::size_of::<PointUniform>()];

/// Uniforms for the sprite program (nailboard markers and the cursor).
/// Must match `SpriteUniform` in `sprite.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteUniform {
    pub view: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub model_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub sprite_size: [f32; 2],
    pub half_viewport: [f32; 2],
    pub inverse_viewport: [f32; 2],
    /// Nonzero draws every sprite as a square marker instead of the round
    /// cursor.
    pub nailboard: u32,
    pub _pad: f32,
}

const _: [(); 288] = [(); core::mem::size_of::<SpriteUniform>()];
