pub mod points;
pub mod quad_blit;
pub mod sprites;

pub use points::PointPipeline;
pub use quad_blit::QuadBlitPipeline;
pub use sprites::SpritePipeline;
