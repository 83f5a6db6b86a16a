//! CPU-side geometry builders and the GPU data structures they fill.

pub mod cursor;
pub mod point_cloud;
pub mod quad;
pub mod types;

pub use self::cursor::CursorPoint;
pub use self::point_cloud::{sample_point_cloud, PointCloudGpu};
pub use self::quad::letterbox_quad;
pub use self::types::{PointInstance, PointUniform, QuadVertex, SpriteUniform};
