//! GPU-based "Voronoi picking" demo.
//!
//! Renders a rotating 3D point cloud and resolves which point the pointer is
//! over purely on the GPU: every point is drawn as an enlarged, depth-tested
//! sprite carrying its id into an integer offscreen attachment, so the id
//! under the cursor is the nearest point. No CPU-side spatial index.

pub mod app;
pub mod camera;
pub mod data;
pub mod input;
pub mod renderer;
