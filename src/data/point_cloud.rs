//! Random point cloud generation and its one-time GPU upload.

use crate::data::types::PointInstance;
use rand::Rng;
use wgpu::util::DeviceExt;

/// Samples `count` points uniformly inside a sphere of `radius` by rejection
/// sampling: candidates are drawn from the bounding cube and discarded when
/// they fall outside the sphere, retrying the same slot until it fills. The
/// expected oversampling factor is 6/pi (~1.9x).
///
/// Point ids are assigned 1..=count; 0 stays reserved for "no point".
pub fn sample_point_cloud<R: Rng>(radius: f32, count: usize, rng: &mut R) -> Vec<PointInstance> {
    let mut points = Vec::with_capacity(count);
    while points.len() < count {
        let x = rng.gen_range(-radius..=radius);
        let y = rng.gen_range(-radius..=radius);
        let z = rng.gen_range(-radius..=radius);
        if x * x + y * y + z * z > radius * radius {
            continue;
        }
        points.push(PointInstance {
            position: [x, y, z],
            id: points.len() as u32 + 1,
        });
    }
    points
}

/// Immutable instance buffer holding the whole cloud.
pub struct PointCloudGpu {
    pub vtx: wgpu::Buffer,
    pub len: u32,
}

impl PointCloudGpu {
    pub fn new(device: &wgpu::Device, radius: f32, count: usize) -> Self {
        let instances = sample_point_cloud(radius, count, &mut rand::thread_rng());

        let vtx = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cloud Instances"),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            vtx,
            len: instances.len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_sampler_yields_exact_count_inside_sphere() {
        let mut rng = StdRng::seed_from_u64(7);
        let points = sample_point_cloud(5.0, 400, &mut rng);
        assert_eq!(points.len(), 400);
        for p in &points {
            let [x, y, z] = p.position;
            assert!(x * x + y * y + z * z <= 25.0 + 1e-4);
        }
    }

    #[test]
    fn test_sampler_assigns_one_based_ids() {
        let mut rng = StdRng::seed_from_u64(7);
        let points = sample_point_cloud(1.0, 16, &mut rng);
        for (i, p) in points.iter().enumerate() {
            assert_eq!(p.id, i as u32 + 1);
        }
    }

    #[test]
    fn test_sampler_uses_whole_cube_extent() {
        // With enough samples some accepted point must leave the inscribed
        // half-radius ball, otherwise we are not sampling the full sphere.
        let mut rng = StdRng::seed_from_u64(42);
        let points = sample_point_cloud(5.0, 400, &mut rng);
        assert!(points.iter().any(|p| {
            let [x, y, z] = p.position;
            x * x + y * y + z * z > 2.5 * 2.5
        }));
    }
}
