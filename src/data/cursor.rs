//! The single mutable point backing the cursor sprite.

use crate::data::types::PointInstance;
use wgpu::util::DeviceExt;

/// CPU mirror of the cursor instance. Holds the most recent position only;
/// every update replaces the previous one. Last write wins; no history.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorState {
    position: [f32; 3],
}

impl CursorState {
    pub fn set(&mut self, position: [f32; 3]) {
        self.position = position;
    }

    pub fn position(&self) -> [f32; 3] {
        self.position
    }

    /// The instance as uploaded to the GPU buffer. Id 0 is the "no point"
    /// sentinel; the cursor never participates in picking.
    pub fn instance(&self) -> PointInstance {
        PointInstance {
            position: self.position,
            id: 0,
        }
    }
}

/// A one-instance vertex buffer whose contents are respecified in full with
/// the current mouse position every frame.
pub struct CursorPoint {
    state: CursorState,
    pub vtx: wgpu::Buffer,
}

impl CursorPoint {
    pub fn new(device: &wgpu::Device) -> Self {
        let state = CursorState::default();
        let vtx = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cursor Instance"),
            contents: bytemuck::bytes_of(&state.instance()),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        Self { state, vtx }
    }

    /// Overwrites the whole buffer with a new position (screen-space pixels).
    pub fn set_position(&mut self, queue: &wgpu::Queue, position: [f32; 3]) {
        self.state.set(position);
        queue.write_buffer(&self.vtx, 0, bytemuck::bytes_of(&self.state.instance()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_holds_most_recent_position_only() {
        let mut state = CursorState::default();
        state.set([3.0, 4.0, 0.0]);
        state.set([10.0, 20.0, 0.0]);
        assert_eq!(state.position(), [10.0, 20.0, 0.0]);
        assert_eq!(state.instance().position, [10.0, 20.0, 0.0]);
    }

    #[test]
    fn test_instance_id_stays_reserved() {
        let mut state = CursorState::default();
        state.set([1.0, 2.0, 0.0]);
        assert_eq!(state.instance().id, 0);
    }
}
