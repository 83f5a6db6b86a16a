use glam::{Mat4, Vec3};

/// Converts clip-space coordinates from OpenGL conventions (Z in [-1, 1]) to
/// WebGPU conventions (Z in [0, 1]). X and Y are unchanged.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Mat4 = Mat4::from_cols_array(&[
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
]);

/// Half-height of the frustum at the near plane.
const VIEW_HEIGHT: f32 = 5.0;
const VIEW_NEAR: f32 = 65.0;
const VIEW_FAR: f32 = 90.0;
const RADIANS_PER_SECOND: f32 = 0.5;

const EYE: Vec3 = Vec3::new(0.0, -75.0, 25.0);
const TARGET: Vec3 = Vec3::ZERO;
const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Scene matrices. The perspective projection is fixed at init from the
/// configured viewport aspect; view and model are pure functions of the
/// accumulated rotation angle.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Accumulated Z-axis rotation angle, radians.
    pub theta: f32,
    /// Perspective frustum (already in WebGPU clip conventions). Immutable
    /// after init, including across window resizes.
    pub proj: Mat4,
    /// Screen-space projection for the cursor sprite: origin top-left, units
    /// in window pixels. Rebuilt when the window resizes.
    pub ortho: Mat4,
    pub view: Mat4,
    pub model: Mat4,
    pub model_view: Mat4,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        let w = VIEW_HEIGHT * width as f32 / height as f32;
        let proj = OPENGL_TO_WGPU_MATRIX
            * frustum(-w, w, -VIEW_HEIGHT, VIEW_HEIGHT, VIEW_NEAR, VIEW_FAR);

        let mut camera = Self {
            theta: 0.0,
            proj,
            ortho: screen_ortho(width, height),
            view: Mat4::IDENTITY,
            model: Mat4::IDENTITY,
            model_view: Mat4::IDENTITY,
        };
        camera.advance(0.0);
        camera
    }

    /// Advances the rotation angle by `seconds` of elapsed time and rebuilds
    /// the view, model and model-view matrices.
    pub fn advance(&mut self, seconds: f32) {
        self.theta += seconds * RADIANS_PER_SECOND;
        self.model = Mat4::from_rotation_z(self.theta);
        self.view = Mat4::look_at_rh(EYE, TARGET, UP);
        self.model_view = self.view * self.model;
    }

    /// Tracks window resizes for the screen-space cursor projection only; the
    /// perspective projection stays fixed.
    pub fn resize_screen(&mut self, width: u32, height: u32) {
        self.ortho = screen_ortho(width, height);
    }
}

fn screen_ortho(width: u32, height: u32) -> Mat4 {
    // glam's `orthographic_rh` already maps depth to [0, 1].
    Mat4::orthographic_rh(0.0, width as f32, height as f32, 0.0, 0.0, 1.0)
}

/// Off-center perspective frustum with OpenGL depth conventions, column-major
/// like every `glam` matrix (`to_cols_array_2d` is the documented upload
/// path). Combine with [`OPENGL_TO_WGPU_MATRIX`] before handing it to wgpu.
pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let a = (right + left) / (right - left);
    let b = (top + bottom) / (top - bottom);
    let c = -(far + near) / (far - near);
    let d = -2.0 * far * near / (far - near);
    #[rustfmt::skip]
    let m = Mat4::from_cols_array(&[
        2.0 * near / (right - left), 0.0,                         0.0, 0.0,
        0.0,                         2.0 * near / (top - bottom), 0.0, 0.0,
        a,                           b,                           c,  -1.0,
        0.0,                         0.0,                         d,   0.0,
    ]);
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_frustum_half_width_follows_aspect() {
        // 853x480 viewport: half-width = 5.0 * 853/480.
        let camera = Camera::new(853, 480);
        let half_width = VIEW_NEAR / camera.proj.col(0).x;
        assert!((half_width - 5.0 * 853.0 / 480.0).abs() < 1e-3);
    }

    #[test]
    fn test_frustum_depth_range_is_wgpu() {
        let camera = Camera::new(853, 480);
        // A point on the near plane lands at clip z = 0, the far plane at 1.
        let near = camera.proj * Vec4::new(0.0, 0.0, -VIEW_NEAR, 1.0);
        let far = camera.proj * Vec4::new(0.0, 0.0, -VIEW_FAR, 1.0);
        assert!((near.z / near.w).abs() < 1e-5);
        assert!((far.z / far.w - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_advance_accumulates_theta() {
        let mut camera = Camera::new(853, 480);
        camera.advance(2.0);
        assert!((camera.theta - 1.0).abs() < 1e-6);
        assert!((camera.model_view - camera.view * camera.model)
            .abs()
            .to_cols_array()
            .iter()
            .all(|v| *v < 1e-6));
    }

    #[test]
    fn test_projection_survives_resize() {
        let mut camera = Camera::new(853, 480);
        let proj = camera.proj;
        camera.resize_screen(1920, 1080);
        assert_eq!(proj, camera.proj);
    }

    #[test]
    fn test_screen_ortho_maps_window_corners() {
        let camera = Camera::new(853, 480);
        let top_left = camera.ortho * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let bottom_right = camera.ortho * Vec4::new(853.0, 480.0, 0.0, 1.0);
        assert!((top_left.x + 1.0).abs() < 1e-6);
        assert!((top_left.y - 1.0).abs() < 1e-6);
        assert!((bottom_right.x - 1.0).abs() < 1e-6);
        assert!((bottom_right.y + 1.0).abs() < 1e-6);
    }
}
