/// Camera: view and projection matrices for one projection kind.
///
/// The probed camera always sits at the origin looking down -Z with +Y up,
/// so its view matrix is fixed; only the projection changes with the
/// frustum parameters. Projection matrices use OpenGL-style clip space
/// (z in [-1, 1] after the perspective divide).

use glam::{Mat4, Vec3};

/// Position of the probed camera
pub const CAMERA_EYE: Vec3 = Vec3::ZERO;
/// Viewing direction of the probed camera
pub const CAMERA_FORWARD: Vec3 = Vec3::NEG_Z;
/// Up vector of the probed camera
pub const CAMERA_UP: Vec3 = Vec3::Y;

/// Camera record: a view matrix and a projection matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    view_matrix: Mat4,
    projection_matrix: Mat4,
}

impl Camera {
    /// Create a camera from explicit matrices.
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self {
            view_matrix: view,
            projection_matrix: projection,
        }
    }

    /// Square-aspect perspective camera at the fixed probe placement.
    ///
    /// `fov_y_radians` is the full vertical angle.
    pub fn perspective(fov_y_radians: f32, near: f32, far: f32) -> Self {
        Self::new(
            Self::probe_view(),
            Mat4::perspective_rh_gl(fov_y_radians, 1.0, near, far),
        )
    }

    /// Square orthographic camera at the fixed probe placement.
    pub fn orthographic(half_extent: f32, near: f32, far: f32) -> Self {
        Self::new(
            Self::probe_view(),
            Mat4::orthographic_rh_gl(
                -half_extent, half_extent,
                -half_extent, half_extent,
                near, far,
            ),
        )
    }

    /// Free viewer camera looking from `eye` at `target`.
    pub fn looking_at(eye: Vec3, target: Vec3, up: Vec3, projection: Mat4) -> Self {
        Self::new(Mat4::look_at_rh(eye, target, up), projection)
    }

    fn probe_view() -> Mat4 {
        Mat4::look_at_rh(CAMERA_EYE, CAMERA_EYE + CAMERA_FORWARD, CAMERA_UP)
    }

    // ===== GETTERS =====

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Projection matrix (perspective or orthographic).
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// Camera world transform (inverse of the view matrix).
    pub fn world_matrix(&self) -> Mat4 {
        self.view_matrix.inverse()
    }

    // ===== SETTERS =====

    /// Set the view matrix.
    pub fn set_view(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
    }

    /// Set the projection matrix.
    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection_matrix = matrix;
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
