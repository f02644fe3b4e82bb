use glam::{Mat3, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Pinhole camera shared by the ray tracer and the rasterizer.
///
/// The camera looks down its local `+Z` axis with `+Y` up. The view matrix
/// is the inverse of the camera's world transform, so points in front of the
/// camera have positive view-space `z`. The projection is the OpenGL-style
/// right-handed perspective, which yields `w = -z`; the rasterizer divides by
/// `-w` to land back in front of the camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Quat,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            fov_y: 60.0_f32.to_radians(),
            near: 0.3,
            far: 1000.0,
        }
    }

    /// Create a camera at `position` whose forward axis points at `target`.
    pub fn looking_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        Self::new(position, look_rotation(target - position, up))
    }

    /// Set the vertical field of view in degrees.
    pub fn with_fov_degrees(mut self, fov_y: f32) -> Self {
        self.fov_y = fov_y.to_radians();
        self
    }

    /// Set the clip planes.
    pub fn with_clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// World-space forward direction (local +Z).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Camera → world
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    /// Get the view matrix (world → camera space)
    pub fn view_matrix(&self) -> Mat4 {
        self.world_matrix().inverse()
    }

    /// Get the projection matrix (camera → clip space). Square viewport.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, 1.0, self.near, self.far)
    }

    /// Get the combined view-projection matrix
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY)
    }
}

/// Rotation that maps local `+Z` onto `forward` and keeps local `+Y` as
/// close to `up` as possible.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let f = forward.normalize_or_zero();
    if f == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    // Forward parallel to up: pick any perpendicular right axis
    let right = up.cross(f).try_normalize().unwrap_or_else(|| f.any_orthonormal_vector());
    let true_up = f.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, true_up, f))
}
