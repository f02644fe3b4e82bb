// Transform utilities for Mat4
//
// Extends glam::Mat4 with the homogeneous helpers the rasterizer needs.
// Note: glam::Mat4 already provides transform_point3(), transform_vector3() and inverse()

use glam::{Mat4, Vec3, Vec4};

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Matrix for transforming normals: `(M^T)^-1`.
    /// Stays correct under non-uniform scale.
    fn normal_matrix(&self) -> Mat4;

    /// Transform a point with an implicit w=1 and keep the homogeneous result
    /// (no division).
    fn transform_point4(&self, point: Vec3) -> Vec4;
}

impl Mat4Ext for Mat4 {
    fn normal_matrix(&self) -> Mat4 {
        self.transpose().inverse()
    }

    fn transform_point4(&self, point: Vec3) -> Vec4 {
        *self * point.extend(1.0)
    }
}
