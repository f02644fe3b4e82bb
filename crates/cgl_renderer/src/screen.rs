//! Primary ray generation through a virtual screen quad.
//!
//! The screen is a unit quad in its local XY plane, centered on its origin,
//! placed in the world by a position, a rotation and an XY scale. Pixel
//! `(i, j)` samples the center of its cell, with `j = 0` at the bottom edge.

use cgl_math::{Camera, Quat, Ray, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// World placement of the screen the ray tracer shoots through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenQuad {
    pub center: Vec3,
    pub rotation: Quat,
    /// World size of the quad along its local X and Y
    pub scale: Vec2,
}

impl ScreenQuad {
    pub fn new(center: Vec3, rotation: Quat, scale: Vec2) -> Self {
        Self {
            center,
            rotation,
            scale,
        }
    }

    /// Square screen of side `size`, `distance` in front of the camera and
    /// facing it.
    pub fn in_front_of(camera: &Camera, distance: f32, size: f32) -> Self {
        Self::new(
            camera.position + camera.forward() * distance,
            camera.rotation,
            Vec2::splat(size),
        )
    }

    /// World position of the center of pixel `(i, j)`.
    pub fn pixel_position(&self, i: u32, j: u32, resolution: u32) -> Vec3 {
        let step = 1.0 / resolution as f32;
        let offset = Vec3::new(
            step * (i as f32 + 0.5) - 0.5,
            step * (j as f32 + 0.5) - 0.5,
            0.0,
        ) * self.scale.extend(1.0);

        self.center + self.rotation * offset
    }

    /// Ray from the camera through the center of pixel `(i, j)`.
    pub fn primary_ray(&self, i: u32, j: u32, resolution: u32, camera: &Camera) -> Ray {
        let pixel = self.pixel_position(i, j, resolution);
        Ray::new(camera.position, pixel - camera.position)
    }
}
