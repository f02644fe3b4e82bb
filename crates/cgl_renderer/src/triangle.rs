//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::hittable::{Hittable, Intersection};
use cgl_math::{Interval, Ray, Vec3};

/// A two-sided triangle primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertices
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Pre-computed face normal (unit length, zero if degenerate)
    normal: Vec3,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
        Self { v0, v1, v2, normal }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Hittable for Triangle {
    /// Möller-Trumbore ray-triangle intersection algorithm.
    /// The reported normal faces the incoming ray.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<Intersection> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction().cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle (or the triangle is degenerate)
        if a.abs() < 1e-8 {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin() - self.v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction().dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        if !ray_t.surrounds(t) {
            return None;
        }

        let normal = if ray.direction().dot(self.normal) < 0.0 {
            self.normal
        } else {
            -self.normal
        };

        Some(Intersection {
            point: ray.at(t),
            normal,
            t,
        })
    }
}
