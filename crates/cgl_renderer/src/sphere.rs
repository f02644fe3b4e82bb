//! Sphere primitive for ray tracing.

use crate::hittable::{Hittable, Intersection};
use cgl_math::{Interval, Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }
}

impl Hittable for Sphere {
    /// Only the entry point counts: a ray that starts inside the sphere
    /// does not hit it. The normal always points outward.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<Intersection> {
        if self.radius <= 0.0 {
            return None;
        }

        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let root = (h - discriminant.sqrt()) / a;
        if !ray_t.surrounds(root) {
            return None;
        }

        let point = ray.at(root);
        Some(Intersection {
            point,
            normal: (point - self.center) / self.radius,
            t: root,
        })
    }
}
