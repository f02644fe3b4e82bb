// Re-export glam for convenience
pub use glam::*;

// CGL math types
mod ray;
mod interval;
mod camera;
mod transform;

pub use ray::Ray;
pub use interval::Interval;
pub use camera::Camera;
pub use transform::Mat4Ext;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_componentwise_mul() {
        let a = Vec3::new(1.0, 0.5, 0.25);
        let b = Vec3::new(0.5, 0.5, 4.0);
        assert_eq!(a * b, Vec3::new(0.5, 0.25, 1.0));
    }

    #[test]
    fn test_vec3_reflect_formula() {
        let d = Vec3::new(1.0, -1.0, 0.0);
        let n = Vec3::Y;
        let r = d - 2.0 * d.dot(n) * n;
        assert_eq!(r, Vec3::new(1.0, 1.0, 0.0));
    }
}
