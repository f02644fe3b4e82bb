use crate::Vec3;

/// A ray in 3D space with an origin and a unit-length direction.
///
/// The direction is normalized on construction, so `at(t)` measures `t`
/// in world units along the ray.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Create a new ray. `direction` does not need to be normalized.
    ///
    /// A zero direction stays zero (`normalize_or_zero`); such a ray never
    /// hits anything.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the unit direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Mirror `direction` about the unit normal `normal`: `d - 2 (d.n) n`.
    pub fn reflect(direction: Vec3, normal: Vec3) -> Vec3 {
        direction - 2.0 * direction.dot(normal) * normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation_normalizes() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let ray = Ray::new(origin, Vec3::new(0.0, 4.0, 0.0));

        assert_eq!(ray.origin(), origin);
        assert_eq!(ray.direction(), Vec3::Y);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_zero_direction() {
        let ray = Ray::new(Vec3::ONE, Vec3::ZERO);
        assert_eq!(ray.direction(), Vec3::ZERO);
    }

    #[test]
    fn test_reflect() {
        // Head-on reflection reverses the direction
        assert_eq!(Ray::reflect(-Vec3::Z, Vec3::Z), Vec3::Z);

        // Grazing 45 degrees off a floor
        let d = Vec3::new(1.0, -1.0, 0.0).normalize();
        let r = Ray::reflect(d, Vec3::Y);
        assert!((r - Vec3::new(1.0, 1.0, 0.0).normalize()).length() < 1e-6);
    }
}
