//! Lambert + ambient lighting shared by both renderers.

use crate::{Color, RenderConfig, SceneIntersector};
use cgl_core::DirectionalLight;
use cgl_math::{Ray, Vec3};

/// Diffuse + ambient color for a surface normal.
///
/// `diffuse = max(0, n . -forward) * (1 - ambient)`, and the result is
/// `diffuse * object * light * visibility + object * ambient`. The normal is
/// used as given; a zero normal shades with ambient light only.
pub fn shade(normal: Vec3, light: &DirectionalLight, visibility: f32, config: &RenderConfig) -> Color {
    let ambient = config.ambient_intensity;
    let diffuse_intensity = normal.dot(light.to_light()).max(0.0) * (1.0 - ambient);

    diffuse_intensity * config.object_color * light.color * visibility + config.object_color * ambient
}

/// 0 when anything blocks the path from `position` toward the light, else 1.
pub fn shadow_visibility(position: Vec3, light: &DirectionalLight, world: &dyn SceneIntersector) -> f32 {
    let shadow_ray = Ray::new(position, light.to_light());
    if world.intersect_any(&shadow_ray) {
        0.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HittableList, Sphere};

    fn config() -> RenderConfig {
        RenderConfig {
            ambient_intensity: 0.2,
            object_color: Color::new(1.0, 0.5, 0.25),
            ..Default::default()
        }
    }

    fn light() -> DirectionalLight {
        // Shines straight down
        DirectionalLight::new(Vec3::NEG_Y, Color::ONE)
    }

    fn diffuse_term(normal: Vec3) -> Color {
        let config = config();
        shade(normal, &light(), 1.0, &config) - config.object_color * config.ambient_intensity
    }

    #[test]
    fn test_facing_light_is_full_brightness() {
        let color = shade(Vec3::Y, &light(), 1.0, &config());
        // 1.0 * 0.8 + 0.2 on every channel, scaled by the object color
        assert!((color - config().object_color).length() < 1e-6);
    }

    #[test]
    fn test_no_diffuse_when_perpendicular_or_facing_away() {
        assert!(diffuse_term(Vec3::X).length() < 1e-6);
        assert!(diffuse_term(Vec3::NEG_Y).length() < 1e-6);
        assert!(diffuse_term(Vec3::new(0.3, -0.7, 0.1).normalize()).length() < 1e-6);
    }

    #[test]
    fn test_diffuse_monotonic_in_cosine() {
        let mut previous = -1.0;
        for step in 0..=10 {
            let angle = std::f32::consts::FRAC_PI_2 * (1.0 - step as f32 / 10.0);
            let normal = Vec3::new(angle.sin(), angle.cos(), 0.0);
            let value = diffuse_term(normal).x;
            assert!(value >= previous, "diffuse must not decrease as the normal turns to the light");
            previous = value;
        }
        // Peak is the ambient-scaled maximum
        assert!((previous - 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_zero_normal_is_ambient_only() {
        let config = config();
        let color = shade(Vec3::ZERO, &light(), 1.0, &config);
        assert!((color - config.object_color * 0.2).length() < 1e-6);
    }

    #[test]
    fn test_light_color_and_visibility() {
        let config = config();
        let red = DirectionalLight::new(Vec3::NEG_Y, Color::X);

        let lit = shade(Vec3::Y, &red, 1.0, &config);
        assert!((lit - Color::new(1.0, 0.1, 0.05)).length() < 1e-6);

        let shadowed = shade(Vec3::Y, &red, 0.0, &config);
        assert!((shadowed - config.object_color * 0.2).length() < 1e-6);
    }

    #[test]
    fn test_shadow_visibility() {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Vec3::new(0.0, 5.0, 0.0), 1.0)));

        // Occluder directly above
        assert_eq!(shadow_visibility(Vec3::ZERO, &light(), &world), 0.0);
        // Off to the side
        assert_eq!(shadow_visibility(Vec3::new(3.0, 0.0, 0.0), &light(), &world), 1.0);
    }
}
