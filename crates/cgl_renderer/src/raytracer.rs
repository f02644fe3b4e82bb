//! Recursive Whitted-style ray tracer.
//!
//! Each pixel shoots one primary ray through the screen quad. A hit is shaded
//! with Lambert + ambient light and a hard shadow test, then blended with the
//! color seen along the mirror reflection, up to `max_bounces` times.

use crate::shading::{shade, shadow_visibility};
use crate::{Color, ConfigResult, DebugLine, FrameBuffer, RenderConfig, SceneIntersector, ScreenQuad};
use cgl_core::DirectionalLight;
use cgl_math::{Camera, Ray, Vec3};

/// Compute the color seen by a ray.
///
/// Misses return the background. A hit contributes its own shading scaled
/// by `1 - reflectiveness`, plus, while `bounces > 0`, the color of the
/// reflected ray scaled by `reflectiveness`. Issues at most `bounces + 1`
/// nearest-hit queries.
///
/// When debug lines are enabled each hit pushes a segment from the ray
/// origin to the hit point, after its reflections have been traced.
pub fn trace_ray(
    ray: &Ray,
    bounces: u32,
    world: &dyn SceneIntersector,
    light: &DirectionalLight,
    config: &RenderConfig,
    debug_lines: &mut Vec<DebugLine>,
) -> Color {
    let Some(hit) = world.intersect_nearest(ray) else {
        return config.background_color;
    };

    let mut color = shade_point(hit.point, hit.normal, world, light, config) * (1.0 - config.reflectiveness);

    if bounces > 0 {
        let reflection = Ray::new(hit.point, Ray::reflect(ray.direction(), hit.normal));
        color += trace_ray(&reflection, bounces - 1, world, light, config, debug_lines) * config.reflectiveness;
    }

    if config.draw_debug_lines {
        log::trace!("hit {:?} -> {:?} color {:?}", ray.origin(), hit.point, color);
        debug_lines.push(DebugLine::new(ray.origin(), hit.point, color));
    }

    color
}

/// Shade a surface point, casting a shadow ray toward the light.
pub fn shade_point(
    position: Vec3,
    normal: Vec3,
    world: &dyn SceneIntersector,
    light: &DirectionalLight,
    config: &RenderConfig,
) -> Color {
    let visibility = shadow_visibility(position, light, world);
    shade(normal, light, visibility, config)
}

/// Ray tracer state: the configuration, the frame buffer and the debug
/// lines of the last frame.
pub struct RayTracer {
    config: RenderConfig,
    framebuffer: FrameBuffer,
    debug_lines: Vec<DebugLine>,
}

impl RayTracer {
    /// Create a ray tracer. Fails if the configuration is out of range.
    pub fn new(config: RenderConfig) -> ConfigResult<Self> {
        config.validate()?;
        let framebuffer = FrameBuffer::new(config.resolution);
        Ok(Self {
            config,
            framebuffer,
            debug_lines: Vec::new(),
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    /// Debug segments recorded during the last frame.
    pub fn debug_lines(&self) -> &[DebugLine] {
        &self.debug_lines
    }

    /// Trace a single ray with this tracer's configuration.
    pub fn trace(
        &mut self,
        ray: &Ray,
        bounces: u32,
        world: &dyn SceneIntersector,
        light: &DirectionalLight,
    ) -> Color {
        trace_ray(ray, bounces, world, light, &self.config, &mut self.debug_lines)
    }

    /// Clear the buffer and trace every pixel.
    pub fn render_frame(
        &mut self,
        camera: &Camera,
        screen: &ScreenQuad,
        world: &dyn SceneIntersector,
        light: &DirectionalLight,
    ) -> &FrameBuffer {
        self.framebuffer.clear(self.config.background_color);
        self.debug_lines.clear();

        let resolution = self.config.resolution;
        for i in 0..resolution {
            for j in 0..resolution {
                let ray = screen.primary_ray(i, j, resolution, camera);
                let color = trace_ray(
                    &ray,
                    self.config.max_bounces,
                    world,
                    light,
                    &self.config,
                    &mut self.debug_lines,
                );
                self.framebuffer.set(i, j, color);
            }
        }

        log::debug!(
            "Ray traced {}x{} frame, {} debug lines",
            resolution,
            resolution,
            self.debug_lines.len()
        );
        &self.framebuffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HittableList, Intersection, Sphere, Triangle};
    use std::cell::Cell;

    /// Wraps an intersector and counts the queries made through it.
    struct CountingIntersector<'a> {
        inner: &'a dyn SceneIntersector,
        nearest: Cell<usize>,
        any: Cell<usize>,
    }

    impl<'a> CountingIntersector<'a> {
        fn new(inner: &'a dyn SceneIntersector) -> Self {
            Self {
                inner,
                nearest: Cell::new(0),
                any: Cell::new(0),
            }
        }
    }

    impl SceneIntersector for CountingIntersector<'_> {
        fn intersect_nearest(&self, ray: &Ray) -> Option<Intersection> {
            self.nearest.set(self.nearest.get() + 1);
            self.inner.intersect_nearest(ray)
        }

        fn intersect_any(&self, ray: &Ray) -> bool {
            self.any.set(self.any.get() + 1);
            self.inner.intersect_any(ray)
        }
    }

    fn config() -> RenderConfig {
        RenderConfig {
            resolution: 8,
            background_color: Color::new(0.1, 0.2, 0.3),
            reflectiveness: 0.5,
            max_bounces: 3,
            ..Default::default()
        }
    }

    fn light() -> DirectionalLight {
        DirectionalLight::new(Vec3::Z, Color::ONE)
    }

    /// Two large parallel mirrors at z = -1 and z = 1.
    fn mirrors() -> HittableList {
        let mut world = HittableList::new();
        for z in [-1.0, 1.0] {
            world.add(Box::new(Triangle::new(
                Vec3::new(-100.0, -100.0, z),
                Vec3::new(100.0, -100.0, z),
                Vec3::new(0.0, 100.0, z),
            )));
        }
        world
    }

    #[test]
    fn test_miss_returns_background_for_any_depth() {
        let world = HittableList::new();
        let config = config();
        let mut lines = Vec::new();

        for bounces in 0..=5 {
            let ray = Ray::new(Vec3::ZERO, Vec3::new(0.3, -0.2, 1.0));
            let color = trace_ray(&ray, bounces, &world, &light(), &config, &mut lines);
            assert_eq!(color, config.background_color);
        }
        assert!(lines.is_empty());
    }

    #[test]
    fn test_zero_bounces_is_local_shading_only() {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0)));
        let config = config();
        let counting = CountingIntersector::new(&world);
        let mut lines = Vec::new();

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let color = trace_ray(&ray, 0, &counting, &light(), &config, &mut lines);

        let hit = world.intersect_nearest(&ray).unwrap();
        let expected = shade_point(hit.point, hit.normal, &world, &light(), &config) * (1.0 - config.reflectiveness);
        assert!((color - expected).length() < 1e-6);
        assert_eq!(counting.nearest.get(), 1);
        assert_eq!(counting.any.get(), 1);
    }

    #[test]
    fn test_recursion_is_depth_bounded() {
        let world = mirrors();
        let config = config();

        for bounces in 0..=5 {
            let counting = CountingIntersector::new(&world);
            let mut lines = Vec::new();
            // Bounces back and forth between the mirrors forever
            let ray = Ray::new(Vec3::ZERO, Vec3::Z);
            trace_ray(&ray, bounces, &counting, &light(), &config, &mut lines);

            assert_eq!(counting.nearest.get(), bounces as usize + 1);
            assert_eq!(lines.len(), bounces as usize + 1);
        }
    }

    #[test]
    fn test_reflection_blends_colors() {
        // A single mirror: the reflected ray escapes to the background
        let mut world = HittableList::new();
        world.add(Box::new(Triangle::new(
            Vec3::new(-10.0, -10.0, 2.0),
            Vec3::new(10.0, -10.0, 2.0),
            Vec3::new(0.0, 10.0, 2.0),
        )));
        let config = config();
        let mut lines = Vec::new();

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let color = trace_ray(&ray, 1, &world, &light(), &config, &mut lines);

        // The hit normal faces back along -Z, straight at the light.
        // The reflected ray heads back past the origin and escapes.
        let local = shade(Vec3::NEG_Z, &light(), 1.0, &config);
        let expected = local * 0.5 + config.background_color * 0.5;
        assert!((color - expected).length() < 1e-6);
    }

    #[test]
    fn test_debug_lines_follow_config() {
        let world = mirrors();
        let mut quiet = RayTracer::new(RenderConfig {
            draw_debug_lines: false,
            ..config()
        })
        .unwrap();

        quiet.trace(&Ray::new(Vec3::ZERO, Vec3::Z), 2, &world, &light());
        assert!(quiet.debug_lines().is_empty());

        let mut loud = RayTracer::new(config()).unwrap();
        loud.trace(&Ray::new(Vec3::ZERO, Vec3::Z), 2, &world, &light());
        // Deepest hit is recorded first; the primary segment comes last
        let primary = loud.debug_lines().last().unwrap();
        assert_eq!(primary.start, Vec3::ZERO);
        assert!((primary.end - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = RayTracer::new(RenderConfig {
            resolution: 0,
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_unit_sphere_end_to_end() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Vec3::ZERO, 1.0)));

        let camera = Camera::looking_at(Vec3::new(0.0, 0.0, -5.0), Vec3::ZERO, Vec3::Y);
        let screen = ScreenQuad::in_front_of(&camera, 1.0, 1.0);
        let config = RenderConfig {
            resolution: 8,
            reflectiveness: 0.0,
            max_bounces: 0,
            ..Default::default()
        };
        let background = config.background_color;
        let mut tracer = RayTracer::new(config).unwrap();

        let frame = tracer.render_frame(&camera, &screen, &world, &light());

        // Corners see nothing
        for (x, y) in [(0, 0), (7, 0), (0, 7), (7, 7)] {
            assert_eq!(frame.get(x, y), background);
        }

        // A centered disc, symmetric under mirroring
        let lit: Vec<(u32, u32)> = (0..8)
            .flat_map(|y| (0..8).map(move |x| (x, y)))
            .filter(|&(x, y)| frame.get(x, y) != background)
            .collect();
        assert!(!lit.is_empty());
        for &(x, y) in &lit {
            assert_ne!(frame.get(7 - x, y), background);
            assert_ne!(frame.get(x, 7 - y), background);
        }
        for center in [(3, 3), (4, 3), (3, 4), (4, 4)] {
            assert!(lit.contains(&center));
        }

        // Brightest pixels face both the camera and the light
        let brightest = lit
            .iter()
            .copied()
            .max_by(|a, b| frame.get(a.0, a.1).x.total_cmp(&frame.get(b.0, b.1).x))
            .unwrap();
        assert!(brightest.0 == 3 || brightest.0 == 4);
        assert!(brightest.1 == 3 || brightest.1 == 4);
        assert!(frame.get(brightest.0, brightest.1).x > 0.5);
    }
}
