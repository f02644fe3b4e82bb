//! Ray-scene intersection.
//!
//! Renderers only talk to [`SceneIntersector`]. [`HittableList`] is the
//! stock implementation: a linear scan over boxed [`Hittable`] primitives.

use crate::{Sphere, Triangle};
use cgl_core::{Collider, Scene};
use cgl_math::{Interval, Ray, Vec3};

/// Hits closer than this to the ray origin are ignored, so rays leaving a
/// surface do not hit that same surface again.
pub const HIT_EPSILON: f32 = 0.001;

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Point of intersection
    pub point: Vec3,
    /// Unit surface normal at the intersection
    pub normal: Vec3,
    /// Distance along the ray
    pub t: f32,
}

/// Scene-level ray queries.
pub trait SceneIntersector {
    /// Closest hit along the ray, if any.
    fn intersect_nearest(&self, ray: &Ray) -> Option<Intersection>;

    /// True when anything at all lies along the ray.
    fn intersect_any(&self, ray: &Ray) -> bool {
        self.intersect_nearest(ray).is_some()
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable {
    /// Test if a ray hits this object with `t` strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<Intersection>;
}

/// A list of hittable objects.
#[derive(Default)]
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the colliders of every enabled object, in world space.
    pub fn from_scene(scene: &Scene) -> Self {
        let mut list = Self::new();

        for object in scene.enabled_objects() {
            match object.collider {
                Collider::Mesh => {
                    let model = object.model_matrix();
                    let positions = &object.mesh.positions;
                    for [i0, i1, i2] in object.mesh.triangles() {
                        if i0 >= positions.len() || i1 >= positions.len() || i2 >= positions.len() {
                            log::warn!(
                                "{}: invalid triangle indices [{}, {}, {}], vertex count: {}",
                                object.name,
                                i0,
                                i1,
                                i2,
                                positions.len()
                            );
                            continue;
                        }
                        list.add(Box::new(Triangle::new(
                            model.transform_point3(positions[i0]),
                            model.transform_point3(positions[i1]),
                            model.transform_point3(positions[i2]),
                        )));
                    }
                }
                Collider::Sphere { radius } => {
                    let scale = object.transform.scale.abs().max_element();
                    list.add(Box::new(Sphere::new(
                        object.transform.translation,
                        radius * scale,
                    )));
                }
                Collider::None => {}
            }
        }

        log::debug!(
            "Built intersector for scene '{}': {} primitives",
            scene.name,
            list.len()
        );
        list
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<Intersection> {
        let mut closest: Option<Intersection> = None;

        for object in &self.objects {
            let window = ray_t.with_max(closest.map_or(ray_t.max, |hit| hit.t));
            if let Some(hit) = object.hit(ray, window) {
                closest = Some(hit);
            }
        }

        closest
    }
}

impl SceneIntersector for HittableList {
    fn intersect_nearest(&self, ray: &Ray) -> Option<Intersection> {
        self.hit(ray, Interval::new(HIT_EPSILON, f32::INFINITY))
    }

    fn intersect_any(&self, ray: &Ray) -> bool {
        let window = Interval::new(HIT_EPSILON, f32::INFINITY);
        self.objects.iter().any(|object| object.hit(ray, window).is_some())
    }
}
