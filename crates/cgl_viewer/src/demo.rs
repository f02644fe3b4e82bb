//! The demo scene rendered by the viewer: a floor, a ball and a spinning cube.

use std::sync::Arc;

use cgl_core::{Collider, Color, DirectionalLight, Mesh, Scene, SceneObject, Transform};
use cgl_math::{Camera, Quat, Vec3};
use cgl_renderer::ScreenQuad;

/// Distance from the camera to the ray tracer's screen quad.
pub const SCREEN_DISTANCE: f32 = 1.0;
/// Side of the (square) screen quad.
pub const SCREEN_SIZE: f32 = 1.0;
/// Cube spin per frame, in degrees.
pub const SPIN_DEGREES_PER_FRAME: f32 = 15.0;

/// Index of the cube in [`build_scene`]'s object list.
pub const CUBE_INDEX: usize = 2;

/// Build the demo scene.
pub fn build_scene() -> Scene {
    let mut scene = Scene::new("demo").with_light(DirectionalLight::new(
        Vec3::new(0.4, -1.0, 0.7),
        Color::new(1.0, 0.96, 0.9),
    ));

    scene.add_object(SceneObject::new(
        "floor",
        Arc::new(Mesh::plane(8.0)),
        Transform::from_translation(Vec3::new(0.0, -1.0, 0.0)),
        Collider::Mesh,
    ));
    scene.add_object(SceneObject::new(
        "ball",
        Arc::new(Mesh::uv_sphere(0.5, 24, 12)),
        Transform::from_translation(Vec3::new(-0.8, -0.2, 0.5)).with_uniform_scale(1.6),
        Collider::Sphere { radius: 0.5 },
    ));
    scene.add_object(SceneObject::new(
        "cube",
        Arc::new(Mesh::cube(1.0)),
        Transform::from_translation(Vec3::new(1.0, -0.5, 0.2)),
        Collider::Mesh,
    ));

    scene
}

/// Camera looking at the middle of the scene. Its vertical field of view
/// matches the screen quad so both renderers frame the same view.
pub fn default_camera() -> Camera {
    let mut camera = Camera::looking_at(Vec3::new(0.0, 1.0, -5.0), Vec3::new(0.0, -0.3, 0.0), Vec3::Y);
    camera.fov_y = 2.0 * (SCREEN_SIZE / (2.0 * SCREEN_DISTANCE)).atan();
    camera
}

/// Screen quad in front of `camera`.
pub fn screen_for(camera: &Camera) -> ScreenQuad {
    ScreenQuad::in_front_of(camera, SCREEN_DISTANCE, SCREEN_SIZE)
}

/// Advance the animation to `frame`.
pub fn animate(scene: &mut Scene, frame: u32) {
    if let Some(cube) = scene.objects.get_mut(CUBE_INDEX) {
        let angle = (SPIN_DEGREES_PER_FRAME * frame as f32).to_radians();
        cube.transform.rotation = Quat::from_rotation_y(angle);
    }
}
