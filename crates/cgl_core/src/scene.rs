//! Scene types shared by the ray tracer and the rasterizer.
//!
//! A scene is a flat list of objects plus one directional light. Objects
//! carry a mesh for rasterization and a collider for ray queries.

use std::sync::Arc;

use cgl_math::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::mesh::Mesh;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Transform components that can be composed into a matrix.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Translation
    pub translation: Vec3,

    /// Rotation (as quaternion)
    pub rotation: Quat,

    /// Scale
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with only translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Set a uniform scale.
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Set the rotation.
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Convert to a 4x4 model matrix.
    ///
    /// Order: Scale -> Rotate -> Translate (SRT)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// What rays hit when they are cast at an object.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Collider {
    /// The object's own triangles, in world space
    Mesh,
    /// Analytic sphere around the object's origin. The world radius is
    /// `radius` times the largest absolute scale component.
    Sphere { radius: f32 },
    /// Invisible to rays
    None,
}

/// A mesh placed in the world.
#[derive(Clone, Debug)]
pub struct SceneObject {
    /// Display name (used in logs)
    pub name: String,

    /// Shared mesh geometry, never modified by renderers
    pub mesh: Arc<Mesh>,

    /// Object → world transform
    pub transform: Transform,

    /// Shape seen by ray queries
    pub collider: Collider,

    /// Disabled objects are neither drawn nor hit
    pub enabled: bool,
}

impl SceneObject {
    /// Create a new enabled object.
    pub fn new(
        name: impl Into<String>,
        mesh: Arc<Mesh>,
        transform: Transform,
        collider: Collider,
    ) -> Self {
        Self {
            name: name.into(),
            mesh,
            transform,
            collider,
            enabled: true,
        }
    }

    /// Get the 4x4 model matrix for this object.
    pub fn model_matrix(&self) -> Mat4 {
        self.transform.to_matrix()
    }
}

/// A directional light: parallel rays traveling along `forward`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    /// Unit direction the light travels in
    pub forward: Vec3,
    pub color: Color,
}

impl DirectionalLight {
    /// Create a light; `forward` is normalized.
    pub fn new(forward: Vec3, color: Color) -> Self {
        Self {
            forward: forward.normalize_or_zero(),
            color,
        }
    }

    /// Light whose forward axis is the local +Z of `rotation`.
    pub fn from_rotation(rotation: Quat, color: Color) -> Self {
        Self::new(rotation * Vec3::Z, color)
    }

    /// Direction from a surface toward the light.
    pub fn to_light(&self) -> Vec3 {
        -self.forward
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        // Tilted down 50 degrees and turned 30 degrees, like a default sun
        Self::from_rotation(
            Quat::from_rotation_y(-30.0_f32.to_radians()) * Quat::from_rotation_x(50.0_f32.to_radians()),
            Color::ONE,
        )
    }
}

/// A complete scene: objects plus the single light.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Scene name
    pub name: String,

    /// Objects in draw order
    pub objects: Vec<SceneObject>,

    pub light: DirectionalLight,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Replace the light.
    pub fn with_light(mut self, light: DirectionalLight) -> Self {
        self.light = light;
        self
    }

    /// Add an object and return its index.
    pub fn add_object(&mut self, object: SceneObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Objects that take part in rendering, in draw order.
    pub fn enabled_objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(|o| o.enabled)
    }

    /// Total triangle count across enabled objects.
    pub fn total_triangle_count(&self) -> usize {
        self.enabled_objects().map(|o| o.mesh.triangle_count()).sum()
    }
}
