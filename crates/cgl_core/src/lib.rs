//! CGL Core - scene description for the course renderers.
//!
//! This crate provides:
//!
//! - **Geometry**: `Mesh` with per-vertex normals and procedural builders
//! - **Scene types**: `Scene`, `SceneObject`, `Transform`, `Collider`,
//!   `DirectionalLight`
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use cgl_core::{Collider, Mesh, Scene, SceneObject, Transform};
//!
//! let mut scene = Scene::new("demo");
//! scene.add_object(SceneObject::new(
//!     "ball",
//!     Arc::new(Mesh::uv_sphere(1.0, 24, 12)),
//!     Transform::default(),
//!     Collider::Sphere { radius: 1.0 },
//! ));
//! ```

pub mod mesh;
pub mod scene;

// Re-export commonly used types
pub use mesh::{Mesh, MeshError, MeshResult};
pub use scene::{Collider, Color, DirectionalLight, Scene, SceneObject, Transform};
