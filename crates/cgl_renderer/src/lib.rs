//! CGL Renderer - CPU ray tracing and rasterization for teaching.
//!
//! Two independent pipelines share a frame buffer and a Lambert + ambient
//! shading function:
//!
//! - [`RayTracer`]: one primary ray per pixel through a [`ScreenQuad`],
//!   hard shadows and bounded mirror reflections against a [`SceneIntersector`]
//! - [`Rasterizer`]: MVP transform, perspective division, edge-function
//!   triangle fill and a nearest-wins depth buffer
//!
//! Both render a frame at a time; call `render_frame` once per frame.

mod config;
mod framebuffer;
mod hittable;
mod sphere;
mod triangle;
mod screen;
mod shading;
mod debug;
mod raytracer;
mod rasterizer;

pub use config::{ConfigError, ConfigResult, RenderConfig, MAX_BOUNCES_LIMIT};
pub use framebuffer::{color_to_rgba8, FrameBuffer};
pub use hittable::{Hittable, HittableList, Intersection, SceneIntersector, HIT_EPSILON};
pub use sphere::Sphere;
pub use triangle::Triangle;
pub use screen::ScreenQuad;
pub use shading::{shade, shadow_visibility};
pub use debug::DebugLine;
pub use raytracer::{shade_point, trace_ray, RayTracer};
pub use rasterizer::{clip_to_screen, edge_function, point_in_triangle, rasterize_point, rasterize_triangle, Rasterizer};

/// Re-export Color and common math types
pub use cgl_core::Color;
pub use cgl_math::{Camera, Ray, Vec3};
