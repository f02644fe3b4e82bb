//! Debug line segments recorded while rendering.
//!
//! Purely observational: recording lines never changes buffer contents.

use crate::Color;
use cgl_math::Vec3;

/// A colored line segment. The ray tracer records world-space segments from
/// ray origin to hit point; the rasterizer records screen-space triangle edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugLine {
    pub start: Vec3,
    pub end: Vec3,
    pub color: Color,
}

impl DebugLine {
    pub fn new(start: Vec3, end: Vec3, color: Color) -> Self {
        Self { start, end, color }
    }
}
