//! Triangle mesh geometry.
//!
//! Meshes are read-only during a frame. Renderers that need transformed
//! vertices copy them into their own scratch buffers.

use cgl_math::Vec3;
use std::f32::consts::{PI, TAU};
use thiserror::Error;

/// Errors raised when assembling a mesh from raw arrays.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("Index count {0} is not a multiple of 3")]
    IndexCount(usize),

    #[error("Normal count {normals} doesn't match vertex count {vertices}")]
    NormalCount { normals: usize, vertices: usize },

    #[error("Triangle index {index} out of range for {vertices} vertices")]
    IndexOutOfRange { index: u32, vertices: usize },
}

pub type MeshResult<T> = Result<T, MeshError>;

/// A mesh consisting of vertex positions, per-vertex normals, and triangle indices.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    /// Vertex positions in object space
    pub positions: Vec<Vec3>,

    /// Vertex normals, parallel to `positions`
    pub normals: Vec<Vec3>,

    /// Triangle indices (every 3 indices form a triangle)
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a mesh without validating the arrays.
    ///
    /// Renderers tolerate bad indices (the triangle is skipped), so this is
    /// fine for trusted procedural data. Use [`Mesh::try_new`] for anything else.
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            normals,
            indices,
        }
    }

    /// Create a mesh, checking the array shapes.
    ///
    /// When `normals` is `None`, smooth normals are computed from the faces.
    pub fn try_new(
        positions: Vec<Vec3>,
        normals: Option<Vec<Vec3>>,
        indices: Vec<u32>,
    ) -> MeshResult<Self> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::IndexCount(indices.len()));
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertices: positions.len(),
            });
        }

        match normals {
            Some(normals) if normals.len() != positions.len() => Err(MeshError::NormalCount {
                normals: normals.len(),
                vertices: positions.len(),
            }),
            Some(normals) => Ok(Self::new(positions, normals, indices)),
            None => {
                let mut mesh = Self::new(positions, Vec::new(), indices);
                mesh.compute_normals();
                Ok(mesh)
            }
        }
    }

    /// Compute smooth vertex normals by averaging face normals.
    ///
    /// Front faces wind clockwise when seen from outside, so the face normal
    /// is `(p1 - p0) x (p2 - p0)`.
    pub fn compute_normals(&mut self) {
        let vertex_count = self.positions.len();
        let mut normals = vec![Vec3::ZERO; vertex_count];

        for face in self.indices.chunks_exact(3) {
            let i0 = face[0] as usize;
            let i1 = face[1] as usize;
            let i2 = face[2] as usize;

            if i0 >= vertex_count || i1 >= vertex_count || i2 >= vertex_count {
                continue;
            }

            let p0 = self.positions[i0];
            let face_normal = (self.positions[i1] - p0).cross(self.positions[i2] - p0);

            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        for normal in &mut normals {
            // Degenerate or unreferenced vertices keep a zero normal and
            // shade with ambient light only
            *normal = normal.normalize_or_zero();
        }

        log::debug!("Computed normals for {} vertices", vertex_count);
        self.normals = normals;
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Iterate the index triples of every complete triangle.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
    }

    /// UV sphere centered at the origin.
    ///
    /// `segments` slices around the Y axis (min 3), `rings` stacks from pole
    /// to pole (min 2).
    pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> Self {
        let segments = segments.max(3);
        let rings = rings.max(2);

        let mut positions = Vec::with_capacity(((segments + 1) * (rings + 1)) as usize);
        let mut normals = Vec::with_capacity(positions.capacity());

        for ring in 0..=rings {
            let theta = PI * ring as f32 / rings as f32;
            for segment in 0..=segments {
                let phi = TAU * segment as f32 / segments as f32;
                let normal = Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
                positions.push(normal * radius);
                normals.push(normal);
            }
        }

        let stride = segments + 1;
        let mut indices = Vec::with_capacity((segments * rings * 6) as usize);
        for ring in 0..rings {
            for segment in 0..segments {
                let a = ring * stride + segment;
                let b = a + stride;
                indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
            }
        }

        Self::new(positions, normals, indices)
    }

    /// Axis-aligned cube centered at the origin with flat per-face normals.
    pub fn cube(size: f32) -> Self {
        let h = size * 0.5;
        let faces = [
            (Vec3::X, Vec3::Y, Vec3::Z),
            (-Vec3::X, Vec3::Y, -Vec3::Z),
            (Vec3::Y, Vec3::Z, Vec3::X),
            (-Vec3::Y, Vec3::Z, -Vec3::X),
            (Vec3::Z, Vec3::Y, -Vec3::X),
            (-Vec3::Z, Vec3::Y, Vec3::X),
        ];

        let mut positions = Vec::with_capacity(24);
        let mut normals = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (normal, up, right) in faces {
            let base = positions.len() as u32;
            let center = normal * h;
            for (su, sr) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                positions.push(center + up * (su * h) + right * (sr * h));
                normals.push(normal);
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self::new(positions, normals, indices)
    }

    /// Square in the XZ plane centered at the origin, normal +Y.
    pub fn plane(size: f32) -> Self {
        let h = size * 0.5;
        let positions = vec![
            Vec3::new(-h, 0.0, -h),
            Vec3::new(-h, 0.0, h),
            Vec3::new(h, 0.0, h),
            Vec3::new(h, 0.0, -h),
        ];
        let normals = vec![Vec3::Y; 4];
        let indices = vec![0, 1, 2, 0, 2, 3];
        Self::new(positions, normals, indices)
    }
}
