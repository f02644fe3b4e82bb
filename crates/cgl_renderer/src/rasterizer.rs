//! Software triangle rasterizer with a depth buffer.
//!
//! Per object: vertices go through model-view-projection, are divided by
//! `-w` and mapped to pixel space; normals go through the normal matrix.
//! Vertices are splatted as single pixels, then every triangle is filled with
//! a flat color over its padded screen bounding box using edge functions.
//! Depth is the average of the three vertex depths, tested with strict `<`.
//!
//! Known limitations: no clipping (vertices behind the camera project
//! mirrored), no shadows, one depth per triangle.

use crate::shading::shade;
use crate::{Color, ConfigResult, DebugLine, FrameBuffer, RenderConfig};
use cgl_core::{DirectionalLight, Scene, SceneObject};
use cgl_math::{Camera, Mat4, Mat4Ext, Vec2, Vec3, Vec4};

/// Signed area test: which side of the line through `b` and `a` the point
/// `p` lies on. `(p.x - b.x)(a.y - b.y) - (a.x - b.x)(p.y - b.y)`.
#[inline]
pub fn edge_function(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
}

/// True when `p` is inside or on the boundary of triangle `v1 v2 v3`,
/// for either winding.
pub fn point_in_triangle(p: Vec2, v1: Vec2, v2: Vec2, v3: Vec2) -> bool {
    let d1 = edge_function(p, v1, v2);
    let d2 = edge_function(p, v2, v3);
    let d3 = edge_function(p, v3, v1);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Map a clip-space position to pixel space: divide x, y, z by `-w`, then
/// take [-1, 1] to [0, resolution]. z gets the same mapping and is only
/// meaningful for depth ordering.
pub fn clip_to_screen(clip: Vec4, resolution: u32) -> Vec3 {
    let ndc = clip.truncate() / -clip.w;
    (ndc + 1.0) * 0.5 * resolution as f32
}

/// Splat a projected vertex into its nearest pixel, depth-tested.
pub fn rasterize_point(framebuffer: &mut FrameBuffer, position: Vec3, color: Color) {
    let resolution = framebuffer.resolution() as i64;
    let x = position.x.round_ties_even() as i64;
    let y = position.y.round_ties_even() as i64;

    if (0..resolution).contains(&x) && (0..resolution).contains(&y) {
        framebuffer.set_if_nearer(x as u32, y as u32, position.z, color);
    }
}

/// Fill a screen-space triangle with one color at one depth (the average z
/// of its vertices). Returns the number of pixels written.
pub fn rasterize_triangle(framebuffer: &mut FrameBuffer, v1: Vec3, v2: Vec3, v3: Vec3, color: Color) -> usize {
    let resolution = framebuffer.resolution() as i64;
    let z = (v1.z + v2.z + v3.z) / 3.0;

    let (a, b, c) = (v1.truncate(), v2.truncate(), v3.truncate());
    let min = a.min(b.min(c));
    let max = a.max(b.max(c));

    // Padded by a pixel; the float -> int casts truncate toward zero
    let xmin = ((min.x - 1.0) as i64).max(0);
    let xmax = ((max.x + 1.0) as i64).min(resolution);
    let ymin = ((min.y - 1.0) as i64).max(0);
    let ymax = ((max.y + 1.0) as i64).min(resolution);

    let mut written = 0;
    for x in xmin..xmax {
        for y in ymin..ymax {
            let pixel = Vec2::new(x as f32, y as f32);
            if !point_in_triangle(pixel, a, b, c) {
                continue;
            }
            if framebuffer.set_if_nearer(x as u32, y as u32, z, color) {
                written += 1;
            }
        }
    }
    written
}

/// Rasterizer state: configuration, color + depth buffers, and per-draw
/// scratch space for transformed vertices.
pub struct Rasterizer {
    config: RenderConfig,
    framebuffer: FrameBuffer,
    screen_positions: Vec<Vec3>,
    world_normals: Vec<Vec3>,
    debug_lines: Vec<DebugLine>,
}

impl Rasterizer {
    /// Create a rasterizer. Fails if the configuration is out of range.
    pub fn new(config: RenderConfig) -> ConfigResult<Self> {
        config.validate()?;
        let framebuffer = FrameBuffer::with_depth(config.resolution);
        Ok(Self {
            config,
            framebuffer,
            screen_positions: Vec::new(),
            world_normals: Vec::new(),
            debug_lines: Vec::new(),
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    /// Screen-space triangle edges recorded during the last frame.
    pub fn debug_lines(&self) -> &[DebugLine] {
        &self.debug_lines
    }

    /// Clear the buffers and draw every enabled object of the scene.
    pub fn render_frame(&mut self, scene: &Scene, camera: &Camera) -> &FrameBuffer {
        self.framebuffer.clear(self.config.background_color);
        self.debug_lines.clear();

        let view_projection = camera.view_projection_matrix();
        let mut triangles = 0;
        for object in scene.enabled_objects() {
            triangles += self.draw_object(object, view_projection, &scene.light);
        }

        log::debug!(
            "Rasterized {}x{} frame: {} triangles from scene '{}'",
            self.config.resolution,
            self.config.resolution,
            triangles,
            scene.name
        );
        &self.framebuffer
    }

    /// Draw one object into the current frame without clearing. Returns the
    /// number of triangles submitted.
    pub fn draw_object(&mut self, object: &SceneObject, view_projection: Mat4, light: &DirectionalLight) -> usize {
        let model = object.model_matrix();
        self.transform_vertices(object, view_projection * model, model.normal_matrix());

        for (&position, &normal) in self.screen_positions.iter().zip(&self.world_normals) {
            let color = shade(normal, light, 1.0, &self.config);
            rasterize_point(&mut self.framebuffer, position, color);
        }

        let vertex_count = self.screen_positions.len();
        let mut submitted = 0;
        for [i1, i2, i3] in object.mesh.triangles() {
            if i1 >= vertex_count || i2 >= vertex_count || i3 >= vertex_count {
                log::warn!(
                    "{}: invalid triangle indices [{}, {}, {}], vertex count: {}",
                    object.name,
                    i1,
                    i2,
                    i3,
                    vertex_count
                );
                continue;
            }

            let (v1, v2, v3) = (
                self.screen_positions[i1],
                self.screen_positions[i2],
                self.screen_positions[i3],
            );
            let normal = (self.world_normals[i1] + self.world_normals[i2] + self.world_normals[i3]) / 3.0;

            if self.config.draw_debug_lines {
                self.debug_lines.extend([
                    DebugLine::new(v1, v2, Color::ONE),
                    DebugLine::new(v2, v3, Color::ONE),
                    DebugLine::new(v3, v1, Color::ONE),
                ]);
            }

            let color = shade(normal, light, 1.0, &self.config);
            rasterize_triangle(&mut self.framebuffer, v1, v2, v3, color);
            submitted += 1;
        }

        submitted
    }

    /// Fill the scratch buffers with screen-space positions and world-space
    /// normals. The source mesh is left untouched.
    fn transform_vertices(&mut self, object: &SceneObject, mvp: Mat4, normal_matrix: Mat4) {
        let resolution = self.config.resolution;
        let mesh = &object.mesh;

        self.screen_positions.clear();
        self.screen_positions.extend(
            mesh.positions
                .iter()
                .map(|&p| clip_to_screen(mvp.transform_point4(p), resolution)),
        );

        // Meshes with missing normals shade their extra vertices with ambient only
        self.world_normals.clear();
        self.world_normals.extend(
            (0..mesh.positions.len())
                .map(|i| mesh.normals.get(i).copied().unwrap_or(Vec3::ZERO))
                .map(|n| normal_matrix.transform_vector3(n)),
        );
    }
}
