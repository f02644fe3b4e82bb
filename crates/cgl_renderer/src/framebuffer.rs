//! Square color buffer with an optional parallel depth buffer.
//!
//! Pixel `(x, y)` lives at index `y * resolution + x`, with row 0 at the
//! bottom of the image.

use crate::Color;
use cgl_math::Interval;

/// Color samples for one frame, plus depth when rasterizing.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    resolution: u32,
    pixels: Vec<Color>,
    depth: Option<Vec<f32>>,
}

impl FrameBuffer {
    /// Create a color-only buffer filled with black.
    pub fn new(resolution: u32) -> Self {
        let count = (resolution as usize) * (resolution as usize);
        Self {
            resolution,
            pixels: vec![Color::ZERO; count],
            depth: None,
        }
    }

    /// Create a buffer with a depth channel, every depth at +infinity.
    pub fn with_depth(resolution: u32) -> Self {
        let mut buffer = Self::new(resolution);
        buffer.depth = Some(vec![f32::INFINITY; buffer.pixels.len()]);
        buffer
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// All color samples, row-major from the bottom row.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Reset every pixel to `background` and every depth to +infinity.
    pub fn clear(&mut self, background: Color) {
        self.pixels.fill(background);
        if let Some(depth) = &mut self.depth {
            depth.fill(f32::INFINITY);
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.resolution && y < self.resolution);
        (y as usize) * (self.resolution as usize) + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y), ignoring depth.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let idx = self.index(x, y);
        self.pixels[idx] = color;
    }

    /// Stored depth at (x, y), `None` without a depth channel.
    pub fn depth_at(&self, x: u32, y: u32) -> Option<f32> {
        let idx = self.index(x, y);
        self.depth.as_ref().map(|d| d[idx])
    }

    /// Depth-tested write. Succeeds only when `depth` is strictly less than
    /// the stored depth, so on ties the first writer keeps the pixel.
    /// Without a depth channel this is a plain write.
    pub fn set_if_nearer(&mut self, x: u32, y: u32, depth: f32, color: Color) -> bool {
        let idx = self.index(x, y);
        match &mut self.depth {
            Some(stored) if depth < stored[idx] => {
                stored[idx] = depth;
                self.pixels[idx] = color;
                true
            }
            Some(_) => false,
            None => {
                self.pixels[idx] = color;
                true
            }
        }
    }

    /// Convert to RGBA bytes, bottom row first.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba8(*color));
        }
        bytes
    }
}

/// Quantize a color to 8 bits per channel: clamp to [0, 1], scale, round.
/// Alpha is always opaque.
pub fn color_to_rgba8(color: Color) -> [u8; 4] {
    let channel = |c: f32| (Interval::UNIT.clamp(c) * 255.0).round() as u8;
    [channel(color.x), channel(color.y), channel(color.z), 255]
}
