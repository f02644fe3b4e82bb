//! Renderer configuration.
//!
//! One immutable settings block per renderer instance. Ranges that used to
//! be slider hints are enforced by [`RenderConfig::validate`], which every
//! renderer constructor calls.

use crate::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound for `max_bounces`.
pub const MAX_BOUNCES_LIMIT: u32 = 5;

/// Errors for settings outside their allowed range.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Resolution must be at least 1 pixel, got {0}")]
    InvalidResolution(u32),

    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Width and height of the square image in pixels.
    /// Cost grows with the square of this, so keep it small.
    pub resolution: u32,
    /// Base color shared by every object
    pub object_color: Color,
    /// Color of pixels that see no geometry
    pub background_color: Color,
    /// Constant light floor standing in for indirect light, in [0, 1]
    pub ambient_intensity: f32,
    /// Ray tracer only: share of a hit's color taken from its reflection, in [0, 1]
    pub reflectiveness: f32,
    /// Ray tracer only: reflection recursion depth, in [0, 5]. 0 disables reflection.
    pub max_bounces: u32,
    /// Record debug line segments for each hit (ray tracer) or triangle edge (rasterizer)
    pub draw_debug_lines: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            resolution: 64,
            object_color: Color::ONE,
            background_color: Color::ZERO,
            ambient_intensity: 0.1,
            reflectiveness: 0.5,
            max_bounces: 3,
            draw_debug_lines: true,
        }
    }
}

impl RenderConfig {
    /// Check every setting against its allowed range.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.resolution == 0 {
            return Err(ConfigError::InvalidResolution(self.resolution));
        }
        check_unit("ambient_intensity", self.ambient_intensity)?;
        check_unit("reflectiveness", self.reflectiveness)?;
        if self.max_bounces > MAX_BOUNCES_LIMIT {
            return Err(ConfigError::OutOfRange {
                field: "max_bounces",
                value: self.max_bounces as f64,
                min: 0.0,
                max: MAX_BOUNCES_LIMIT as f64,
            });
        }
        Ok(())
    }
}

fn check_unit(field: &'static str, value: f32) -> ConfigResult<()> {
    // Written so NaN fails too
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value: value as f64,
            min: 0.0,
            max: 1.0,
        })
    }
}
