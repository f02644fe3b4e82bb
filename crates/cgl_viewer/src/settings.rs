//! Viewer settings: a JSON file layered under command line overrides.

use std::path::Path;

use anyhow::{Context, Result};
use cgl_core::DirectionalLight;
use cgl_math::Camera;
use cgl_renderer::RenderConfig;
use serde::Deserialize;

/// Contents of a `--config` file. Every section is optional.
///
/// ```json
/// {
///   "render": { "resolution": 128, "max_bounces": 2 },
///   "light": { "forward": [0.3, -1.0, 0.6], "color": [1.0, 0.95, 0.9] }
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub render: RenderConfig,
    /// Overrides the demo scene light
    pub light: Option<DirectionalLight>,
    /// Overrides the demo camera
    pub camera: Option<Camera>,
}

impl ViewerSettings {
    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse settings from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let mut settings: Self = serde_json::from_str(text)?;
        // Accept lights written with an unnormalized direction
        if let Some(light) = settings.light {
            settings.light = Some(DirectionalLight::new(light.forward, light.color));
        }
        Ok(settings)
    }
}
