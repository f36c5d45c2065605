//! DotField configuration
//!
//! Mirrors the options object accepted by the browser constructor:
//! camelCase keys, every field optional.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::paint::Rgb;
use crate::theme::colors;

/// Smallest accepted dot spacing in pixels
pub const MIN_GRID_SPACING: f64 = 1.0;

/// Errors raised while building a [`DotFieldConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("dot color {0:?} is not a #RRGGBB hex color")]
    InvalidColor(String),
    #[error("grid spacing must be at least 1px, got {0}")]
    InvalidSpacing(f64),
    #[error("animation speed must be a non-negative number, got {0}")]
    InvalidSpeed(f64),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DotFieldConfig {
    /// Informational only, the surface is never filled
    pub background_color: String,
    /// `#RRGGBB`
    pub dot_color: String,
    /// Pixels between dot centers
    pub grid_spacing: f64,
    /// Phase advance per frame
    pub animation_speed: f64,
    /// Skip stroking ripple outlines
    pub remove_wave_line: bool,
}

impl Default for DotFieldConfig {
    fn default() -> Self {
        Self {
            background_color: colors::BACKGROUND.to_string(),
            dot_color: colors::DOT_GOLD.to_string(),
            grid_spacing: 15.0,
            animation_speed: 0.02,
            remove_wave_line: false,
        }
    }
}

impl DotFieldConfig {
    /// Parse a (possibly partial) JSON options object and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field, returning the parsed dot color on success
    pub fn validate(&self) -> Result<Rgb, ConfigError> {
        let result = self.check();
        if let Err(e) = &result {
            warn!(error = %e, "Rejected dot field config");
        }
        result
    }

    fn check(&self) -> Result<Rgb, ConfigError> {
        if !self.grid_spacing.is_finite() || self.grid_spacing < MIN_GRID_SPACING {
            return Err(ConfigError::InvalidSpacing(self.grid_spacing));
        }
        if !self.animation_speed.is_finite() || self.animation_speed < 0.0 {
            return Err(ConfigError::InvalidSpeed(self.animation_speed));
        }
        self.dot_color.parse()
    }
}

/// Parse a surface size written as `WxH`, e.g. `300x200`
pub fn parse_surface_size(value: &str) -> Option<(f64, f64)> {
    let (w, h) = value.split_once(['x', 'X'])?;
    let (w, h) = (w.trim().parse::<f64>().ok()?, h.trim().parse::<f64>().ok()?);
    (w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0).then_some((w, h))
}
