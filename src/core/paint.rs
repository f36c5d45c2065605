//! Drawing primitives shared by the browser canvas and headless backends
//!
//! The frame computation in [`super::field`] only talks to a [`Painter`];
//! the browser implements it on top of a 2D canvas context, tests and the
//! CLI use [`RecordingPainter`].

use std::fmt;
use std::str::FromStr;

use super::config::ConfigError;

/// 8-bit RGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pair this color with an alpha channel
    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba { rgb: self, alpha }
    }
}

/// Parses strict `#RRGGBB` hex notation.
impl FromStr for Rgb {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidColor(s.to_string());

        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// RGB color plus an unclamped alpha.
///
/// Alpha may exceed 1.0; the canvas backend clamps it when painting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f64,
}

impl Rgba {
    /// CSS `rgba(...)` notation for canvas fill/stroke styles
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.rgb.r, self.rgb.g, self.rgb.b, self.alpha
        )
    }
}

/// Drawing backend for one animation frame
pub trait Painter {
    /// Clear the logical `width` x `height` area to transparent
    fn clear(&mut self, width: f64, height: f64);

    /// Fill a circle centered at (`x`, `y`)
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba);

    /// Stroke a circle outline centered at (`x`, `y`)
    fn stroke_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba, line_width: f64);
}

/// A single recorded draw call
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear { width: f64, height: f64 },
    FillCircle { x: f64, y: f64, radius: f64, color: Rgba },
    StrokeCircle { x: f64, y: f64, radius: f64, color: Rgba, line_width: f64 },
}

/// Painter that records draw calls instead of rasterizing them
#[derive(Debug, Default)]
pub struct RecordingPainter {
    commands: Vec<DrawCommand>,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands recorded since the last [`RecordingPainter::reset`]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn fill_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .count()
    }

    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeCircle { .. }))
            .count()
    }

    /// Drop recorded commands, keeping the allocation
    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Painter for RecordingPainter {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::FillCircle { x, y, radius, color });
    }

    fn stroke_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba, line_width: f64) {
        self.commands.push(DrawCommand::StrokeCircle {
            x,
            y,
            radius,
            color,
            line_width,
        });
    }
}
