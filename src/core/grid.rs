//! Dot grid layout
//!
//! Dots sit on a regular lattice offset by half a spacing from the top-left
//! corner. Only the phase is random, so two layouts of the same surface
//! differ in animation but not in position.

use std::f64::consts::TAU;

use rand::Rng;
use tracing::debug;

/// A single grid sample
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub original_x: f64,
    pub original_y: f64,
    /// Oscillation offset in [0, 2π)
    pub phase: f64,
    /// Render position, reset to the original every frame
    pub x: f64,
    pub y: f64,
}

impl Dot {
    pub fn new(x: f64, y: f64, phase: f64) -> Self {
        Self {
            original_x: x,
            original_y: y,
            phase,
            x,
            y,
        }
    }

    #[inline]
    pub fn reset_position(&mut self) {
        self.x = self.original_x;
        self.y = self.original_y;
    }
}

/// Lattice coordinates along one axis: `spacing/2 + i*spacing` while `< extent`
fn axis(extent: f64, spacing: f64) -> impl Iterator<Item = f64> {
    (0..)
        .map(move |i| spacing / 2.0 + i as f64 * spacing)
        .take_while(move |&v| v < extent)
}

/// Lay out dots covering a `width` x `height` surface, column by column.
///
/// Returns an empty grid for degenerate surfaces or a non-positive spacing.
/// When the half-spacing offset pushes the last column or row onto the edge,
/// that column or row is dropped.
pub fn generate_grid<R: Rng + ?Sized>(width: f64, height: f64, spacing: f64, rng: &mut R) -> Vec<Dot> {
    if spacing <= 0.0 || width <= 0.0 || height <= 0.0 {
        debug!(width, height, spacing, "Empty dot grid");
        return Vec::new();
    }

    let mut dots = Vec::new();
    for x in axis(width, spacing) {
        for y in axis(height, spacing) {
            dots.push(Dot::new(x, y, rng.gen_range(0.0..TAU)));
        }
    }

    debug!(width, height, spacing, dots = dots.len(), "Generated dot grid");
    dots
}
