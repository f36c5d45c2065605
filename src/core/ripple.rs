//! Click ripples: expanding rings that decay over a fixed lifetime
//!
//! - Ripple: a time-stamped point event
//! - RippleBuffer: live ripples in creation order, pruned on insert

use std::collections::VecDeque;

use tracing::{debug, trace};

/// Lifetime of a ripple in milliseconds
pub const RIPPLE_MAX_AGE_MS: f64 = 2000.0;
/// Ripples older than this are dropped when a new one is created
pub const RIPPLE_PRUNE_AGE_MS: f64 = 3000.0;
/// Ring radius (px) reached at the end of the lifetime
pub const RIPPLE_MAX_RADIUS: f64 = 150.0;
/// Half-width (px) of the band around the ring that influences dots
pub const RIPPLE_WIDTH: f64 = 40.0;
/// Upper bound of the summed ripple influence
pub const RIPPLE_INFLUENCE_CAP: f64 = 2.0;
/// Intensity of pointer and touch ripples
pub const DEFAULT_INTENSITY: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ripple {
    pub x: f64,
    pub y: f64,
    /// Creation timestamp (ms)
    pub created_at: f64,
    pub intensity: f64,
}

impl Ripple {
    pub fn new(x: f64, y: f64, created_at: f64) -> Self {
        Self {
            x,
            y,
            created_at,
            intensity: DEFAULT_INTENSITY,
        }
    }

    /// Lifetime fraction in [0, 1), or `None` once expired
    #[inline]
    pub fn progress(&self, now: f64) -> Option<f64> {
        let age = (now - self.created_at).max(0.0);
        (age < RIPPLE_MAX_AGE_MS).then(|| age / RIPPLE_MAX_AGE_MS)
    }

    /// Current ring radius, or `None` once expired
    pub fn radius(&self, now: f64) -> Option<f64> {
        self.progress(now).map(|p| p * RIPPLE_MAX_RADIUS)
    }

    /// Outline alpha, or `None` once expired
    pub fn ring_alpha(&self, now: f64) -> Option<f64> {
        self.progress(now).map(|p| (1.0 - p) * 0.3 * self.intensity)
    }

    /// Contribution to a dot at (`x`, `y`); zero away from the ring band
    pub fn influence(&self, x: f64, y: f64, now: f64) -> f64 {
        let Some(progress) = self.progress(now) else {
            return 0.0;
        };
        let distance = (x - self.x).hypot(y - self.y);
        let off_ring = (distance - progress * RIPPLE_MAX_RADIUS).abs();
        if off_ring >= RIPPLE_WIDTH {
            return 0.0;
        }
        (1.0 - progress) * self.intensity * (1.0 - off_ring / RIPPLE_WIDTH)
    }
}

/// Ripples in creation order
#[derive(Debug, Default)]
pub struct RippleBuffer {
    ripples: VecDeque<Ripple>,
}

impl RippleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a ripple, first dropping any older than [`RIPPLE_PRUNE_AGE_MS`]
    pub fn push(&mut self, ripple: Ripple) {
        self.prune(ripple.created_at);
        self.ripples.push_back(ripple);
        debug!(
            x = ripple.x,
            y = ripple.y,
            intensity = ripple.intensity,
            buffered = self.ripples.len(),
            "Ripple created"
        );
    }

    /// Drop ripples older than [`RIPPLE_PRUNE_AGE_MS`] at `now`
    pub fn prune(&mut self, now: f64) {
        let before = self.ripples.len();
        self.ripples
            .retain(|r| now - r.created_at <= RIPPLE_PRUNE_AGE_MS);
        let dropped = before - self.ripples.len();
        if dropped > 0 {
            trace!(dropped, remaining = self.ripples.len(), "Pruned ripples");
        }
    }

    /// Ripples still inside their lifetime at `now`
    pub fn live(&self, now: f64) -> impl Iterator<Item = &Ripple> + '_ {
        self.ripples
            .iter()
            .filter(move |r| r.progress(now).is_some())
    }

    /// Summed ring influence at (`x`, `y`), capped at [`RIPPLE_INFLUENCE_CAP`]
    pub fn influence(&self, x: f64, y: f64, now: f64) -> f64 {
        let total: f64 = self.live(now).map(|r| r.influence(x, y, now)).sum();
        total.min(RIPPLE_INFLUENCE_CAP)
    }

    /// Number of buffered ripples, live or not
    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }

    pub fn clear(&mut self) {
        self.ripples.clear();
    }
}
