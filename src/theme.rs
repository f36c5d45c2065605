//! Default palette for the profile dot field

/// Preset colors used by the auto-activated instance
pub mod colors {
    /// Surface background, never painted
    pub const BACKGROUND: &str = "transparent";

    /// Gold dots (#FFD700)
    pub const DOT_GOLD: &str = "#FFD700";
}

/// Stroke width for ripple outlines, in logical pixels
pub const RING_LINE_WIDTH: f64 = 1.0;
