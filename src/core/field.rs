//! DotField: grid, pointer and ripples combined into per-frame draw calls
//!
//! Platform-agnostic. The browser layer feeds it input events and
//! timestamps and hands it a canvas-backed [`Painter`] every frame.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use super::config::{ConfigError, DotFieldConfig};
use super::grid::{generate_grid, Dot};
use super::paint::{Painter, Rgb};
use super::pointer::PointerState;
use super::ripple::{Ripple, RippleBuffer};
use crate::loop_state::LoopState;
use crate::theme::RING_LINE_WIDTH;

const BASE_SIZE: f64 = 1.5;
const SIZE_GAIN: f64 = 3.0;
const SIZE_WOBBLE: f64 = 0.5;
const BASE_OPACITY: f64 = 0.6;
const OPACITY_GAIN: f64 = 0.4;
const OPACITY_WOBBLE: f64 = 0.1;
const MIN_OPACITY: f64 = 0.3;

/// Dot radius for a combined influence, floored at zero
#[inline]
pub fn dot_size(influence: f64, time: f64, phase: f64) -> f64 {
    (BASE_SIZE + influence * SIZE_GAIN + (time + phase).sin() * SIZE_WOBBLE).max(0.0)
}

/// Dot opacity for a combined influence.
///
/// Floored at 0.3 but not capped: values above 1.0 are left for the
/// drawing backend to clamp.
#[inline]
pub fn dot_opacity(influence: f64, time: f64, phase: f64) -> f64 {
    let shimmer = (time * 0.5 + phase).sin().abs() * OPACITY_WOBBLE;
    (BASE_OPACITY + influence * OPACITY_GAIN + shimmer).max(MIN_OPACITY)
}

/// Summary of one rendered frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub dots: usize,
    pub rings: usize,
    pub live_ripples: usize,
    /// Largest combined pointer + ripple influence of any dot
    pub peak_influence: f64,
}

pub struct DotField<R = StdRng> {
    config: DotFieldConfig,
    dot_color: Rgb,
    width: f64,
    height: f64,
    dots: Vec<Dot>,
    pointer: PointerState,
    ripples: RippleBuffer,
    /// Phase clock, advanced by `animation_speed` every frame
    time: f64,
    state: LoopState,
    rng: R,
}

impl DotField<StdRng> {
    /// Field with OS-seeded phases
    pub fn from_entropy(config: DotFieldConfig) -> Result<Self, ConfigError> {
        Self::new(config, StdRng::from_entropy())
    }

    /// Field with reproducible phases
    pub fn with_seed(config: DotFieldConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> DotField<R> {
    /// Create an empty, stopped field. Call [`DotField::resize`] to lay out dots.
    pub fn new(config: DotFieldConfig, rng: R) -> Result<Self, ConfigError> {
        let dot_color = config.validate()?;
        Ok(Self {
            config,
            dot_color,
            width: 0.0,
            height: 0.0,
            dots: Vec::new(),
            pointer: PointerState::default(),
            ripples: RippleBuffer::new(),
            time: 0.0,
            state: LoopState::Stopped,
            rng,
        })
    }

    /// Regenerate the grid for new logical surface dimensions
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.dots = generate_grid(width, height, self.config.grid_spacing, &mut self.rng);
        debug!(width, height, dots = self.dots.len(), "Dot field resized");
    }

    /// Track the pointer given page coordinates and the surface origin
    pub fn pointer_move(&mut self, client_x: f64, client_y: f64, origin_left: f64, origin_top: f64) {
        self.pointer.move_to(client_x, client_y, origin_left, origin_top);
    }

    /// Press at surface-local (`x`, `y`): starts a ripple
    pub fn pointer_down(&mut self, x: f64, y: f64, now: f64) {
        self.pointer.is_down = true;
        self.ripples.push(Ripple::new(x, y, now));
    }

    pub fn pointer_up(&mut self) {
        self.pointer.is_down = false;
    }

    /// Single touch at surface-local (`x`, `y`): starts a ripple without
    /// pressing the pointer
    pub fn touch_start(&mut self, x: f64, y: f64, now: f64) {
        self.ripples.push(Ripple::new(x, y, now));
    }

    pub fn start(&mut self) {
        if !self.state.is_running() {
            info!(dots = self.dots.len(), "Dot field started");
        }
        self.state = LoopState::Running;
    }

    pub fn stop(&mut self) {
        if self.state.is_running() {
            info!("Dot field stopped");
        }
        self.state = LoopState::Stopped;
    }

    /// Paint one frame at timestamp `now` (ms).
    ///
    /// Returns `None` without touching the painter while stopped.
    pub fn render_frame<P: Painter + ?Sized>(&mut self, now: f64, painter: &mut P) -> Option<FrameStats> {
        if !self.state.is_running() {
            return None;
        }

        self.time += self.config.animation_speed;
        painter.clear(self.width, self.height);

        let mut stats = FrameStats {
            live_ripples: self.ripples.live(now).count(),
            ..FrameStats::default()
        };

        for dot in &mut self.dots {
            dot.reset_position();

            let influence =
                self.pointer.influence(dot.x, dot.y) + self.ripples.influence(dot.x, dot.y, now);
            stats.peak_influence = stats.peak_influence.max(influence);

            let size = dot_size(influence, self.time, dot.phase);
            let opacity = dot_opacity(influence, self.time, dot.phase);
            painter.fill_circle(dot.x, dot.y, size, self.dot_color.with_alpha(opacity));
            stats.dots += 1;
        }

        if !self.config.remove_wave_line {
            for ripple in self.ripples.live(now) {
                let (Some(radius), Some(alpha)) = (ripple.radius(now), ripple.ring_alpha(now)) else {
                    continue;
                };
                painter.stroke_circle(
                    ripple.x,
                    ripple.y,
                    radius,
                    self.dot_color.with_alpha(alpha),
                    RING_LINE_WIDTH,
                );
                stats.rings += 1;
            }
        }

        trace!(
            dots = stats.dots,
            rings = stats.rings,
            live_ripples = stats.live_ripples,
            peak = stats.peak_influence,
            "Frame rendered"
        );
        Some(stats)
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn config(&self) -> &DotFieldConfig {
        &self.config
    }

    pub fn dot_color(&self) -> Rgb {
        self.dot_color
    }

    /// Logical surface size
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn ripples(&self) -> &RippleBuffer {
        &self.ripples
    }

    /// Current phase clock
    pub fn time(&self) -> f64 {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::paint::{DrawCommand, RecordingPainter};

    fn field(config: DotFieldConfig) -> DotField {
        let mut field = DotField::with_seed(config, 1).unwrap();
        field.resize(100.0, 100.0);
        field
    }

    fn spaced(spacing: f64) -> DotFieldConfig {
        DotFieldConfig {
            grid_spacing: spacing,
            ..DotFieldConfig::default()
        }
    }

    /// Park the pointer far away so only ripples influence dots
    fn park_pointer<R: Rng>(field: &mut DotField<R>) {
        field.pointer_move(-1000.0, -1000.0, 0.0, 0.0);
    }

    #[test]
    fn test_size_and_opacity_without_influence() {
        assert!((dot_size(0.0, 0.0, 0.0) - 1.5).abs() < 1e-12);
        assert!((dot_opacity(0.0, 0.0, 0.0) - 0.6).abs() < 1e-12);

        let half_pi = std::f64::consts::FRAC_PI_2;
        assert!((dot_size(0.0, 0.0, half_pi) - 2.0).abs() < 1e-12);
        assert!((dot_size(0.0, 0.0, -half_pi) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_size_grows_with_influence() {
        // influence 1: 1.5 + 3 = 4.5
        assert!((dot_size(1.0, 0.0, 0.0) - 4.5).abs() < 1e-12);
        assert!(dot_size(2.0, 1.0, 2.0) > dot_size(1.0, 1.0, 2.0));
        assert!(dot_size(0.0, 3.0, 1.0) >= 0.0);
    }

    #[test]
    fn test_opacity_is_floored_not_capped() {
        // influence 3: 0.6 + 1.2 = 1.8, left unclamped
        assert!((dot_opacity(3.0, 0.0, 0.0) - 1.8).abs() < 1e-12);
        for step in 0..64 {
            let t = step as f64 * 0.37;
            assert!(dot_opacity(0.0, t, 1.3) >= MIN_OPACITY);
        }
    }

    #[test]
    fn test_stopped_field_paints_nothing() {
        let mut field = field(spaced(20.0));
        let mut painter = RecordingPainter::new();

        assert_eq!(field.state(), LoopState::Stopped);
        assert!(field.render_frame(0.0, &mut painter).is_none());
        assert!(painter.commands().is_empty());
        assert_eq!(field.time(), 0.0);

        field.start();
        assert!(field.render_frame(0.0, &mut painter).is_some());
        field.stop();
        painter.reset();
        assert!(field.render_frame(16.0, &mut painter).is_none());
        assert!(painter.commands().is_empty());
    }

    #[test]
    fn test_frame_paints_every_dot() {
        let mut field = field(spaced(20.0));
        let mut painter = RecordingPainter::new();
        field.start();

        let stats = field.render_frame(0.0, &mut painter).unwrap();
        assert_eq!(stats.dots, 25);
        assert_eq!(stats.rings, 0);
        assert_eq!(painter.fill_count(), 25);
        assert_eq!(
            painter.commands()[0],
            DrawCommand::Clear {
                width: 100.0,
                height: 100.0
            }
        );
        assert!((field.time() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_pointer_enlarges_nearby_dot() {
        let mut field = field(spaced(20.0));
        let mut painter = RecordingPainter::new();
        field.start();
        field.pointer_move(510.0, 310.0, 500.0, 300.0);
        assert_eq!((field.pointer().x, field.pointer().y), (10.0, 10.0));

        let stats = field.render_frame(0.0, &mut painter).unwrap();
        assert!((stats.peak_influence - 1.0).abs() < 1e-12);

        let DrawCommand::FillCircle { x, y, radius, color } = painter.commands()[1] else {
            panic!("expected the first dot");
        };
        assert_eq!((x, y), (10.0, 10.0));
        let phase = field.dots()[0].phase;
        assert!((radius - dot_size(1.0, field.time(), phase)).abs() < 1e-12);
        assert!((color.alpha - dot_opacity(1.0, field.time(), phase)).abs() < 1e-12);
        assert_eq!(color.rgb, Rgb::new(255, 215, 0));
    }

    #[test]
    fn test_pointer_and_ripple_add_uncapped() {
        let mut field = field(spaced(20.0));
        let mut painter = RecordingPainter::new();
        field.start();

        // Pointer on dot (10, 10) and several fresh ripples centered on it:
        // ripple sum caps at 2, pointer adds 1 on top
        field.pointer_move(10.0, 10.0, 0.0, 0.0);
        for _ in 0..4 {
            field.pointer_down(10.0, 10.0, 5000.0);
        }
        let stats = field.render_frame(5000.0, &mut painter).unwrap();
        assert!((stats.peak_influence - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_pointer_down_and_up() {
        let mut field = field(spaced(20.0));
        field.pointer_down(40.0, 60.0, 100.0);
        assert!(field.pointer().is_down);
        assert_eq!(field.ripples().len(), 1);

        field.pointer_up();
        assert!(!field.pointer().is_down);
        assert_eq!(field.ripples().len(), 1);
    }

    #[test]
    fn test_touch_creates_ripple_without_press() {
        let mut field = field(spaced(20.0));
        field.touch_start(50.0, 50.0, 100.0);
        assert!(!field.pointer().is_down);
        assert_eq!(field.ripples().len(), 1);
        let ripple = field.ripples().live(100.0).next().copied().unwrap();
        assert_eq!((ripple.x, ripple.y, ripple.intensity), (50.0, 50.0, 2.0));
    }

    #[test]
    fn test_ring_outline_drawn_while_live() {
        let mut field = field(spaced(20.0));
        let mut painter = RecordingPainter::new();
        field.start();
        park_pointer(&mut field);
        field.pointer_down(50.0, 50.0, 1000.0);

        let stats = field.render_frame(2000.0, &mut painter).unwrap();
        assert_eq!((stats.rings, stats.live_ripples), (1, 1));
        let ring = painter
            .commands()
            .iter()
            .find_map(|c| match *c {
                DrawCommand::StrokeCircle { radius, color, .. } => Some((radius, color.alpha)),
                _ => None,
            })
            .unwrap();
        assert!((ring.0 - 75.0).abs() < 1e-12);
        assert!((ring.1 - 0.3).abs() < 1e-12);

        // Expired ripple: no outline, no influence
        painter.reset();
        let stats = field.render_frame(3000.0, &mut painter).unwrap();
        assert_eq!((stats.rings, stats.live_ripples), (0, 0));
        assert_eq!(stats.peak_influence, 0.0);
    }

    #[test]
    fn test_remove_wave_line_suppresses_outline() {
        let mut field = field(DotFieldConfig {
            grid_spacing: 20.0,
            remove_wave_line: true,
            ..DotFieldConfig::default()
        });
        let mut painter = RecordingPainter::new();
        field.start();
        field.pointer_down(50.0, 50.0, 0.0);

        let stats = field.render_frame(500.0, &mut painter).unwrap();
        assert_eq!(stats.live_ripples, 1);
        assert_eq!(stats.rings, 0);
        assert_eq!(painter.stroke_count(), 0);
    }

    #[test]
    fn test_resize_regenerates_grid() {
        let mut field = field(spaced(20.0));
        assert_eq!(field.dots().len(), 25);

        field.resize(200.0, 40.0);
        assert_eq!(field.size(), (200.0, 40.0));
        assert_eq!(field.dots().len(), 20);
        assert!(field
            .dots()
            .iter()
            .all(|d| d.original_x < 200.0 && d.original_y < 40.0));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = DotFieldConfig {
            dot_color: "#12".into(),
            ..DotFieldConfig::default()
        };
        assert!(matches!(
            DotField::with_seed(config, 0),
            Err(ConfigError::InvalidColor(_))
        ));
    }
}
