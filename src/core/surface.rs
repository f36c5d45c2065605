//! Binding a dot field to a drawing surface
//!
//! The browser resolves a canvas by id and hands the result here; a missing
//! element is `None` and mounting stops before anything is sized, rendered
//! or wired to input.

use rand::Rng;
use tracing::debug;

use super::config::{ConfigError, DotFieldConfig};
use super::field::DotField;

/// Backing-store and CSS sizes for a surface on a given display.
///
/// The CSS size is pinned to the logical layout size so enlarging the
/// backing store never feeds back into the next layout measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceFit {
    /// Logical (CSS pixel) size
    pub width: f64,
    pub height: f64,
    /// Device pixels per logical pixel
    pub scale: f64,
}

impl SurfaceFit {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        let scale = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            scale,
        }
    }

    /// Backing store size in device pixels
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.scale).round() as u32,
            (self.height * self.scale).round() as u32,
        )
    }

    /// CSS `width` / `height` values that keep the layout size fixed
    pub fn css_size(&self) -> (String, String) {
        (format!("{}px", self.width), format!("{}px", self.height))
    }
}

/// Something a dot field can be painted onto
pub trait Surface {
    type Error: From<ConfigError>;

    /// Resize the backing store to the current layout, returning the logical size
    fn fit_to_layout(&mut self) -> Result<(f64, f64), Self::Error>;
}

/// A field bound to its surface
pub struct Mounted<S, R> {
    pub field: DotField<R>,
    pub surface: S,
}

impl<S: Surface, R: Rng> Mounted<S, R> {
    /// Bind `config` to a looked-up surface.
    ///
    /// `Ok(None)` when the lookup found nothing: no field is built and the
    /// caller has nothing to start.
    pub fn mount(surface: Option<S>, config: DotFieldConfig, rng: R) -> Result<Option<Self>, S::Error> {
        let Some(surface) = surface else {
            debug!("No surface element, dot field disabled");
            return Ok(None);
        };

        let field = DotField::new(config, rng)?;
        let mut mounted = Self { field, surface };
        mounted.refit()?;
        Ok(Some(mounted))
    }

    /// Refit the surface and regenerate the grid for its logical size
    pub fn refit(&mut self) -> Result<(), S::Error> {
        let (width, height) = self.surface.fit_to_layout()?;
        self.field.resize(width, height);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Canvas sized only by its width/height attributes: layout follows the
    /// backing store unless a CSS size is set
    struct AttributeCanvas {
        backing: (u32, u32),
        css: Option<(f64, f64)>,
        dpr: f64,
        fits: usize,
    }

    impl AttributeCanvas {
        fn new(width: u32, height: u32, dpr: f64) -> Self {
            Self {
                backing: (width, height),
                css: None,
                dpr,
                fits: 0,
            }
        }

        fn layout(&self) -> (f64, f64) {
            self.css
                .unwrap_or((self.backing.0 as f64, self.backing.1 as f64))
        }
    }

    impl Surface for AttributeCanvas {
        type Error = ConfigError;

        fn fit_to_layout(&mut self) -> Result<(f64, f64), ConfigError> {
            self.fits += 1;
            let (width, height) = self.layout();
            let fit = SurfaceFit::new(width, height, self.dpr);
            self.backing = fit.backing_size();
            let (css_w, css_h) = fit.css_size();
            let px = |v: &str| v.trim_end_matches("px").parse::<f64>().unwrap();
            self.css = Some((px(&css_w), px(&css_h)));
            Ok((fit.width, fit.height))
        }
    }

    fn config(spacing: f64) -> DotFieldConfig {
        DotFieldConfig {
            grid_spacing: spacing,
            ..DotFieldConfig::default()
        }
    }

    #[test]
    fn test_missing_surface_mounts_nothing() {
        let mounted = Mounted::<AttributeCanvas, _>::mount(None, config(20.0), StdRng::seed_from_u64(0)).unwrap();
        assert!(mounted.is_none());
    }

    #[test]
    fn test_missing_surface_skips_config_errors() {
        let bad = DotFieldConfig {
            dot_color: "nope".into(),
            ..DotFieldConfig::default()
        };
        let mounted = Mounted::<AttributeCanvas, _>::mount(None, bad, StdRng::seed_from_u64(0)).unwrap();
        assert!(mounted.is_none());
    }

    #[test]
    fn test_mount_sizes_grid_and_stays_stopped() {
        let canvas = AttributeCanvas::new(100, 100, 1.0);
        let mounted = Mounted::mount(Some(canvas), config(20.0), StdRng::seed_from_u64(0))
            .unwrap()
            .unwrap();
        assert_eq!(mounted.surface.fits, 1);
        assert_eq!(mounted.field.size(), (100.0, 100.0));
        assert_eq!(mounted.field.dots().len(), 25);
        assert!(!mounted.field.is_running());
    }

    #[test]
    fn test_refit_is_stable_on_high_dpr() {
        let canvas = AttributeCanvas::new(300, 300, 2.0);
        let mut mounted = Mounted::mount(Some(canvas), config(15.0), StdRng::seed_from_u64(0))
            .unwrap()
            .unwrap();
        let dots = mounted.field.dots().len();

        for _ in 0..3 {
            mounted.refit().unwrap();
            assert_eq!(mounted.field.size(), (300.0, 300.0));
            assert_eq!(mounted.surface.backing, (600, 600));
            assert_eq!(mounted.field.dots().len(), dots);
        }
    }

    #[test]
    fn test_fit_pins_css_size() {
        let fit = SurfaceFit::new(300.0, 150.5, 2.0);
        assert_eq!(fit.backing_size(), (600, 301));
        assert_eq!(fit.css_size(), ("300px".to_string(), "150.5px".to_string()));
    }

    #[test]
    fn test_fit_rejects_bad_ratio() {
        assert_eq!(SurfaceFit::new(10.0, 10.0, 0.0).scale, 1.0);
        assert_eq!(SurfaceFit::new(10.0, 10.0, f64::NAN).scale, 1.0);
        assert_eq!(SurfaceFit::new(-5.0, 10.0, 1.0).width, 0.0);
    }
}
