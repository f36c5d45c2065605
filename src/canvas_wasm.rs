//! 2D canvas backend for the dot field
//!
//! Owns the `<canvas>` element and its rendering context, keeps the backing
//! store in sync with the device pixel ratio.

use std::f64::consts::TAU;

use tracing::{debug, error};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, DomRect, HtmlCanvasElement};

use crate::core::{ConfigError, Painter, Rgba, Surface, SurfaceFit};

/// Canvas element plus its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up a canvas by element id.
    ///
    /// `Ok(None)` when no such element exists; an element that is not a
    /// canvas or refuses a 2D context is an error.
    pub fn find(surface_id: &str) -> Result<Option<Self>, JsValue> {
        let Some(element) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(surface_id))
        else {
            return Ok(None);
        };

        let canvas = element.dyn_into::<HtmlCanvasElement>()?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or("2D canvas context not supported")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Some(Self { canvas, ctx }))
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Surface bounding box in page coordinates
    pub fn bounding_rect(&self) -> DomRect {
        self.canvas.get_bounding_client_rect()
    }

    pub fn painter(&self) -> Canvas2dPainter<'_> {
        Canvas2dPainter { ctx: &self.ctx }
    }
}

impl Surface for CanvasSurface {
    type Error = JsValue;

    /// Match the backing store to the current layout size and device pixel
    /// ratio, pinning the CSS size to the layout size.
    fn fit_to_layout(&mut self) -> Result<(f64, f64), JsValue> {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        let rect = self.bounding_rect();
        let fit = SurfaceFit::new(rect.width(), rect.height(), dpr);

        let (backing_width, backing_height) = fit.backing_size();
        let (css_width, css_height) = fit.css_size();
        let style = self.canvas.style();
        style.set_property("width", &css_width)?;
        style.set_property("height", &css_height)?;
        self.canvas.set_width(backing_width);
        self.canvas.set_height(backing_height);
        self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        self.ctx.scale(fit.scale, fit.scale)?;

        debug!(width = fit.width, height = fit.height, dpr = fit.scale, "Canvas backing store resized");
        Ok((fit.width, fit.height))
    }
}

impl From<ConfigError> for JsValue {
    fn from(e: ConfigError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// [`Painter`] drawing into a 2D canvas context
pub struct Canvas2dPainter<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl Canvas2dPainter<'_> {
    fn circle_path(&self, x: f64, y: f64, radius: f64) -> bool {
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(x, y, radius, 0.0, TAU) {
            error!(?e, x, y, radius, "Failed to trace circle");
            return false;
        }
        true
    }
}

impl Painter for Canvas2dPainter<'_> {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        if self.circle_path(x, y, radius) {
            self.ctx.set_fill_style_str(&color.to_css());
            self.ctx.fill();
        }
    }

    fn stroke_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba, line_width: f64) {
        if self.circle_path(x, y, radius) {
            self.ctx.set_stroke_style_str(&color.to_css());
            self.ctx.set_line_width(line_width);
            self.ctx.stroke();
        }
    }
}
