//! Browser-facing dot field component
//!
//! Binds a [`DotField`] to a canvas element, drives it from
//! `requestAnimationFrame` and exposes start/stop to JavaScript.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::canvas_wasm::CanvasSurface;
use crate::core::{DotFieldConfig, Mounted};
use crate::input_wasm::{self, Listeners};
use crate::time::now_millis;

/// State shared between the frame callback and the input handlers
pub type Shared = Mounted<CanvasSurface, StdRng>;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_animation_frame(callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    web_sys::window()
        .ok_or("no window")?
        .request_animation_frame(callback.as_ref().unchecked_ref())
}

/// Convert a JS options object into a validated config; `undefined` and
/// `null` select the defaults
fn config_from_js(config: &JsValue) -> Result<DotFieldConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(DotFieldConfig::default());
    }
    let json: String = js_sys::JSON::stringify(config)?.into();
    DotFieldConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Dot field mounted on a canvas
#[wasm_bindgen]
pub struct DotFieldHandle {
    shared: Rc<RefCell<Shared>>,
    listeners: Listeners,
    frame_callback: FrameCallback,
    pending_frame: Rc<Cell<Option<i32>>>,
}

#[wasm_bindgen]
impl DotFieldHandle {
    /// Mount on the canvas with id `surface_id` and start animating.
    ///
    /// Returns `undefined` when no such element exists.
    pub fn mount(surface_id: &str, config: JsValue) -> Result<Option<DotFieldHandle>, JsValue> {
        Self::mount_with(surface_id, config_from_js(&config)?)
    }

    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.shared.borrow().field.is_running() {
            return Ok(());
        }
        self.shared.borrow_mut().field.start();
        if self.listeners.is_empty() {
            self.listeners = input_wasm::attach(&self.shared)?;
        }
        self.schedule_frames()
    }

    /// Stop animating, detach input listeners and cancel the pending frame
    pub fn stop(&mut self) {
        self.shared.borrow_mut().field.stop();
        self.listeners.detach_all();

        if let Some(id) = self.pending_frame.take() {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.cancel_animation_frame(id) {
                    error!(?e, id, "Failed to cancel animation frame");
                }
            }
        }
        // Dropping the callback breaks its self-reference
        self.frame_callback.borrow_mut().take();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.shared.borrow().field.is_running()
    }

    #[wasm_bindgen(getter = dotCount)]
    pub fn dot_count(&self) -> usize {
        self.shared.borrow().field.dots().len()
    }
}

impl DotFieldHandle {
    pub fn mount_with(surface_id: &str, config: DotFieldConfig) -> Result<Option<Self>, JsValue> {
        let surface = CanvasSurface::find(surface_id)?;
        let Some(mounted) = Mounted::mount(surface, config, StdRng::from_entropy())? else {
            return Ok(None);
        };
        let (width, height) = mounted.field.size();

        let mut handle = Self {
            shared: Rc::new(RefCell::new(mounted)),
            listeners: Listeners::default(),
            frame_callback: Rc::new(RefCell::new(None)),
            pending_frame: Rc::new(Cell::new(None)),
        };
        handle.start()?;

        info!(surface_id, width, height, "Dot field mounted");
        Ok(Some(handle))
    }

    /// Install the self-rescheduling frame callback and request the first frame
    fn schedule_frames(&mut self) -> Result<(), JsValue> {
        let shared = self.shared.clone();
        let pending = self.pending_frame.clone();
        let callback = self.frame_callback.clone();

        *self.frame_callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending.set(None);

            let rendered = {
                let mut s = shared.borrow_mut();
                let Mounted { field, surface } = &mut *s;
                let mut painter = surface.painter();
                field.render_frame(now_millis(), &mut painter)
            };
            if rendered.is_none() {
                return;
            }

            if let Some(cb) = callback.borrow().as_ref() {
                match request_animation_frame(cb) {
                    Ok(id) => pending.set(Some(id)),
                    Err(e) => error!(?e, "Failed to request animation frame"),
                }
            }
        }) as Box<dyn FnMut()>));

        if let Some(cb) = self.frame_callback.borrow().as_ref() {
            self.pending_frame.set(Some(request_animation_frame(cb)?));
        }
        Ok(())
    }
}

impl Drop for DotFieldHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
