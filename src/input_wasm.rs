//! DOM input wiring for the dot field
//!
//! Pointer movement and resize are tracked window-wide, presses and touches
//! only on the surface. Every listener is kept so the component can detach
//! them again on stop.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, error, trace};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, MouseEvent, TouchEvent};

use crate::dot_field_wasm::Shared;
use crate::time::now_millis;

type Handler = Closure<dyn FnMut(Event)>;

/// Registered DOM listeners, detached on [`Listeners::detach_all`] or drop
#[derive(Default)]
pub struct Listeners {
    entries: Vec<(EventTarget, &'static str, Handler)>,
}

impl Listeners {
    fn add(&mut self, target: &EventTarget, event: &'static str, handler: Handler) -> Result<(), JsValue> {
        target.add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())?;
        self.entries.push((target.clone(), event, handler));
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn detach_all(&mut self) {
        for (target, event, handler) in self.entries.drain(..) {
            if let Err(e) = target.remove_event_listener_with_callback(event, handler.as_ref().unchecked_ref()) {
                error!(?e, event, "Failed to remove listener");
            }
        }
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        self.detach_all();
    }
}

/// Hook the shared field up to window and surface events
pub fn attach(shared: &Rc<RefCell<Shared>>) -> Result<Listeners, JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let canvas: EventTarget = shared.borrow().surface.canvas().clone().into();
    let mut listeners = Listeners::default();

    // Pointer move - tracked across the whole window, stored surface-local
    let state = shared.clone();
    let on_move = Closure::wrap(Box::new(move |e: Event| {
        let Some(e) = e.dyn_ref::<MouseEvent>() else {
            return;
        };
        let mut s = state.borrow_mut();
        let rect = s.surface.bounding_rect();
        s.field
            .pointer_move(e.client_x() as f64, e.client_y() as f64, rect.left(), rect.top());
    }) as Box<dyn FnMut(Event)>);
    listeners.add(&window, "mousemove", on_move)?;

    // Pointer down - press and start a ripple
    let state = shared.clone();
    let on_down = Closure::wrap(Box::new(move |e: Event| {
        let Some(e) = e.dyn_ref::<MouseEvent>() else {
            return;
        };
        let mut s = state.borrow_mut();
        let rect = s.surface.bounding_rect();
        let (x, y) = (e.client_x() as f64 - rect.left(), e.client_y() as f64 - rect.top());
        trace!(x, y, "Pointer down");
        s.field.pointer_down(x, y, now_millis());
    }) as Box<dyn FnMut(Event)>);
    listeners.add(&canvas, "mousedown", on_down)?;

    // Pointer up
    let state = shared.clone();
    let on_up = Closure::wrap(Box::new(move |_: Event| {
        state.borrow_mut().field.pointer_up();
    }) as Box<dyn FnMut(Event)>);
    listeners.add(&canvas, "mouseup", on_up)?;

    // Touch start - single touch only, ripple without press
    let state = shared.clone();
    let on_touch = Closure::wrap(Box::new(move |e: Event| {
        let Some(e) = e.dyn_ref::<TouchEvent>() else {
            return;
        };
        // Suppress the emulated mousedown that would press the pointer
        e.prevent_default();
        let touches = e.touches();
        if touches.length() != 1 {
            return;
        }
        let Some(touch) = touches.get(0) else {
            return;
        };
        let mut s = state.borrow_mut();
        let rect = s.surface.bounding_rect();
        let (x, y) = (touch.client_x() as f64 - rect.left(), touch.client_y() as f64 - rect.top());
        trace!(x, y, "Touch start");
        s.field.touch_start(x, y, now_millis());
    }) as Box<dyn FnMut(Event)>);
    listeners.add(&canvas, "touchstart", on_touch)?;

    // Resize - refit the backing store and regenerate the grid
    let state = shared.clone();
    let on_resize = Closure::wrap(Box::new(move |_: Event| {
        if let Err(e) = state.borrow_mut().refit() {
            error!(?e, "Failed to resize canvas");
        }
    }) as Box<dyn FnMut(Event)>);
    listeners.add(&window, "resize", on_resize)?;

    debug!(count = listeners.entries.len(), "Input listeners attached");
    Ok(listeners)
}
