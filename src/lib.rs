//! Dot field - animated decorative dot grid for a canvas region
//!
//! Dots pulse on their own, swell near the pointer and light up as click
//! ripples sweep across them. The simulation lives in [`core`] and runs
//! anywhere; the browser component binds it to a `<canvas>`.

pub mod core;
pub mod loop_state;
pub mod theme;
pub mod time;

#[cfg(target_arch = "wasm32")]
mod canvas_wasm;
#[cfg(target_arch = "wasm32")]
mod dot_field_wasm;
#[cfg(target_arch = "wasm32")]
mod input_wasm;

#[cfg(target_arch = "wasm32")]
pub use dot_field_wasm::DotFieldHandle;

/// Element id picked up automatically on page load
pub const PROFILE_CANVAS_ID: &str = "profile-canvas";

#[cfg(target_arch = "wasm32")]
mod entry {
    use tracing::error;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::core::DotFieldConfig;
    use crate::dot_field_wasm::DotFieldHandle;
    use crate::PROFILE_CANVAS_ID;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        // Initialize tracing for browser console
        tracing_wasm::set_as_global_default();

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;

        if document.ready_state() == "loading" {
            let on_ready = Closure::wrap(Box::new(|| {
                if let Err(e) = activate_profile_canvas() {
                    error!(?e, "Failed to activate profile canvas");
                }
            }) as Box<dyn FnMut()>);
            document.add_event_listener_with_callback(
                "DOMContentLoaded",
                on_ready.as_ref().unchecked_ref(),
            )?;
            on_ready.forget();
            Ok(())
        } else {
            activate_profile_canvas()
        }
    }

    /// Mount a default-configured field on `#profile-canvas` if the page has one
    fn activate_profile_canvas() -> Result<(), JsValue> {
        if let Some(handle) = DotFieldHandle::mount_with(PROFILE_CANVAS_ID, DotFieldConfig::default())? {
            // Lives for the rest of the page
            std::mem::forget(handle);
        }
        Ok(())
    }
}
