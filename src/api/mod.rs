//! Score slicer WASM API
//!
//! JavaScript-facing entry points. Each call is a pure string-in,
//! string/object-out transform; no document state is kept between calls.

pub mod export;

pub use export::{resolve_selection_js, slice_musicxml_js};

use wasm_bindgen::prelude::*;

// Runs once when the WASM module is instantiated.
#[cfg(feature = "console")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        return;
    }
    log::info!("Score slicer WASM module initialized");
}
