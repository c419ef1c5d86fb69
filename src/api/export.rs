//! Slicing operations for the WASM API

use crate::models::Orientation;
use crate::musicxml::Score;
use crate::slicer::{resolve_selection, slice_musicxml, SliceSettings};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Selection preview returned to JavaScript
#[derive(Serialize)]
struct SelectionPreview<'a> {
    metadata: &'a crate::models::ScoreMetadata,
    selection: &'a crate::models::Selection,
}

fn js_error(context: &str, e: impl std::fmt::Display) -> JsValue {
    log::error!("{}: {}", context, e);
    JsValue::from_str(&format!("{}: {}", context, e))
}

/// Slice a MusicXML document by an address expression
///
/// # Returns
/// The sliced MusicXML string
#[wasm_bindgen(js_name = sliceMusicXml)]
pub fn slice_musicxml_js(musicxml: &str, expression: &str, partwise: bool) -> Result<String, JsValue> {
    let settings = SliceSettings {
        orientation: Orientation::from_partwise(partwise),
    };
    let result = slice_musicxml(musicxml, expression, Some(settings))
        .map_err(|e| js_error("Slicing failed", e))?;

    log::info!(
        "sliceMusicXml: {} bytes out, {} note(s) silenced",
        result.musicxml.len(),
        result.report.notes_silenced
    );
    Ok(result.musicxml)
}

/// Resolve an address expression without slicing
///
/// # Returns
/// `{ metadata, selection }` as a JavaScript object
#[wasm_bindgen(js_name = resolveSelection)]
pub fn resolve_selection_js(musicxml: &str, expression: &str, partwise: bool) -> Result<JsValue, JsValue> {
    let score = Score::parse(musicxml).map_err(|e| js_error("Invalid score", e))?;
    let (metadata, selection) =
        resolve_selection(&score, expression, Orientation::from_partwise(partwise))
            .map_err(|e| js_error("Invalid selection", e))?;

    let preview = SelectionPreview {
        metadata: &metadata,
        selection: &selection,
    };
    serde_wasm_bindgen::to_value(&preview).map_err(|e| js_error("Serialization failed", e))
}
