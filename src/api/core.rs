//! Document, line and configuration API
//!
//! The document lives in WASM; JavaScript loads it once and then mutates it
//! only through these calls.

use wasm_bindgen::prelude::*;

use super::helpers::{deserialize, document_slot, serialize, with_document};
use super::types::TextEditResult;
use crate::config::EngineConfig;
use crate::models::{Document, Line, LineOwnerId, SectionLabel};
use crate::{wasm_info, wasm_warn};

/// Load a document from JavaScript into WASM's internal storage
///
/// Arrangements are reconciled on the way in, so a stale persisted order
/// comes back repaired in the next snapshot.
#[wasm_bindgen(js_name = loadDocument)]
pub fn load_document(document_js: JsValue) -> Result<(), JsValue> {
    wasm_info!("loadDocument called");

    let mut doc: Document = deserialize(document_js, "Document deserialization error")?;
    let repaired = doc.reconcile_arrangements();
    if repaired > 0 {
        wasm_warn!("loadDocument: reconciled {} stale arrangement(s)", repaired);
    }

    wasm_info!(
        "  {} line(s), {} arrangement(s), {} chord(s), {} note(s)",
        doc.lines.len(),
        doc.arrangements.len(),
        doc.annotations.placements.len(),
        doc.annotations.notes.len()
    );
    *document_slot()? = Some(doc);
    Ok(())
}

/// Get current document snapshot from WASM's internal storage
#[wasm_bindgen(js_name = getDocumentSnapshot)]
pub fn get_document_snapshot() -> Result<JsValue, JsValue> {
    let slot = document_slot()?;
    match slot.as_ref() {
        Some(doc) => serialize(doc, "Document serialization error"),
        None => {
            wasm_warn!("No document loaded");
            Err(JsValue::from_str("No document loaded"))
        }
    }
}

/// Create an empty document and store it internally
#[wasm_bindgen(js_name = createNewDocument)]
pub fn create_new_document(title: Option<String>) -> Result<JsValue, JsValue> {
    wasm_info!("createNewDocument called");

    let mut document = Document::new();
    document.metadata.title = title;
    let result = serialize(&document, "Serialization error")?;
    *document_slot()? = Some(document);
    Ok(result)
}

/// Replace the engine configuration (JSON object; missing fields default)
#[wasm_bindgen(js_name = setConfig)]
pub fn set_config(config_js: JsValue) -> Result<(), JsValue> {
    let config: EngineConfig = deserialize(config_js, "Config deserialization error")?;
    config
        .validate()
        .map_err(|e| super::helpers::to_js_error("setConfig", e))?;
    wasm_info!(
        "setConfig: charWidthPx={} linesPerSlide={}",
        config.char_width_px,
        config.lines_per_slide
    );
    super::helpers::set_config(config)
}

#[wasm_bindgen(js_name = getConfig)]
pub fn get_config() -> Result<JsValue, JsValue> {
    serialize(&super::helpers::config()?, "Config serialization error")
}

/// Derived groups in canonical order
#[wasm_bindgen(js_name = deriveGroups)]
pub fn derive_groups() -> Result<JsValue, JsValue> {
    let groups = with_document("deriveGroups", |doc, _| Ok(doc.groups()))?;
    serialize(&groups, "Groups serialization error")
}

/// Reconcile every arrangement; returns how many changed
#[wasm_bindgen(js_name = reconcileArrangements)]
pub fn reconcile_arrangements() -> Result<usize, JsValue> {
    with_document("reconcileArrangements", |doc, _| Ok(doc.reconcile_arrangements()))
}

#[wasm_bindgen(js_name = insertLine)]
pub fn insert_line(line_js: JsValue, index: usize) -> Result<JsValue, JsValue> {
    let line: Line = deserialize(line_js, "Line deserialization error")?;
    wasm_info!("insertLine: {} at {}", line.id, index);
    with_document("insertLine", |doc, _| doc.insert_line(line, index))?;
    get_document_snapshot()
}

#[wasm_bindgen(js_name = removeLine)]
pub fn remove_line(line_owner_id: &str) -> Result<JsValue, JsValue> {
    wasm_info!("removeLine: {}", line_owner_id);
    with_document("removeLine", |doc, _| doc.remove_line(&LineOwnerId::new(line_owner_id)))?;
    get_document_snapshot()
}

/// Change a line's label; `label` accepts display names ("Pre-Chorus")
#[wasm_bindgen(js_name = reclassifyLine)]
pub fn reclassify_line(
    line_owner_id: &str,
    label: &str,
    custom_label: Option<String>,
) -> Result<JsValue, JsValue> {
    let label: SectionLabel = label.parse().map_err(|e: String| {
        wasm_warn!("reclassifyLine: {}", e);
        JsValue::from_str(&e)
    })?;
    with_document("reclassifyLine", |doc, _| {
        doc.reclassify_line(&LineOwnerId::new(line_owner_id), label, custom_label)
    })?;
    get_document_snapshot()
}

fn edit_result(doc: &Document, id: &LineOwnerId, removed: String) -> crate::error::Result<TextEditResult> {
    let line = doc
        .line(id)
        .cloned()
        .ok_or_else(|| crate::error::SetlistError::not_found("line", id.as_str()))?;
    Ok(TextEditResult {
        placements: doc
            .annotations
            .placements
            .iter()
            .filter(|p| &p.line_owner_id == id)
            .cloned()
            .collect(),
        notes: doc.annotations.notes.clone(),
        line,
        removed,
    })
}

/// Insert text into a row, shifting anchored chords and notes
#[wasm_bindgen(js_name = insertText)]
pub fn insert_text(line_owner_id: &str, row: usize, col: usize, text: &str) -> Result<JsValue, JsValue> {
    let id = LineOwnerId::new(line_owner_id);
    let result = with_document("insertText", |doc, _| {
        doc.insert_text(&id, row, col, text)?;
        edit_result(doc, &id, String::new())
    })?;
    serialize(&result, "Edit result serialization error")
}

/// Delete characters from a row, dropping chords inside the span
#[wasm_bindgen(js_name = deleteText)]
pub fn delete_text(line_owner_id: &str, row: usize, col: usize, len: usize) -> Result<JsValue, JsValue> {
    let id = LineOwnerId::new(line_owner_id);
    let result = with_document("deleteText", |doc, _| {
        let removed = doc.delete_text(&id, row, col, len)?;
        edit_result(doc, &id, removed)
    })?;
    serialize(&result, "Edit result serialization error")
}

/// Transpose every chord to `toKey` and record it as the song key
#[wasm_bindgen(js_name = transposeChords)]
pub fn transpose_chords(to_key: &str) -> Result<JsValue, JsValue> {
    wasm_info!("transposeChords: -> {}", to_key);
    let placements = with_document("transposeChords", |doc, config| {
        doc.transpose_with_markers(to_key, &config.no_chord_markers)?;
        Ok(doc.annotations.placements.clone())
    })?;
    serialize(&placements, "Placements serialization error")
}
