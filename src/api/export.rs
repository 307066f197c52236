//! Export API: persistence rows and text renderings

use wasm_bindgen::prelude::*;

use super::helpers::{serialize, with_document};
use crate::models::{AnnotationSnapshot, ArrangementId, ArrangementRow};
use crate::renderers;

/// `(arrangementId, groupKey, entryId, position)` rows for every arrangement
#[wasm_bindgen(js_name = exportArrangementRows)]
pub fn export_arrangement_rows() -> Result<JsValue, JsValue> {
    let rows: Vec<ArrangementRow> = with_document("exportArrangementRows", |doc, _| {
        Ok(doc.arrangements.iter().flat_map(|a| a.to_rows()).collect())
    })?;
    serialize(&rows, "Row serialization error")
}

/// Chord placements and notes as one JSON blob
#[wasm_bindgen(js_name = exportAnnotations)]
pub fn export_annotations() -> Result<String, JsValue> {
    with_document("exportAnnotations", |doc, _| doc.annotations.snapshot().to_json())
}

/// Replace all chords and notes from a JSON blob
#[wasm_bindgen(js_name = importAnnotations)]
pub fn import_annotations(json: &str) -> Result<(), JsValue> {
    with_document("importAnnotations", |doc, _| {
        let snapshot = AnnotationSnapshot::from_json(json)?;
        doc.annotations = crate::text::AnnotationStore::from_snapshot(snapshot);
        Ok(())
    })
}

/// Slide text for an arrangement, using the configured lines per slide
#[wasm_bindgen(js_name = exportSlides)]
pub fn export_slides(arrangement_id: &str) -> Result<String, JsValue> {
    with_document("exportSlides", |doc, config| {
        renderers::export_slide_text(doc, &ArrangementId::new(arrangement_id), config.lines_per_slide)
    })
}

#[wasm_bindgen(js_name = exportChordChart)]
pub fn export_chord_chart(arrangement_id: &str) -> Result<String, JsValue> {
    with_document("exportChordChart", |doc, _| {
        renderers::render_chart(doc, &ArrangementId::new(arrangement_id))
    })
}
