//! Chord and note API

use wasm_bindgen::prelude::*;

use super::helpers::{deserialize, serialize, with_document};
use super::types::RenumberResult;
use crate::models::{ArrangementId, LineOwnerId, NoteId, NotePosition, Placement};
use crate::wasm_log;

#[wasm_bindgen(js_name = placeChord)]
pub fn place_chord(line_owner_id: &str, line_index: usize, char_index: usize, symbol: &str) -> Result<JsValue, JsValue> {
    wasm_log!("placeChord: {}[{}]@{} '{}'", line_owner_id, line_index, char_index, symbol);
    let placement = with_document("placeChord", |doc, _| {
        doc.place_chord(&LineOwnerId::new(line_owner_id), line_index, char_index, symbol)
    })?;
    serialize(&placement, "Placement serialization error")
}

/// Remove chords at exactly this column; returns the removed placements
#[wasm_bindgen(js_name = removeChord)]
pub fn remove_chord(line_owner_id: &str, line_index: usize, char_index: usize) -> Result<JsValue, JsValue> {
    let removed = with_document("removeChord", |doc, _| {
        doc.remove_chord(&LineOwnerId::new(line_owner_id), line_index, char_index)
    })?;
    serialize(&removed, "Placement serialization error")
}

/// Move a chord inside its word; the pixel offset is measured from the row start
#[wasm_bindgen(js_name = dragChord)]
pub fn drag_chord(placement_js: JsValue, pointer_offset_px: f64) -> Result<JsValue, JsValue> {
    let placement: Placement = deserialize(placement_js, "Placement deserialization error")?;
    let moved = with_document("dragChord", |doc, config| {
        doc.drag_chord(&placement, pointer_offset_px, config.char_width_px)
    })?;
    serialize(&moved, "Placement serialization error")
}

/// Create a free-floating note at a page position
#[wasm_bindgen(js_name = addNote)]
pub fn add_note(text: &str, x_pct: f64, y_pct: f64, page_index: Option<u32>) -> Result<JsValue, JsValue> {
    let mut position = NotePosition::new(x_pct, y_pct);
    position.page_index = page_index;
    let created_at_ms = js_sys::Date::now() as i64;

    let note = with_document("addNote", |doc, _| Ok(doc.add_note(text, position, created_at_ms)))?;
    serialize(&note, "Note serialization error")
}

#[wasm_bindgen(js_name = updateNoteText)]
pub fn update_note_text(note_id: &str, text: &str) -> Result<(), JsValue> {
    with_document("updateNoteText", |doc, _| doc.update_note_text(&NoteId::new(note_id), text))
}

#[wasm_bindgen(js_name = moveNote)]
pub fn move_note(note_id: &str, x_pct: f64, y_pct: f64, page_index: Option<u32>) -> Result<(), JsValue> {
    let mut position = NotePosition::new(x_pct, y_pct);
    position.page_index = page_index;
    with_document("moveNote", |doc, _| doc.move_note(&NoteId::new(note_id), position))
}

/// Link a note to the word at a column; returns the linked word
#[wasm_bindgen(js_name = linkNote)]
pub fn link_note(note_id: &str, line_owner_id: &str, line_index: usize, char_index: usize) -> Result<JsValue, JsValue> {
    let linked = with_document("linkNote", |doc, _| {
        doc.link_note(&NoteId::new(note_id), &LineOwnerId::new(line_owner_id), line_index, char_index)
    })?;
    serialize(&linked, "Linked word serialization error")
}

#[wasm_bindgen(js_name = unlinkNote)]
pub fn unlink_note(note_id: &str) -> Result<(), JsValue> {
    with_document("unlinkNote", |doc, _| doc.unlink_note(&NoteId::new(note_id)))
}

#[wasm_bindgen(js_name = deleteNote)]
pub fn delete_note(note_id: &str) -> Result<(), JsValue> {
    with_document("deleteNote", |doc, _| doc.delete_note(&NoteId::new(note_id)))?;
    Ok(())
}

/// Renumber note markers in an arrangement's reading order
///
/// `changed` is false when nothing moved, so the host can skip a save.
#[wasm_bindgen(js_name = renumberNotes)]
pub fn renumber_notes(arrangement_id: &str) -> Result<JsValue, JsValue> {
    let result = with_document("renumberNotes", |doc, _| {
        let changed = doc.renumber_notes(&ArrangementId::new(arrangement_id))?;
        Ok(RenumberResult {
            changed,
            notes: doc.annotations.notes.clone(),
        })
    })?;
    serialize(&result, "Renumber result serialization error")
}
