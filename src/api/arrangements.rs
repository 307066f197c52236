//! Arrangement API
//!
//! Thin adapters from drag gestures to the typed arrangement operations.
//! A move between two arrangements is two calls: `removeEntry` on the
//! source, then `insertGroupAt` on the destination.

use wasm_bindgen::prelude::*;

use super::helpers::{serialize, with_document};
use super::types::ArrangementUpdate;
use crate::models::{ArrangementId, EntryId, GroupKey};
use crate::wasm_info;

fn update(arrangement_id: &ArrangementId, entry_id: Option<EntryId>) -> Result<JsValue, JsValue> {
    let arrangement = with_document("getArrangement", |doc, _| {
        doc.arrangement(arrangement_id).cloned()
    })?;
    let result = ArrangementUpdate {
        arrangement,
        entry_id: entry_id.map(|id| id.as_str().to_string()),
    };
    serialize(&result, "Arrangement serialization error")
}

#[wasm_bindgen(js_name = addArrangement)]
pub fn add_arrangement(name: &str, locked: bool) -> Result<JsValue, JsValue> {
    let id = with_document("addArrangement", |doc, _| Ok(doc.add_arrangement(name, locked)))?;
    update(&id, None)
}

#[wasm_bindgen(js_name = removeArrangement)]
pub fn remove_arrangement(arrangement_id: &str) -> Result<(), JsValue> {
    wasm_info!("removeArrangement: {}", arrangement_id);
    with_document("removeArrangement", |doc, _| {
        doc.remove_arrangement(&ArrangementId::new(arrangement_id))
    })?;
    Ok(())
}

#[wasm_bindgen(js_name = insertGroupAt)]
pub fn insert_group_at(arrangement_id: &str, group_key: &str, index: usize) -> Result<JsValue, JsValue> {
    wasm_info!("insertGroupAt: {} '{}' at {}", arrangement_id, group_key, index);
    let arrangement_id = ArrangementId::new(arrangement_id);
    let entry = with_document("insertGroupAt", |doc, _| {
        doc.insert_group_at(&arrangement_id, &GroupKey::new(group_key), index)
    })?;
    update(&arrangement_id, Some(entry))
}

#[wasm_bindgen(js_name = moveEntry)]
pub fn move_entry(arrangement_id: &str, entry_id: &str, new_index: usize) -> Result<JsValue, JsValue> {
    wasm_info!("moveEntry: {} {} -> {}", arrangement_id, entry_id, new_index);
    let arrangement_id = ArrangementId::new(arrangement_id);
    with_document("moveEntry", |doc, _| {
        doc.move_entry(&arrangement_id, &EntryId::new(entry_id), new_index)
    })?;
    update(&arrangement_id, None)
}

#[wasm_bindgen(js_name = removeEntry)]
pub fn remove_entry(arrangement_id: &str, entry_id: &str) -> Result<JsValue, JsValue> {
    wasm_info!("removeEntry: {} {}", arrangement_id, entry_id);
    let arrangement_id = ArrangementId::new(arrangement_id);
    with_document("removeEntry", |doc, _| {
        doc.remove_entry(&arrangement_id, &EntryId::new(entry_id))
    })?;
    update(&arrangement_id, None)
}
