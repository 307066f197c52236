//! WASM build test
//!
//! Drives the JavaScript-facing API inside a wasm runtime. Native builds
//! skip this file.

#![cfg(target_arch = "wasm32")]

use setlist_wasm::api;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn load_song() {
    let json = r#"{
        "metadata": { "title": "Amazing Grace", "key": "G" },
        "lines": [
            { "id": "v1", "rows": ["Amazing grace how sweet"], "label": "verse" },
            { "id": "c1", "rows": ["My chains are gone"], "label": "chorus" }
        ],
        "arrangements": [
            { "id": "master", "name": "Master", "locked": true, "order": [] }
        ]
    }"#;
    let value = js_sys::JSON::parse(json).unwrap();
    api::load_document(value).unwrap();
}

#[wasm_bindgen_test]
fn test_load_reconciles_arrangements() {
    load_song();
    let rows: Vec<setlist_wasm::models::ArrangementRow> =
        serde_wasm_bindgen::from_value(api::export_arrangement_rows().unwrap()).unwrap();
    let keys: Vec<&str> = rows.iter().map(|r| r.group_key.as_str()).collect();
    assert_eq!(keys, vec!["verse::", "chorus::"]);
}

#[wasm_bindgen_test]
fn test_locked_mutation_is_rejected() {
    load_song();
    let result = api::insert_group_at("master", "verse::", 0);
    assert!(result.is_err());
}

#[wasm_bindgen_test]
fn test_place_and_transpose() {
    load_song();
    api::place_chord("v1", 0, 0, "G").unwrap();
    let placements: Vec<setlist_wasm::Placement> =
        serde_wasm_bindgen::from_value(api::transpose_chords("A").unwrap()).unwrap();
    assert_eq!(placements[0].symbol, "A");
}

#[wasm_bindgen_test]
fn test_note_gets_timestamp_and_marker() {
    load_song();
    let note: setlist_wasm::Note = serde_wasm_bindgen::from_value(api::add_note("hold", 10.0, 10.0, None).unwrap()).unwrap();
    assert!(note.created_at_ms > 0);

    api::link_note(note.id.as_str(), "c1", 0, 3).unwrap();
    let result = api::renumber_notes("master").unwrap();
    assert!(result != JsValue::UNDEFINED);
}

#[wasm_bindgen_test]
fn test_export_slides() {
    load_song();
    let text = api::export_slides("master").unwrap();
    assert_eq!(text, "Amazing grace how sweet\n\nMy chains are gone\n");
}

#[wasm_bindgen_test]
fn test_malformed_document_is_rejected() {
    let err = api::load_document(JsValue::from_str("not a document")).unwrap_err();
    let msg = err.as_string().unwrap();
    assert!(msg.starts_with("Document deserialization error"));
}

#[wasm_bindgen_test]
fn test_unknown_arrangement_reports_not_found() {
    load_song();
    let err = api::remove_entry("missing", "e1").unwrap_err();
    assert!(err.as_string().unwrap().contains("not found"));
}
