//! Shared types for the WASM API
//!
//! Result shapes handed back to JavaScript. Field names are camelCase to
//! match the host.

use serde::{Deserialize, Serialize};

use crate::models::{Arrangement, Line, Note, Placement};

/// An arrangement after a mutation, plus the entry the call created
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ArrangementUpdate {
    pub arrangement: Arrangement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<String>,
}

/// State of a row's neighbourhood after a text edit
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TextEditResult {
    pub line: Line,
    pub placements: Vec<Placement>,
    pub notes: Vec<Note>,
    /// Text removed by a delete; empty for inserts
    #[serde(default)]
    pub removed: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RenumberResult {
    pub changed: bool,
    pub notes: Vec<Note>,
}
