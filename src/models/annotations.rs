//! Annotation records: chord placements and notes
//!
//! These are the persisted shapes. The logic that keeps them anchored to
//! words lives in `text::annotations`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::core::LineOwnerId;
use crate::error::{Result, SetlistError};

/// A chord symbol anchored at a character offset of one row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub line_owner_id: LineOwnerId,
    pub line_index: usize,
    pub char_index: usize,
    pub symbol: String,
}

impl Placement {
    pub fn new(
        line_owner_id: LineOwnerId,
        line_index: usize,
        char_index: usize,
        symbol: impl Into<String>,
    ) -> Self {
        Self {
            line_owner_id,
            line_index,
            char_index,
            symbol: symbol.into(),
        }
    }

    pub fn is_on_row(&self, line_owner_id: &LineOwnerId, line_index: usize) -> bool {
        &self.line_owner_id == line_owner_id && self.line_index == line_index
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn new(id: impl Into<String>) -> Self {
        NoteId(id.into())
    }

    pub fn generate() -> Self {
        NoteId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a note sits on the rendered page, in percent of page size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePosition {
    pub x_pct: f64,
    pub y_pct: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_index: Option<u32>,
}

impl NotePosition {
    pub fn new(x_pct: f64, y_pct: f64) -> Self {
        Self {
            x_pct: clamp_pct(x_pct),
            y_pct: clamp_pct(y_pct),
            page_index: None,
        }
    }

    pub fn on_page(mut self, page_index: u32) -> Self {
        self.page_index = Some(page_index);
        self
    }
}

fn clamp_pct(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// The word a note is bound to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedWord {
    pub line_owner_id: LineOwnerId,
    pub line_index: usize,
    pub word_start_offset: usize,
    pub word_text: String,
}

impl LinkedWord {
    pub fn word_key(&self) -> WordKey {
        WordKey {
            line_owner_id: self.line_owner_id.clone(),
            line_index: self.line_index,
            word_start: self.word_start_offset,
        }
    }
}

/// Identity of one word occurrence in the document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordKey {
    pub line_owner_id: LineOwnerId,
    pub line_index: usize,
    pub word_start: usize,
}

/// A footnote-style note, optionally linked to a word
///
/// `marker_number` is owned by the renumberer; callers never set it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub text: String,
    #[serde(flatten)]
    pub position: NotePosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_word: Option<LinkedWord>,
    pub created_at_ms: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_number: Option<u32>,
}

impl Note {
    pub fn new(id: NoteId, text: impl Into<String>, position: NotePosition, created_at_ms: i64) -> Self {
        Self {
            id,
            text: text.into(),
            position,
            linked_word: None,
            created_at_ms,
            marker_number: None,
        }
    }

    pub fn is_linked(&self) -> bool {
        self.linked_word.is_some()
    }
}

/// The per-arrangement annotation blob as persisted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationSnapshot {
    #[serde(default)]
    pub placements: Vec<Placement>,
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl AnnotationSnapshot {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| SetlistError::Serialization(format!("annotation snapshot: {}", e)))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| SetlistError::Serialization(format!("annotation snapshot: {}", e)))
    }
}
