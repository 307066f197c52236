//! Core document model: lines, song metadata and the document aggregate
//!
//! The document owns every line, arrangement, chord placement and note.
//! Groups are never stored; they are derived from `lines` on demand.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::arrangement::{Arrangement, ArrangementId};
use super::label::SectionLabel;
use crate::error::{Result, SetlistError};
use crate::text::annotations::AnnotationStore;

/// Stable identity of a content line, unaffected by edits to its text
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineOwnerId(String);

impl LineOwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        LineOwnerId(id.into())
    }

    pub fn generate() -> Self {
        LineOwnerId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineOwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A content line: one or more text rows sharing a classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub id: LineOwnerId,

    /// Text rows, in display order
    #[serde(default)]
    pub rows: Vec<String>,

    #[serde(default)]
    pub label: SectionLabel,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_label: Option<String>,
}

impl Line {
    pub fn new(id: LineOwnerId, rows: Vec<String>, label: SectionLabel) -> Self {
        Self {
            id,
            rows,
            label,
            custom_label: None,
        }
    }

    pub fn with_custom_label(mut self, custom_label: impl Into<String>) -> Self {
        self.custom_label = Some(custom_label.into());
        self
    }

    /// Custom label, treating a blank one as absent
    pub fn custom_label_text(&self) -> Option<&str> {
        self.custom_label
            .as_deref()
            .filter(|custom| !custom.trim().is_empty())
    }

    pub fn row(&self, index: usize) -> Option<&str> {
        self.rows.get(index).map(String::as_str)
    }
}

/// Song-level metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub title: Option<String>,

    /// Current song key, as the user wrote it ("Bb", "F#m")
    pub key: Option<String>,
}

/// A song with its arrangements and annotations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub metadata: DocumentMetadata,

    /// Content lines in source order
    #[serde(default)]
    pub lines: Vec<Line>,

    #[serde(default)]
    pub arrangements: Vec<Arrangement>,

    /// Chord placements and notes
    #[serde(default)]
    pub annotations: AnnotationStore,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&self, id: &LineOwnerId) -> Option<&Line> {
        self.lines.iter().find(|line| &line.id == id)
    }

    pub fn line_index(&self, id: &LineOwnerId) -> Option<usize> {
        self.lines.iter().position(|line| &line.id == id)
    }

    /// Row text, or `NotFound` naming whichever half is missing
    pub fn row_text(&self, id: &LineOwnerId, row: usize) -> Result<&str> {
        let line = self
            .line(id)
            .ok_or_else(|| SetlistError::not_found("line", id.as_str()))?;
        line.row(row)
            .ok_or_else(|| SetlistError::not_found("row", format!("{}[{}]", id, row)))
    }

    pub fn arrangement(&self, id: &ArrangementId) -> Result<&Arrangement> {
        self.arrangements
            .iter()
            .find(|arrangement| &arrangement.id == id)
            .ok_or_else(|| SetlistError::not_found("arrangement", id.as_str()))
    }

    pub(crate) fn arrangement_slot(&self, id: &ArrangementId) -> Result<usize> {
        self.arrangements
            .iter()
            .position(|arrangement| &arrangement.id == id)
            .ok_or_else(|| SetlistError::not_found("arrangement", id.as_str()))
    }
}
