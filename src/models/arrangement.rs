//! Arrangement data: group keys, order entries and persisted rows

use serde::{Deserialize, Serialize};
use std::fmt;

use super::core::Line;
use super::label::SectionLabel;

const KEY_SEPARATOR: &str = "::";

/// Identity of a derived group
///
/// `label::customLabel` for classified lines, `unclassified::<line id>` for
/// lines without any classification so they are never merged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(String);

impl GroupKey {
    pub fn new(key: impl Into<String>) -> Self {
        GroupKey(key.into())
    }

    /// Key for the group a line belongs to
    pub fn for_line(line: &Line) -> Self {
        match (line.label, line.custom_label_text()) {
            (SectionLabel::Unclassified, None) => GroupKey(format!(
                "{}{}{}",
                SectionLabel::Unclassified.as_str(),
                KEY_SEPARATOR,
                line.id
            )),
            (label, custom) => GroupKey::from_labels(label, custom),
        }
    }

    pub fn from_labels(label: SectionLabel, custom_label: Option<&str>) -> Self {
        GroupKey(format!(
            "{}{}{}",
            label.as_str(),
            KEY_SEPARATOR,
            custom_label.filter(|c| !c.trim().is_empty()).unwrap_or("")
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recover `(label, customLabel)` from the key text
    ///
    /// Singleton keys of unclassified lines decode to `(Unclassified, None)`;
    /// the suffix there may be a line id or a label and the key alone cannot
    /// say which, so callers holding the lines should take labels from them. Keys that do not decode
    /// fall back to `(Unclassified, None)`.
    pub fn labels(&self) -> (SectionLabel, Option<String>) {
        let Some((label, rest)) = self.0.split_once(KEY_SEPARATOR) else {
            return (SectionLabel::Unclassified, None);
        };
        let label: SectionLabel = match label.parse() {
            Ok(l) => l,
            Err(_) => return (SectionLabel::Unclassified, None),
        };
        let custom = match label {
            SectionLabel::Unclassified => None,
            _ if rest.is_empty() => None,
            _ => Some(rest.to_string()),
        };
        (label, custom)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable per-entry id inside an arrangement order
///
/// Distinct from `GroupKey` so the same group may appear more than once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        EntryId(id.into())
    }

    pub fn generate() -> Self {
        EntryId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry in an arrangement's order
///
/// Label fields are a denormalized copy so the entry can still be shown if
/// the group lookup fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRef {
    pub entry_id: EntryId,
    pub group_key: GroupKey,
    pub label: SectionLabel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_label: Option<String>,
}

impl GroupRef {
    /// Fresh entry for a key, labels decoded from the key itself
    pub fn new(group_key: GroupKey) -> Self {
        let (label, custom_label) = group_key.labels();
        Self {
            entry_id: EntryId::generate(),
            group_key,
            label,
            custom_label,
        }
    }

    pub fn with_entry_id(mut self, entry_id: EntryId) -> Self {
        self.entry_id = entry_id;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArrangementId(String);

impl ArrangementId {
    pub fn new(id: impl Into<String>) -> Self {
        ArrangementId(id.into())
    }

    pub fn generate() -> Self {
        ArrangementId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArrangementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named ordering of a document's groups
///
/// A locked arrangement always equals canonical group order and is only ever
/// rebuilt by reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrangement {
    pub id: ArrangementId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub order: Vec<GroupRef>,
}

impl Arrangement {
    pub fn new(id: ArrangementId, name: impl Into<String>, locked: bool) -> Self {
        Self {
            id,
            name: name.into(),
            locked,
            order: Vec::new(),
        }
    }

    pub fn keys(&self) -> Vec<&GroupKey> {
        self.order.iter().map(|entry| &entry.group_key).collect()
    }

    pub fn position_of(&self, entry_id: &EntryId) -> Option<usize> {
        self.order.iter().position(|entry| &entry.entry_id == entry_id)
    }

    /// Rows in the persisted `(arrangement, group, position)` shape
    pub fn to_rows(&self) -> Vec<ArrangementRow> {
        self.order
            .iter()
            .enumerate()
            .map(|(position, entry)| ArrangementRow {
                arrangement_id: self.id.clone(),
                group_key: entry.group_key.clone(),
                entry_id: entry.entry_id.clone(),
                position,
                label: Some(entry.label),
                custom_label: entry.custom_label.clone(),
            })
            .collect()
    }

    /// Rebuild from persisted rows; rows for other arrangements are ignored
    /// and the rest are taken in `position` order.
    ///
    /// Labels stored on a row win over decoding them from the key, which
    /// cannot tell `unclassified::<line id>` from `unclassified::<label>`.
    pub fn from_rows(
        id: ArrangementId,
        name: impl Into<String>,
        locked: bool,
        rows: &[ArrangementRow],
    ) -> Self {
        let mut own: Vec<&ArrangementRow> =
            rows.iter().filter(|row| row.arrangement_id == id).collect();
        own.sort_by_key(|row| row.position);

        let order = own
            .into_iter()
            .map(|row| row.to_entry())
            .collect();

        Self {
            id,
            name: name.into(),
            locked,
            order,
        }
    }
}

/// Join-table row for one arrangement entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrangementRow {
    pub arrangement_id: ArrangementId,
    pub group_key: GroupKey,
    pub entry_id: EntryId,
    pub position: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<SectionLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_label: Option<String>,
}

impl ArrangementRow {
    fn to_entry(&self) -> GroupRef {
        let entry = GroupRef::new(self.group_key.clone()).with_entry_id(self.entry_id.clone());
        match self.label {
            Some(label) => GroupRef {
                label,
                custom_label: self.custom_label.clone(),
                ..entry
            },
            None => entry,
        }
    }
}
