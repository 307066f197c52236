//! Group derivation: slide groups from an ordered list of lines
//!
//! Stateless. Groups are recomputed on demand and never stored.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{GroupKey, Line, LineOwnerId, SectionLabel};

/// Lines sharing one classification, in source order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub key: GroupKey,
    pub label: SectionLabel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_label: Option<String>,
    pub member_lines: Vec<LineOwnerId>,
}

/// Derive groups in first-appearance order
///
/// Lines with the same `(label, customLabel)` collapse into one group.
/// Unclassified lines without a custom label each get their own group.
pub fn derive_groups(lines: &[Line]) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    let mut slot_by_key: HashMap<GroupKey, usize> = HashMap::new();

    for line in lines {
        let key = GroupKey::for_line(line);
        match slot_by_key.get(&key) {
            Some(&slot) => groups[slot].member_lines.push(line.id.clone()),
            None => {
                slot_by_key.insert(key.clone(), groups.len());
                groups.push(Group {
                    key,
                    label: line.label,
                    custom_label: line.custom_label_text().map(str::to_string),
                    member_lines: vec![line.id.clone()],
                });
            }
        }
    }

    groups
}

/// Canonical group order as bare keys
pub fn canonical_keys(groups: &[Group]) -> Vec<GroupKey> {
    groups.iter().map(|g| g.key.clone()).collect()
}
