//! Marker numbering for word-linked notes
//!
//! Linked notes are numbered 1..k in reading order: by the position of their
//! word in the presented document, then by creation time. Unlinked notes
//! carry no marker.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::groups::Group;
use crate::models::{GroupKey, Line, LineOwnerId, Note, WordKey};
use crate::text::tokenize;

/// Reading-order position of every word in a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordOrderIndex {
    positions: HashMap<WordKey, usize>,
}

impl WordOrderIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a word if it has not been seen yet
    pub fn push(&mut self, key: WordKey) {
        let next = self.positions.len();
        self.positions.entry(key).or_insert(next);
    }

    pub fn position(&self, key: &WordKey) -> Option<usize> {
        self.positions.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl FromIterator<WordKey> for WordOrderIndex {
    fn from_iter<I: IntoIterator<Item = WordKey>>(iter: I) -> Self {
        let mut index = WordOrderIndex::new();
        for key in iter {
            index.push(key);
        }
        index
    }
}

/// Build the index for a presentation order
///
/// Walks `order` group by group, each group's lines, rows, then words. A
/// group presented twice keeps the position of its first appearance. Lines
/// the order never presents follow afterwards in source order so every word
/// has a position.
pub fn build_word_order_index(lines: &[Line], groups: &[Group], order: &[GroupKey]) -> WordOrderIndex {
    let line_by_id: HashMap<&LineOwnerId, &Line> = lines.iter().map(|l| (&l.id, l)).collect();
    let mut index = WordOrderIndex::new();
    let mut visited: HashSet<&LineOwnerId> = HashSet::new();

    for key in order {
        let Some(group) = groups.iter().find(|g| &g.key == key) else {
            log::warn!("word order: arrangement references unknown group '{}'", key);
            continue;
        };
        for member in &group.member_lines {
            if !visited.insert(member) {
                continue;
            }
            if let Some(line) = line_by_id.get(member) {
                push_line_words(line, &mut index);
            }
        }
    }

    for line in lines {
        if visited.insert(&line.id) {
            push_line_words(line, &mut index);
        }
    }

    index
}

fn push_line_words(line: &Line, index: &mut WordOrderIndex) {
    for (row_index, row) in line.rows.iter().enumerate() {
        for word in tokenize(row) {
            index.push(WordKey {
                line_owner_id: line.id.clone(),
                line_index: row_index,
                word_start: word.start,
            });
        }
    }
}

/// Renumbered notes plus whether anything changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenumberOutcome {
    pub notes: Vec<Note>,
    pub changed: bool,
}

/// Assign markers 1..k to linked notes in reading order
///
/// Notes come back in their input order; only `marker_number` changes.
/// Linked notes whose word is missing from the index sort after all indexed
/// ones. `changed` lets callers skip a persistence write.
pub fn renumber(notes: &[Note], index: &WordOrderIndex) -> RenumberOutcome {
    let mut linked: Vec<(usize, usize, i64)> = notes
        .iter()
        .enumerate()
        .filter_map(|(slot, note)| {
            let word = note.linked_word.as_ref()?;
            let position = index.position(&word.word_key()).unwrap_or(usize::MAX);
            Some((slot, position, note.created_at_ms))
        })
        .collect();
    linked.sort_by_key(|&(slot, position, created)| (position, created, slot));

    let mut markers: Vec<Option<u32>> = vec![None; notes.len()];
    for (n, (slot, _, _)) in linked.iter().enumerate() {
        markers[*slot] = Some(n as u32 + 1);
    }

    let prior_marked = notes.iter().filter(|n| n.marker_number.is_some()).count();
    let mut changed = prior_marked != linked.len();

    let renumbered = notes
        .iter()
        .zip(markers)
        .map(|(note, marker)| {
            if note.marker_number != marker {
                changed = true;
            }
            Note {
                marker_number: marker,
                ..note.clone()
            }
        })
        .collect();

    RenumberOutcome {
        notes: renumbered,
        changed,
    }
}
