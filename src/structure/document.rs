//! Document-level operations
//!
//! Each method validates everything it needs before touching state, so an
//! error leaves the document unchanged. Operations that can move the
//! canonical group list (line insert, remove, reclassify) reconcile every
//! arrangement before returning.

use super::arrangement;
use super::groups::{canonical_keys, derive_groups, Group};
use super::markers::{build_word_order_index, renumber, WordOrderIndex};
use crate::error::{Result, SetlistError};
use crate::models::{
    Arrangement, ArrangementId, Document, EntryId, GroupKey, Key, Line, LineOwnerId, LinkedWord, Note,
    NoteId, NotePosition, Placement, SectionLabel,
};
use crate::transposition::{transpose_with_markers, DEFAULT_NO_CHORD_MARKERS};

/// Byte offset of character column `col`, clamped to the end of `text`
fn byte_offset(text: &str, col: usize) -> usize {
    text.char_indices()
        .nth(col)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

impl Document {
    /// Parse a document from its JSON form and reconcile its arrangements
    pub fn from_json(json: &str) -> Result<Self> {
        let mut document: Document =
            serde_json::from_str(json).map_err(|e| SetlistError::Serialization(e.to_string()))?;
        document.reconcile_arrangements();
        Ok(document)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| SetlistError::Serialization(e.to_string()))
    }

    // ------------------------------------------------------------------
    // Groups and arrangements
    // ------------------------------------------------------------------

    pub fn groups(&self) -> Vec<Group> {
        derive_groups(&self.lines)
    }

    pub fn canonical_keys(&self) -> Vec<GroupKey> {
        canonical_keys(&self.groups())
    }

    /// Reconcile every arrangement against the current groups
    ///
    /// Returns how many arrangements changed.
    pub fn reconcile_arrangements(&mut self) -> usize {
        let groups = self.groups();
        let mut changed = 0;
        for slot in self.arrangements.iter_mut() {
            let next = arrangement::reconcile_groups(&groups, slot);
            if next != *slot {
                changed += 1;
                *slot = next;
            }
        }
        changed
    }

    /// Add an arrangement, already reconciled against the current groups
    pub fn add_arrangement(&mut self, name: &str, locked: bool) -> ArrangementId {
        let empty = Arrangement::new(ArrangementId::generate(), name, locked);
        let created = arrangement::reconcile_groups(&self.groups(), &empty);
        let id = created.id.clone();
        log::info!("added arrangement '{}' ({}, locked={})", name, id, locked);
        self.arrangements.push(created);
        id
    }

    pub fn remove_arrangement(&mut self, id: &ArrangementId) -> Result<Arrangement> {
        let slot = self.arrangement_slot(id)?;
        Ok(self.arrangements.remove(slot))
    }

    /// Insert an entry for an existing group; returns the new entry id
    pub fn insert_group_at(
        &mut self,
        arrangement_id: &ArrangementId,
        group_key: &GroupKey,
        index: usize,
    ) -> Result<EntryId> {
        let slot = self.arrangement_slot(arrangement_id)?;
        if !self.canonical_keys().contains(group_key) {
            return Err(SetlistError::not_found("group", group_key.as_str()));
        }

        let current = &self.arrangements[slot];
        let mut next = arrangement::insert_group_at(current, group_key, index)?;
        let at = index.min(current.order.len());

        // Carry the group's custom label, which the bare key may not encode
        if let Some(group) = self.groups().into_iter().find(|g| &g.key == group_key) {
            next.order[at].label = group.label;
            next.order[at].custom_label = group.custom_label;
        }

        let entry_id = next.order[at].entry_id.clone();
        self.arrangements[slot] = next;
        Ok(entry_id)
    }

    pub fn move_entry(&mut self, arrangement_id: &ArrangementId, entry_id: &EntryId, new_index: usize) -> Result<()> {
        let slot = self.arrangement_slot(arrangement_id)?;
        self.arrangements[slot] = arrangement::move_entry(&self.arrangements[slot], entry_id, new_index)?;
        Ok(())
    }

    pub fn remove_entry(&mut self, arrangement_id: &ArrangementId, entry_id: &EntryId) -> Result<()> {
        let slot = self.arrangement_slot(arrangement_id)?;
        self.arrangements[slot] = arrangement::remove_entry(&self.arrangements[slot], entry_id)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Lines
    // ------------------------------------------------------------------

    /// Insert a line at `index` (clamped to the end)
    pub fn insert_line(&mut self, mut line: Line, index: usize) -> Result<()> {
        if self.line(&line.id).is_some() {
            return Err(SetlistError::Duplicate {
                kind: "line",
                id: line.id.to_string(),
            });
        }
        line.custom_label = line.custom_label_text().map(str::to_string);
        let at = index.min(self.lines.len());
        self.lines.insert(at, line);
        self.reconcile_arrangements();
        Ok(())
    }

    /// Remove a line with its chords; notes linked into it are unlinked
    pub fn remove_line(&mut self, id: &LineOwnerId) -> Result<Line> {
        let at = self
            .line_index(id)
            .ok_or_else(|| SetlistError::not_found("line", id.as_str()))?;
        let removed = self.lines.remove(at);
        self.annotations.remove_line(id);
        self.reconcile_arrangements();
        Ok(removed)
    }

    pub fn reclassify_line(
        &mut self,
        id: &LineOwnerId,
        label: SectionLabel,
        custom_label: Option<String>,
    ) -> Result<()> {
        let at = self
            .line_index(id)
            .ok_or_else(|| SetlistError::not_found("line", id.as_str()))?;
        let custom_label = custom_label.filter(|c| !c.trim().is_empty());

        let line = &mut self.lines[at];
        if line.label == label && line.custom_label == custom_label {
            return Ok(());
        }
        log::debug!("reclassify {}: {} -> {}", id, line.label, label);
        line.label = label;
        line.custom_label = custom_label;
        self.reconcile_arrangements();
        Ok(())
    }

    /// Insert `text` at character column `col` of a row
    ///
    /// Anchors at or after `col` shift right; linked notes re-read their word.
    pub fn insert_text(&mut self, id: &LineOwnerId, row: usize, col: usize, text: &str) -> Result<()> {
        self.row_text(id, row)?;
        let inserted = text.chars().count();
        if inserted == 0 {
            return Ok(());
        }

        let at = self.line_index(id).ok_or_else(|| SetlistError::not_found("line", id.as_str()))?;
        let row_text = &mut self.lines[at].rows[row];
        let col = col.min(row_text.chars().count());
        let byte = byte_offset(row_text, col);
        row_text.insert_str(byte, text);

        self.annotations.on_insert(id, row, col, inserted);
        self.annotations.refresh_linked_words(&self.lines);
        Ok(())
    }

    /// Delete `len` characters from column `col` of a row; returns the removed text
    ///
    /// Chords inside the span are dropped and notes whose word start fell in
    /// the span are unlinked. Words joined by the delete keep their leftmost
    /// chord.
    pub fn delete_text(&mut self, id: &LineOwnerId, row: usize, col: usize, len: usize) -> Result<String> {
        let chars = self.row_text(id, row)?.chars().count();
        let col = col.min(chars);
        let len = len.min(chars - col);
        if len == 0 {
            return Ok(String::new());
        }

        let at = self.line_index(id).ok_or_else(|| SetlistError::not_found("line", id.as_str()))?;
        let row_text = &mut self.lines[at].rows[row];
        let start = byte_offset(row_text, col);
        let end = byte_offset(row_text, col + len);
        let removed: String = row_text.drain(start..end).collect();

        self.annotations.on_delete(id, row, col, len);
        self.annotations.collapse_word_chords(&self.lines, id, row)?;
        self.annotations.refresh_linked_words(&self.lines);
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Chords
    // ------------------------------------------------------------------

    pub fn place_chord(&mut self, id: &LineOwnerId, row: usize, col: usize, symbol: &str) -> Result<Placement> {
        self.annotations
            .place_chord(self.lines.as_slice(), id, row, col, symbol)
    }

    pub fn remove_chord(&mut self, id: &LineOwnerId, row: usize, col: usize) -> Result<Vec<Placement>> {
        self.annotations.remove_chord(id, row, col)
    }

    pub fn drag_chord(&mut self, placement: &Placement, pointer_offset_px: f64, char_width_px: f64) -> Result<Placement> {
        self.annotations
            .drag_chord(self.lines.as_slice(), placement, pointer_offset_px, char_width_px)
    }

    /// Transpose every chord to `to_key` and record it as the song key
    ///
    /// Without a current key the chords stay as they are and only the key is
    /// recorded. An unrecognized `to_key` is rejected.
    pub fn transpose(&mut self, to_key: &str) -> Result<()> {
        self.transpose_with_markers(to_key, DEFAULT_NO_CHORD_MARKERS)
    }

    pub fn transpose_with_markers<S: AsRef<str>>(&mut self, to_key: &str, no_chord_markers: &[S]) -> Result<()> {
        let to_key = to_key.trim();
        let parsed: Key = to_key.parse()?;

        if let Some(from_key) = self.metadata.key.as_deref() {
            self.annotations.placements =
                transpose_with_markers(&self.annotations.placements, from_key, to_key, no_chord_markers);
        } else {
            log::info!("transpose: no current key, recording {}", parsed);
        }
        self.metadata.key = Some(to_key.to_string());
        Ok(())
    }

    // ------------------------------------------------------------------
    // Notes
    // ------------------------------------------------------------------

    pub fn add_note(&mut self, text: &str, position: NotePosition, created_at_ms: i64) -> Note {
        self.annotations
            .add_note(Note::new(NoteId::generate(), text, position, created_at_ms))
    }

    pub fn update_note_text(&mut self, id: &NoteId, text: &str) -> Result<()> {
        self.annotations.update_note_text(id, text)
    }

    pub fn move_note(&mut self, id: &NoteId, position: NotePosition) -> Result<()> {
        self.annotations.move_note(id, position)
    }

    pub fn link_note(&mut self, id: &NoteId, line: &LineOwnerId, row: usize, col: usize) -> Result<LinkedWord> {
        self.annotations
            .link_note(self.lines.as_slice(), id, line, row, col)
    }

    pub fn unlink_note(&mut self, id: &NoteId) -> Result<()> {
        self.annotations.unlink_note(id)
    }

    pub fn delete_note(&mut self, id: &NoteId) -> Result<Note> {
        self.annotations.delete_note(id)
    }

    /// Reading order of words as presented by one arrangement
    pub fn word_order_index(&self, arrangement_id: &ArrangementId) -> Result<WordOrderIndex> {
        let arrangement = self.arrangement(arrangement_id)?;
        let order: Vec<GroupKey> = arrangement.keys().into_iter().cloned().collect();
        Ok(build_word_order_index(&self.lines, &self.groups(), &order))
    }

    /// Renumber note markers in an arrangement's reading order
    ///
    /// Returns whether any marker changed.
    pub fn renumber_notes(&mut self, arrangement_id: &ArrangementId) -> Result<bool> {
        let index = self.word_order_index(arrangement_id)?;
        let outcome = renumber(&self.annotations.notes, &index);
        if outcome.changed {
            self.annotations.notes = outcome.notes;
        }
        Ok(outcome.changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, label: SectionLabel, text: &str) -> Line {
        Line::new(LineOwnerId::new(id), vec![text.to_string()], label)
    }

    fn song() -> Document {
        let mut doc = Document::new();
        doc.lines = vec![
            line("v1", SectionLabel::Verse, "Amazing grace how sweet"),
            line("c1", SectionLabel::Chorus, "My chains are gone"),
            line("v2", SectionLabel::Verse, "That saved a wretch"),
        ];
        doc
    }

    fn keys(arrangement: &Arrangement) -> Vec<&str> {
        arrangement.order.iter().map(|e| e.group_key.as_str()).collect()
    }

    #[test]
    fn test_new_arrangement_starts_canonical() {
        let mut doc = song();
        let id = doc.add_arrangement("Sunday", false);
        assert_eq!(keys(doc.arrangement(&id).unwrap()), vec!["verse::", "chorus::"]);
    }

    #[test]
    fn test_reclassify_reconciles_each_arrangement() {
        let mut doc = song();
        let locked = doc.add_arrangement("Master", true);
        let free = doc.add_arrangement("Short", false);
        let chorus_entry = doc.arrangement(&free).unwrap().order[1].entry_id.clone();
        doc.move_entry(&free, &chorus_entry, 0).unwrap();

        doc.reclassify_line(&LineOwnerId::new("v2"), SectionLabel::Bridge, None)
            .unwrap();

        assert_eq!(keys(doc.arrangement(&locked).unwrap()), vec!["verse::", "chorus::", "bridge::"]);
        assert_eq!(keys(doc.arrangement(&free).unwrap()), vec!["chorus::", "verse::", "bridge::"]);
    }

    #[test]
    fn test_insert_group_requires_known_key() {
        let mut doc = song();
        let id = doc.add_arrangement("Sunday", false);
        let before = doc.arrangement(&id).unwrap().clone();

        let err = doc.insert_group_at(&id, &GroupKey::new("tag::"), 0).unwrap_err();
        assert!(matches!(err, SetlistError::NotFound { kind: "group", .. }));
        assert_eq!(doc.arrangement(&id).unwrap(), &before);

        let entry = doc.insert_group_at(&id, &GroupKey::new("chorus::"), 99).unwrap();
        let arrangement = doc.arrangement(&id).unwrap();
        assert_eq!(keys(arrangement), vec!["verse::", "chorus::", "chorus::"]);
        assert_eq!(arrangement.order[2].entry_id, entry);
    }

    #[test]
    fn test_locked_rejects_and_leaves_state() {
        let mut doc = song();
        let id = doc.add_arrangement("Master", true);
        let entry = doc.arrangement(&id).unwrap().order[0].entry_id.clone();
        let before = doc.arrangements.clone();

        assert!(doc.remove_entry(&id, &entry).is_err());
        assert!(doc.move_entry(&id, &entry, 1).is_err());
        assert_eq!(doc.arrangements, before);
    }

    #[test]
    fn test_insert_line_rejects_duplicate_id() {
        let mut doc = song();
        let err = doc
            .insert_line(line("v1", SectionLabel::Tag, "again"), 0)
            .unwrap_err();
        assert!(matches!(err, SetlistError::Duplicate { .. }));
        assert_eq!(doc.lines.len(), 3);
    }

    #[test]
    fn test_text_edits_shift_chords() {
        let mut doc = song();
        let id = LineOwnerId::new("c1");
        doc.place_chord(&id, 0, 3, "G").unwrap();
        doc.place_chord(&id, 0, 14, "D").unwrap();

        doc.insert_text(&id, 0, 0, "Oh ").unwrap();
        assert_eq!(doc.lines[1].rows[0], "Oh My chains are gone");
        let cols: Vec<_> = doc.annotations.placements.iter().map(|p| p.char_index).collect();
        assert_eq!(cols, vec![6, 17]);

        let removed = doc.delete_text(&id, 0, 6, 7).unwrap();
        assert_eq!(removed, "chains ");
        assert_eq!(doc.lines[1].rows[0], "Oh My are gone");
        let cols: Vec<_> = doc.annotations.placements.iter().map(|p| p.char_index).collect();
        assert_eq!(cols, vec![10]);
    }

    #[test]
    fn test_joining_words_keeps_one_chord() {
        let mut doc = Document::new();
        doc.lines = vec![line("l1", SectionLabel::Verse, "ab cd")];
        let id = LineOwnerId::new("l1");
        doc.place_chord(&id, 0, 0, "G").unwrap();
        doc.place_chord(&id, 0, 3, "D").unwrap();

        doc.delete_text(&id, 0, 2, 1).unwrap();
        assert_eq!(doc.lines[0].rows[0], "abcd");
        let chords: Vec<_> = doc
            .annotations
            .placements
            .iter()
            .map(|p| (p.char_index, p.symbol.as_str()))
            .collect();
        assert_eq!(chords, vec![(0, "G")]);
    }

    #[test]
    fn test_deleting_across_words_keeps_leftmost_chord() {
        let mut doc = Document::new();
        doc.lines = vec![line("l1", SectionLabel::Verse, "ab cd ef")];
        let id = LineOwnerId::new("l1");
        doc.place_chord(&id, 0, 1, "G").unwrap();
        doc.place_chord(&id, 0, 4, "D").unwrap();
        doc.place_chord(&id, 0, 7, "C").unwrap();

        // "ab cd ef" -> "abd ef": the space and 'c' go, D survives the span
        doc.delete_text(&id, 0, 2, 2).unwrap();
        assert_eq!(doc.lines[0].rows[0], "abd ef");
        let chords: Vec<_> = doc
            .annotations
            .placements
            .iter()
            .map(|p| (p.char_index, p.symbol.as_str()))
            .collect();
        assert_eq!(chords, vec![(1, "G"), (5, "C")]);
    }

    #[test]
    fn test_insert_line_blank_custom_label_stays_singleton() {
        let mut doc = Document::new();
        doc.insert_line(line("u1", SectionLabel::Unclassified, "a").with_custom_label(""), 0)
            .unwrap();
        doc.insert_line(line("u2", SectionLabel::Unclassified, "b").with_custom_label(" "), 1)
            .unwrap();

        assert_eq!(doc.lines[0].custom_label, None);
        let groups = derive_groups(&doc.lines);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_text_edit_on_missing_row_changes_nothing() {
        let mut doc = song();
        let before = doc.lines.clone();
        assert!(doc.insert_text(&LineOwnerId::new("c1"), 3, 0, "x").is_err());
        assert!(doc.delete_text(&LineOwnerId::new("zz"), 0, 0, 1).is_err());
        assert_eq!(doc.lines, before);
    }

    #[test]
    fn test_remove_line_drops_chords_and_unlinks() {
        let mut doc = song();
        let id = LineOwnerId::new("c1");
        doc.place_chord(&id, 0, 0, "G").unwrap();
        let note = doc.add_note("breathe", NotePosition::new(10.0, 10.0), 1);
        doc.link_note(&note.id, &id, 0, 4).unwrap();
        let arr = doc.add_arrangement("Sunday", false);

        doc.remove_line(&id).unwrap();

        assert!(doc.annotations.placements.is_empty());
        assert!(doc.annotations.note(&note.id).unwrap().linked_word.is_none());
        assert_eq!(keys(doc.arrangement(&arr).unwrap()), vec!["verse::"]);
    }

    #[test]
    fn test_renumber_notes_follows_arrangement() {
        let mut doc = song();
        let arr = doc.add_arrangement("Sunday", false);
        let first = doc.add_note("one", NotePosition::new(0.0, 0.0), 1);
        let second = doc.add_note("two", NotePosition::new(0.0, 0.0), 2);
        doc.link_note(&first.id, &LineOwnerId::new("v1"), 0, 0).unwrap();
        doc.link_note(&second.id, &LineOwnerId::new("c1"), 0, 0).unwrap();

        assert!(doc.renumber_notes(&arr).unwrap());
        assert_eq!(doc.annotations.note(&first.id).unwrap().marker_number, Some(1));
        assert_eq!(doc.annotations.note(&second.id).unwrap().marker_number, Some(2));
        assert!(!doc.renumber_notes(&arr).unwrap());

        let chorus = doc.arrangement(&arr).unwrap().order[1].entry_id.clone();
        doc.move_entry(&arr, &chorus, 0).unwrap();
        assert!(doc.renumber_notes(&arr).unwrap());
        assert_eq!(doc.annotations.note(&second.id).unwrap().marker_number, Some(1));
    }

    #[test]
    fn test_transpose_updates_key() {
        let mut doc = song();
        doc.metadata.key = Some("G".into());
        doc.place_chord(&LineOwnerId::new("v1"), 0, 0, "G").unwrap();
        doc.place_chord(&LineOwnerId::new("v1"), 0, 8, "D/F#").unwrap();

        doc.transpose("A").unwrap();
        let symbols: Vec<_> = doc.annotations.placements.iter().map(|p| p.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["A", "E/G#"]);
        assert_eq!(doc.metadata.key.as_deref(), Some("A"));

        assert!(doc.transpose("Q").is_err());
        assert_eq!(doc.metadata.key.as_deref(), Some("A"));
    }

    #[test]
    fn test_json_round_trip_reconciles() {
        let mut doc = song();
        let arr = doc.add_arrangement("Sunday", false);
        let json = doc.to_json().unwrap();

        let loaded = Document::from_json(&json).unwrap();
        assert_eq!(loaded.lines, doc.lines);
        assert_eq!(loaded.arrangement(&arr).unwrap(), doc.arrangement(&arr).unwrap());
        assert!(matches!(Document::from_json("{"), Err(SetlistError::Serialization(_))));
    }
}
