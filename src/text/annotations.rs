//! Annotation layer: chord placements and notes anchored to words
//!
//! Annotations are stored separately from the lyric text and linked to it by
//! `(line, row, column)`. Chords follow a word-scoped replace rule: placing a
//! chord inside a word removes any chord already anchored in that word. Text
//! edits shift anchors the same way an editor shifts markers after an insert
//! or delete.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::tokenizer::{word_at, Tokenizer, WordRange};
use crate::error::{Result, SetlistError};
use crate::models::{
    AnnotationSnapshot, Line, LineOwnerId, LinkedWord, Note, NoteId, NotePosition, Placement,
};

/// Read access to row text, so the store does not own the lines
pub trait RowSource {
    fn row_text(&self, line_owner_id: &LineOwnerId, line_index: usize) -> Result<&str>;
}

impl RowSource for [Line] {
    fn row_text(&self, line_owner_id: &LineOwnerId, line_index: usize) -> Result<&str> {
        let line = self
            .iter()
            .find(|line| &line.id == line_owner_id)
            .ok_or_else(|| SetlistError::not_found("line", line_owner_id.as_str()))?;
        line.row(line_index).ok_or_else(|| {
            SetlistError::not_found("row", format!("{}[{}]", line_owner_id, line_index))
        })
    }
}

impl RowSource for Vec<Line> {
    fn row_text(&self, line_owner_id: &LineOwnerId, line_index: usize) -> Result<&str> {
        self.as_slice().row_text(line_owner_id, line_index)
    }
}

/// Chord placements and notes for one document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationStore {
    #[serde(default)]
    pub placements: Vec<Placement>,

    #[serde(default)]
    pub notes: Vec<Note>,

    #[serde(skip)]
    tokenizer: Tokenizer,
}

impl PartialEq for AnnotationStore {
    fn eq(&self, other: &Self) -> bool {
        self.placements == other.placements && self.notes == other.notes
    }
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: AnnotationSnapshot) -> Self {
        Self {
            placements: snapshot.placements,
            notes: snapshot.notes,
            tokenizer: Tokenizer::new(),
        }
    }

    pub fn snapshot(&self) -> AnnotationSnapshot {
        AnnotationSnapshot {
            placements: self.placements.clone(),
            notes: self.notes.clone(),
        }
    }

    /// Word containing `char_index` on a row, if any
    pub fn word_at<R: RowSource + ?Sized>(
        &mut self,
        rows: &R,
        line_owner_id: &LineOwnerId,
        line_index: usize,
        char_index: usize,
    ) -> Result<Option<WordRange>> {
        let text = rows.row_text(line_owner_id, line_index)?;
        Ok(self.tokenizer.word_at(line_owner_id, line_index, text, char_index))
    }

    /// Placements on one row, left to right
    pub fn placements_on_row(&self, line_owner_id: &LineOwnerId, line_index: usize) -> Vec<&Placement> {
        let mut on_row: Vec<&Placement> = self
            .placements
            .iter()
            .filter(|p| p.is_on_row(line_owner_id, line_index))
            .collect();
        on_row.sort_by_key(|p| p.char_index);
        on_row
    }

    // ------------------------------------------------------------------
    // Chords
    // ------------------------------------------------------------------

    /// Place a chord, replacing whatever chord the target word already had
    ///
    /// Outside any word the placement is unscoped and only replaces a chord
    /// at exactly the same column.
    pub fn place_chord<R: RowSource + ?Sized>(
        &mut self,
        rows: &R,
        line_owner_id: &LineOwnerId,
        line_index: usize,
        char_index: usize,
        symbol: &str,
    ) -> Result<Placement> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(SetlistError::MalformedChordSymbol(symbol.to_string()));
        }

        let word = self.word_at(rows, line_owner_id, line_index, char_index)?;
        let placement = Placement::new(line_owner_id.clone(), line_index, char_index, symbol);

        let before = self.placements.len();
        self.clear_scope(line_owner_id, line_index, word, char_index);
        log::debug!(
            "placeChord {}[{}]@{} '{}' (word {:?}, replaced {})",
            line_owner_id,
            line_index,
            char_index,
            symbol,
            word,
            before - self.placements.len()
        );

        self.placements.push(placement.clone());
        Ok(placement)
    }

    /// Remove chords at exactly this column (no word scoping)
    pub fn remove_chord(
        &mut self,
        line_owner_id: &LineOwnerId,
        line_index: usize,
        char_index: usize,
    ) -> Result<Vec<Placement>> {
        let (removed, kept): (Vec<Placement>, Vec<Placement>) =
            std::mem::take(&mut self.placements)
                .into_iter()
                .partition(|p| p.is_on_row(line_owner_id, line_index) && p.char_index == char_index);
        self.placements = kept;

        if removed.is_empty() {
            return Err(SetlistError::not_found(
                "placement",
                format!("{}[{}]@{}", line_owner_id, line_index, char_index),
            ));
        }
        Ok(removed)
    }

    /// Move a chord with the pointer, confined to the word it started in
    ///
    /// `pointer_offset_px` is measured from the start of the row and turned
    /// into a column with the monospace `char_width_px`. A chord that does
    /// not sit on a word stays where it is; moving a chord onto another word
    /// is a `place_chord`.
    pub fn drag_chord<R: RowSource + ?Sized>(
        &mut self,
        rows: &R,
        placement: &Placement,
        pointer_offset_px: f64,
        char_width_px: f64,
    ) -> Result<Placement> {
        if !char_width_px.is_finite() || char_width_px <= 0.0 {
            return Err(SetlistError::InvalidConfig(format!(
                "character width must be positive, got {}",
                char_width_px
            )));
        }

        let slot = self
            .placements
            .iter()
            .position(|p| p == placement)
            .ok_or_else(|| {
                SetlistError::not_found(
                    "placement",
                    format!(
                        "{}[{}]@{}",
                        placement.line_owner_id, placement.line_index, placement.char_index
                    ),
                )
            })?;

        let Some(word) = self.word_at(
            rows,
            &placement.line_owner_id,
            placement.line_index,
            placement.char_index,
        )?
        else {
            log::debug!("dragChord: unscoped placement at {} stays put", placement.char_index);
            return Ok(placement.clone());
        };

        let column = if pointer_offset_px.is_finite() && pointer_offset_px > 0.0 {
            (pointer_offset_px / char_width_px).floor() as usize
        } else {
            0
        };
        let target = word.clamp(column);

        let mut moved = self.placements.remove(slot);
        moved.char_index = target;
        self.clear_scope(&moved.line_owner_id, moved.line_index, Some(word), target);
        self.placements.push(moved.clone());
        Ok(moved)
    }

    /// Remove placements that share a word (or an exact column) with `char_index`
    fn clear_scope(
        &mut self,
        line_owner_id: &LineOwnerId,
        line_index: usize,
        word: Option<WordRange>,
        char_index: usize,
    ) {
        self.placements.retain(|p| {
            if !p.is_on_row(line_owner_id, line_index) {
                return true;
            }
            match word {
                Some(w) => !w.contains(p.char_index),
                None => p.char_index != char_index,
            }
        });
    }

    // ------------------------------------------------------------------
    // Notes
    // ------------------------------------------------------------------

    pub fn note(&self, id: &NoteId) -> Result<&Note> {
        self.notes
            .iter()
            .find(|n| &n.id == id)
            .ok_or_else(|| SetlistError::not_found("note", id.as_str()))
    }

    fn note_mut(&mut self, id: &NoteId) -> Result<&mut Note> {
        self.notes
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or_else(|| SetlistError::not_found("note", id.as_str()))
    }

    /// Add a note; any marker number it carries is dropped
    pub fn add_note(&mut self, mut note: Note) -> Note {
        note.marker_number = None;
        self.notes.push(note.clone());
        note
    }

    pub fn update_note_text(&mut self, id: &NoteId, text: &str) -> Result<()> {
        self.note_mut(id)?.text = text.to_string();
        Ok(())
    }

    pub fn move_note(&mut self, id: &NoteId, position: NotePosition) -> Result<()> {
        let note = self.note_mut(id)?;
        note.position = NotePosition::new(position.x_pct, position.y_pct);
        note.position.page_index = position.page_index;
        Ok(())
    }

    /// Bind a note to the word containing `char_index`
    pub fn link_note<R: RowSource + ?Sized>(
        &mut self,
        rows: &R,
        id: &NoteId,
        line_owner_id: &LineOwnerId,
        line_index: usize,
        char_index: usize,
    ) -> Result<LinkedWord> {
        // Check the note first so nothing is tokenized for a bad id
        self.note(id)?;

        let text = rows.row_text(line_owner_id, line_index)?;
        let word = self
            .tokenizer
            .word_at(line_owner_id, line_index, text, char_index)
            .ok_or_else(|| {
                SetlistError::not_found(
                    "word",
                    format!("{}[{}]@{}", line_owner_id, line_index, char_index),
                )
            })?;

        let linked = LinkedWord {
            line_owner_id: line_owner_id.clone(),
            line_index,
            word_start_offset: word.start,
            word_text: word.text(text),
        };
        self.note_mut(id)?.linked_word = Some(linked.clone());
        Ok(linked)
    }

    pub fn unlink_note(&mut self, id: &NoteId) -> Result<()> {
        self.note_mut(id)?.linked_word = None;
        Ok(())
    }

    pub fn delete_note(&mut self, id: &NoteId) -> Result<Note> {
        let slot = self
            .notes
            .iter()
            .position(|n| &n.id == id)
            .ok_or_else(|| SetlistError::not_found("note", id.as_str()))?;
        Ok(self.notes.remove(slot))
    }

    // ------------------------------------------------------------------
    // Text edit tracking
    // ------------------------------------------------------------------

    /// Called after `len` characters were inserted at `at`
    ///
    /// Shifts every anchor at or after the insertion point right by `len`.
    pub fn on_insert(&mut self, line_owner_id: &LineOwnerId, line_index: usize, at: usize, len: usize) {
        self.shift_after(line_owner_id, line_index, at, len as isize);
    }

    /// Called after `len` characters were deleted starting at `at`
    ///
    /// Chords inside the deleted span are dropped and notes whose word start
    /// was deleted are unlinked. Anchors after the span shift left.
    pub fn on_delete(&mut self, line_owner_id: &LineOwnerId, line_index: usize, at: usize, len: usize) {
        let span_end = at + len;
        let in_span = |col: usize| col >= at && col < span_end;

        self.placements
            .retain(|p| !(p.is_on_row(line_owner_id, line_index) && in_span(p.char_index)));

        for note in &mut self.notes {
            let anchored_in_span = note.linked_word.as_ref().is_some_and(|w| {
                &w.line_owner_id == line_owner_id
                    && w.line_index == line_index
                    && in_span(w.word_start_offset)
            });
            if anchored_in_span {
                log::debug!("unlinking note {}: its word was deleted", note.id);
                note.linked_word = None;
            }
        }

        self.shift_after(line_owner_id, line_index, span_end, -(len as isize));
    }

    /// Re-read linked words after an edit
    ///
    /// Each linked note snaps to the start and text of the word now covering
    /// its anchor column; notes whose anchor no longer sits on a word are
    /// unlinked.
    pub fn refresh_linked_words<R: RowSource + ?Sized>(&mut self, rows: &R) {
        for note in &mut self.notes {
            let Some(linked) = note.linked_word.as_mut() else {
                continue;
            };
            let text = match rows.row_text(&linked.line_owner_id, linked.line_index) {
                Ok(text) => text,
                Err(_) => {
                    note.linked_word = None;
                    continue;
                }
            };
            match self
                .tokenizer
                .word_at(&linked.line_owner_id, linked.line_index, text, linked.word_start_offset)
            {
                Some(word) => {
                    linked.word_start_offset = word.start;
                    linked.word_text = word.text(text);
                }
                None => note.linked_word = None,
            }
        }
    }

    /// Keep at most one chord per word on a row whose text changed
    ///
    /// An edit that joins two words leaves both chords inside the merged
    /// word; the leftmost one stays. Returns how many were dropped.
    pub fn collapse_word_chords<R: RowSource + ?Sized>(
        &mut self,
        rows: &R,
        line_owner_id: &LineOwnerId,
        line_index: usize,
    ) -> Result<usize> {
        let text = rows.row_text(line_owner_id, line_index)?;
        let words = self.tokenizer.words(line_owner_id, line_index, text).to_vec();

        let mut on_row: Vec<usize> = (0..self.placements.len())
            .filter(|&i| self.placements[i].is_on_row(line_owner_id, line_index))
            .collect();
        on_row.sort_by_key(|&i| self.placements[i].char_index);

        let mut claimed: HashSet<usize> = HashSet::new();
        let mut dropped = vec![false; self.placements.len()];
        for i in on_row {
            if let Some(word) = word_at(&words, self.placements[i].char_index) {
                if !claimed.insert(word.start) {
                    dropped[i] = true;
                }
            }
        }

        let mut slot = 0;
        let before = self.placements.len();
        self.placements.retain(|_| {
            let keep = !dropped[slot];
            slot += 1;
            keep
        });

        let removed = before - self.placements.len();
        if removed > 0 {
            log::debug!(
                "{}[{}]: dropped {} chord(s) from merged words",
                line_owner_id,
                line_index,
                removed
            );
        }
        Ok(removed)
    }

    /// Forget everything anchored to a removed line
    ///
    /// Chords go away with the line; notes survive but lose their link.
    pub fn remove_line(&mut self, line_owner_id: &LineOwnerId) {
        self.placements.retain(|p| &p.line_owner_id != line_owner_id);
        for note in &mut self.notes {
            if note
                .linked_word
                .as_ref()
                .is_some_and(|w| &w.line_owner_id == line_owner_id)
            {
                note.linked_word = None;
            }
        }
        self.tokenizer.forget_line(line_owner_id);
    }

    /// Shift anchors at or after a column by a delta
    ///
    /// Positive delta shifts right, negative shifts left
    fn shift_after(&mut self, line_owner_id: &LineOwnerId, line_index: usize, from: usize, delta: isize) {
        let shift = |col: usize| (col as isize + delta).max(0) as usize;

        for p in &mut self.placements {
            if p.is_on_row(line_owner_id, line_index) && p.char_index >= from {
                p.char_index = shift(p.char_index);
            }
        }

        for note in &mut self.notes {
            if let Some(w) = note.linked_word.as_mut() {
                if &w.line_owner_id == line_owner_id
                    && w.line_index == line_index
                    && w.word_start_offset >= from
                {
                    w.word_start_offset = shift(w.word_start_offset);
                }
            }
        }
    }
}
