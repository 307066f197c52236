//! Word tokenization for lyric rows
//!
//! A word is a maximal run of non-whitespace characters. Offsets are
//! character (not byte) columns, and ranges are inclusive of the last
//! character, matching how placements address a row.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::LineOwnerId;

/// Inclusive character range `[start, end]` of one word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordRange {
    pub start: usize,
    pub end: usize,
}

impl WordRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, col: usize) -> bool {
        col >= self.start && col <= self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Clamp a column into this word
    pub fn clamp(&self, col: usize) -> usize {
        col.clamp(self.start, self.end)
    }

    /// The word's text within `row`
    pub fn text(&self, row: &str) -> String {
        row.chars().skip(self.start).take(self.len()).collect()
    }
}

/// Split a row into word ranges
pub fn tokenize(text: &str) -> Vec<WordRange> {
    let mut words = Vec::new();
    let mut start: Option<usize> = None;
    let mut col = 0;

    for (i, ch) in text.chars().enumerate() {
        col = i + 1;
        if ch.is_whitespace() {
            if let Some(s) = start.take() {
                words.push(WordRange::new(s, i - 1));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }

    if let Some(s) = start {
        words.push(WordRange::new(s, col - 1));
    }

    words
}

/// The word containing `col`, if any
pub fn word_at(words: &[WordRange], col: usize) -> Option<WordRange> {
    words.iter().copied().find(|w| w.contains(col))
}

#[derive(Debug, Clone)]
struct CachedRow {
    text: String,
    words: Vec<WordRange>,
}

/// Tokenizer with a per-row cache
///
/// Entries are keyed by `(line, row)` and remember the text they were
/// computed from; a lookup with different text recomputes.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    cache: HashMap<(LineOwnerId, usize), CachedRow>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn words(&mut self, line_owner_id: &LineOwnerId, line_index: usize, text: &str) -> &[WordRange] {
        let key = (line_owner_id.clone(), line_index);
        let stale = self
            .cache
            .get(&key)
            .map_or(true, |cached| cached.text != text);

        if stale {
            log::debug!("tokenize {}[{}]: '{}'", line_owner_id, line_index, text);
            self.cache.insert(
                key.clone(),
                CachedRow {
                    text: text.to_string(),
                    words: tokenize(text),
                },
            );
        }

        // Just inserted or verified above
        self.cache.get(&key).map(|c| c.words.as_slice()).unwrap_or(&[])
    }

    pub fn word_at(
        &mut self,
        line_owner_id: &LineOwnerId,
        line_index: usize,
        text: &str,
        col: usize,
    ) -> Option<WordRange> {
        word_at(self.words(line_owner_id, line_index, text), col)
    }

    /// Drop cached rows for a line (after removal)
    pub fn forget_line(&mut self, line_owner_id: &LineOwnerId) {
        self.cache.retain(|(id, _), _| id != line_owner_id);
    }

    pub fn cached_rows(&self) -> usize {
        self.cache.len()
    }
}
