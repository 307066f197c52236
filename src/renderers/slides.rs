//! Slide text export
//!
//! Renders an arrangement as plain presentation text: groups in arrangement
//! order, each group's rows chunked into slides, slides separated by a blank
//! line.
//!
//! # Example output
//! ```text
//! Amazing grace how sweet the sound
//! That saved a wretch like me
//!
//! I once was lost but now am found
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{ArrangementId, Document, GroupKey};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").expect("static regex"));

/// One slide: a handful of rows from a single group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub group_key: GroupKey,
    pub rows: Vec<String>,
}

/// Dropped from slide text outright
const PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '?', '!',
    '"', '\u{201C}', '\u{201D}', '\u{201E}', '\u{201A}',
    '\u{00AB}', '\u{00BB}', '\u{2039}', '\u{203A}',
    '(', ')', '[', ']', '{', '}', '<', '>',
    '\u{2014}', '\u{2013}', '-',
    '/', '\\', '|',
    '@', '#', '$', '%', '^', '&', '*', '_', '+', '=', '~', '`',
];

/// Kept as `'` only between two letters
const APOSTROPHES: &[char] = &['\'', '\u{2019}', '\u{2018}'];

/// Remove punctuation, keeping in-word apostrophes
fn strip_punctuation(row: &str) -> String {
    let chars: Vec<char> = row.chars().collect();
    let mut out = String::with_capacity(row.len());

    for (i, &c) in chars.iter().enumerate() {
        if PUNCTUATION.contains(&c) {
            continue;
        }
        if APOSTROPHES.contains(&c) {
            let after_letter = i > 0 && chars[i - 1].is_alphabetic();
            let before_letter = chars.get(i + 1).is_some_and(|n| n.is_alphabetic());
            if after_letter && before_letter {
                out.push('\'');
            }
            continue;
        }
        out.push(c);
    }
    out
}

/// Slide form of a row: punctuation stripped, spaces/tabs collapsed, trimmed
pub fn normalize_row(row: &str) -> String {
    let stripped = strip_punctuation(row);
    WHITESPACE_RUN.replace_all(stripped.trim(), " ").into_owned()
}

/// Split an arrangement into slides
///
/// Blank rows are skipped. A group never shares a slide with another group.
pub fn split_into_slides(
    document: &Document,
    arrangement_id: &ArrangementId,
    lines_per_slide: usize,
) -> Result<Vec<Slide>> {
    let arrangement = document.arrangement(arrangement_id)?;
    let groups = document.groups();
    let per_slide = lines_per_slide.max(1);

    let mut slides = Vec::new();
    for entry in &arrangement.order {
        let Some(group) = groups.iter().find(|g| g.key == entry.group_key) else {
            log::warn!("slides: skipping stale entry for '{}'", entry.group_key);
            continue;
        };

        let rows: Vec<String> = group
            .member_lines
            .iter()
            .filter_map(|id| document.line(id))
            .flat_map(|line| line.rows.iter())
            .map(|row| normalize_row(row))
            .filter(|row| !row.is_empty())
            .collect();

        slides.extend(rows.chunks(per_slide).map(|chunk| Slide {
            group_key: group.key.clone(),
            rows: chunk.to_vec(),
        }));
    }
    Ok(slides)
}

/// Join slides into text, with a trailing newline when there is any text
pub fn format_slides(slides: &[Slide]) -> String {
    if slides.is_empty() {
        return String::new();
    }
    let body = slides
        .iter()
        .map(|slide| slide.rows.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("{}\n", body)
}

pub fn export_slide_text(
    document: &Document,
    arrangement_id: &ArrangementId,
    lines_per_slide: usize,
) -> Result<String> {
    Ok(format_slides(&split_into_slides(document, arrangement_id, lines_per_slide)?))
}
