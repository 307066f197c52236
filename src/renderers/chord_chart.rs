//! Chord-over-lyrics chart
//!
//! Each lyric row gets a chord row above it with every symbol starting at
//! its placement column. When two symbols would touch, the later one is
//! pushed right so a single space separates them.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{ArrangementId, Document, GroupRef, LineOwnerId, Placement, SectionLabel};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRow {
    pub chords: String,
    pub lyrics: String,
}

/// Lay chord symbols out over one lyric row
pub fn render_row(lyrics: &str, placements: &[&Placement]) -> ChartRow {
    let mut sorted: Vec<&Placement> = placements.to_vec();
    sorted.sort_by_key(|p| p.char_index);

    let mut chords = String::new();
    let mut width = 0usize;
    for placement in sorted {
        let start = if width == 0 {
            placement.char_index
        } else {
            placement.char_index.max(width + 1)
        };
        chords.extend(std::iter::repeat(' ').take(start - width));
        chords.push_str(&placement.symbol);
        width = start + placement.symbol.chars().count();
    }

    ChartRow {
        chords,
        lyrics: lyrics.to_string(),
    }
}

/// Chart rows for every row of a line
pub fn render_line(document: &Document, line_owner_id: &LineOwnerId) -> Vec<ChartRow> {
    let Some(line) = document.line(line_owner_id) else {
        return Vec::new();
    };
    line.rows
        .iter()
        .enumerate()
        .map(|(row, text)| {
            let on_row = document.annotations.placements_on_row(line_owner_id, row);
            render_row(text, &on_row)
        })
        .collect()
}

fn heading(entry: &GroupRef) -> Option<String> {
    match (&entry.custom_label, entry.label) {
        (Some(custom), _) => Some(custom.clone()),
        (None, SectionLabel::Unclassified) => None,
        (None, label) => Some(label.display_name().to_string()),
    }
}

/// Render a whole arrangement as a text chord chart
///
/// Groups appear in arrangement order under a `[Heading]`; empty chord rows
/// are left out.
pub fn render_chart(document: &Document, arrangement_id: &ArrangementId) -> Result<String> {
    let arrangement = document.arrangement(arrangement_id)?;
    let groups = document.groups();

    let mut blocks: Vec<String> = Vec::new();
    for entry in &arrangement.order {
        let Some(group) = groups.iter().find(|g| g.key == entry.group_key) else {
            continue;
        };

        let mut block: Vec<String> = Vec::new();
        if let Some(title) = heading(entry) {
            block.push(format!("[{}]", title));
        }
        for id in &group.member_lines {
            for row in render_line(document, id) {
                if !row.chords.is_empty() {
                    block.push(row.chords);
                }
                block.push(row.lyrics);
            }
        }
        blocks.push(block.join("\n"));
    }

    Ok(blocks.join("\n\n"))
}
