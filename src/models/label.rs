//! Semantic classification of a content line (verse, chorus, ...)
//!
//! The vocabulary is closed. Anything the fixed names do not cover goes
//! through `Custom` plus the line's custom label, and lines nobody has
//! classified yet are `Unclassified`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionLabel {
    Intro,
    Verse,
    PreChorus,
    Chorus,
    Bridge,
    Interlude,
    Tag,
    Ending,
    Outro,
    Custom,
    Unclassified,
}

impl SectionLabel {
    /// Stable spelling used inside group keys and persisted rows
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionLabel::Intro => "intro",
            SectionLabel::Verse => "verse",
            SectionLabel::PreChorus => "pre-chorus",
            SectionLabel::Chorus => "chorus",
            SectionLabel::Bridge => "bridge",
            SectionLabel::Interlude => "interlude",
            SectionLabel::Tag => "tag",
            SectionLabel::Ending => "ending",
            SectionLabel::Outro => "outro",
            SectionLabel::Custom => "custom",
            SectionLabel::Unclassified => "unclassified",
        }
    }

    /// Human-facing name, used for slide headers
    pub fn display_name(&self) -> &'static str {
        match self {
            SectionLabel::Intro => "Intro",
            SectionLabel::Verse => "Verse",
            SectionLabel::PreChorus => "Pre-Chorus",
            SectionLabel::Chorus => "Chorus",
            SectionLabel::Bridge => "Bridge",
            SectionLabel::Interlude => "Interlude",
            SectionLabel::Tag => "Tag",
            SectionLabel::Ending => "Ending",
            SectionLabel::Outro => "Outro",
            SectionLabel::Custom => "Custom",
            SectionLabel::Unclassified => "Unclassified",
        }
    }
}

impl fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SectionLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Case-insensitive, tolerant of spaces/underscores in place of hyphens
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect();

        match normalized.as_str() {
            "intro" => Ok(SectionLabel::Intro),
            "verse" => Ok(SectionLabel::Verse),
            "prechorus" => Ok(SectionLabel::PreChorus),
            "chorus" => Ok(SectionLabel::Chorus),
            "bridge" => Ok(SectionLabel::Bridge),
            "interlude" => Ok(SectionLabel::Interlude),
            "tag" => Ok(SectionLabel::Tag),
            "ending" => Ok(SectionLabel::Ending),
            "outro" => Ok(SectionLabel::Outro),
            "custom" => Ok(SectionLabel::Custom),
            "unclassified" | "" => Ok(SectionLabel::Unclassified),
            _ => Err(format!("Invalid section label: '{}'", s)),
        }
    }
}

impl Default for SectionLabel {
    fn default() -> Self {
        SectionLabel::Unclassified
    }
}
