//! Chord symbol parsing
//!
//! A symbol is a root pitch, a quality suffix kept verbatim, and an optional
//! slash bass with its own suffix:
//!
//!   "F#m7"    → root F#, suffix "m7"
//!   "G/B"     → root G, bass B
//!   "C6/9"    → root C, suffix "6/9" (the slash tail is not a pitch)
//!   "Ab/Eb7"  → root Ab, bass Eb, bass suffix "7"

use crate::error::{Result, SetlistError};
use crate::models::Pitch;

/// Symbols meaning "no chord here" when no configuration says otherwise
pub const DEFAULT_NO_CHORD_MARKERS: &[&str] = &["N.C.", "NC", "N/C", "x", "%"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordSymbol {
    pub root: Pitch,
    pub suffix: String,
    pub bass: Option<Pitch>,
    pub bass_suffix: String,
    /// Whether the root was written with ♯/♭
    pub root_unicode: bool,
    /// Same for the bass; each pitch keeps its own style
    pub bass_unicode: bool,
}

impl ChordSymbol {
    /// Parse with the default no-chord markers
    pub fn parse(symbol: &str) -> Result<Self> {
        Self::parse_with_markers(symbol, DEFAULT_NO_CHORD_MARKERS)
    }

    /// Parse, rejecting any symbol listed in `no_chord_markers`
    ///
    /// Markers compare case-insensitively against the trimmed symbol.
    pub fn parse_with_markers<S: AsRef<str>>(symbol: &str, no_chord_markers: &[S]) -> Result<Self> {
        let trimmed = symbol.trim();
        let malformed = || SetlistError::MalformedChordSymbol(symbol.to_string());

        if no_chord_markers
            .iter()
            .any(|m| m.as_ref().eq_ignore_ascii_case(trimmed))
        {
            return Err(malformed());
        }

        let root = Pitch::parse_prefix(trimmed).ok_or_else(malformed)?;
        let rest = &trimmed[root.len..];

        let (suffix, bass, bass_suffix, bass_unicode) = match rest.split_once('/') {
            Some((quality, tail)) => match Pitch::parse_prefix(tail) {
                Some(bass) => (quality, Some(bass.pitch), &tail[bass.len..], bass.unicode),
                None => (rest, None, "", false),
            },
            None => (rest, None, "", false),
        };

        Ok(ChordSymbol {
            root: root.pitch,
            suffix: suffix.to_string(),
            bass,
            bass_suffix: bass_suffix.to_string(),
            root_unicode: root.unicode,
            bass_unicode,
        })
    }

    pub fn render(&self) -> String {
        let mut out = self.root.render(self.root_unicode);
        out.push_str(&self.suffix);
        if let Some(bass) = &self.bass {
            out.push('/');
            out.push_str(&bass.render(self.bass_unicode));
            out.push_str(&self.bass_suffix);
        }
        out
    }
}
