//! Pitch spelling for song keys and chord roots
//!
//! A pitch is a letter plus an accidental. Enharmonic spellings (C# / Db)
//! are kept distinct because transposition has to respect the spelling the
//! destination key prefers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SetlistError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteLetter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteLetter {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(NoteLetter::C),
            'D' => Some(NoteLetter::D),
            'E' => Some(NoteLetter::E),
            'F' => Some(NoteLetter::F),
            'G' => Some(NoteLetter::G),
            'A' => Some(NoteLetter::A),
            'B' => Some(NoteLetter::B),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            NoteLetter::C => 'C',
            NoteLetter::D => 'D',
            NoteLetter::E => 'E',
            NoteLetter::F => 'F',
            NoteLetter::G => 'G',
            NoteLetter::A => 'A',
            NoteLetter::B => 'B',
        }
    }

    /// Semitone offset from C
    pub fn semitone(&self) -> i8 {
        match self {
            NoteLetter::C => 0,
            NoteLetter::D => 2,
            NoteLetter::E => 4,
            NoteLetter::F => 5,
            NoteLetter::G => 7,
            NoteLetter::A => 9,
            NoteLetter::B => 11,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accidental {
    DoubleFlat,
    Flat,
    Natural,
    Sharp,
    DoubleSharp,
}

impl Accidental {
    pub fn offset(&self) -> i8 {
        match self {
            Accidental::DoubleFlat => -2,
            Accidental::Flat => -1,
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::DoubleSharp => 2,
        }
    }

    fn from_offset(offset: i8) -> Option<Self> {
        match offset {
            -2 => Some(Accidental::DoubleFlat),
            -1 => Some(Accidental::Flat),
            0 => Some(Accidental::Natural),
            1 => Some(Accidental::Sharp),
            2 => Some(Accidental::DoubleSharp),
            _ => None,
        }
    }

    pub fn is_flat(&self) -> bool {
        self.offset() < 0
    }

    /// Text for the accidental; `unicode` selects ♯/♭ over #/b
    pub fn render(&self, unicode: bool) -> &'static str {
        match (self, unicode) {
            (Accidental::DoubleFlat, false) => "bb",
            (Accidental::Flat, false) => "b",
            (Accidental::Natural, _) => "",
            (Accidental::Sharp, false) => "#",
            (Accidental::DoubleSharp, false) => "##",
            (Accidental::DoubleFlat, true) => "♭♭",
            (Accidental::Flat, true) => "♭",
            (Accidental::Sharp, true) => "♯",
            (Accidental::DoubleSharp, true) => "♯♯",
        }
    }
}

/// A spelled pitch (letter + accidental)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pitch {
    pub letter: NoteLetter,
    pub accidental: Accidental,
}

/// Result of reading a pitch off the front of a string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitchPrefix {
    pub pitch: Pitch,
    /// Bytes consumed from the input
    pub len: usize,
    /// Whether the accidental was written with ♯/♭
    pub unicode: bool,
}

impl Pitch {
    pub fn new(letter: NoteLetter, accidental: Accidental) -> Self {
        Self { letter, accidental }
    }

    /// Pitch class 0..12 (C = 0)
    pub fn pitch_class(&self) -> u8 {
        (self.letter.semitone() + self.accidental.offset()).rem_euclid(12) as u8
    }

    /// Read a leading pitch-letter and up to two accidental marks of one kind
    ///
    /// Returns `None` when the string does not begin with A-G.
    pub fn parse_prefix(s: &str) -> Option<PitchPrefix> {
        let mut chars = s.char_indices();
        let (_, first) = chars.next()?;
        let letter = NoteLetter::from_char(first)?;

        let mut len = first.len_utf8();
        let mut offset: i8 = 0;
        let mut unicode = false;

        for (idx, ch) in chars {
            let step = match ch {
                '#' => 1,
                'b' => -1,
                '♯' => {
                    unicode = true;
                    1
                }
                '♭' => {
                    unicode = true;
                    -1
                }
                _ => break,
            };
            // Mixed marks ("#b") or a third mark end the accidental
            if offset != 0 && (offset.signum() != step || offset.abs() == 2) {
                break;
            }
            offset += step;
            len = idx + ch.len_utf8();
        }

        let accidental = Accidental::from_offset(offset)?;
        Some(PitchPrefix {
            pitch: Pitch::new(letter, accidental),
            len,
            unicode,
        })
    }

    pub fn render(&self, unicode: bool) -> String {
        format!("{}{}", self.letter.as_char(), self.accidental.render(unicode))
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(false))
    }
}

/// Song key: a tonic pitch and an optional minor marker
///
/// `Key` keeps the text it was parsed from because the flat-preference rule
/// looks at how the key was written, not only at its pitch class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub tonic: Pitch,
    pub minor: bool,
    raw: String,
}

impl Key {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn pitch_class(&self) -> u8 {
        self.tonic.pitch_class()
    }

    /// Whether chords in this key should be spelled with flats
    ///
    /// True when the key is written with a flat, or is one of the
    /// conventionally flat keys (F, Bb, Eb, Ab, Db, Gb, Cb).
    pub fn prefers_flats(&self) -> bool {
        self.tonic.accidental.is_flat()
            || (self.tonic.letter == NoteLetter::F && self.tonic.accidental == Accidental::Natural)
    }
}

impl FromStr for Key {
    type Err = SetlistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let prefix = Pitch::parse_prefix(trimmed)
            .ok_or_else(|| SetlistError::UnrecognizedKey(s.to_string()))?;

        // Keys only take single accidentals (no "C##" keys)
        if matches!(
            prefix.pitch.accidental,
            Accidental::DoubleFlat | Accidental::DoubleSharp
        ) {
            return Err(SetlistError::UnrecognizedKey(s.to_string()));
        }

        let minor = match &trimmed[prefix.len..] {
            "" => false,
            "m" | "min" | "minor" | " minor" => true,
            _ => return Err(SetlistError::UnrecognizedKey(s.to_string())),
        };

        Ok(Key {
            tonic: prefix.pitch,
            minor,
            raw: trimmed.to_string(),
        })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
