//! Spelling tables: pitch class -> spelled pitch
//!
//! Format: pitch class 0..12 (C = 0) → (letter, accidental)
//!
//! Example:
//!   (1, sharps) → C#
//!   (1, flats)  → Db
//!   (5, either) → F

use crate::models::{Accidental, NoteLetter, Pitch};

use Accidental::{Flat, Natural, Sharp};
use NoteLetter::{A, B, C, D, E, F, G};

const SHARP_SPELLINGS: [(NoteLetter, Accidental); 12] = [
    (C, Natural),
    (C, Sharp),
    (D, Natural),
    (D, Sharp),
    (E, Natural),
    (F, Natural),
    (F, Sharp),
    (G, Natural),
    (G, Sharp),
    (A, Natural),
    (A, Sharp),
    (B, Natural),
];

const FLAT_SPELLINGS: [(NoteLetter, Accidental); 12] = [
    (C, Natural),
    (D, Flat),
    (D, Natural),
    (E, Flat),
    (E, Natural),
    (F, Natural),
    (G, Flat),
    (G, Natural),
    (A, Flat),
    (A, Natural),
    (B, Flat),
    (B, Natural),
];

/// Which accidental to use for the five black-key pitch classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellingPreference {
    Sharps,
    Flats,
}

impl SpellingPreference {
    pub fn from_flats(prefer_flats: bool) -> Self {
        if prefer_flats {
            SpellingPreference::Flats
        } else {
            SpellingPreference::Sharps
        }
    }
}

/// Spell a pitch class (taken mod 12)
pub fn spell(pitch_class: i16, preference: SpellingPreference) -> Pitch {
    let pc = pitch_class.rem_euclid(12) as usize;
    let (letter, accidental) = match preference {
        SpellingPreference::Sharps => SHARP_SPELLINGS[pc],
        SpellingPreference::Flats => FLAT_SPELLINGS[pc],
    };
    Pitch::new(letter, accidental)
}

/// Shift a pitch by semitones and respell it
pub fn shift(pitch: Pitch, semitones: i16, preference: SpellingPreference) -> Pitch {
    spell(pitch.pitch_class() as i16 + semitones, preference)
}
