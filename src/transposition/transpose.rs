//! Chord transposition between song keys
//!
//! Every recognized pitch in a symbol (root and slash bass) moves by the
//! interval between the two keys and is respelled with the destination
//! key's preferred accidental. Quality suffixes are never touched.

use super::chord_symbol::{ChordSymbol, DEFAULT_NO_CHORD_MARKERS};
use super::spelling::{shift, SpellingPreference};
use crate::error::Result;
use crate::models::{Key, Placement};

/// Upward interval from one key to another, 0..12
pub fn semitones_between(from: &Key, to: &Key) -> i16 {
    (to.pitch_class() as i16 - from.pitch_class() as i16).rem_euclid(12)
}

/// Transpose one symbol
///
/// Fails with `MalformedChordSymbol` for no-chord markers and symbols that do
/// not start with a pitch letter.
pub fn transpose_symbol<S: AsRef<str>>(
    symbol: &str,
    semitones: i16,
    preference: SpellingPreference,
    no_chord_markers: &[S],
) -> Result<String> {
    let mut chord = ChordSymbol::parse_with_markers(symbol, no_chord_markers)?;
    chord.root = shift(chord.root, semitones, preference);
    chord.bass = chord.bass.map(|bass| shift(bass, semitones, preference));
    Ok(chord.render())
}

/// Transpose placements from one key to another using the default
/// no-chord markers
pub fn transpose(placements: &[Placement], from_key: &str, to_key: &str) -> Vec<Placement> {
    transpose_with_markers(placements, from_key, to_key, DEFAULT_NO_CHORD_MARKERS)
}

/// Transpose placements from one key to another
///
/// Identical key text returns the placements unchanged. An unrecognized key
/// also returns them unchanged; a symbol that cannot be parsed is kept as is
/// while the rest of the batch still moves.
pub fn transpose_with_markers<S: AsRef<str>>(
    placements: &[Placement],
    from_key: &str,
    to_key: &str,
    no_chord_markers: &[S],
) -> Vec<Placement> {
    if from_key.trim() == to_key.trim() {
        return placements.to_vec();
    }

    let (from, to) = match (from_key.parse::<Key>(), to_key.parse::<Key>()) {
        (Ok(from), Ok(to)) => (from, to),
        (Err(e), _) | (_, Err(e)) => {
            log::warn!("transpose skipped: {}", e);
            return placements.to_vec();
        }
    };

    let semitones = semitones_between(&from, &to);
    let preference = SpellingPreference::from_flats(to.prefers_flats());
    log::debug!(
        "transpose {} -> {}: {} semitones, {:?}",
        from,
        to,
        semitones,
        preference
    );

    placements
        .iter()
        .map(|placement| {
            match transpose_symbol(&placement.symbol, semitones, preference, no_chord_markers) {
                Ok(symbol) => Placement {
                    symbol,
                    ..placement.clone()
                },
                Err(e) => {
                    log::warn!("transpose: keeping '{}' ({})", placement.symbol, e);
                    placement.clone()
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LineOwnerId;

    fn chords(symbols: &[&str]) -> Vec<Placement> {
        symbols
            .iter()
            .enumerate()
            .map(|(i, s)| Placement::new(LineOwnerId::new("l"), 0, i * 4, *s))
            .collect()
    }

    fn symbols(placements: &[Placement]) -> Vec<&str> {
        placements.iter().map(|p| p.symbol.as_str()).collect()
    }

    #[test]
    fn test_whole_step_up() {
        let out = transpose(&chords(&["C"]), "C", "D");
        assert_eq!(symbols(&out), vec!["D"]);
    }

    #[test]
    fn test_slash_chord_moves_both_pitches() {
        let out = transpose(&chords(&["F#/A#"]), "E", "F");
        assert_eq!(symbols(&out), vec!["G/B"]);
    }

    #[test]
    fn test_flat_key_spelling() {
        let out = transpose(&chords(&["C", "F", "G7", "Am", "E/G#"]), "C", "Eb");
        assert_eq!(symbols(&out), vec!["Eb", "Ab", "Bb7", "Cm", "G/B"]);

        let out = transpose(&chords(&["C", "D", "Em", "A"]), "C", "F");
        assert_eq!(symbols(&out), vec!["F", "G", "Am", "D"]);
    }

    #[test]
    fn test_sharp_key_spelling() {
        let out = transpose(&chords(&["Bb", "Eb", "F/A"]), "Bb", "E");
        assert_eq!(symbols(&out), vec!["E", "A", "B/D#"]);
    }

    #[test]
    fn test_same_key_is_identity() {
        let input = chords(&["C#", "Db", "E♭m7", "N.C.", "?"]);
        assert_eq!(transpose(&input, "C", "C"), input);
    }

    #[test]
    fn test_enharmonic_key_change_respells() {
        let out = transpose(&chords(&["C#", "F#m"]), "C#", "Db");
        assert_eq!(symbols(&out), vec!["Db", "Gbm"]);
    }

    #[test]
    fn test_unrecognized_key_passes_through() {
        let input = chords(&["C", "G"]);
        assert_eq!(transpose(&input, "C", "H"), input);
        assert_eq!(transpose(&input, "", "D"), input);
    }

    #[test]
    fn test_malformed_symbols_pass_through_individually() {
        let out = transpose(&chords(&["N.C.", "C", "%", "(riff)"]), "C", "D");
        assert_eq!(symbols(&out), vec!["N.C.", "D", "%", "(riff)"]);
    }

    #[test]
    fn test_unicode_style_kept() {
        let out = transpose(&chords(&["F♯m"]), "A", "B");
        assert_eq!(symbols(&out), vec!["G♯m"]);
    }

    #[test]
    fn test_mixed_accidental_styles_kept_apart() {
        let out = transpose(&chords(&["F#/C♯"]), "C", "D");
        assert_eq!(symbols(&out), vec!["G#/D♯"]);

        let out = transpose(&chords(&["E♭/Bb"]), "C", "F");
        assert_eq!(symbols(&out), vec!["A♭/Eb"]);
    }

    #[test]
    fn test_minor_keys() {
        let out = transpose(&chords(&["Am", "E7"]), "Am", "Dm");
        assert_eq!(symbols(&out), vec!["Dm", "A7"]);
    }

    #[test]
    fn test_round_trip_keeps_pitch_classes() {
        let input = chords(&["C", "F#m7", "Bb/D", "G#dim"]);
        let there = transpose(&input, "G", "Bb");
        let back = transpose(&there, "Bb", "G");
        for (a, b) in input.iter().zip(&back) {
            let a = ChordSymbol::parse(&a.symbol).unwrap();
            let b = ChordSymbol::parse(&b.symbol).unwrap();
            assert_eq!(a.root.pitch_class(), b.root.pitch_class());
            assert_eq!(a.suffix, b.suffix);
            assert_eq!(a.bass.map(|p| p.pitch_class()), b.bass.map(|p| p.pitch_class()));
        }
    }
}
