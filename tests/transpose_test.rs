// Transposition through the public API

use setlist_wasm::transposition::{transpose, transpose_with_markers, ChordSymbol};
use setlist_wasm::{Document, Line, LineOwnerId, Placement, SectionLabel};

fn at(col: usize, symbol: &str) -> Placement {
    Placement::new(LineOwnerId::new("l"), 0, col, symbol)
}

fn symbols(placements: &[Placement]) -> Vec<String> {
    placements.iter().map(|p| p.symbol.clone()).collect()
}

#[test]
fn test_c_to_d() {
    assert_eq!(symbols(&transpose(&[at(0, "C")], "C", "D")), vec!["D"]);
}

#[test]
fn test_slash_chord_e_to_f() {
    assert_eq!(symbols(&transpose(&[at(0, "F#/A#")], "E", "F")), vec!["G/B"]);
}

#[test]
fn test_anchors_do_not_move() {
    let input = vec![at(3, "G"), at(11, "Em7")];
    let out = transpose(&input, "G", "A");
    assert_eq!(out[0].char_index, 3);
    assert_eq!(out[1].char_index, 11);
    assert_eq!(symbols(&out), vec!["A", "F#m7"]);
}

#[test]
fn test_identical_key_is_textual_identity() {
    let input = vec![at(0, "C#"), at(2, "Db"), at(4, "E♯"), at(6, "Cb"), at(8, "N.C.")];
    assert_eq!(transpose(&input, "Db", "Db"), input);
}

#[test]
fn test_configured_no_chord_marker_passes_through() {
    let out = transpose_with_markers(&[at(0, "Tacet"), at(6, "G")], "G", "C", &["tacet"]);
    assert_eq!(symbols(&out), vec!["Tacet", "C"]);
}

#[test]
fn test_round_trip_through_every_key() {
    let input = vec![at(0, "C"), at(2, "Am7"), at(4, "F/A"), at(6, "G7sus4"), at(8, "Bbmaj7")];
    let keys = ["C", "C#", "Db", "D", "Eb", "E", "F", "F#", "Gb", "G", "Ab", "A", "Bb", "B"];

    for key in keys {
        let there = transpose(&input, "C", key);
        let back = transpose(&there, key, "C");
        for (original, returned) in input.iter().zip(&back) {
            let a = ChordSymbol::parse(&original.symbol).unwrap();
            let b = ChordSymbol::parse(&returned.symbol).unwrap();
            assert_eq!(a.root.pitch_class(), b.root.pitch_class(), "{} via {}", original.symbol, key);
            assert_eq!(a.suffix, b.suffix);
            assert_eq!(a.bass.map(|p| p.pitch_class()), b.bass.map(|p| p.pitch_class()));
        }
    }
}

#[test]
fn test_document_transpose_records_key() {
    let id = LineOwnerId::new("v");
    let mut doc = Document::new();
    doc.lines = vec![Line::new(id.clone(), vec!["Amazing grace".into()], SectionLabel::Verse)];
    doc.place_chord(&id, 0, 0, "D").unwrap();

    // No key yet: chords stay, key is recorded
    doc.transpose("D").unwrap();
    assert_eq!(doc.annotations.placements[0].symbol, "D");
    assert_eq!(doc.metadata.key.as_deref(), Some("D"));

    doc.transpose("Bb").unwrap();
    assert_eq!(doc.annotations.placements[0].symbol, "Bb");
    assert_eq!(doc.metadata.key.as_deref(), Some("Bb"));
}
