// Note marker numbering in arrangement reading order

use setlist_wasm::{Document, Line, LineOwnerId, NoteId, NotePosition, SectionLabel};

fn song() -> Document {
    let mut doc = Document::new();
    doc.lines = vec![
        Line::new(LineOwnerId::new("v1"), vec!["Amazing grace".into(), "how sweet".into()], SectionLabel::Verse),
        Line::new(LineOwnerId::new("c1"), vec!["My chains are gone".into()], SectionLabel::Chorus),
        Line::new(LineOwnerId::new("v2"), vec!["Twas grace".into()], SectionLabel::Verse),
    ];
    doc
}

fn marker(doc: &Document, id: &NoteId) -> Option<u32> {
    doc.annotations.note(id).unwrap().marker_number
}

#[test]
fn test_markers_follow_reading_order() {
    let mut doc = song();
    let arrangement = doc.add_arrangement("Sunday", false);

    let chorus = doc.add_note("chorus", NotePosition::new(0.0, 0.0), 1);
    let verse_two = doc.add_note("verse two", NotePosition::new(0.0, 0.0), 2);
    let verse_one = doc.add_note("verse one", NotePosition::new(0.0, 0.0), 3);
    let free = doc.add_note("free", NotePosition::new(0.0, 0.0), 4);

    doc.link_note(&chorus.id, &LineOwnerId::new("c1"), 0, 3).unwrap();
    doc.link_note(&verse_two.id, &LineOwnerId::new("v2"), 0, 5).unwrap();
    doc.link_note(&verse_one.id, &LineOwnerId::new("v1"), 1, 0).unwrap();

    assert!(doc.renumber_notes(&arrangement).unwrap());
    // The verse group (v1, v2) is presented before the chorus
    assert_eq!(marker(&doc, &verse_one.id), Some(1));
    assert_eq!(marker(&doc, &verse_two.id), Some(2));
    assert_eq!(marker(&doc, &chorus.id), Some(3));
    assert_eq!(marker(&doc, &free.id), None);
}

#[test]
fn test_ties_on_one_word_break_by_creation() {
    let mut doc = song();
    let arrangement = doc.add_arrangement("Sunday", false);

    let later = doc.add_note("later", NotePosition::new(0.0, 0.0), 200);
    let earlier = doc.add_note("earlier", NotePosition::new(0.0, 0.0), 100);
    for id in [&later.id, &earlier.id] {
        doc.link_note(id, &LineOwnerId::new("v1"), 0, 2).unwrap();
    }

    doc.renumber_notes(&arrangement).unwrap();
    assert_eq!(marker(&doc, &earlier.id), Some(1));
    assert_eq!(marker(&doc, &later.id), Some(2));
}

#[test]
fn test_second_call_reports_no_change() {
    let mut doc = song();
    let arrangement = doc.add_arrangement("Sunday", false);
    let note = doc.add_note("n", NotePosition::new(0.0, 0.0), 1);
    doc.link_note(&note.id, &LineOwnerId::new("c1"), 0, 0).unwrap();

    assert!(doc.renumber_notes(&arrangement).unwrap());
    assert!(!doc.renumber_notes(&arrangement).unwrap());

    doc.unlink_note(&note.id).unwrap();
    assert!(doc.renumber_notes(&arrangement).unwrap());
    assert_eq!(marker(&doc, &note.id), None);
    assert!(!doc.renumber_notes(&arrangement).unwrap());
}

#[test]
fn test_word_order_index_counts_every_word() {
    let mut doc = song();
    let arrangement = doc.add_arrangement("Sunday", false);
    let index = doc.word_order_index(&arrangement).unwrap();
    assert_eq!(index.len(), 10);
}

#[test]
fn test_unknown_arrangement() {
    let mut doc = song();
    assert!(doc
        .renumber_notes(&setlist_wasm::ArrangementId::new("missing"))
        .is_err());
}
