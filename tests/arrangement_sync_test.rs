// Arrangement synchronization across line edits and multiple arrangements

use setlist_wasm::structure::{derive_groups, insert_group_at, reconcile, remove_entry};
use setlist_wasm::{Document, GroupKey, Line, LineOwnerId, SectionLabel, SetlistError};

fn line(id: &str, label: SectionLabel) -> Line {
    Line::new(LineOwnerId::new(id), vec![format!("{} words", id)], label)
}

fn keys(doc: &Document, id: &setlist_wasm::ArrangementId) -> Vec<String> {
    doc.arrangement(id)
        .unwrap()
        .order
        .iter()
        .map(|e| e.group_key.as_str().to_string())
        .collect()
}

#[test]
fn test_example_lines_group_into_verse_and_chorus() {
    let lines = vec![
        line("l1", SectionLabel::Verse),
        line("l2", SectionLabel::Chorus),
        line("l3", SectionLabel::Verse),
    ];
    let groups = derive_groups(&lines);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].key, GroupKey::new("verse::"));
    assert_eq!(groups[0].member_lines, vec![LineOwnerId::new("l1"), LineOwnerId::new("l3")]);
    assert_eq!(groups[1].key, GroupKey::new("chorus::"));
}

#[test]
fn test_arrangements_reconcile_independently() {
    let mut doc = Document::new();
    doc.lines = vec![line("v", SectionLabel::Verse), line("c", SectionLabel::Chorus)];

    let master = doc.add_arrangement("Master", true);
    let short = doc.add_arrangement("Short", false);
    let long = doc.add_arrangement("Long", false);

    // Short: chorus only. Long: verse, chorus, chorus.
    let verse_entry = doc.arrangement(&short).unwrap().order[0].entry_id.clone();
    doc.remove_entry(&short, &verse_entry).unwrap();
    doc.insert_group_at(&long, &GroupKey::new("chorus::"), 2).unwrap();

    doc.insert_line(line("b", SectionLabel::Bridge), 1).unwrap();

    assert_eq!(keys(&doc, &master), vec!["verse::", "bridge::", "chorus::"]);
    // Verse was removed by the user but is still canonical, so it returns at the end
    assert_eq!(keys(&doc, &short), vec!["chorus::", "verse::", "bridge::"]);
    assert_eq!(keys(&doc, &long), vec!["verse::", "chorus::", "chorus::", "bridge::"]);
}

#[test]
fn test_removed_group_leaves_every_arrangement() {
    let mut doc = Document::new();
    doc.lines = vec![
        line("v", SectionLabel::Verse),
        line("t", SectionLabel::Tag),
        line("c", SectionLabel::Chorus),
    ];
    let master = doc.add_arrangement("Master", true);
    let user = doc.add_arrangement("User", false);
    doc.insert_group_at(&user, &GroupKey::new("tag::"), 0).unwrap();

    doc.remove_line(&LineOwnerId::new("t")).unwrap();

    assert_eq!(keys(&doc, &master), vec!["verse::", "chorus::"]);
    assert_eq!(keys(&doc, &user), vec!["verse::", "chorus::"]);
}

#[test]
fn test_cross_arrangement_move_is_remove_then_insert() {
    let mut doc = Document::new();
    doc.lines = vec![line("v", SectionLabel::Verse), line("c", SectionLabel::Chorus)];
    let a = doc.add_arrangement("A", false);
    let b = doc.add_arrangement("B", false);

    let moving = doc.arrangement(&a).unwrap().order[1].clone();
    doc.remove_entry(&a, &moving.entry_id).unwrap();
    doc.insert_group_at(&b, &moving.group_key, 0).unwrap();

    assert_eq!(keys(&doc, &a), vec!["verse::"]);
    assert_eq!(keys(&doc, &b), vec!["chorus::", "verse::", "chorus::"]);
}

#[test]
fn test_locked_arrangement_rejects_insert_without_change() {
    let mut doc = Document::new();
    doc.lines = vec![line("v", SectionLabel::Verse)];
    let master = doc.add_arrangement("Master", true);
    let before = doc.arrangement(&master).unwrap().clone();

    let err = doc
        .insert_group_at(&master, &GroupKey::new("verse::"), 0)
        .unwrap_err();
    assert!(matches!(err, SetlistError::LockedArrangement { .. }));
    assert_eq!(doc.arrangement(&master).unwrap(), &before);
}

#[test]
fn test_free_functions_leave_input_untouched() {
    let mut doc = Document::new();
    doc.lines = vec![line("v", SectionLabel::Verse), line("c", SectionLabel::Chorus)];
    let id = doc.add_arrangement("A", false);
    let arrangement = doc.arrangement(&id).unwrap().clone();

    let inserted = insert_group_at(&arrangement, &GroupKey::new("verse::"), 1).unwrap();
    assert_eq!(inserted.order.len(), 3);
    assert_eq!(arrangement.order.len(), 2);

    let entry = arrangement.order[0].entry_id.clone();
    let removed = remove_entry(&arrangement, &entry).unwrap();
    assert_eq!(removed.order.len(), 1);

    let canonical = doc.canonical_keys();
    assert_eq!(reconcile(&canonical, &removed).order.len(), 2);
}

#[test]
fn test_rows_round_trip_through_persistence_shape() {
    let mut doc = Document::new();
    doc.lines = vec![line("v", SectionLabel::Verse), line("c", SectionLabel::Chorus)];
    let id = doc.add_arrangement("A", false);
    let arrangement = doc.arrangement(&id).unwrap().clone();

    let rows = arrangement.to_rows();
    assert_eq!(rows.iter().map(|r| r.position).collect::<Vec<_>>(), vec![0, 1]);

    let mut shuffled = rows.clone();
    shuffled.reverse();
    let rebuilt = setlist_wasm::Arrangement::from_rows(id.clone(), "A", false, &shuffled);
    assert_eq!(rebuilt, arrangement);
}

#[test]
fn test_unclassified_custom_label_survives_rows() {
    let mut doc = Document::new();
    doc.lines = vec![
        line("v", SectionLabel::Verse),
        line("s", SectionLabel::Unclassified).with_custom_label("Spoken"),
    ];
    let id = doc.add_arrangement("A", false);
    let arrangement = doc.arrangement(&id).unwrap().clone();
    assert_eq!(arrangement.order[1].group_key.as_str(), "unclassified::Spoken");
    assert_eq!(arrangement.order[1].custom_label.as_deref(), Some("Spoken"));

    let rows = arrangement.to_rows();
    let rebuilt = setlist_wasm::Arrangement::from_rows(id.clone(), "A", false, &rows);
    assert_eq!(rebuilt.order[1].label, SectionLabel::Unclassified);
    assert_eq!(rebuilt.order[1].custom_label.as_deref(), Some("Spoken"));
    assert_eq!(rebuilt, arrangement);
}
