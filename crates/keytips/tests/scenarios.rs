use std::sync::Arc;

use keytips::{
    Chord, CommandId, ConflictKind, Controller, DynamicStore, Error, KeyOutcome, KeytipEntry,
    KeytipEvent, Letter, MemoryStore, Mode, Registry, match_sequence, next_keys, validate,
};

fn entry(spec: &str, command: CommandId, label: &str) -> KeytipEntry {
    KeytipEntry::new(Chord::parse(spec).expect("valid chord"), command, label)
}

fn letters(s: &str) -> Vec<Letter> {
    s.chars().filter_map(Letter::from_char).collect()
}

#[test]
fn paste_values_chord_matches_after_three_keys() {
    let registry = vec![entry("hvv", CommandId::PasteValues, "Paste Values")];
    let mut controller = Controller::new();
    let sub = controller.subscribe();
    controller.activate();

    assert_eq!(controller.append_key(&registry, "h"), KeyOutcome::Collecting);
    assert_eq!(controller.sequence(), letters("H"));
    let m = match_sequence(&controller.sequence(), &registry);
    assert!(m.is_prefix() && !m.is_exact());
    assert_eq!(controller.mode(), Mode::Collecting);

    assert_eq!(controller.append_key(&registry, "v"), KeyOutcome::Collecting);
    assert_eq!(controller.sequence(), letters("HV"));

    assert_eq!(
        controller.append_key(&registry, "v"),
        KeyOutcome::Matched(CommandId::PasteValues)
    );
    assert_eq!(controller.mode(), Mode::Inactive);
    assert!(controller.sequence().is_empty());
    assert!(
        sub.drain()
            .contains(&KeytipEvent::MatchedCommand(CommandId::PasteValues))
    );
}

#[test]
fn unknown_first_letter_is_invalid() {
    let registry = vec![entry("hvv", CommandId::PasteValues, "Paste Values")];
    let mut controller = Controller::new();
    let sub = controller.subscribe();
    controller.activate();
    let _ = sub.drain();

    assert_eq!(
        controller.append_key(&registry, "x"),
        KeyOutcome::Invalid(letters("X"))
    );
    assert_eq!(controller.mode(), Mode::Inactive);
    let events = sub.drain();
    assert!(events.contains(&KeytipEvent::Invalid(letters("X"))));
    assert!(!events.iter().any(|e| matches!(e, KeytipEvent::MatchedCommand(_))));
}

#[test]
fn prefix_pair_is_a_conflict() {
    let entries = [
        entry("hb", CommandId::Bold, "a"),
        entry("hbb", CommandId::BorderBottom, "b"),
    ];
    let report = validate(&entries);
    assert!(report.has_conflicts());
    let prefix = report
        .of_kind(ConflictKind::Prefix)
        .next()
        .expect("prefix record");
    assert_eq!(prefix.first, entries[0]);
    assert_eq!(prefix.second, entries[1]);
}

#[test]
fn adding_a_builtin_chord_is_rejected() {
    let mut store = DynamicStore::new(Registry::builtin(), MemoryStore::new());
    let result = store.add(entry("hvv", CommandId::Copy, "Dup"));
    match result {
        Err(Error::Conflicts(report)) => {
            assert!(report.of_kind(ConflictKind::Duplicate).count() >= 1);
        }
        other => panic!("expected conflict, got {other:?}"),
    }
    assert!(store.overlay().is_empty());
    assert_eq!(store.all(), Registry::builtin().entries().to_vec());
}

#[test]
fn next_keys_after_h() {
    let entries = [
        entry("hvv", CommandId::PasteValues, "v"),
        entry("hbb", CommandId::BorderBottom, "bb"),
        entry("hbt", CommandId::BorderTop, "bt"),
        entry("hoi", CommandId::AutoFitCol, "oi"),
        entry("hcc", CommandId::ClearContent, "cc"),
    ];
    assert_eq!(next_keys(&letters("H"), &entries), letters("BCOV"));
}

#[test]
fn user_chords_are_live_for_the_controller() {
    let mut store = DynamicStore::new(Registry::builtin(), MemoryStore::new());
    let mut controller = Controller::new();

    controller.activate();
    assert_eq!(
        controller.append_key(&store, "x"),
        KeyOutcome::Invalid(letters("X"))
    );

    store
        .add(entry("xb", CommandId::Bold, "Bold"))
        .expect("no conflict");
    controller.activate();
    assert_eq!(controller.append_key(&store, "x"), KeyOutcome::Collecting);
    assert_eq!(
        controller.append_key(&store, "b"),
        KeyOutcome::Matched(CommandId::Bold)
    );

    assert!(store.remove(&Chord::parse("xb").expect("chord")).expect("persisted"));
    controller.activate();
    assert_eq!(
        controller.append_key(&store, "x"),
        KeyOutcome::Invalid(letters("X"))
    );
}

#[test]
fn round_trip_fills_missing_groups() {
    let backend = Arc::new(MemoryStore::new());
    let input = vec![
        entry("xb", CommandId::Bold, "Bold"),
        entry("xi", CommandId::Italic, "Italic").with_group("Fmt"),
        entry("ya", CommandId::BorderAll, "All borders"),
    ];
    DynamicStore::new(Registry::builtin(), Arc::clone(&backend))
        .save(input.clone())
        .expect("saved");

    let mut fresh = DynamicStore::new(Registry::builtin(), backend);
    let loaded = fresh.load();
    assert_eq!(loaded.len(), input.len());
    for (got, want) in loaded.iter().zip(&input) {
        assert_eq!(got.chord, want.chord);
        assert_eq!(got.command, want.command);
        assert_eq!(got.label, want.label);
        assert_eq!(got.group(), want.group());
        assert!(got.group.is_some());
    }
}

#[test]
fn activate_twice_and_cancel_when_inactive() {
    let mut controller = Controller::new();
    let sub = controller.subscribe();
    assert!(!controller.cancel());
    assert!(sub.drain().is_empty());

    controller.activate();
    controller.activate();
    assert_eq!(controller.mode(), Mode::Collecting);
    assert!(controller.sequence().is_empty());
    assert_eq!(
        sub.drain(),
        vec![KeytipEvent::Activated, KeytipEvent::SequenceChanged(vec![])]
    );
}

#[test]
fn merged_set_is_always_conflict_free() {
    let mut store = DynamicStore::new(Registry::builtin(), MemoryStore::new());
    let attempts = [
        entry("xb", CommandId::Bold, "ok"),
        entry("x", CommandId::Italic, "prefix of XB"),
        entry("xbb", CommandId::Italic, "extends XB"),
        entry("xi", CommandId::Bold, "same command"),
        entry("as", CommandId::Copy, "builtin dup"),
        entry("xi", CommandId::Italic, "ok"),
    ];
    for candidate in attempts {
        let _ignored = store.add(candidate);
        assert!(!validate(&store).has_conflicts());
    }
    assert_eq!(store.overlay().len(), 2);
}
