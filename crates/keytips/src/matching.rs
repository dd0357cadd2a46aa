//! Prefix and exact matching of typed sequences against an entry set.
//!
//! All helpers take any iterator over borrowed entries so they work equally
//! over a bare slice, a [`crate::Registry`], or the merged view of a
//! [`crate::DynamicStore`]. Enumeration order is preserved in the results.

use std::collections::BTreeSet;

use crate::{KeytipEntry, Letter};

/// Result of matching a sequence against an entry set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordMatch<'a> {
    /// The entry whose chord equals the sequence, if any.
    pub exact: Option<&'a KeytipEntry>,
    /// Every entry whose chord begins with the sequence (includes `exact`).
    pub possible: Vec<&'a KeytipEntry>,
}

impl ChordMatch<'_> {
    /// True when some chord equals the sequence.
    pub fn is_exact(&self) -> bool {
        self.exact.is_some()
    }

    /// True when some chord begins with the sequence. Implied by `is_exact`.
    pub fn is_prefix(&self) -> bool {
        !self.possible.is_empty()
    }
}

/// Match `sequence` against `entries`.
///
/// When duplicate chords coexist (a conflict the validator reports), the last
/// one in enumeration order is the exact match, so an overlay entry shadows a
/// built-in.
pub fn match_sequence<'a, I>(sequence: &[Letter], entries: I) -> ChordMatch<'a>
where
    I: IntoIterator<Item = &'a KeytipEntry>,
{
    let mut exact = None;
    let mut possible = Vec::new();
    for entry in entries {
        if !entry.chord.extends(sequence) {
            continue;
        }
        if entry.chord.len() == sequence.len() {
            exact = Some(entry);
        }
        possible.push(entry);
    }
    ChordMatch { exact, possible }
}

/// Letters that can follow `sequence`, sorted and deduplicated.
///
/// Empty when `sequence` is empty or no candidate chord is strictly longer.
pub fn next_keys<'a, I>(sequence: &[Letter], entries: I) -> Vec<Letter>
where
    I: IntoIterator<Item = &'a KeytipEntry>,
{
    if sequence.is_empty() {
        return Vec::new();
    }
    let next: BTreeSet<Letter> = match_sequence(sequence, entries)
        .possible
        .into_iter()
        .filter_map(|e| e.chord.letters().get(sequence.len()).copied())
        .collect();
    next.into_iter().collect()
}

/// Classification of a sequence a user is about to bind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate<'a> {
    /// Nothing typed yet.
    Empty,
    /// An existing entry already owns exactly this chord.
    Duplicate(&'a KeytipEntry),
    /// An existing chord is a prefix of the candidate, or the candidate is a prefix of it.
    Conflicts(&'a KeytipEntry),
    /// The sequence can be bound without ambiguity.
    Available,
}

/// Check whether `sequence` could be bound as a new chord alongside `entries`.
///
/// Duplicates are reported before prefix conflicts; within each class the
/// first offending entry in enumeration order is returned.
pub fn check_candidate<'a, I>(sequence: &[Letter], entries: I) -> Candidate<'a>
where
    I: IntoIterator<Item = &'a KeytipEntry> + Clone,
{
    if sequence.is_empty() {
        return Candidate::Empty;
    }
    if let Some(dup) = entries.clone().into_iter().find(|e| e.chord.matches(sequence)) {
        return Candidate::Duplicate(dup);
    }
    let overlapping = entries.into_iter().find(|e| {
        let chord = e.chord.letters();
        chord.starts_with(sequence) || sequence.starts_with(chord)
    });
    match overlapping {
        Some(entry) => Candidate::Conflicts(entry),
        None => Candidate::Available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Chord, CommandId, Registry};

    fn entry(spec: &str, command: CommandId) -> KeytipEntry {
        KeytipEntry::new(Chord::parse(spec).unwrap(), command, command.label())
    }

    fn seq(spec: &str) -> Vec<Letter> {
        spec.chars().filter_map(Letter::from_char).collect()
    }

    fn table() -> Vec<KeytipEntry> {
        vec![
            entry("hvv", CommandId::PasteValues),
            entry("hbb", CommandId::BorderBottom),
            entry("hbt", CommandId::BorderTop),
            entry("hoi", CommandId::AutoFitCol),
            entry("as", CommandId::SortDesc),
            entry("hcc", CommandId::ClearContent),
        ]
    }

    #[test]
    fn prefix_without_exact() {
        let entries = table();
        let m = match_sequence(&seq("hb"), &entries);
        assert!(m.is_prefix());
        assert!(!m.is_exact());
        let cmds: Vec<_> = m.possible.iter().map(|e| e.command).collect();
        assert_eq!(cmds, vec![CommandId::BorderBottom, CommandId::BorderTop]);
    }

    #[test]
    fn exact_is_also_prefix() {
        let entries = table();
        let m = match_sequence(&seq("as"), &entries);
        assert!(m.is_exact());
        assert!(m.is_prefix());
        assert_eq!(m.exact.map(|e| e.command), Some(CommandId::SortDesc));
    }

    #[test]
    fn no_match() {
        let entries = table();
        let m = match_sequence(&seq("x"), &entries);
        assert!(!m.is_prefix());
        assert!(!m.is_exact());
        assert!(m.possible.is_empty());
    }

    #[test]
    fn empty_sequence_matches_everything_as_prefix() {
        let entries = table();
        let m = match_sequence(&[], &entries);
        assert!(m.is_prefix());
        assert!(!m.is_exact());
        assert_eq!(m.possible.len(), entries.len());

        let none: Vec<KeytipEntry> = Vec::new();
        assert!(!match_sequence(&[], &none).is_prefix());
    }

    #[test]
    fn last_duplicate_wins() {
        let entries = vec![
            entry("hvv", CommandId::PasteValues),
            entry("hvv", CommandId::Paste),
        ];
        let m = match_sequence(&seq("hvv"), &entries);
        assert_eq!(m.exact.map(|e| e.command), Some(CommandId::Paste));
        assert_eq!(m.possible.len(), 2);
    }

    #[test]
    fn later_entry_shadows_builtin_in_merged_view() {
        let builtins = Registry::builtin();
        let user = [entry("hvv", CommandId::Copy)];
        let m = match_sequence(&seq("hvv"), builtins.iter().chain(&user));
        assert_eq!(m.exact.map(|e| e.command), Some(CommandId::Copy));
    }

    #[test]
    fn next_keys_sorted_and_deduplicated() {
        let entries = table();
        assert_eq!(next_keys(&seq("h"), &entries), seq("bcov"));
        assert_eq!(next_keys(&seq("hb"), &entries), seq("bt"));
        assert!(next_keys(&seq("hbb"), &entries).is_empty());
        assert!(next_keys(&[], &entries).is_empty());
        assert!(next_keys(&seq("z"), &entries).is_empty());
    }

    #[test]
    fn candidate_classification() {
        let entries = table();
        assert_eq!(check_candidate(&[], &entries), Candidate::Empty);
        assert!(matches!(
            check_candidate(&seq("hvv"), &entries),
            Candidate::Duplicate(e) if e.command == CommandId::PasteValues
        ));
        // Candidate is a prefix of an existing chord.
        assert!(matches!(
            check_candidate(&seq("hb"), &entries),
            Candidate::Conflicts(e) if e.command == CommandId::BorderBottom
        ));
        // Existing chord is a prefix of the candidate.
        assert!(matches!(
            check_candidate(&seq("ass"), &entries),
            Candidate::Conflicts(e) if e.command == CommandId::SortDesc
        ));
        assert_eq!(check_candidate(&seq("hbl"), &entries), Candidate::Available);
    }
}
