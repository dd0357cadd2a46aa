//! Built-in keytip table and the validated `Registry` type.

use std::slice;

use tracing::debug;

use crate::{
    Chord, CommandId, Error, KeytipEntry, Letter, Result,
    conflict::validate,
    matching::{self, ChordMatch},
};

/// Authoring form of a built-in keytip.
struct Builtin {
    /// Chord as uppercase letters, e.g. `"HVV"`.
    chord: &'static str,
    /// Command dispatched on match.
    command: CommandId,
    /// Display text.
    label: &'static str,
}

/// Chords every installation ships with.
const BUILTINS: &[Builtin] = &[
    Builtin {
        chord: "HVV",
        command: CommandId::PasteValues,
        label: "Paste Values",
    },
    Builtin {
        chord: "HBB",
        command: CommandId::BorderBottom,
        label: "Border Bottom",
    },
    Builtin {
        chord: "HBT",
        command: CommandId::BorderTop,
        label: "Border Top",
    },
    Builtin {
        chord: "HOI",
        command: CommandId::AutoFitCol,
        label: "AutoFit Column",
    },
    Builtin {
        chord: "AS",
        command: CommandId::SortDesc,
        label: "Sort Descending",
    },
    Builtin {
        chord: "HCC",
        command: CommandId::ClearContent,
        label: "Clear Content",
    },
];

// A conflicting built-in table fails the build.
const _: () = assert!(
    builtin_table_is_sound(BUILTINS),
    "built-in keytips must be non-empty A-Z chords with no duplicate chord, prefix or command"
);

/// True when `s` begins with `prefix` (equal strings included).
const fn bytes_start_with(s: &[u8], prefix: &[u8]) -> bool {
    if prefix.len() > s.len() {
        return false;
    }
    let mut i = 0;
    while i < prefix.len() {
        if s[i] != prefix[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Compile-time counterpart of [`validate`] for the built-in table.
const fn builtin_table_is_sound(table: &[Builtin]) -> bool {
    let mut i = 0;
    while i < table.len() {
        let a = table[i].chord.as_bytes();
        if a.is_empty() {
            return false;
        }
        let mut k = 0;
        while k < a.len() {
            if !a[k].is_ascii_uppercase() {
                return false;
            }
            k += 1;
        }
        let mut j = i + 1;
        while j < table.len() {
            let b = table[j].chord.as_bytes();
            if table[i].command as u8 == table[j].command as u8 {
                return false;
            }
            if bytes_start_with(a, b) || bytes_start_with(b, a) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

/// A conflict-free, ordered collection of keytip entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registry {
    /// Entries in registration order.
    entries: Vec<KeytipEntry>,
}

impl Registry {
    /// The built-in table, in authoring order, with groups filled in.
    pub fn builtin() -> Self {
        let entries = BUILTINS
            .iter()
            .map(|b| {
                let mut e = KeytipEntry::new(Chord::from_ascii_upper(b.chord), b.command, b.label);
                e.fill_group();
                e
            })
            .collect();
        Self { entries }
    }

    /// Build a registry from arbitrary entries, rejecting any conflict.
    pub fn new(entries: Vec<KeytipEntry>) -> Result<Self> {
        let report = validate(&entries);
        if report.has_conflicts() {
            return Err(Error::Conflicts(report));
        }
        Ok(Self { entries })
    }

    /// Append one entry, rejecting it if it conflicts with anything registered.
    pub fn register(&mut self, mut entry: KeytipEntry) -> Result<()> {
        entry.fill_group();
        let report = validate(self.entries.iter().chain([&entry]));
        if report.has_conflicts() {
            debug!(chord = %entry.chord, command = %entry.command, "keytip_registration_rejected");
            return Err(Error::Conflicts(report));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Entries in registration order.
    pub fn entries(&self) -> &[KeytipEntry] {
        &self.entries
    }

    /// Iterate entries in registration order.
    pub fn iter(&self) -> slice::Iter<'_, KeytipEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Match a typed sequence against this registry.
    pub fn match_sequence(&self, sequence: &[Letter]) -> ChordMatch<'_> {
        matching::match_sequence(sequence, &self.entries)
    }

    /// Letters that may follow `sequence` in this registry.
    pub fn next_keys(&self, sequence: &[Letter]) -> Vec<Letter> {
        matching::next_keys(sequence, &self.entries)
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a KeytipEntry;
    type IntoIter = slice::Iter<'a, KeytipEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
