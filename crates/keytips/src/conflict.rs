//! Conflict detection over an arbitrary entry set.

use std::{
    collections::{HashMap, hash_map::Entry},
    fmt,
};

use tracing::{info, warn};

use crate::{Chord, CommandId, KeytipEntry};

/// Kind of structural defect found between two entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConflictKind {
    /// Two entries share an identical chord.
    Duplicate,
    /// Two entries dispatch the same command.
    CommandId,
    /// One chord is a strict prefix of another; the shorter one always fires first.
    Prefix,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Duplicate => "duplicate",
            Self::CommandId => "commandId",
            Self::Prefix => "prefix",
        })
    }
}

/// One conflict between two entries.
///
/// For `Prefix`, `first` is the shorter chord. For `Duplicate` and `CommandId`,
/// `first` is the later occurrence and `second` the earlier entry it collides with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conflict {
    /// What kind of defect this is.
    pub kind: ConflictKind,
    /// First offending entry.
    pub first: KeytipEntry,
    /// Second offending entry.
    pub second: KeytipEntry,
    /// Human-readable explanation.
    pub description: String,
}

impl Conflict {
    /// Duplicate command: `later` reuses the command of `earlier`.
    fn command(later: &KeytipEntry, earlier: &KeytipEntry) -> Self {
        Self {
            kind: ConflictKind::CommandId,
            first: later.clone(),
            second: earlier.clone(),
            description: format!(
                "Command ID '{}' is used by multiple keytips",
                later.command
            ),
        }
    }

    /// Duplicate chord: `later` reuses the chord of `earlier`.
    fn duplicate(later: &KeytipEntry, earlier: &KeytipEntry) -> Self {
        Self {
            kind: ConflictKind::Duplicate,
            first: later.clone(),
            second: earlier.clone(),
            description: format!("Sequence [{}] is used by multiple commands", later.chord),
        }
    }

    /// `shorter`'s chord strictly prefixes `longer`'s.
    fn prefix(shorter: &KeytipEntry, longer: &KeytipEntry) -> Self {
        Self {
            kind: ConflictKind::Prefix,
            first: shorter.clone(),
            second: longer.clone(),
            description: format!(
                "Sequence [{}] is a prefix of [{}]. The shorter sequence will always trigger first.",
                shorter.chord, longer.chord
            ),
        }
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.to_string().to_uppercase(), self.description)
    }
}

/// Outcome of [`validate`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConflictReport {
    /// Every conflict found, in scan order.
    pub conflicts: Vec<Conflict>,
}

impl ConflictReport {
    /// True when at least one conflict was found.
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// Conflicts of a single kind.
    pub fn of_kind(&self, kind: ConflictKind) -> impl Iterator<Item = &Conflict> {
        self.conflicts.iter().filter(move |c| c.kind == kind)
    }
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.has_conflicts() {
            return f.write_str("no keytip conflicts");
        }
        write!(f, "{} keytip conflict(s):", self.conflicts.len())?;
        for (i, c) in self.conflicts.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, c)?;
        }
        Ok(())
    }
}

/// Validate an entry set for duplicate commands, duplicate chords and prefix relations.
///
/// Each entry is checked against the first earlier entry carrying the same
/// command or chord, then against every later entry for a strict prefix
/// relation in either direction. A strict prefix is antisymmetric, so each
/// unordered pair yields at most one `Prefix` record, and identical chords
/// yield a `Duplicate` record rather than prefix records. The scan is
/// quadratic in the number of entries and never mutates its input.
pub fn validate<'a, I>(entries: I) -> ConflictReport
where
    I: IntoIterator<Item = &'a KeytipEntry>,
{
    let entries: Vec<&KeytipEntry> = entries.into_iter().collect();
    let mut conflicts = Vec::new();
    let mut seen_commands: HashMap<CommandId, usize> = HashMap::new();
    let mut seen_chords: HashMap<&Chord, usize> = HashMap::new();

    for (i, current) in entries.iter().enumerate() {
        match seen_commands.entry(current.command) {
            Entry::Occupied(first) => {
                conflicts.push(Conflict::command(current, entries[*first.get()]))
            }
            Entry::Vacant(slot) => {
                slot.insert(i);
            }
        }
        match seen_chords.entry(&current.chord) {
            Entry::Occupied(first) => {
                conflicts.push(Conflict::duplicate(current, entries[*first.get()]))
            }
            Entry::Vacant(slot) => {
                slot.insert(i);
            }
        }
        for other in &entries[i + 1..] {
            if current.chord.is_strict_prefix_of(&other.chord) {
                conflicts.push(Conflict::prefix(current, other));
            }
            if other.chord.is_strict_prefix_of(&current.chord) {
                conflicts.push(Conflict::prefix(other, current));
            }
        }
    }

    ConflictReport { conflicts }
}

/// Emit a report through `tracing`: one `info` line when clean, otherwise one
/// `warn` line per conflict.
pub fn log_conflicts(report: &ConflictReport) {
    if !report.has_conflicts() {
        info!("keytips_registry_clean");
        return;
    }
    warn!(count = report.conflicts.len(), "keytips_conflicts_detected");
    for conflict in &report.conflicts {
        warn!(
            kind = %conflict.kind,
            first = %conflict.first.chord,
            first_command = %conflict.first.command,
            second = %conflict.second.chord,
            second_command = %conflict.second.command,
            "{}",
            conflict.description
        );
    }
}
