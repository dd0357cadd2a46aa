//! Non-interactive subcommands: the settings surface.

use std::io::Write;

use keytips::{
    Candidate, Chord, CommandId, DynamicStore, KeyValueStore, KeytipEntry, Letter,
    check_candidate, next_keys, validate,
};

use crate::{
    cli::{AddArgs, NextArgs},
    error::{Error, Result},
};

/// Write one table row for `entry`.
fn write_row(out: &mut impl Write, origin: &str, entry: &KeytipEntry) -> Result<()> {
    writeln!(
        out,
        "{:<8}{:<16}{:<14}{:<22}[{}]",
        origin,
        entry.chord.to_string(),
        entry.command.as_str(),
        entry.label,
        entry.group()
    )?;
    Ok(())
}

/// Print built-ins, then user entries.
pub fn list<S: KeyValueStore>(store: &DynamicStore<S>, out: &mut impl Write) -> Result<()> {
    for entry in store.builtins() {
        write_row(out, "builtin", entry)?;
    }
    for entry in store.overlay() {
        write_row(out, "user", entry)?;
    }
    Ok(())
}

/// Print every command id with its default label.
pub fn vocabulary(out: &mut impl Write) -> Result<()> {
    for command in CommandId::ALL {
        writeln!(out, "{:<14}{}", command.as_str(), command.label())?;
    }
    Ok(())
}

/// Print the conflict report for the merged set; fails when it is not clean.
pub fn validate_all<S: KeyValueStore>(
    store: &DynamicStore<S>,
    out: &mut impl Write,
) -> Result<()> {
    let report = validate(store);
    writeln!(out, "{report}")?;
    if report.has_conflicts() {
        return Err(Error::ConflictsFound(report.conflicts.len()));
    }
    Ok(())
}

/// Bind a new user entry.
pub fn add<S: KeyValueStore>(
    store: &mut DynamicStore<S>,
    args: AddArgs,
    out: &mut impl Write,
) -> Result<()> {
    let AddArgs {
        chord,
        command,
        label,
        group,
    } = args;
    let mut entry = KeytipEntry::new(chord, command, label);
    if let Some(group) = group {
        entry = entry.with_group(group);
    }
    let summary = format!("{}: {} ({})", entry.chord, entry.label, entry.command);
    store.add(entry)?;
    writeln!(out, "added {summary}")?;
    Ok(())
}

/// Remove the user entry bound to `chord`.
pub fn remove<S: KeyValueStore>(
    store: &mut DynamicStore<S>,
    chord: &Chord,
    out: &mut impl Write,
) -> Result<()> {
    if !store.remove(chord)? {
        return Err(Error::NotFound(chord.to_string()));
    }
    writeln!(out, "removed {chord}")?;
    Ok(())
}

/// Report whether `chord` could be bound alongside the merged set.
pub fn check<S: KeyValueStore>(
    store: &DynamicStore<S>,
    chord: &Chord,
    out: &mut impl Write,
) -> Result<()> {
    match check_candidate(chord.letters(), store) {
        Candidate::Empty => writeln!(out, "empty chord")?,
        Candidate::Duplicate(e) => {
            writeln!(out, "{chord} is already bound to {} ({})", e.label, e.command)?;
        }
        Candidate::Conflicts(e) => writeln!(
            out,
            "{chord} overlaps {} bound to {} ({})",
            e.chord, e.label, e.command
        )?,
        Candidate::Available => writeln!(out, "{chord} is available")?,
    }
    Ok(())
}

/// Letters separated by spaces, as alternatives rather than a sequence.
pub fn spaced(letters: &[Letter]) -> String {
    letters
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print the letters that may follow the given partial chord.
pub fn next<S: KeyValueStore>(
    store: &DynamicStore<S>,
    args: &NextArgs,
    out: &mut impl Write,
) -> Result<()> {
    let sequence = args.chord.as_ref().map(Chord::letters).unwrap_or_default();
    let keys = next_keys(sequence, store);
    if keys.is_empty() {
        writeln!(out, "(none)")?;
    } else {
        writeln!(out, "{}", spaced(&keys))?;
    }
    Ok(())
}
