//! User-defined keytips layered over the built-in registry.
//!
//! [`DynamicStore`] owns the overlay and its persistence backend. Every write
//! that can add entries goes through [`DynamicStore::save`], which validates
//! built-ins plus the candidate overlay and refuses to commit on conflict, so
//! [`DynamicStore::all`] is always conflict-free.
//!
//! The store is not internally synchronized; hosts that mutate it from more
//! than one place must serialize access themselves.

use std::{iter::Chain, slice};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    Chord, CommandId, Error, KeyValueStore, KeytipEntry, Registry, Result,
    conflict::{log_conflicts, validate},
};

/// Key under which the overlay is persisted.
pub const STORAGE_KEY: &str = "user-keytips";

/// Iterator over built-ins followed by the overlay.
pub type Entries<'a> = Chain<slice::Iter<'a, KeytipEntry>, slice::Iter<'a, KeytipEntry>>;

/// Loosely-typed persisted record; anything that fails to convert is dropped.
#[derive(Debug, Default, Deserialize)]
struct RawRecord {
    /// Chord keys, one letter each.
    #[serde(default)]
    chord: Vec<String>,
    /// Command wire id.
    #[serde(default)]
    command: String,
    /// Display text.
    #[serde(default)]
    label: String,
    /// Optional display group.
    #[serde(default)]
    group: Option<String>,
}

impl RawRecord {
    /// Convert to an entry when chord, command and label are present and valid.
    fn into_entry(self) -> Option<KeytipEntry> {
        if self.chord.is_empty() || self.command.is_empty() || self.label.is_empty() {
            return None;
        }
        let chord = Chord::from_keys(&self.chord).ok()?;
        let command = self.command.parse::<CommandId>().ok()?;
        Some(KeytipEntry {
            chord,
            command,
            group: self.group.filter(|g| !g.is_empty()),
            label: self.label,
        })
    }
}

/// Built-in keytips plus a persisted, user-editable overlay.
#[derive(Debug)]
pub struct DynamicStore<S> {
    /// Fixed entries; never part of the overlay.
    builtins: Registry,
    /// User entries in insertion order.
    overlay: Vec<KeytipEntry>,
    /// Persistence backend.
    backend: S,
    /// Key the overlay is stored under.
    key: String,
}

impl<S: KeyValueStore> DynamicStore<S> {
    /// Create a store with an empty overlay. Call [`Self::load`] to read persisted entries.
    pub fn new(builtins: Registry, backend: S) -> Self {
        Self {
            builtins,
            overlay: Vec::new(),
            backend,
            key: STORAGE_KEY.to_string(),
        }
    }

    /// Use a different persistence key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Replace the overlay with the persisted records and return the accepted entries.
    ///
    /// Never fails: an unreadable or unparsable payload logs a warning and
    /// leaves the overlay empty. Records missing a chord, command or label, or
    /// carrying a non-letter key or an unknown command, are skipped. Records
    /// that would conflict with the built-ins or with an earlier accepted
    /// record are skipped with a warning.
    pub fn load(&mut self) -> Vec<KeytipEntry> {
        self.overlay.clear();
        let text = match self.backend.get(&self.key) {
            Ok(Some(text)) => text,
            Ok(None) => {
                debug!(key = %self.key, "no_user_keytips_stored");
                return Vec::new();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to load user keytips");
                return Vec::new();
            }
        };
        let records: Vec<Value> = match serde_json::from_str(&text) {
            Ok(records) => records,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to parse user keytips");
                return Vec::new();
            }
        };

        let total = records.len();
        let mut accepted: Vec<KeytipEntry> = Vec::with_capacity(total);
        for (index, record) in records.into_iter().enumerate() {
            let Some(entry) = serde_json::from_value::<RawRecord>(record)
                .ok()
                .and_then(RawRecord::into_entry)
            else {
                debug!(index, "skipping malformed user keytip");
                continue;
            };
            let report = validate(self.builtins.iter().chain(&accepted).chain([&entry]));
            if report.has_conflicts() {
                warn!(
                    index,
                    chord = %entry.chord,
                    command = %entry.command,
                    "skipping conflicting user keytip: {}",
                    report
                );
                continue;
            }
            accepted.push(entry);
        }

        info!(loaded = accepted.len(), total, "loaded user keytips");
        self.overlay = accepted.clone();
        accepted
    }

    /// Validate and commit a new overlay.
    ///
    /// Missing groups are filled from each chord's first letter. On conflict
    /// the existing overlay is untouched and the full report is returned. The
    /// backend is written before the in-memory overlay changes, so a failed
    /// write also leaves the overlay untouched.
    pub fn save(&mut self, mut candidate: Vec<KeytipEntry>) -> Result<()> {
        for entry in &mut candidate {
            entry.fill_group();
        }
        let report = validate(self.builtins.iter().chain(&candidate));
        if report.has_conflicts() {
            warn!(
                conflicts = report.conflicts.len(),
                "cannot save user keytips due to conflicts"
            );
            log_conflicts(&report);
            return Err(Error::Conflicts(report));
        }
        self.persist(&candidate)?;
        info!(count = candidate.len(), "saved user keytips");
        self.overlay = candidate;
        Ok(())
    }

    /// Append one entry to the overlay via [`Self::save`].
    pub fn add(&mut self, entry: KeytipEntry) -> Result<()> {
        let (chord, label) = (entry.chord.to_string(), entry.label.clone());
        let mut candidate = self.overlay.clone();
        candidate.push(entry);
        self.save(candidate)?;
        info!(chord = %chord, label = %label, "added user keytip");
        Ok(())
    }

    /// Remove the first overlay entry bound to `chord`.
    ///
    /// Returns `Ok(false)` when no overlay entry matches; built-ins are never
    /// removed. Removal cannot introduce a conflict, so it is not re-validated.
    pub fn remove(&mut self, chord: &Chord) -> Result<bool> {
        let Some(index) = self.overlay.iter().position(|e| &e.chord == chord) else {
            debug!(chord = %chord, "no user keytip to remove");
            return Ok(false);
        };
        let mut next = self.overlay.clone();
        let removed = next.remove(index);
        self.persist(&next)?;
        self.overlay = next;
        info!(chord = %removed.chord, command = %removed.command, "removed user keytip");
        Ok(true)
    }

    /// Built-ins followed by the overlay, as an owned snapshot.
    pub fn all(&self) -> Vec<KeytipEntry> {
        self.iter().cloned().collect()
    }

    /// Built-ins followed by the overlay, borrowed. This is the order used for matching.
    pub fn iter(&self) -> Entries<'_> {
        self.builtins.iter().chain(self.overlay.iter())
    }

    /// The user overlay in insertion order.
    pub fn overlay(&self) -> &[KeytipEntry] {
        &self.overlay
    }

    /// The built-in registry.
    pub fn builtins(&self) -> &Registry {
        &self.builtins
    }

    /// The persistence backend.
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Write `entries` to the backend under this store's key.
    fn persist(&self, entries: &[KeytipEntry]) -> Result<()> {
        let text = serde_json::to_string(entries)?;
        self.backend.set(&self.key, &text)
    }
}

impl<'a, S: KeyValueStore> IntoIterator for &'a DynamicStore<S> {
    type Item = &'a KeytipEntry;
    type IntoIter = Entries<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
