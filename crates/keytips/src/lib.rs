//! Office-style keytips: press an activation key, type a chord of letters,
//! and dispatch a command on an exact match.
//!
//! - [`Registry`]: the built-in chord table (checked for conflicts at compile
//!   time) and validated registries built from arbitrary entries.
//! - [`validate`], [`match_sequence`], [`next_keys`], [`check_candidate`]:
//!   pure helpers over any entry set.
//! - [`DynamicStore`]: built-ins plus a persisted user overlay; every write
//!   that adds entries is validated first.
//! - [`Controller`]: the activation/collection state machine, publishing
//!   [`KeytipEvent`]s to any number of subscribers.
//! - [`CommandExecutor`]: the host-side seam that runs matched commands.
//!
//! Diagnostics are emitted with `tracing`; install any subscriber to see them.

mod chord;
mod command;
mod conflict;
mod controller;
mod entry;
mod error;
mod events;
mod executor;
mod letter;
mod matching;
mod registry;
mod storage;
mod store;

pub use chord::Chord;
pub use command::CommandId;
pub use conflict::{Conflict, ConflictKind, ConflictReport, log_conflicts, validate};
pub use controller::{Controller, KeyOutcome, Mode};
pub use entry::KeytipEntry;
pub use error::{Error, Result};
pub use events::{DEFAULT_EVENT_CAPACITY, EventBus, KeytipEvent, ListenerId, Subscription};
pub use executor::{CommandExecutor, ExecError, run_matched};
pub use letter::{Letter, display_sequence};
pub use matching::{Candidate, ChordMatch, check_candidate, match_sequence, next_keys};
pub use registry::Registry;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{DynamicStore, Entries, STORAGE_KEY};
