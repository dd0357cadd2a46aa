//! Error handling for the keytips CLI.

use std::{io, result};

use thiserror::Error;

/// Convenient result type for CLI operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while running the CLI.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper for standard I/O errors on the terminal streams.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Errors surfaced by the keytips core.
    #[error(transparent)]
    Keytips(#[from] keytips::Error),
    /// `validate` found conflicts in the merged set.
    #[error("validation found {0} conflict(s)")]
    ConflictsFound(usize),
    /// `remove` was given a chord with no user entry.
    #[error("no user keytip bound to {0}")]
    NotFound(String),
    /// No store directory could be determined.
    #[error("cannot locate the keytips store: pass --store, or set KEYTIPS_HOME or HOME")]
    NoStoreDir,
}
