use std::{io, path::PathBuf, result::Result as StdResult};

use thiserror::Error;

use crate::ConflictReport;

/// Convenient result type for the keytips crate.
pub type Result<T> = StdResult<T, Error>;

/// Errors produced by keytip parsing, registration and persistence.
#[derive(Debug, Error)]
pub enum Error {
    /// A write would leave the merged entry set with conflicts.
    #[error("{0}")]
    Conflicts(ConflictReport),

    /// A chord key was not a single letter.
    #[error("Invalid chord key '{raw}': expected a single letter A-Z")]
    InvalidLetter {
        /// The rejected input.
        raw: String,
    },

    /// A chord had no letters.
    #[error("Chord must contain at least one letter")]
    EmptyChord,

    /// A command id outside the known vocabulary.
    #[error("Unknown command '{id}'")]
    UnknownCommand {
        /// The rejected identifier.
        id: String,
    },

    /// A storage key that does not name a single file.
    #[error("Invalid storage key '{key}': must be a plain file name")]
    InvalidKey {
        /// The rejected key.
        key: String,
    },

    /// Filesystem failure in a persistence backend.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// Encoding the overlay failed.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
