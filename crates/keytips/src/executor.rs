//! Seam between matched chords and the host's command implementation.

use thiserror::Error;
use tracing::{debug, warn};

use crate::{CommandId, KeytipEvent};

/// Failure reported by a [`CommandExecutor`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Command {command} failed: {message}")]
pub struct ExecError {
    /// Command that failed.
    pub command: CommandId,
    /// Human-readable reason.
    pub message: String,
}

impl ExecError {
    /// Build an error for `command`.
    pub fn new(command: CommandId, message: impl Into<String>) -> Self {
        Self {
            command,
            message: message.into(),
        }
    }
}

/// Executes matched commands against an application surface.
///
/// Execution happens after the chord transition has completed; failures are
/// reported to the caller of [`run_matched`] through logging and never reach
/// the controller.
pub trait CommandExecutor {
    /// Handle to whatever the commands act on (a sheet, a document, a buffer).
    type Surface: ?Sized;

    /// Execute one command.
    fn execute(&self, command: CommandId, surface: &Self::Surface) -> Result<(), ExecError>;
}

/// Execute every `MatchedCommand` in `events`, in order.
///
/// Other events are skipped. Failures are logged and swallowed. Returns the
/// number of commands that succeeded.
pub fn run_matched<E, I>(executor: &E, surface: &E::Surface, events: I) -> usize
where
    E: CommandExecutor + ?Sized,
    I: IntoIterator<Item = KeytipEvent>,
{
    let mut ok = 0;
    for event in events {
        let KeytipEvent::MatchedCommand(command) = event else {
            continue;
        };
        match executor.execute(command, surface) {
            Ok(()) => {
                debug!(command = %command, "keytips_command_executed");
                ok += 1;
            }
            Err(e) => warn!(command = %command, error = %e, "keytips_command_failed"),
        }
    }
    ok
}
