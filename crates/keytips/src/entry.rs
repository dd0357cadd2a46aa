use serde::{Deserialize, Serialize};

use crate::{Chord, CommandId};

/// A chord bound to a command, plus its display metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeytipEntry {
    /// Letters that select the command after activation.
    pub chord: Chord,
    /// Command handed to the executor on an exact match.
    pub command: CommandId,
    /// Display group. When absent, the chord's first letter is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Display text.
    pub label: String,
}

impl KeytipEntry {
    /// Create an entry without an explicit group.
    pub fn new(chord: Chord, command: CommandId, label: impl Into<String>) -> Self {
        Self {
            chord,
            command,
            group: None,
            label: label.into(),
        }
    }

    /// Set an explicit display group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// The effective group: the explicit one, or the chord's first letter.
    pub fn group(&self) -> String {
        self.group
            .clone()
            .unwrap_or_else(|| self.chord.first().to_string())
    }

    /// Store the derived default group when none was given.
    pub fn fill_group(&mut self) {
        if self.group.is_none() {
            self.group = Some(self.chord.first().to_string());
        }
    }
}
