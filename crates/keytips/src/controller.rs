use tracing::{debug, info};

use crate::{
    CommandId, KeytipEntry, Letter,
    events::{EventBus, KeytipEvent, ListenerId, Subscription},
    letter::display_sequence,
    matching::{match_sequence, next_keys},
};

/// Whether the controller is collecting a chord.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Passive; keystrokes are ignored.
    #[default]
    Inactive,
    /// Activated; letters are appended to the sequence.
    Collecting,
}

/// Result of handling one keystroke.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not collecting, or the keystroke was not a single letter. Nothing changed.
    Ignored,
    /// The sequence is a strict prefix of at least one chord; still collecting.
    Collecting,
    /// An exact chord matched. The controller is back to inactive.
    Matched(CommandId),
    /// The sequence cannot extend to any chord. The controller is back to inactive.
    Invalid(Vec<Letter>),
}

/// Chord state machine: activation, letter collection, match/invalid/cancel.
///
/// The controller does not own the entry set; each keystroke is matched
/// against whatever entries the caller passes (typically
/// [`crate::DynamicStore::iter`]), so user edits take effect on the next key.
#[derive(Debug, Default)]
pub struct Controller {
    /// Current mode.
    mode: Mode,
    /// Letters typed since activation.
    sequence: Vec<Letter>,
    /// Subscribers to lifecycle events.
    bus: EventBus,
}

impl Controller {
    /// Create an inactive controller with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an inactive controller whose subscribers each queue at most `capacity` events.
    pub fn with_event_capacity(capacity: usize) -> Self {
        Self {
            bus: EventBus::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Register an event subscriber.
    pub fn subscribe(&mut self) -> Subscription {
        self.bus.subscribe()
    }

    /// Remove an event subscriber. Returns false when `id` is unknown.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// True while collecting.
    pub fn is_collecting(&self) -> bool {
        self.mode == Mode::Collecting
    }

    /// A copy of the letters typed so far.
    pub fn sequence(&self) -> Vec<Letter> {
        self.sequence.clone()
    }

    /// Start collecting. Emits `Activated` then `SequenceChanged([])`.
    ///
    /// Returns false, with no events, when already collecting.
    pub fn activate(&mut self) -> bool {
        if self.is_collecting() {
            return false;
        }
        self.mode = Mode::Collecting;
        self.sequence.clear();
        info!("keytips_activated");
        self.bus.emit(&KeytipEvent::Activated);
        self.emit_sequence();
        true
    }

    /// Handle one raw keystroke against `entries`.
    ///
    /// Ignored unless collecting and `raw` normalizes to a single letter.
    /// Otherwise the letter is appended and `SequenceChanged` is emitted, then:
    /// an exact match emits `MatchedCommand` and resets; a sequence that is not
    /// a prefix of any chord emits `Invalid` and resets; a strict prefix keeps
    /// collecting.
    pub fn append_key<'a, I>(&mut self, entries: I, raw: &str) -> KeyOutcome
    where
        I: IntoIterator<Item = &'a KeytipEntry>,
    {
        if !self.is_collecting() {
            return KeyOutcome::Ignored;
        }
        let Some(letter) = Letter::normalize(raw) else {
            debug!(raw, "keytips_key_ignored");
            return KeyOutcome::Ignored;
        };

        self.sequence.push(letter);
        debug!(sequence = %display_sequence(&self.sequence), "keytips_sequence");
        self.emit_sequence();

        let found = match_sequence(&self.sequence, entries);
        if let Some(entry) = found.exact {
            let command = entry.command;
            info!(
                command = %command,
                label = %entry.label,
                chord = %entry.chord,
                "keytips_matched"
            );
            self.bus.emit(&KeytipEvent::MatchedCommand(command));
            self.reset();
            return KeyOutcome::Matched(command);
        }
        if !found.is_prefix() {
            let invalid = self.sequence.clone();
            info!(sequence = %display_sequence(&invalid), "keytips_invalid");
            self.bus.emit(&KeytipEvent::Invalid(invalid.clone()));
            self.reset();
            return KeyOutcome::Invalid(invalid);
        }
        debug!(
            sequence = %display_sequence(&self.sequence),
            candidates = found.possible.len(),
            "keytips_prefix"
        );
        KeyOutcome::Collecting
    }

    /// Abort collection. Emits only `Cancelled`.
    ///
    /// Returns false, with no events, when already inactive.
    pub fn cancel(&mut self) -> bool {
        if !self.is_collecting() {
            return false;
        }
        self.mode = Mode::Inactive;
        self.sequence.clear();
        info!("keytips_cancelled");
        self.bus.emit(&KeytipEvent::Cancelled);
        true
    }

    /// Force inactive with an empty sequence and emit `SequenceChanged([])`.
    ///
    /// Used after a match or an invalid sequence. Unlike [`Self::cancel`] this
    /// never emits `Cancelled`, and it emits even when already inactive.
    pub fn reset(&mut self) {
        self.mode = Mode::Inactive;
        self.sequence.clear();
        debug!("keytips_reset");
        self.emit_sequence();
    }

    /// Letters that may follow the current sequence in `entries`.
    pub fn next_keys<'a, I>(&self, entries: I) -> Vec<Letter>
    where
        I: IntoIterator<Item = &'a KeytipEntry>,
    {
        next_keys(&self.sequence, entries)
    }

    /// Emit the current sequence.
    fn emit_sequence(&mut self) {
        let snapshot = self.sequence.clone();
        self.bus.emit(&KeytipEvent::SequenceChanged(snapshot));
    }
}
