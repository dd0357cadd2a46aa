//! Terminal rendition of the keytips overlay.
//!
//! [`Overlay`] folds controller events into the state a badge needs: whether
//! keytips are active, the letters typed so far and whether the last
//! sequence was rejected. A terminal has no timers, so a rejected sequence
//! stays flagged until the host renders it and calls [`Overlay::settle`].

use keytips::{KeytipEvent, Letter, display_sequence};

/// Overlay state derived from controller events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlay {
    /// Keytips are collecting.
    active: bool,
    /// Letters typed so far.
    sequence: Vec<Letter>,
    /// The sequence that was just rejected, if any.
    invalid: Option<Vec<Letter>>,
}

impl Overlay {
    /// Fold one event into the overlay.
    pub fn apply(&mut self, event: &KeytipEvent) {
        match event {
            KeytipEvent::Activated => {
                self.active = true;
                self.sequence.clear();
                self.invalid = None;
            }
            KeytipEvent::SequenceChanged(seq) => {
                self.sequence.clone_from(seq);
                if !seq.is_empty() {
                    self.invalid = None;
                }
            }
            KeytipEvent::Invalid(seq) => self.invalid = Some(seq.clone()),
            KeytipEvent::MatchedCommand(_) | KeytipEvent::Cancelled => {
                self.active = false;
                self.sequence.clear();
                self.invalid = None;
            }
        }
    }

    /// True when the overlay is showing.
    pub fn is_visible(&self) -> bool {
        self.active || self.invalid.is_some()
    }

    /// True while a rejected sequence is flagged.
    pub fn is_flashing(&self) -> bool {
        self.invalid.is_some()
    }

    /// One-line badge text, or `None` when hidden.
    pub fn render(&self) -> Option<String> {
        if let Some(seq) = &self.invalid {
            return Some(format!("Alt → {}  ✗ no keytip", display_sequence(seq)));
        }
        if !self.active {
            return None;
        }
        if self.sequence.is_empty() {
            Some("Press keys…".to_string())
        } else {
            Some(format!("Alt → {}", display_sequence(&self.sequence)))
        }
    }

    /// Clear a shown rejection and hide the overlay it belonged to.
    pub fn settle(&mut self) {
        if self.invalid.take().is_some() {
            self.active = false;
            self.sequence.clear();
        }
    }
}
