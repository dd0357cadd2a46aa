//! Line-driven interactive keytips session.
//!
//! Each input line is one host gesture: `alt` activates, `esc` cancels,
//! `quit` ends the session, and anything else is fed to the controller one
//! character at a time as keystrokes.

use std::io::{BufRead, Write};

use keytips::{
    Controller, DynamicStore, KeyValueStore, KeytipEvent, Subscription, run_matched,
};
use tracing::debug;

use crate::{
    actions::spaced,
    error::Result,
    overlay::Overlay,
    sheet::{Sheet, SheetExecutor},
};

/// Counts reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Chords that matched a command.
    pub matched: usize,
    /// Matched commands the sheet accepted.
    pub executed: usize,
}

/// Host gesture parsed from one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture<'a> {
    /// Press the activation modifier.
    Activate,
    /// Press Escape.
    Cancel,
    /// Show the letters that may come next.
    Hint,
    /// End the session.
    Quit,
    /// Type these characters.
    Keys(&'a str),
}

impl<'a> Gesture<'a> {
    /// Classify a trimmed input line.
    fn parse(line: &'a str) -> Self {
        match line.to_ascii_lowercase().as_str() {
            "alt" => Self::Activate,
            "esc" | "escape" => Self::Cancel,
            "?" => Self::Hint,
            "quit" | "exit" => Self::Quit,
            _ => Self::Keys(line),
        }
    }
}

/// Controller, overlay and sheet wired to one store.
struct Session<'s, S> {
    /// Entries the controller matches against.
    store: &'s DynamicStore<S>,
    /// Chord state machine.
    controller: Controller,
    /// Controller events, drained after every gesture.
    events: Subscription,
    /// Badge state.
    overlay: Overlay,
    /// Surface commands run against.
    sheet: &'s Sheet,
    /// Running totals.
    summary: Summary,
}

impl<'s, S: KeyValueStore> Session<'s, S> {
    /// Wire a fresh controller to `store` and `sheet`.
    fn new(store: &'s DynamicStore<S>, sheet: &'s Sheet) -> Self {
        let mut controller = Controller::new();
        let events = controller.subscribe();
        Self {
            store,
            controller,
            events,
            overlay: Overlay::default(),
            sheet,
            summary: Summary::default(),
        }
    }

    /// Apply one gesture.
    fn handle(&mut self, gesture: Gesture<'_>, out: &mut impl Write) -> Result<()> {
        match gesture {
            Gesture::Activate => {
                self.controller.activate();
            }
            Gesture::Cancel => {
                self.controller.cancel();
            }
            Gesture::Hint => {
                let next = self.controller.next_keys(self.store);
                if next.is_empty() {
                    writeln!(out, "next: (any first letter of a keytip)")?;
                } else {
                    writeln!(out, "next: {}", spaced(&next))?;
                }
            }
            Gesture::Quit => {}
            Gesture::Keys(keys) => {
                let mut buf = [0u8; 4];
                for c in keys.chars() {
                    self.controller.append_key(self.store, c.encode_utf8(&mut buf));
                }
            }
        }
        self.flush(out)
    }

    /// Drain pending events into the overlay and the sheet, then render.
    fn flush(&mut self, out: &mut impl Write) -> Result<()> {
        let events = self.events.drain();
        if events.is_empty() {
            return Ok(());
        }
        for event in &events {
            self.overlay.apply(event);
        }
        let matched = events
            .iter()
            .filter(|e| matches!(e, KeytipEvent::MatchedCommand(_)))
            .count();
        let before = self.sheet.applied().len();
        let executed = run_matched(&SheetExecutor, self.sheet, events);
        self.summary.matched += matched;
        self.summary.executed += executed;

        for command in &self.sheet.applied()[before..] {
            writeln!(
                out,
                "ran {} ({}) on {}",
                command.label(),
                command,
                self.sheet.name()
            )?;
        }
        if executed < matched {
            writeln!(out, "{} command(s) failed", matched - executed)?;
        }
        if !self.overlay.is_visible() {
            return Ok(());
        }
        if let Some(badge) = self.overlay.render() {
            writeln!(out, "[{badge}]")?;
        }
        if self.overlay.is_flashing() {
            debug!("keytips_cli_rejection_shown");
            self.overlay.settle();
        }
        Ok(())
    }
}

/// Run a session over `input` until EOF or `quit`.
pub fn run<S, R, W>(
    store: &DynamicStore<S>,
    sheet: &Sheet,
    input: R,
    out: &mut W,
) -> Result<Summary>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    let mut session = Session::new(store, sheet);
    for line in input.lines() {
        let line = line?;
        let gesture = Gesture::parse(line.trim());
        debug!(?gesture, "keytips_cli_gesture");
        if gesture == Gesture::Quit {
            break;
        }
        session.handle(gesture, out)?;
    }
    Ok(session.summary)
}
