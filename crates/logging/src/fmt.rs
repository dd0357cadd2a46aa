//! Render `tracing` events into concise logfmt strings.
//!
//! An event becomes a [`RenderedLog`]: its level, its target, the `message`
//! field (if any) and the remaining fields as `key=value` pairs.

use std::fmt::{Debug, Write};

use tracing::{
    Event, Metadata,
    field::{Field, Visit},
};

/// Rendered fields extracted from a tracing Event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLog {
    /// Severity level (e.g., INFO, WARN) for the event.
    pub level: String,
    /// Event target (typically the module path).
    pub target: String,
    /// The `message` field, or empty when the event has none.
    pub message: String,
    /// Remaining fields rendered as space-separated `key=value`.
    pub fields: String,
}

impl RenderedLog {
    /// One-line form: `LEVEL target: message key=value ...`.
    pub fn line(&self) -> String {
        let mut out = format!("{} {}:", self.level, self.target);
        for part in [&self.message, &self.fields] {
            if !part.is_empty() {
                out.push(' ');
                out.push_str(part);
            }
        }
        out
    }

    /// True when the message or any field contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.message.contains(needle) || self.fields.contains(needle)
    }
}

/// Collects the message and `key=value` pairs of one event.
struct LogfmtVisitor {
    /// Captured `message` field, if present.
    msg: Option<String>,
    /// Accumulated non-message fields rendered as `key=value`.
    fields: String,
}

impl Visit for LogfmtVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.msg = Some(value.to_string());
        } else {
            let _ignored = write!(&mut self.fields, "{}=\"{}\" ", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            self.msg = Some(format!("{:?}", value));
        } else {
            let _ignored = write!(&mut self.fields, "{}={:?} ", field.name(), value);
        }
    }
}

/// Extract level, target, message and fields from a tracing Event.
pub fn render_event(event: &Event<'_>) -> RenderedLog {
    let meta: &Metadata<'_> = event.metadata();
    let mut vis = LogfmtVisitor {
        msg: None,
        fields: String::new(),
    };
    event.record(&mut vis);
    RenderedLog {
        level: meta.level().to_string(),
        target: meta.target().to_string(),
        message: vis.msg.unwrap_or_default(),
        fields: vis.fields.trim_end().to_string(),
    }
}
