//! In-memory capture of tracing events.
//!
//! Install [`CaptureLayer`] in a subscriber and read the rendered events back
//! through the paired [`Captured`] handle:
//!
//! ```
//! use tracing_subscriber::prelude::*;
//!
//! let (layer, captured) = logging::capture::layer();
//! let subscriber = tracing_subscriber::registry().with(layer);
//! tracing::subscriber::with_default(subscriber, || tracing::warn!(key = "k", "storage down"));
//! assert!(captured.any(|r| r.level == "WARN" && r.message == "storage down"));
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::fmt::{RenderedLog, render_event};

/// Shared handle to captured events.
#[derive(Debug, Clone, Default)]
pub struct Captured {
    /// Events in emission order.
    events: Arc<Mutex<Vec<RenderedLog>>>,
}

impl Captured {
    /// Copy of every captured event.
    pub fn events(&self) -> Vec<RenderedLog> {
        self.events.lock().clone()
    }

    /// True when any captured event satisfies `pred`.
    pub fn any(&self, pred: impl Fn(&RenderedLog) -> bool) -> bool {
        self.events.lock().iter().any(pred)
    }

    /// Number of captured events at `level` (e.g. `"WARN"`).
    pub fn count_level(&self, level: &str) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|r| r.level == level)
            .count()
    }

    /// Discard everything captured so far.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

/// Tracing layer that renders and stores every event it sees.
#[derive(Debug, Clone)]
pub struct CaptureLayer {
    /// Destination buffer.
    sink: Captured,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        self.sink.events.lock().push(render_event(event));
    }
}

/// Create a capture layer and the handle that reads from it.
pub fn layer() -> (CaptureLayer, Captured) {
    let captured = Captured::default();
    (
        CaptureLayer {
            sink: captured.clone(),
        },
        captured,
    )
}
