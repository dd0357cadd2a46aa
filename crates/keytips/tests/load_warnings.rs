use std::io;

use keytips::{
    Chord, CommandId, DynamicStore, Error, KeyValueStore, KeytipEntry, MemoryStore, Registry,
    Result, STORAGE_KEY,
};
use logging::capture::{self, Captured};
use tracing::subscriber;
use tracing_subscriber::prelude::*;

/// Backend whose reads always fail.
struct Unreadable;

impl KeyValueStore for Unreadable {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Err(Error::Io {
            path: key.into(),
            source: io::Error::other("disk unplugged"),
        })
    }

    fn set(&self, _key: &str, _text: &str) -> Result<()> {
        Ok(())
    }
}

fn with_capture<T>(f: impl FnOnce() -> T) -> (T, Captured) {
    let (layer, captured) = capture::layer();
    let collector = tracing_subscriber::registry().with(layer);
    let out = subscriber::with_default(collector, f);
    (out, captured)
}

#[test]
fn corrupt_json_warns_and_yields_nothing() {
    let backend = MemoryStore::new();
    backend.set(STORAGE_KEY, "{not json").expect("memory set");
    let mut store = DynamicStore::new(Registry::builtin(), backend);

    let (loaded, captured) = with_capture(|| store.load());

    assert!(loaded.is_empty());
    assert!(store.overlay().is_empty());
    assert!(captured.any(|r| r.level == "WARN" && r.message.contains("failed to parse")));
}

#[test]
fn unreadable_backend_warns_and_yields_nothing() {
    let mut store = DynamicStore::new(Registry::builtin(), Unreadable);

    let (loaded, captured) = with_capture(|| store.load());

    assert!(loaded.is_empty());
    assert!(captured.any(|r| {
        r.level == "WARN" && r.message.contains("failed to load") && r.contains("disk unplugged")
    }));
}

#[test]
fn conflicting_records_warn_but_malformed_ones_do_not() {
    let backend = MemoryStore::new();
    backend
        .set(
            STORAGE_KEY,
            r#"[
                {"chord":["H","V","V"],"command":"copy","label":"shadow"},
                {"chord":[],"command":"bold","label":"empty"},
                {"chord":["X","B"],"command":"bold","label":"Bold"}
            ]"#,
        )
        .expect("memory set");
    let mut store = DynamicStore::new(Registry::builtin(), backend);

    let (loaded, captured) = with_capture(|| store.load());

    let want = KeytipEntry::new(Chord::parse("xb").expect("chord"), CommandId::Bold, "Bold");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].chord, want.chord);
    assert_eq!(captured.count_level("WARN"), 1);
    assert!(captured.any(|r| r.level == "WARN" && r.contains("H → V → V")));
    assert!(captured.any(|r| r.level == "INFO" && r.fields.contains("loaded=1")));
}
