//! Key-value persistence contract used by the dynamic store, with an
//! in-memory and a file-backed implementation.

use std::{
    collections::HashMap,
    fs, io,
    path::{Component, Path, PathBuf},
    sync::Arc,
};

use parking_lot::Mutex;

use crate::{Error, Result};

/// Minimal text key-value store.
///
/// `get` returns `Ok(None)` for a key that was never written.
pub trait KeyValueStore {
    /// Read the text stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Replace the text stored under `key`.
    fn set(&self, key: &str, text: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }
    fn set(&self, key: &str, text: &str) -> Result<()> {
        (**self).set(key, text)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }
    fn set(&self, key: &str, text: &str) -> Result<()> {
        (**self).set(key, text)
    }
}

/// Process-local store; useful for tests and hosts without durable storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Stored values by key.
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, text: &str) -> Result<()> {
        self.values.lock().insert(key.to_string(), text.to_string());
        Ok(())
    }
}

/// Directory-backed store: each key lives in `<dir>/<key>.json`.
///
/// Writes go to a sibling temp file that is renamed into place, so a crash
/// mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory holding one file per key.
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory of the store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path used for `key`. Keys must be plain file names so every
    /// read and write stays inside [`dir`](Self::dir).
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let mut parts = Path::new(key).components();
        let plain = matches!(
            (parts.next(), parts.next()),
            (Some(Component::Normal(_)), None)
        );
        if !plain || key.contains(['/', '\\']) || key.contains("..") {
            return Err(Error::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::Io { path, source }),
        }
    }

    fn set(&self, key: &str, text: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|source| Error::Io {
            path: self.dir.clone(),
            source,
        })?;
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, text).map_err(|source| Error::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| Error::Io { path, source })
    }
}
