//! Store directory resolution.

use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

/// Environment variable that overrides the default store directory.
pub const HOME_ENV: &str = "KEYTIPS_HOME";

/// Resolve the store directory using the default policy.
///
/// Policy:
/// 1) Use `explicit` when provided.
/// 2) Else use `$KEYTIPS_HOME` when set and non-empty.
/// 3) Else use `~/.keytips`.
pub fn resolve_store_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    resolve_with(explicit, env::var_os(HOME_ENV), env::var_os("HOME"))
}

/// [`resolve_store_dir`] with the environment passed in.
fn resolve_with(
    explicit: Option<&Path>,
    keytips_home: Option<OsString>,
    home: Option<OsString>,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(dir) = keytips_home.filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    match home.filter(|h| !h.is_empty()) {
        Some(home) => Ok(PathBuf::from(home).join(".keytips")),
        None => Err(Error::NoStoreDir),
    }
}
