//! Store directory resolution shared by persistence, logging, and the panic hook.
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::constants::{ERRORS_DIR, STORE_DIR_ENV, STORE_DIR_NAME};

/// Resolve the store directory from the process environment.
///
/// Precedence: `DEMYSTIFY_STORE_DIR`, then `$XDG_CONFIG_HOME/demystify`,
/// then `$HOME/.config/demystify`, then `./.demystify`.
pub fn store_dir() -> PathBuf {
    store_dir_from(
        std::env::var_os(STORE_DIR_ENV),
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

/// Pure form of [`store_dir`], taking the relevant env values explicitly.
pub fn store_dir_from(explicit: Option<OsString>, xdg_config: Option<OsString>, home: Option<OsString>) -> PathBuf {
    let non_empty = |v: Option<OsString>| v.filter(|s| !s.is_empty());

    if let Some(dir) = non_empty(explicit) {
        return PathBuf::from(dir);
    }
    if let Some(xdg) = non_empty(xdg_config) {
        return PathBuf::from(xdg).join(STORE_DIR_NAME);
    }
    if let Some(home) = non_empty(home) {
        return PathBuf::from(home).join(".config").join(STORE_DIR_NAME);
    }
    PathBuf::from(format!(".{}", STORE_DIR_NAME))
}

/// Directory holding panic logs under a given store
pub fn errors_dir(store: &Path) -> PathBuf {
    store.join(ERRORS_DIR)
}

/// Create a directory (and parents) if missing.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir)
}
