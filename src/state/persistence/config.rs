//! Settings persistence: a small JSON key-value file holding the API credential.
//!
//! Other keys in the file are preserved on write. A missing file reads as an
//! empty credential.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use dm_base::constants::{CONFIG_FILE, CREDENTIAL_KEY};
use dm_base::shared::ensure_dir;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store backed by `<dir>/config.json`
    pub fn new(dir: &Path) -> Self {
        Self { path: dir.join(CONFIG_FILE) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored credential, or an empty string when unset or unreadable.
    pub fn get(&self) -> String {
        match self.load_map() {
            Ok(map) => map.get(CREDENTIAL_KEY).and_then(Value::as_str).unwrap_or_default().to_string(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cannot read config, treating credential as empty");
                String::new()
            }
        }
    }

    /// Persist the credential, logging instead of failing.
    pub fn set(&self, credential: &str) {
        if let Err(e) = self.try_set(credential) {
            tracing::error!(path = %self.path.display(), error = %e, "failed to save credential");
        }
    }

    /// Persist the credential. No format validation is done.
    pub fn try_set(&self, credential: &str) -> Result<(), ConfigError> {
        let mut map = match self.load_map() {
            Ok(map) => map,
            Err(ConfigError::Parse(e)) => {
                tracing::warn!(path = %self.path.display(), error = %e, "config file is corrupt, rewriting it");
                Map::new()
            }
            Err(e) => return Err(e),
        };
        map.insert(CREDENTIAL_KEY.to_string(), Value::String(credential.to_string()));

        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }

        // Write to a sibling temp file and rename, so a crash never leaves half a file
        let json = serde_json::to_string_pretty(&Value::Object(map))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        restrict_permissions(&tmp)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn load_map(&self) -> Result<Map<String, Value>, ConfigError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str::<Value>(&json)? {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }
}

/// The file holds a secret: owner read/write only.
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}
