use std::fs;
use std::path::{Path, PathBuf};

use super::record::PlaybackConfig;

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("state file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("state file {path:?} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Durable storage for the [`PlaybackConfig`] record.
pub trait StateStore {
    /// Read the record; `Ok(None)` when nothing was stored yet.
    fn load(&self) -> Result<Option<PlaybackConfig>, StateError>;
    fn save(&self, config: &PlaybackConfig) -> Result<(), StateError>;
}

/// Stores the record as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonStateStore {
    path: PathBuf,
}

impl JsonStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StateError {
        StateError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl StateStore for JsonStateStore {
    fn load(&self) -> Result<Option<PlaybackConfig>, StateError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_err(e)),
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StateError::Json {
                path: self.path.clone(),
                source,
            })
    }

    fn save(&self, config: &PlaybackConfig) -> Result<(), StateError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.io_err(e))?;
        }
        let json = serde_json::to_string_pretty(config).map_err(|source| StateError::Json {
            path: self.path.clone(),
            source,
        })?;
        // Write next to the target and rename so a crash never leaves half a file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| self.io_err(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_err(e))
    }
}
