//! JSON file store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use hotmath_core::{ConfigStore, Configuration};
use thiserror::Error;

/// Errors from loading, saving or encoding a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("encode error: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("decode error: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}

impl ConfigError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Stores a [`Configuration`] as pretty-printed JSON at a fixed path.
///
/// Missing fields in the file take their defaults, so a hand-edited file
/// only needs the families it pins.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for JsonFileStore {
    type Error = ConfigError;

    /// Read the file, or write and return the defaults when it does not
    /// exist yet.
    fn load(&self) -> Result<Configuration, ConfigError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!("No config at {}, writing defaults", self.path.display());
                let config = Configuration::default();
                self.save(&config)?;
                return Ok(config);
            }
            Err(e) => return Err(ConfigError::io(&self.path, e)),
        };

        let config = serde_json::from_str(&text)?;
        tracing::debug!("Loaded config from {}", self.path.display());
        Ok(config)
    }

    fn save(&self, config: &Configuration) -> Result<(), ConfigError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| ConfigError::io(dir, e))?;
        }

        let json = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, json).map_err(|e| ConfigError::io(&self.path, e))?;
        tracing::debug!("Saved config to {}", self.path.display());
        Ok(())
    }
}
