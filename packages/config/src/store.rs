//! TOML-backed store for the last-used locations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::types::Locations;

/// Directory under the platform config dir holding syncmedia state.
pub const APP_DIR_NAME: &str = "syncmedia";

/// File name of the locations store.
pub const LOCATIONS_FILE_NAME: &str = "locations.toml";

/// Reads and writes [`Locations`] at a fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationStore {
    path: PathBuf,
}

impl LocationStore {
    /// Create a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at the platform default location.
    ///
    /// # Errors
    ///
    /// * If the platform has no configuration directory
    pub fn open_default() -> Result<Self, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::new(dir.join(APP_DIR_NAME).join(LOCATIONS_FILE_NAME)))
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored locations.
    ///
    /// A missing file loads as empty locations.
    ///
    /// # Errors
    ///
    /// * If the file exists but cannot be read
    /// * If the file cannot be parsed as TOML
    pub fn load(&self) -> Result<Locations, ConfigError> {
        log::debug!("Loading locations from {}", self.path.display());

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No saved locations");
                return Ok(Locations::default());
            }
            Err(e) => {
                return Err(ConfigError::ReadError {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        let locations: Locations =
            toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
                path: self.path.clone(),
                source: e,
            })?;

        log::debug!("Loaded locations: {locations:?}");

        Ok(locations)
    }

    /// Save locations, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// * If the locations cannot be serialized
    /// * If the file or its parent directories cannot be written
    pub fn save(&self, locations: &Locations) -> Result<(), ConfigError> {
        log::debug!("Saving locations to {}", self.path.display());

        let content = toml::to_string(locations)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(&self.path, content).map_err(|e| ConfigError::WriteError {
            path: self.path.clone(),
            source: e,
        })
    }
}
