//! Error types for the location store.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or saving locations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the locations file.
    #[error("Failed to read locations file {}: {source}", path.display())]
    ReadError {
        /// Path to the file that couldn't be read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the locations file.
    #[error("Failed to write locations file {}: {source}", path.display())]
    WriteError {
        /// Path to the file that couldn't be written.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the locations file.
    #[error("Failed to parse locations file {}: {source}", path.display())]
    TomlParseError {
        /// Path to the file that couldn't be parsed.
        path: PathBuf,
        /// The underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to serialize locations.
    #[error("Failed to serialize locations: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    /// No platform configuration directory is available.
    #[error("No configuration directory found for this platform")]
    NoConfigDir,
}
