//! Error types for filesystem handles.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

/// Errors that can occur while operating on directory and file handles.
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// Failed to list a directory.
    #[error("Failed to list directory {location}: {io_error}")]
    ListError {
        /// The directory location.
        location: String,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to create a directory.
    #[error("Failed to create directory {location}: {io_error}")]
    CreateDirError {
        /// The directory location.
        location: String,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to create a file.
    #[error("Failed to create file {location}: {io_error}")]
    CreateFileError {
        /// The file location.
        location: String,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to delete an entry.
    #[error("Failed to delete {location}: {io_error}")]
    DeleteError {
        /// The entry location.
        location: String,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to open a file for reading.
    #[error("Failed to open {location} for reading: {io_error}")]
    OpenReadError {
        /// The file location.
        location: String,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to open a file for writing.
    #[error("Failed to open {location} for writing: {io_error}")]
    OpenWriteError {
        /// The file location.
        location: String,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to get entry metadata.
    #[error("Failed to get metadata for {location}: {io_error}")]
    MetadataError {
        /// The entry location.
        location: String,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// The handle no longer refers to an existing entry.
    #[error("Entry not found: {0}")]
    NotFound(String),
}
