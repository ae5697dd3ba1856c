//! Error types for mirror operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use syncmedia_fs::FsError;

/// Errors that abort a sync.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// A directory or file handle operation failed.
    #[error(transparent)]
    Fs(#[from] FsError),

    /// Streaming a file's content failed part way.
    #[error("Failed to copy {source_location} to {target_location}: {io_error}")]
    FileCopyError {
        /// Source file location.
        source_location: String,
        /// Target file location.
        target_location: String,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// A listed entry did not report a name.
    #[error("Entry {location} has no name")]
    MissingName {
        /// Location of the unnamed entry.
        location: String,
    },

    /// The sync was cancelled before it finished.
    #[error("Sync cancelled after {files_copied} of {files_total} files")]
    Cancelled {
        /// Files copied before cancellation.
        files_copied: u64,
        /// Files counted in the source.
        files_total: u64,
    },

    /// The worker thread could not be started.
    #[error("Failed to start sync worker: {0}")]
    SpawnError(std::io::Error),

    /// The worker thread running the sync panicked.
    #[error("Sync worker panicked")]
    WorkerPanicked,
}
