//! Destructive directory mirroring with progress tracking.
//!
//! This crate mirrors one directory tree into another through the
//! [`syncmedia_fs`] handle traits:
//!
//! * The destination is emptied, then the source is copied depth-first
//! * Files are counted up front so progress is a whole percentage
//! * Name conflicts between files and directories are skipped and reported
//! * Syncs can be cancelled between entries and run on a worker thread
//!
//! # Example
//!
//! ```rust,ignore
//! use syncmedia_fs::LocalDirectory;
//! use syncmedia_mirror::{Callbacks, CancellationToken, sync};
//!
//! let source = LocalDirectory::new("/media/phone/DCIM");
//! let destination = LocalDirectory::new("/backup/DCIM");
//!
//! let summary = sync(
//!     &source,
//!     &destination,
//!     &Callbacks::new(|percent| println!("{percent}%"), || println!("done")),
//!     &CancellationToken::new(),
//! )?;
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod cancel;
mod count;
mod error;
mod listener;
mod mirror;
mod progress;
mod summary;
mod worker;

pub use cancel::CancellationToken;
pub use count::count_files;
pub use error::SyncError;
pub use listener::{Callbacks, SyncEvent, SyncListener};
pub use mirror::{clear_directory, sync};
pub use progress::{ProgressTracker, SyncProgress};
pub use summary::{Conflict, ConflictKind, SyncSummary};
pub use worker::{SyncHandle, spawn_sync};
