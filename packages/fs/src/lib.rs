//! Abstract directory and file handles for mirroring.
//!
//! The mirror engine never touches paths directly. It works against the
//! [`DirectoryHandle`] and [`FileHandle`] traits, which this crate implements
//! for two backends:
//!
//! * [`LocalDirectory`] / [`LocalFile`] over `std::fs`, with symlinks and
//!   other non-regular entries listed as [`Entry::Special`]
//! * [`MemoryFs`], an in-memory tree whose entries can be told to decline
//!   deletes and creates or to fail reads, writes and deletes
//!
//! # Example
//!
//! ```rust,ignore
//! use syncmedia_fs::{DirectoryHandle, Entry, LocalDirectory};
//!
//! let music = LocalDirectory::new("/media/music");
//! for entry in music.list()? {
//!     match entry {
//!         Entry::Directory(dir) => println!("{}/", dir.location()),
//!         Entry::File(file) => println!("{}", file.location()),
//!         Entry::Special(other) => println!("{} (special)", other.location()),
//!     }
//! }
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handle;
mod local;
mod memory;

pub use error::FsError;
pub use handle::{DEFAULT_CONTENT_TYPE, DirectoryHandle, Entry, EntryOf, FileHandle};
pub use local::{LocalDirectory, LocalFile};
pub use memory::{MemoryDirectory, MemoryFile, MemoryFs, MemoryWriter};
