//! Directory and file handle traits.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::ffi::{OsStr, OsString};
use std::io::{Read, Write};

use crate::error::FsError;

/// Content type used when a file does not report one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A child of a directory, tagged by kind.
#[derive(Debug, Clone)]
pub enum Entry<D, F> {
    /// A directory entry.
    Directory(D),
    /// A file entry.
    File(F),
    /// Neither a plain file nor a directory, such as a symbolic link.
    ///
    /// Cleared from a destination like a file, but never counted or copied.
    Special(F),
}

/// Entry type produced by a given directory handle.
pub type EntryOf<D> = Entry<D, <D as DirectoryHandle>::File>;

impl<D: DirectoryHandle> Entry<D, D::File> {
    /// Name of the entry, if the backend reports one.
    #[must_use]
    pub fn name(&self) -> Option<OsString> {
        match self {
            Self::Directory(dir) => dir.name(),
            Self::File(file) | Self::Special(file) => file.name(),
        }
    }

    /// Human-readable location of the entry.
    #[must_use]
    pub fn location(&self) -> String {
        match self {
            Self::Directory(dir) => dir.location(),
            Self::File(file) | Self::Special(file) => file.location(),
        }
    }

    /// Whether this entry is a directory.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }
}

/// Opaque reference to a directory in some storage backend.
pub trait DirectoryHandle: Sized {
    /// File handle type produced by this backend.
    type File: FileHandle;

    /// Name of this directory. `None` violates the backend contract.
    fn name(&self) -> Option<OsString>;

    /// Human-readable location, used for logging and error context.
    fn location(&self) -> String;

    /// Whether the handle currently refers to a directory.
    fn is_directory(&self) -> bool;

    /// List the direct children of this directory.
    ///
    /// # Errors
    ///
    /// * If the directory cannot be read
    fn list(&self) -> Result<Vec<EntryOf<Self>>, FsError>;

    /// Find a direct child by name.
    ///
    /// # Errors
    ///
    /// * If the directory cannot be read
    fn find(&self, name: &OsStr) -> Result<Option<EntryOf<Self>>, FsError>;

    /// Create a child directory.
    ///
    /// Returns `Ok(None)` if the backend declined to create it.
    ///
    /// # Errors
    ///
    /// * If creation fails with an IO error
    fn create_directory(&self, name: &OsStr) -> Result<Option<Self>, FsError>;

    /// Create an empty child file with the given content type.
    ///
    /// Returns `Ok(None)` if the backend declined to create it.
    ///
    /// # Errors
    ///
    /// * If creation fails with an IO error
    fn create_file(
        &self,
        name: &OsStr,
        content_type: &str,
    ) -> Result<Option<Self::File>, FsError>;

    /// Delete this directory and everything beneath it.
    ///
    /// Returns `Ok(false)` if the backend's best-effort delete left it in place.
    ///
    /// # Errors
    ///
    /// * If deletion fails with an IO error
    fn delete(&self) -> Result<bool, FsError>;
}

/// Opaque reference to a single file in some storage backend.
pub trait FileHandle: Sized {
    /// Readable byte stream.
    type Reader: Read;
    /// Writable byte stream.
    type Writer: Write;

    /// Name of this file. `None` violates the backend contract.
    fn name(&self) -> Option<OsString>;

    /// Human-readable location, used for logging and error context.
    fn location(&self) -> String;

    /// Content type hint, if known.
    fn content_type(&self) -> Option<String>;

    /// Open the file for reading.
    ///
    /// # Errors
    ///
    /// * If the file cannot be opened
    fn open_read(&self) -> Result<Self::Reader, FsError>;

    /// Open the file for writing, truncating existing content.
    ///
    /// # Errors
    ///
    /// * If the file cannot be opened
    fn open_write(&self) -> Result<Self::Writer, FsError>;

    /// Delete this file.
    ///
    /// Returns `Ok(false)` if the backend's best-effort delete left it in place.
    ///
    /// # Errors
    ///
    /// * If deletion fails with an IO error
    fn delete(&self) -> Result<bool, FsError>;
}
