//! Outcome of a finished sync.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

/// A source entry skipped because the destination holds an entry of the
/// other kind under the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// Location of the source entry.
    pub source: String,
    /// Location of the existing destination entry.
    pub destination: String,
    /// The kind of conflict.
    pub kind: ConflictKind,
}

/// The kind of name conflict encountered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// Source is a directory, destination holds a file.
    FileExists,
    /// Source is a file, destination holds a directory.
    DirectoryExists,
    /// Destination holds something that is neither a file nor a directory.
    SpecialExists,
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileExists => write!(f, "a file exists with the same name as a directory"),
            Self::DirectoryExists => {
                write!(f, "a directory exists with the same name as a file")
            }
            Self::SpecialExists => write!(f, "a special entry exists with the same name"),
        }
    }
}

/// Result of a successful sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Files counted in the source.
    pub files_total: u64,
    /// Files copied into the destination.
    pub files_copied: u64,
    /// Entries skipped because of a name conflict.
    pub conflicts: Vec<Conflict>,
    /// Destination entries the backend declined to create.
    pub declined: Vec<String>,
    /// Source entries that are neither files nor directories, left uncopied.
    pub skipped: Vec<String>,
}

impl SyncSummary {
    /// Whether every counted file was copied.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.files_copied == self.files_total
    }
}
