//! Directory and file handles backed by the local filesystem.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::FsError;
use crate::handle::{DirectoryHandle, Entry, EntryOf, FileHandle};

fn name_of(path: &Path) -> Option<OsString> {
    path.file_name().map(OsStr::to_os_string)
}

/// Tag `path` by its own type; symlinks are not followed.
fn entry_for(path: PathBuf, file_type: &fs::FileType) -> EntryOf<LocalDirectory> {
    if file_type.is_dir() {
        Entry::Directory(LocalDirectory::new(path))
    } else if file_type.is_file() {
        Entry::File(LocalFile::new(path))
    } else {
        log::trace!("Special entry {}", path.display());
        Entry::Special(LocalFile::new(path))
    }
}

/// A directory on the local filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalDirectory {
    path: PathBuf,
}

impl LocalDirectory {
    /// Create a handle for the directory at `path`.
    ///
    /// The path is not checked; see [`DirectoryHandle::is_directory`].
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of this directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DirectoryHandle for LocalDirectory {
    type File = LocalFile;

    fn name(&self) -> Option<OsString> {
        name_of(&self.path)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn is_directory(&self) -> bool {
        self.path.is_dir()
    }

    fn list(&self) -> Result<Vec<EntryOf<Self>>, FsError> {
        let read_dir = fs::read_dir(&self.path).map_err(|e| FsError::ListError {
            location: self.location(),
            io_error: e,
        })?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| FsError::ListError {
                location: self.location(),
                io_error: e,
            })?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| FsError::MetadataError {
                location: path.display().to_string(),
                io_error: e,
            })?;

            entries.push(entry_for(path, &file_type));
        }

        // read_dir order is platform-dependent
        entries.sort_by_key(|entry| match entry {
            Entry::Directory(dir) => dir.path.clone(),
            Entry::File(file) | Entry::Special(file) => file.path.clone(),
        });

        Ok(entries)
    }

    fn find(&self, name: &OsStr) -> Result<Option<EntryOf<Self>>, FsError> {
        let path = self.path.join(name);
        match fs::symlink_metadata(&path) {
            Ok(metadata) => Ok(Some(entry_for(path, &metadata.file_type()))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FsError::MetadataError {
                location: path.display().to_string(),
                io_error: e,
            }),
        }
    }

    fn create_directory(&self, name: &OsStr) -> Result<Option<Self>, FsError> {
        let path = self.path.join(name);
        fs::create_dir(&path).map_err(|e| FsError::CreateDirError {
            location: path.display().to_string(),
            io_error: e,
        })?;
        log::trace!("Created directory {}", path.display());
        Ok(Some(Self::new(path)))
    }

    fn create_file(
        &self,
        name: &OsStr,
        _content_type: &str,
    ) -> Result<Option<LocalFile>, FsError> {
        let path = self.path.join(name);
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| FsError::CreateFileError {
                location: path.display().to_string(),
                io_error: e,
            })?;
        log::trace!("Created file {}", path.display());
        Ok(Some(LocalFile::new(path)))
    }

    fn delete(&self) -> Result<bool, FsError> {
        fs::remove_dir_all(&self.path).map_err(|e| FsError::DeleteError {
            location: self.location(),
            io_error: e,
        })?;
        log::trace!("Deleted directory {}", self.path.display());
        Ok(true)
    }
}

/// A file on the local filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    path: PathBuf,
}

impl LocalFile {
    /// Create a handle for the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of this file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FileHandle for LocalFile {
    type Reader = fs::File;
    type Writer = fs::File;

    fn name(&self) -> Option<OsString> {
        name_of(&self.path)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn content_type(&self) -> Option<String> {
        mime_guess::from_path(&self.path)
            .first_raw()
            .map(ToString::to_string)
    }

    fn open_read(&self) -> Result<fs::File, FsError> {
        fs::File::open(&self.path).map_err(|e| FsError::OpenReadError {
            location: self.location(),
            io_error: e,
        })
    }

    fn open_write(&self) -> Result<fs::File, FsError> {
        fs::File::create(&self.path).map_err(|e| FsError::OpenWriteError {
            location: self.location(),
            io_error: e,
        })
    }

    fn delete(&self) -> Result<bool, FsError> {
        fs::remove_file(&self.path).map_err(|e| FsError::DeleteError {
            location: self.location(),
            io_error: e,
        })?;
        log::trace!("Deleted file {}", self.path.display());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use tempfile::TempDir;

    #[test]
    fn test_list_sorted_and_tagged() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("c.bin"), "c").unwrap();

        let root = LocalDirectory::new(dir.path());
        let entries = root.list().unwrap();

        let names: Vec<_> = entries.iter().map(|e| e.name().unwrap()).collect();
        assert_eq!(names, vec!["a", "b.txt", "c.bin"]);
        assert!(entries[0].is_directory());
        assert!(!entries[1].is_directory());
    }

    #[test]
    fn test_find() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("file.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let root = LocalDirectory::new(dir.path());

        assert!(matches!(
            root.find(OsStr::new("file.txt")).unwrap(),
            Some(Entry::File(_))
        ));
        assert!(matches!(
            root.find(OsStr::new("sub")).unwrap(),
            Some(Entry::Directory(_))
        ));
        assert!(root.find(OsStr::new("missing")).unwrap().is_none());
    }

    #[test]
    fn test_create_and_stream() {
        let dir = TempDir::new().unwrap();
        let root = LocalDirectory::new(dir.path());

        let sub = root.create_directory(OsStr::new("sub")).unwrap().unwrap();
        assert!(sub.is_directory());

        let file = sub
            .create_file(OsStr::new("note.txt"), "text/plain")
            .unwrap()
            .unwrap();
        file.open_write().unwrap().write_all(b"hello").unwrap();

        let mut content = String::new();
        file.open_read().unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "hello");
        assert_eq!(file.content_type().as_deref(), Some("text/plain"));
    }

    #[test]
    fn test_open_write_truncates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data");
        fs::write(&path, "longer old content").unwrap();

        let file = LocalFile::new(&path);
        file.open_write().unwrap().write_all(b"new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert!(file.content_type().is_none());
    }

    #[test]
    fn test_create_file_existing_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("taken"), "x").unwrap();

        let root = LocalDirectory::new(dir.path());
        let result = root.create_file(OsStr::new("taken"), "text/plain");

        assert!(matches!(result, Err(FsError::CreateFileError { .. })));
    }

    #[test]
    fn test_delete_directory_recursive() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
        fs::write(dir.path().join("sub/deeper/file.txt"), "x").unwrap();

        let sub = LocalDirectory::new(dir.path().join("sub"));
        assert!(sub.delete().unwrap());
        assert!(!dir.path().join("sub").exists());
    }

    #[test]
    fn test_file_is_not_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.txt");
        fs::write(&path, "x").unwrap();

        assert!(!LocalDirectory::new(&path).is_directory());
        assert!(!LocalDirectory::new(dir.path().join("missing")).is_directory());
    }

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(
            LocalFile::new("/music/track.MP3").content_type().as_deref(),
            Some("audio/mpeg")
        );
        assert_eq!(
            LocalFile::new("/photos/img.jpg").content_type().as_deref(),
            Some("image/jpeg")
        );
        assert!(LocalFile::new("/notes/README").content_type().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_special_entries() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("real")).unwrap();
        fs::write(dir.path().join("real/file.txt"), "x").unwrap();
        symlink(dir.path().join("real"), dir.path().join("dir_link")).unwrap();
        symlink(dir.path().join("gone"), dir.path().join("dangling")).unwrap();

        let root = LocalDirectory::new(dir.path());
        let entries = root.list().unwrap();

        let special: Vec<_> = entries
            .iter()
            .filter(|e| matches!(e, Entry::Special(_)))
            .map(|e| e.name().unwrap())
            .collect();
        assert_eq!(special, vec!["dangling", "dir_link"]);

        let Some(Entry::Special(link)) = root.find(OsStr::new("dir_link")).unwrap() else {
            panic!("expected special entry");
        };
        assert!(link.delete().unwrap());
        assert!(fs::symlink_metadata(dir.path().join("dir_link")).is_err());
        assert!(dir.path().join("real/file.txt").exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_names_round_trip() {
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let name = OsStr::from_bytes(b"b\xff.jpg");
        fs::write(dir.path().join(name), "x").unwrap();

        let root = LocalDirectory::new(dir.path());
        let entries = root.list().unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name().as_deref(), Some(name));
        assert!(matches!(root.find(name).unwrap(), Some(Entry::File(_))));
        assert!(root.create_directory(name).is_err());
    }
}
