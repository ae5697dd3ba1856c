//! In-memory directory and file handles.
//!
//! [`MemoryFs`] keeps a whole tree behind a shared lock, so handles are cheap
//! to clone and can be sent to worker threads. Individual entries can be made
//! to misbehave the way real storage providers do:
//!
//! * [`MemoryFs::pin`] makes deletes of an entry (and of any directory
//!   containing it) report `Ok(false)`, like a best-effort provider delete
//! * [`MemoryFs::fail_reads`] makes opening a file for reading fail
//! * [`MemoryFs::fail_writes_after`] makes writes to a file fail once it
//!   holds a given number of bytes
//! * [`MemoryFs::fail_deletes`] makes deletes of an entry (and of any
//!   directory containing it) fail
//! * [`MemoryFs::decline_creates`] makes creating children of a directory
//!   return `Ok(None)`
//! * [`MemoryFs::hide_name`] makes an entry report no name
//!
//! Names are stored as UTF-8; other names are never found and cannot be
//! created.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::io::{self, Cursor, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::FsError;
use crate::handle::{DirectoryHandle, Entry, EntryOf, FileHandle};

#[derive(Debug, Clone)]
enum NodeKind {
    Directory,
    File {
        content: Vec<u8>,
        content_type: Option<String>,
    },
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    pinned: bool,
    fail_reads: bool,
    fail_deletes: bool,
    write_limit: Option<usize>,
    decline_creates: bool,
    nameless: bool,
}

impl Node {
    const fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            pinned: false,
            fail_reads: false,
            fail_deletes: false,
            write_limit: None,
            decline_creates: false,
            nameless: false,
        }
    }

    const fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory)
    }
}

/// Parent path of `path`; the root's children have the root (`""`) as parent.
fn parent_of(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(parent, _)| parent)
}

fn name_of(path: &str) -> Option<OsString> {
    if path.is_empty() {
        return None;
    }
    Some(path.rsplit_once('/').map_or(path, |(_, name)| name).into())
}

fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

fn is_within(path: &str, ancestor: &str) -> bool {
    ancestor.is_empty()
        || path == ancestor
        || path
            .strip_prefix(ancestor)
            .is_some_and(|rest| rest.starts_with('/'))
}

fn location_of(path: &str) -> String {
    format!("memory:/{path}")
}

/// An in-memory tree of directories and files.
#[derive(Debug, Clone)]
pub struct MemoryFs {
    nodes: Arc<Mutex<BTreeMap<String, Node>>>,
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFs {
    /// Create an empty tree containing only the root directory.
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(String::new(), Node::new(NodeKind::Directory));
        Self {
            nodes: Arc::new(Mutex::new(nodes)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Node>> {
        self.nodes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Handle for the root directory.
    #[must_use]
    pub fn root(&self) -> MemoryDirectory {
        self.directory("")
    }

    /// Handle for the directory at `path` (`/`-separated, relative to the root).
    #[must_use]
    pub fn directory(&self, path: &str) -> MemoryDirectory {
        MemoryDirectory {
            fs: self.clone(),
            path: path.trim_matches('/').to_string(),
        }
    }

    /// Add a directory, creating missing parents.
    pub fn add_dir(&self, path: &str) {
        let path = path.trim_matches('/');
        let mut nodes = self.lock();
        let mut current = String::new();
        for part in path.split('/').filter(|p| !p.is_empty()) {
            current = join(&current, part);
            nodes
                .entry(current.clone())
                .or_insert_with(|| Node::new(NodeKind::Directory));
        }
    }

    /// Add a file with the given content, creating missing parents.
    pub fn add_file(&self, path: &str, content: impl Into<Vec<u8>>) {
        self.insert_file(path, content.into(), None);
    }

    /// Add a file with the given content and content type, creating missing parents.
    pub fn add_typed_file(&self, path: &str, content: impl Into<Vec<u8>>, content_type: &str) {
        self.insert_file(path, content.into(), Some(content_type.to_string()));
    }

    fn insert_file(&self, path: &str, content: Vec<u8>, content_type: Option<String>) {
        let path = path.trim_matches('/');
        self.add_dir(parent_of(path));
        self.lock().insert(
            path.to_string(),
            Node::new(NodeKind::File {
                content,
                content_type,
            }),
        );
    }

    /// Content of the file at `path`, if it exists.
    #[must_use]
    pub fn read(&self, path: &str) -> Option<Vec<u8>> {
        match &self.lock().get(path.trim_matches('/'))?.kind {
            NodeKind::File { content, .. } => Some(content.clone()),
            NodeKind::Directory => None,
        }
    }

    /// Content type recorded for the file at `path`.
    #[must_use]
    pub fn content_type(&self, path: &str) -> Option<String> {
        match &self.lock().get(path.trim_matches('/'))?.kind {
            NodeKind::File { content_type, .. } => content_type.clone(),
            NodeKind::Directory => None,
        }
    }

    /// Whether a directory exists at `path`.
    #[must_use]
    pub fn is_dir(&self, path: &str) -> bool {
        self.lock()
            .get(path.trim_matches('/'))
            .is_some_and(Node::is_directory)
    }

    /// Whether any entry exists at `path`.
    #[must_use]
    pub fn exists(&self, path: &str) -> bool {
        self.lock().contains_key(path.trim_matches('/'))
    }

    /// All files in the tree, keyed by path.
    #[must_use]
    pub fn files(&self) -> BTreeMap<String, Vec<u8>> {
        self.lock()
            .iter()
            .filter_map(|(path, node)| match &node.kind {
                NodeKind::File { content, .. } => Some((path.clone(), content.clone())),
                NodeKind::Directory => None,
            })
            .collect()
    }

    /// All entry paths in the tree, excluding the root.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.lock()
            .keys()
            .filter(|path| !path.is_empty())
            .cloned()
            .collect()
    }

    /// Make deletes of the entry at `path` decline.
    pub fn pin(&self, path: &str) {
        self.update(path, |node| node.pinned = true);
    }

    /// Make opening the file at `path` for reading fail.
    pub fn fail_reads(&self, path: &str) {
        self.update(path, |node| node.fail_reads = true);
    }

    /// Make writes to the file at `path` fail once it holds `bytes` bytes.
    pub fn fail_writes_after(&self, path: &str, bytes: usize) {
        self.update(path, |node| node.write_limit = Some(bytes));
    }

    /// Make deletes of the entry at `path` fail.
    pub fn fail_deletes(&self, path: &str) {
        self.update(path, |node| node.fail_deletes = true);
    }

    /// Make creating children of the directory at `path` decline.
    pub fn decline_creates(&self, path: &str) {
        self.update(path, |node| node.decline_creates = true);
    }

    /// Make the entry at `path` report no name.
    pub fn hide_name(&self, path: &str) {
        self.update(path, |node| node.nameless = true);
    }

    fn name_for(&self, path: &str) -> Option<OsString> {
        if self.lock().get(path).is_some_and(|node| node.nameless) {
            return None;
        }
        name_of(path)
    }

    fn update(&self, path: &str, f: impl FnOnce(&mut Node)) {
        if let Some(node) = self.lock().get_mut(path.trim_matches('/')) {
            f(node);
        }
    }

    fn entry_for(&self, path: String, node: &Node) -> EntryOf<MemoryDirectory> {
        if node.is_directory() {
            Entry::Directory(MemoryDirectory {
                fs: self.clone(),
                path,
            })
        } else {
            Entry::File(MemoryFile {
                fs: self.clone(),
                path,
            })
        }
    }

    fn delete_subtree(&self, path: &str) -> Result<bool, FsError> {
        let mut nodes = self.lock();
        if !nodes.contains_key(path) {
            return Err(FsError::NotFound(location_of(path)));
        }

        let subtree: Vec<String> = nodes
            .keys()
            .filter(|key| is_within(key, path))
            .cloned()
            .collect();

        if subtree.iter().any(|key| nodes[key].fail_deletes) {
            return Err(FsError::DeleteError {
                location: location_of(path),
                io_error: io::Error::new(io::ErrorKind::PermissionDenied, "delete refused"),
            });
        }

        if subtree.iter().any(|key| nodes[key].pinned) {
            log::debug!("Delete of {} declined", location_of(path));
            return Ok(false);
        }

        for key in subtree {
            nodes.remove(&key);
        }
        Ok(true)
    }
}

/// A directory in a [`MemoryFs`].
#[derive(Debug, Clone)]
pub struct MemoryDirectory {
    fs: MemoryFs,
    path: String,
}

impl MemoryDirectory {
    /// Path of this directory relative to the root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    fn create_child(&self, name: &OsStr, kind: NodeKind) -> Result<Option<String>, FsError> {
        let Some(name) = name.to_str() else {
            let location = location_of(&join(&self.path, &name.to_string_lossy()));
            let io_error = io::Error::new(io::ErrorKind::InvalidInput, "name is not UTF-8");
            return Err(match kind {
                NodeKind::Directory => FsError::CreateDirError { location, io_error },
                NodeKind::File { .. } => FsError::CreateFileError { location, io_error },
            });
        };
        let path = join(&self.path, name);
        let mut nodes = self.fs.lock();

        let Some(parent) = nodes.get(&self.path) else {
            return Err(FsError::NotFound(location_of(&self.path)));
        };
        if parent.decline_creates {
            log::debug!("Create of {} declined", location_of(&path));
            return Ok(None);
        }
        if nodes.contains_key(&path) {
            let io_error = io::Error::new(io::ErrorKind::AlreadyExists, "entry already exists");
            return Err(match kind {
                NodeKind::Directory => FsError::CreateDirError {
                    location: location_of(&path),
                    io_error,
                },
                NodeKind::File { .. } => FsError::CreateFileError {
                    location: location_of(&path),
                    io_error,
                },
            });
        }

        nodes.insert(path.clone(), Node::new(kind));
        Ok(Some(path))
    }
}

impl DirectoryHandle for MemoryDirectory {
    type File = MemoryFile;

    fn name(&self) -> Option<OsString> {
        self.fs.name_for(&self.path)
    }

    fn location(&self) -> String {
        location_of(&self.path)
    }

    fn is_directory(&self) -> bool {
        self.fs.is_dir(&self.path)
    }

    fn list(&self) -> Result<Vec<EntryOf<Self>>, FsError> {
        let nodes = self.fs.lock();
        match nodes.get(&self.path) {
            Some(node) if node.is_directory() => {}
            Some(_) => {
                return Err(FsError::ListError {
                    location: self.location(),
                    io_error: io::Error::other("not a directory"),
                });
            }
            None => return Err(FsError::NotFound(self.location())),
        }

        Ok(nodes
            .iter()
            .filter(|(key, _)| !key.is_empty() && *key != &self.path)
            .filter(|(key, _)| parent_of(key) == self.path)
            .map(|(key, node)| self.fs.entry_for(key.clone(), node))
            .collect())
    }

    fn find(&self, name: &OsStr) -> Result<Option<EntryOf<Self>>, FsError> {
        let nodes = self.fs.lock();
        if !nodes.get(&self.path).is_some_and(Node::is_directory) {
            return Err(FsError::NotFound(self.location()));
        }
        let Some(name) = name.to_str() else {
            return Ok(None);
        };
        let path = join(&self.path, name);
        Ok(nodes.get(&path).map(|node| self.fs.entry_for(path.clone(), node)))
    }

    fn create_directory(&self, name: &OsStr) -> Result<Option<Self>, FsError> {
        Ok(self
            .create_child(name, NodeKind::Directory)?
            .map(|path| Self {
                fs: self.fs.clone(),
                path,
            }))
    }

    fn create_file(
        &self,
        name: &OsStr,
        content_type: &str,
    ) -> Result<Option<MemoryFile>, FsError> {
        let kind = NodeKind::File {
            content: Vec::new(),
            content_type: Some(content_type.to_string()),
        };
        Ok(self.create_child(name, kind)?.map(|path| MemoryFile {
            fs: self.fs.clone(),
            path,
        }))
    }

    fn delete(&self) -> Result<bool, FsError> {
        if self.path.is_empty() {
            log::debug!("Refusing to delete the memory root");
            return Ok(false);
        }
        self.fs.delete_subtree(&self.path)
    }
}

/// A file in a [`MemoryFs`].
#[derive(Debug, Clone)]
pub struct MemoryFile {
    fs: MemoryFs,
    path: String,
}

impl MemoryFile {
    /// Path of this file relative to the root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl FileHandle for MemoryFile {
    type Reader = Cursor<Vec<u8>>;
    type Writer = MemoryWriter;

    fn name(&self) -> Option<OsString> {
        self.fs.name_for(&self.path)
    }

    fn location(&self) -> String {
        location_of(&self.path)
    }

    fn content_type(&self) -> Option<String> {
        self.fs.content_type(&self.path)
    }

    fn open_read(&self) -> Result<Cursor<Vec<u8>>, FsError> {
        let nodes = self.fs.lock();
        let node = nodes
            .get(&self.path)
            .ok_or_else(|| FsError::NotFound(self.location()))?;

        match &node.kind {
            _ if node.fail_reads => Err(FsError::OpenReadError {
                location: self.location(),
                io_error: io::Error::new(io::ErrorKind::PermissionDenied, "read refused"),
            }),
            NodeKind::File { content, .. } => Ok(Cursor::new(content.clone())),
            NodeKind::Directory => Err(FsError::OpenReadError {
                location: self.location(),
                io_error: io::Error::other("is a directory"),
            }),
        }
    }

    fn open_write(&self) -> Result<MemoryWriter, FsError> {
        let mut nodes = self.fs.lock();
        let node = nodes
            .get_mut(&self.path)
            .ok_or_else(|| FsError::NotFound(self.location()))?;

        match &mut node.kind {
            NodeKind::File { content, .. } => content.clear(),
            NodeKind::Directory => {
                return Err(FsError::OpenWriteError {
                    location: self.location(),
                    io_error: io::Error::other("is a directory"),
                });
            }
        }

        Ok(MemoryWriter {
            fs: self.fs.clone(),
            path: self.path.clone(),
        })
    }

    fn delete(&self) -> Result<bool, FsError> {
        self.fs.delete_subtree(&self.path)
    }
}

/// Writable stream appending to a [`MemoryFile`].
#[derive(Debug)]
pub struct MemoryWriter {
    fs: MemoryFs,
    path: String,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut nodes = self.fs.lock();
        let Some(node) = nodes.get_mut(&self.path) else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} no longer exists", location_of(&self.path)),
            ));
        };
        let write_limit = node.write_limit;

        match &mut node.kind {
            NodeKind::File { content, .. } => {
                let accepted = write_limit.map_or(buf.len(), |limit| {
                    limit.saturating_sub(content.len()).min(buf.len())
                });
                if accepted == 0 && !buf.is_empty() {
                    return Err(io::Error::new(
                        io::ErrorKind::StorageFull,
                        format!("{} is full", location_of(&self.path)),
                    ));
                }
                content.extend_from_slice(&buf[..accepted]);
                Ok(accepted)
            }
            NodeKind::Directory => Err(io::Error::other("is a directory")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_list_direct_children_only() {
        let fs = MemoryFs::new();
        fs.add_file("a.txt", "a");
        fs.add_file("sub/b.txt", "b");
        fs.add_dir("empty");

        let names: Vec<_> = fs
            .root()
            .list()
            .unwrap()
            .iter()
            .map(|e| e.name().unwrap())
            .collect();

        assert_eq!(names, vec!["a.txt", "empty", "sub"]);

        let sub: Vec<_> = fs.directory("sub").list().unwrap();
        assert_eq!(sub.len(), 1);
        assert_eq!(sub[0].name().unwrap(), "b.txt");
    }

    #[test]
    fn test_sibling_prefix_is_not_a_child() {
        let fs = MemoryFs::new();
        fs.add_file("sub/a.txt", "a");
        fs.add_file("subway/b.txt", "b");

        assert!(fs.directory("sub").delete().unwrap());
        assert!(fs.exists("subway/b.txt"));
    }

    #[test]
    fn test_find() {
        let fs = MemoryFs::new();
        fs.add_file("file", "x");
        fs.add_dir("dir");

        let root = fs.root();
        assert!(matches!(
            root.find(OsStr::new("file")).unwrap(),
            Some(Entry::File(_))
        ));
        assert!(matches!(
            root.find(OsStr::new("dir")).unwrap(),
            Some(Entry::Directory(_))
        ));
        assert!(root.find(OsStr::new("nope")).unwrap().is_none());
    }

    #[test]
    fn test_create_write_read() {
        let fs = MemoryFs::new();
        let dir = fs
            .root()
            .create_directory(OsStr::new("music"))
            .unwrap()
            .unwrap();
        let file = dir
            .create_file(OsStr::new("song.mp3"), "audio/mpeg")
            .unwrap()
            .unwrap();

        let mut writer = file.open_write().unwrap();
        writer.write_all(b"la la").unwrap();
        drop(writer);

        let mut content = String::new();
        file.open_read().unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "la la");
        assert_eq!(file.content_type().as_deref(), Some("audio/mpeg"));
        assert_eq!(fs.read("music/song.mp3").unwrap(), b"la la");
    }

    #[test]
    fn test_open_write_truncates() {
        let fs = MemoryFs::new();
        fs.add_file("f", "old content");

        let Some(Entry::File(file)) = fs.root().find(OsStr::new("f")).unwrap() else {
            panic!("expected file");
        };
        file.open_write().unwrap().write_all(b"new").unwrap();

        assert_eq!(fs.read("f").unwrap(), b"new");
    }

    #[test]
    fn test_pinned_delete_declines() {
        let fs = MemoryFs::new();
        fs.add_file("keep/me.txt", "x");
        fs.pin("keep/me.txt");

        assert!(!fs.directory("keep").delete().unwrap());
        assert!(fs.exists("keep/me.txt"));
    }

    #[test]
    fn test_fail_reads() {
        let fs = MemoryFs::new();
        fs.add_file("broken", "x");
        fs.fail_reads("broken");

        let Some(Entry::File(file)) = fs.root().find(OsStr::new("broken")).unwrap() else {
            panic!("expected file");
        };
        assert!(matches!(
            file.open_read(),
            Err(FsError::OpenReadError { .. })
        ));
    }

    #[test]
    fn test_decline_creates() {
        let fs = MemoryFs::new();
        fs.add_dir("locked");
        fs.decline_creates("locked");

        let dir = fs.directory("locked");
        assert!(dir.create_directory(OsStr::new("x")).unwrap().is_none());
        assert!(
            dir.create_file(OsStr::new("y"), "text/plain")
                .unwrap()
                .is_none()
        );
        assert_eq!(fs.paths(), vec!["locked".to_string()]);
    }

    #[test]
    fn test_root_is_kept() {
        let fs = MemoryFs::new();
        assert!(!fs.root().delete().unwrap());
        assert!(fs.root().is_directory());
        assert!(fs.root().name().is_none());
    }

    #[test]
    fn test_fail_writes_after_limit() {
        let fs = MemoryFs::new();
        fs.add_file("small", "");
        fs.fail_writes_after("small", 3);

        let Some(Entry::File(file)) = fs.root().find(OsStr::new("small")).unwrap() else {
            panic!("expected file");
        };
        let result = file.open_write().unwrap().write_all(b"abcdef");

        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::StorageFull);
        assert_eq!(fs.read("small").unwrap(), b"abc");
    }

    #[test]
    fn test_fail_deletes() {
        let fs = MemoryFs::new();
        fs.add_file("dir/stuck.txt", "x");
        fs.add_file("dir/fine.txt", "y");
        fs.fail_deletes("dir/stuck.txt");

        assert!(matches!(
            fs.directory("dir").delete(),
            Err(FsError::DeleteError { .. })
        ));
        assert!(fs.exists("dir/fine.txt"));
    }

    #[test]
    fn test_hide_name() {
        let fs = MemoryFs::new();
        fs.add_file("anonymous", "x");
        fs.hide_name("anonymous");

        let entries = fs.root().list().unwrap();
        assert!(entries[0].name().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_names_are_rejected() {
        use std::os::unix::ffi::OsStrExt;

        let fs = MemoryFs::new();
        let name = OsStr::from_bytes(b"b\xff.jpg");
        let root = fs.root();

        assert!(root.find(name).unwrap().is_none());
        assert!(matches!(
            root.create_file(name, "image/jpeg"),
            Err(FsError::CreateFileError { .. })
        ));
        assert!(fs.paths().is_empty());
    }
}
