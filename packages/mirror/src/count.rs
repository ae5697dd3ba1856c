//! File counting over directory handles.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use syncmedia_fs::{DirectoryHandle, Entry, FsError};

/// Count plain files beneath a directory.
///
/// - Each file entry counts 1
/// - Each directory entry counts the files beneath it, recursively
/// - Special entries (such as symlinks) count 0
/// - If `root` is not a directory: returns 0
///
/// Walks the tree with the same listing the mirror engine copies from, so the
/// count matches the number of files a full sync copies.
///
/// # Errors
///
/// * If a directory cannot be listed
pub fn count_files<D: DirectoryHandle>(root: &D) -> Result<u64, FsError> {
    if !root.is_directory() {
        return Ok(0);
    }

    let mut count = 0;
    for entry in root.list()? {
        count += match entry {
            Entry::Directory(dir) => count_files(&dir)?,
            Entry::File(_) => 1,
            Entry::Special(_) => 0,
        };
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use syncmedia_fs::{LocalDirectory, MemoryFs};
    use tempfile::TempDir;

    #[test]
    fn test_count_files_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("file1.txt"), "1").unwrap();
        fs::write(dir.path().join("file2.txt"), "2").unwrap();
        fs::create_dir(dir.path().join("subdir")).unwrap();
        fs::write(dir.path().join("subdir/file3.txt"), "3").unwrap();

        assert_eq!(count_files(&LocalDirectory::new(dir.path())).unwrap(), 3);
    }

    #[test]
    fn test_count_files_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert_eq!(count_files(&LocalDirectory::new(dir.path())).unwrap(), 0);
    }

    #[test]
    fn test_count_files_not_a_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("test.txt");
        fs::write(&file, "content").unwrap();

        assert_eq!(count_files(&LocalDirectory::new(&file)).unwrap(), 0);
        assert_eq!(
            count_files(&LocalDirectory::new("/nonexistent/path/that/does/not/exist")).unwrap(),
            0
        );
    }

    #[test]
    fn test_count_files_ignores_directories() {
        let fs = MemoryFs::new();
        fs.add_dir("empty");
        fs.add_dir("a/b/c/d/e");
        fs.add_file("a/b/c/d/e/deep.bin", "x");
        fs.add_file("a/top.bin", "x");
        fs.add_dir("a/also-empty");

        assert_eq!(count_files(&fs.root()).unwrap(), 2);
        assert_eq!(count_files(&fs.directory("a/b")).unwrap(), 1);
    }
}
