//! Running a sync on a background thread.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use syncmedia_fs::DirectoryHandle;

use crate::cancel::CancellationToken;
use crate::error::SyncError;
use crate::listener::SyncEvent;
use crate::mirror::sync;
use crate::summary::SyncSummary;

/// Handle to a sync running on a worker thread.
#[derive(Debug)]
pub struct SyncHandle {
    events: Receiver<SyncEvent>,
    cancel: CancellationToken,
    join: JoinHandle<Result<SyncSummary, SyncError>>,
}

impl SyncHandle {
    /// Progress and completion events, in emission order.
    ///
    /// The channel disconnects once the worker finishes.
    #[must_use]
    pub const fn events(&self) -> &Receiver<SyncEvent> {
        &self.events
    }

    /// Ask the worker to stop before the next entry.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Token shared with the worker.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Wait for the worker and return its result.
    ///
    /// # Errors
    ///
    /// * If the sync failed or was cancelled
    /// * If the worker thread panicked
    pub fn wait(self) -> Result<SyncSummary, SyncError> {
        self.join.join().map_err(|_| SyncError::WorkerPanicked)?
    }
}

/// Start mirroring `source` into `destination` on a new thread.
///
/// Events are delivered through [`SyncHandle::events`], so the calling
/// thread decides where notifications are handled.
///
/// # Errors
///
/// * If the worker thread cannot be spawned
pub fn spawn_sync<S, T>(source: S, destination: T) -> Result<SyncHandle, SyncError>
where
    S: DirectoryHandle + Send + 'static,
    T: DirectoryHandle + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let cancel = CancellationToken::new();
    let worker_cancel = cancel.clone();

    let join = thread::Builder::new()
        .name("syncmedia-sync".to_string())
        .spawn(move || sync(&source, &destination, &tx, &worker_cancel))
        .map_err(SyncError::SpawnError)?;

    Ok(SyncHandle {
        events: rx,
        cancel,
        join,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::{OsStr, OsString};
    use std::sync::Mutex;
    use std::sync::mpsc::Sender;

    use syncmedia_fs::{Entry, EntryOf, FsError, MemoryDirectory, MemoryFile, MemoryFs};

    #[test]
    fn test_spawn_sync_delivers_events() {
        let source = MemoryFs::new();
        source.add_file("a.txt", "hi");
        source.add_file("sub/b.txt", "bye");
        let destination = MemoryFs::new();

        let handle = spawn_sync(source.root(), destination.root()).unwrap();
        let events: Vec<SyncEvent> = handle.events().iter().collect();
        let summary = handle.wait().unwrap();

        assert_eq!(
            events,
            vec![
                SyncEvent::Progress(50),
                SyncEvent::Progress(100),
                SyncEvent::Complete
            ]
        );
        assert_eq!(summary.files_copied, 2);
        assert_eq!(destination.files(), source.files());
    }

    #[test]
    fn test_spawn_sync_failure_is_returned() {
        let source = MemoryFs::new();
        source.add_file("a.txt", "a");
        source.fail_reads("a.txt");
        let destination = MemoryFs::new();

        let handle = spawn_sync(source.root(), destination.root()).unwrap();
        let events: Vec<SyncEvent> = handle.events().iter().collect();

        assert!(events.is_empty());
        assert!(matches!(handle.wait(), Err(SyncError::Fs(_))));
    }

    /// Flat source directory whose listings wait for the test to release them.
    struct GatedDirectory {
        inner: MemoryDirectory,
        entered: Sender<()>,
        release: Mutex<Receiver<()>>,
    }

    impl DirectoryHandle for GatedDirectory {
        type File = MemoryFile;

        fn name(&self) -> Option<OsString> {
            self.inner.name()
        }

        fn location(&self) -> String {
            self.inner.location()
        }

        fn is_directory(&self) -> bool {
            self.inner.is_directory()
        }

        fn list(&self) -> Result<Vec<EntryOf<Self>>, FsError> {
            self.entered.send(()).unwrap();
            self.release.lock().unwrap().recv().unwrap();
            Ok(self
                .inner
                .list()?
                .into_iter()
                .filter_map(|entry| match entry {
                    Entry::File(file) => Some(Entry::File(file)),
                    Entry::Directory(_) | Entry::Special(_) => None,
                })
                .collect())
        }

        fn find(&self, _name: &OsStr) -> Result<Option<EntryOf<Self>>, FsError> {
            unreachable!("source is only listed")
        }

        fn create_directory(&self, _name: &OsStr) -> Result<Option<Self>, FsError> {
            unreachable!("source is only listed")
        }

        fn create_file(
            &self,
            _name: &OsStr,
            _content_type: &str,
        ) -> Result<Option<MemoryFile>, FsError> {
            unreachable!("source is only listed")
        }

        fn delete(&self) -> Result<bool, FsError> {
            unreachable!("source is only listed")
        }
    }

    #[test]
    fn test_cancel_running_worker() {
        let source = MemoryFs::new();
        source.add_file("1.txt", "1");
        source.add_file("2.txt", "2");
        let destination = MemoryFs::new();
        destination.add_file("old.txt", "old");

        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let gated = GatedDirectory {
            inner: source.root(),
            entered: entered_tx,
            release: Mutex::new(release_rx),
        };

        let handle = spawn_sync(gated, destination.root()).unwrap();

        // counting
        entered_rx.recv().unwrap();
        release_tx.send(()).unwrap();

        // copying
        entered_rx.recv().unwrap();
        handle.cancel();
        release_tx.send(()).unwrap();

        let events: Vec<SyncEvent> = handle.events().iter().collect();

        assert!(events.is_empty());
        assert!(matches!(
            handle.wait(),
            Err(SyncError::Cancelled {
                files_copied: 0,
                files_total: 2
            })
        ));
        assert!(destination.paths().is_empty());
    }
}
