//! Destructive mirroring of one directory tree into another.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::ffi::OsStr;
use std::io::{self, Write};

use syncmedia_fs::{DEFAULT_CONTENT_TYPE, DirectoryHandle, Entry, FileHandle};

use crate::cancel::CancellationToken;
use crate::count::count_files;
use crate::error::SyncError;
use crate::listener::SyncListener;
use crate::progress::ProgressTracker;
use crate::summary::{Conflict, ConflictKind, SyncSummary};

/// Mirror `source` into `destination`.
///
/// Everything inside `destination` is deleted first, then the source tree is
/// copied depth-first in listing order. `listener` receives one progress
/// update per copied file and a single completion once the copy finishes.
///
/// A source entry whose name is taken in the destination by an entry of the
/// other kind is skipped and recorded as a [`Conflict`]. Existing files of the
/// same name are overwritten. Source entries that are neither files nor
/// directories are not copied.
///
/// # Arguments
///
/// * `source` - Directory to copy from
/// * `destination` - Directory to clear and copy into
/// * `listener` - Receives progress and completion notifications
/// * `cancel` - Checked before each entry is deleted or copied
///
/// # Errors
///
/// * If any list, create, delete, open, read or write fails (no completion is sent)
/// * If a listed entry has no name
/// * If `cancel` is triggered before the sync finishes
pub fn sync<S, T, L>(
    source: &S,
    destination: &T,
    listener: &L,
    cancel: &CancellationToken,
) -> Result<SyncSummary, SyncError>
where
    S: DirectoryHandle,
    T: DirectoryHandle,
    L: SyncListener + ?Sized,
{
    log::info!(
        "Starting sync from {} to {}",
        source.location(),
        destination.location()
    );

    clear_directory(destination, cancel)?;

    let files_total = count_files(source)?;
    log::debug!("Found {files_total} files to copy");

    if files_total == 0 {
        listener.on_complete();
        return Ok(SyncSummary::default());
    }

    let mut session = SyncSession {
        tracker: ProgressTracker::new(files_total),
        listener,
        cancel,
        conflicts: Vec::new(),
        declined: Vec::new(),
        skipped: Vec::new(),
    };
    session.copy_directory(source, destination)?;

    listener.on_complete();
    log::info!(
        "Sync finished: {} of {} files copied",
        session.tracker.copied(),
        files_total
    );

    Ok(session.into_summary())
}

/// Delete every entry inside `dir`, leaving `dir` itself in place.
///
/// Subdirectories are emptied before they are deleted. A delete the backend
/// declines is logged and the clear carries on.
///
/// # Errors
///
/// * If listing or deleting fails
/// * If `cancel` is triggered
pub fn clear_directory<D: DirectoryHandle>(
    dir: &D,
    cancel: &CancellationToken,
) -> Result<(), SyncError> {
    if !dir.is_directory() {
        return Ok(());
    }

    for entry in dir.list()? {
        if cancel.is_cancelled() {
            return Err(SyncError::Cancelled {
                files_copied: 0,
                files_total: 0,
            });
        }

        let deleted = match &entry {
            Entry::Directory(child) => {
                clear_directory(child, cancel)?;
                child.delete()?
            }
            Entry::File(file) | Entry::Special(file) => file.delete()?,
        };

        if deleted {
            log::trace!("Deleted {}", entry.location());
        } else {
            log::warn!("Could not delete {}", entry.location());
        }
    }

    Ok(())
}

/// State for one running sync.
struct SyncSession<'a, L: ?Sized> {
    tracker: ProgressTracker,
    listener: &'a L,
    cancel: &'a CancellationToken,
    conflicts: Vec<Conflict>,
    declined: Vec<String>,
    skipped: Vec<String>,
}

impl<L: SyncListener + ?Sized> SyncSession<'_, L> {
    fn copy_directory<S, T>(&mut self, source: &S, destination: &T) -> Result<(), SyncError>
    where
        S: DirectoryHandle,
        T: DirectoryHandle,
    {
        if !source.is_directory() {
            return Ok(());
        }

        for entry in source.list()? {
            if self.cancel.is_cancelled() {
                return Err(SyncError::Cancelled {
                    files_copied: self.tracker.copied(),
                    files_total: self.tracker.total(),
                });
            }

            if let Entry::Special(special) = &entry {
                log::info!("Not copying special entry {}", special.location());
                self.skipped.push(special.location());
                continue;
            }

            let name = entry.name().ok_or_else(|| SyncError::MissingName {
                location: entry.location(),
            })?;
            let existing = destination.find(&name)?;

            match entry {
                Entry::Directory(dir) => {
                    let target = match existing {
                        Some(Entry::Directory(target)) => target,
                        Some(Entry::File(file)) => {
                            self.conflict(dir.location(), file.location(), ConflictKind::FileExists);
                            continue;
                        }
                        Some(Entry::Special(other)) => {
                            self.conflict(
                                dir.location(),
                                other.location(),
                                ConflictKind::SpecialExists,
                            );
                            continue;
                        }
                        None => {
                            let Some(created) = destination.create_directory(&name)? else {
                                self.decline(destination, &name);
                                continue;
                            };
                            created
                        }
                    };
                    self.copy_directory(&dir, &target)?;
                }
                Entry::File(file) => {
                    let target = match existing {
                        Some(Entry::File(target)) => target,
                        Some(Entry::Directory(dir)) => {
                            self.conflict(
                                file.location(),
                                dir.location(),
                                ConflictKind::DirectoryExists,
                            );
                            continue;
                        }
                        Some(Entry::Special(other)) => {
                            self.conflict(
                                file.location(),
                                other.location(),
                                ConflictKind::SpecialExists,
                            );
                            continue;
                        }
                        None => {
                            let content_type = file
                                .content_type()
                                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
                            let Some(created) = destination.create_file(&name, &content_type)?
                            else {
                                self.decline(destination, &name);
                                continue;
                            };
                            created
                        }
                    };
                    self.copy_file(&file, &target)?;
                }
                // skipped before the lookup
                Entry::Special(_) => {}
            }
        }

        Ok(())
    }

    /// Stream the full content of `source` into `target` and report progress.
    fn copy_file<F, G>(&mut self, source: &F, target: &G) -> Result<(), SyncError>
    where
        F: FileHandle,
        G: FileHandle,
    {
        log::debug!(
            "Copying file {} -> {}",
            source.location(),
            target.location()
        );

        let mut reader = source.open_read()?;
        let mut writer = target.open_write()?;
        io::copy(&mut reader, &mut writer)
            .and_then(|_| writer.flush())
            .map_err(|e| SyncError::FileCopyError {
                source_location: source.location(),
                target_location: target.location(),
                io_error: e,
            })?;
        drop(writer);
        drop(reader);

        let progress = self.tracker.increment_copied();
        self.listener.on_progress(progress.percentage());
        Ok(())
    }

    fn conflict(&mut self, source: String, destination: String, kind: ConflictKind) {
        log::warn!("Conflict: {kind} at {destination}, skipping {source}");
        self.conflicts.push(Conflict {
            source,
            destination,
            kind,
        });
    }

    fn decline<T: DirectoryHandle>(&mut self, destination: &T, name: &OsStr) {
        let name = name.to_string_lossy();
        log::warn!("Could not create {name} in {}", destination.location());
        self.declined
            .push(format!("{}/{name}", destination.location().trim_end_matches('/')));
    }

    fn into_summary(self) -> SyncSummary {
        SyncSummary {
            files_total: self.tracker.total(),
            files_copied: self.tracker.copied(),
            conflicts: self.conflicts,
            declined: self.declined,
            skipped: self.skipped,
        }
    }
}
