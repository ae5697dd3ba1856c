//! Progress tracking for sync operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

/// Progress information for a sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncProgress {
    /// Total number of files to copy.
    pub files_total: u64,
    /// Number of files copied so far.
    pub files_copied: u64,
}

impl SyncProgress {
    /// Create a new progress report.
    #[must_use]
    pub const fn new(files_total: u64, files_copied: u64) -> Self {
        Self {
            files_total,
            files_copied,
        }
    }

    /// Progress as a whole percentage, rounded down (0 to 100).
    ///
    /// An empty sync is reported as complete.
    #[must_use]
    pub fn percentage(&self) -> u8 {
        if self.files_total == 0 {
            return 100;
        }
        let percent = self.files_copied.min(self.files_total) * 100 / self.files_total;
        u8::try_from(percent).unwrap_or(100)
    }
}

/// Per-sync file counters.
///
/// The total is fixed before copying starts; the copied count only grows.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    files_total: u64,
    files_copied: u64,
}

impl ProgressTracker {
    /// Create a tracker for a sync of `files_total` files.
    #[must_use]
    pub const fn new(files_total: u64) -> Self {
        Self {
            files_total,
            files_copied: 0,
        }
    }

    /// Record one copied file and return the updated progress.
    pub fn increment_copied(&mut self) -> SyncProgress {
        self.files_copied += 1;
        self.snapshot()
    }

    /// Get the current total.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.files_total
    }

    /// Get the current copied count.
    #[must_use]
    pub const fn copied(&self) -> u64 {
        self.files_copied
    }

    /// Get a progress snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> SyncProgress {
        SyncProgress::new(self.files_total, self.files_copied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounds_down() {
        assert_eq!(SyncProgress::new(3, 1).percentage(), 33);
        assert_eq!(SyncProgress::new(3, 2).percentage(), 66);
        assert_eq!(SyncProgress::new(3, 3).percentage(), 100);
        assert_eq!(SyncProgress::new(200, 1).percentage(), 0);
    }

    #[test]
    fn test_percentage_empty_is_complete() {
        assert_eq!(SyncProgress::new(0, 0).percentage(), 100);
    }

    #[test]
    fn test_tracker_counts_up() {
        let mut tracker = ProgressTracker::new(4);
        assert_eq!(tracker.copied(), 0);

        let progress = tracker.increment_copied();
        assert_eq!(progress, SyncProgress::new(4, 1));
        assert_eq!(progress.percentage(), 25);
        assert_eq!(tracker.total(), 4);
    }
}
