//! Progress bar utilities for the CLI.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar manager for sync operations.
pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    /// Create a new progress manager.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Create a percentage bar for a sync.
    ///
    /// The bar starts as a spinner while the destination is cleared and the
    /// source is counted, and switches to a bar on the first update.
    /// If progress is disabled, returns a hidden progress bar.
    #[must_use]
    pub fn create_sync_bar(&self, label: &str) -> SyncBar {
        if !self.enabled {
            return SyncBar {
                bar: ProgressBar::hidden(),
                started: false,
            };
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.green} {prefix:<12} {msg}")
                .expect("Invalid progress bar template"),
        );
        bar.set_prefix(label.to_string());
        bar.set_message("clearing destination and counting files...");
        bar.enable_steady_tick(Duration::from_millis(100));

        SyncBar {
            bar,
            started: false,
        }
    }
}

/// A bar tracking one sync's percentage.
pub struct SyncBar {
    bar: ProgressBar,
    started: bool,
}

impl SyncBar {
    /// Show the latest percentage.
    pub fn set_percent(&mut self, percent: u8) {
        if !self.started {
            self.started = true;
            self.bar.disable_steady_tick();
            self.bar.set_length(100);
            self.bar.set_style(
                ProgressStyle::default_bar()
                    .template("  {prefix:<12} [{bar:30.green/dim}] {pos:>3}%  {msg}")
                    .expect("Invalid progress bar template")
                    .progress_chars("━━─"),
            );
            self.bar.set_message("");
        }
        self.bar.set_position(u64::from(percent));
    }

    /// Show a status message next to the bar.
    pub fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    /// Remove the bar from the terminal.
    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}
