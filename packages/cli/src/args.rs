//! CLI argument definitions.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use clap::Parser;

/// CLI arguments for syncmedia.
#[derive(Debug, Parser)]
#[command(
    name = "syncmedia",
    about = "Mirror a source directory into a destination directory",
    long_about = "Mirror a source directory into a destination directory.\n\n\
        Everything in the destination is deleted first, then every file in the \
        source is copied. Locations given on the command line are remembered \
        for the next run.",
    version
)]
pub struct Args {
    /// Directory to copy from (defaults to the last used source).
    #[arg(index = 1)]
    pub source: Option<PathBuf>,

    /// Directory to clear and copy into (defaults to the last used destination).
    #[arg(index = 2)]
    pub destination: Option<PathBuf>,

    /// Skip the confirmation before the destination is cleared.
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Run without prompts (locations must be given or saved).
    #[arg(long)]
    pub non_interactive: bool,

    /// Do not remember the locations used for this run.
    #[arg(long = "no-save")]
    pub no_save: bool,

    /// Print the saved locations and exit.
    #[arg(long)]
    pub show: bool,

    /// Disable the progress bar (useful for CI environments).
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Enable verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Args {
    /// Determine if we should ask before clearing the destination.
    #[must_use]
    pub const fn should_confirm(&self) -> bool {
        !self.yes && !self.non_interactive
    }

    /// Determine if we should persist the chosen locations.
    #[must_use]
    pub const fn should_save(&self) -> bool {
        !self.no_save
    }

    /// Determine if we should show the progress bar.
    #[must_use]
    pub const fn should_show_progress(&self) -> bool {
        !self.no_progress
    }
}
