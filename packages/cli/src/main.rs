//! syncmedia CLI entry point.
//!
//! Mirrors a source directory into a destination directory, remembering the
//! last-used locations between runs.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod args;
mod interactive;
mod locations;
mod output;
mod progress;
mod signal;

use std::env;
use std::path::{Path, PathBuf};
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use clap::Parser;
use console::Term;

use args::Args;
use locations::LocationError;
use progress::ProgressManager;
use syncmedia_config::{LocationStore, Locations};
use syncmedia_fs::LocalDirectory;
use syncmedia_mirror::{SyncError, SyncEvent, spawn_sync};

/// How often the event loop checks for Ctrl-C while waiting for progress.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() {
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        // SAFETY: We're setting this before any other threads are spawned
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    pretty_env_logger::init();

    if let Err(e) = run(&args) {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let store = match LocationStore::open_default() {
        Ok(store) => Some(store),
        Err(e) => {
            output::print_warning(&format!("Locations will not be remembered: {e}"));
            None
        }
    };

    let saved = match store.as_ref().map(LocationStore::load) {
        Some(Ok(locations)) => locations,
        Some(Err(e)) => {
            output::print_warning(&format!("Ignoring saved locations: {e}"));
            Locations::default()
        }
        None => Locations::default(),
    };

    // If --show, exit
    if args.show {
        if let Some(store) = &store {
            output::print_saved_locations(&saved, store.path());
        }
        return Ok(());
    }

    let interactive = !args.non_interactive && Term::stdout().is_term();
    let cwd = env::current_dir()?;

    let source = resolve_location(
        "source",
        args.source.clone(),
        saved.source.clone(),
        interactive,
        &cwd,
    )?;
    let destination = resolve_location(
        "destination",
        args.destination.clone(),
        saved.destination.clone(),
        interactive,
        &cwd,
    )?;

    locations::validate(&source, &destination)?;

    output::print_header("Media Sync");
    output::print_locations(&source, &destination);

    if args.should_confirm() {
        if !interactive {
            return Err(
                "Not running in a terminal; pass --yes to clear the destination without asking"
                    .into(),
            );
        }
        if !interactive::confirm_clear(&destination)? {
            println!("Nothing was changed.");
            return Ok(());
        }
    }

    if args.should_save() {
        if let Some(store) = &store {
            let chosen = Locations {
                source: Some(source.clone()),
                destination: Some(destination.clone()),
            };
            if chosen != saved {
                if let Err(e) = store.save(&chosen) {
                    output::print_warning(&format!("Failed to save locations: {e}"));
                }
            }
        }
    }

    if let Err(e) = signal::install_interrupt_handler() {
        output::print_warning(&format!("Ctrl-C will not cancel cleanly: {e}"));
    }

    log::info!("Syncing {} -> {}", source.display(), destination.display());
    let handle = spawn_sync(
        LocalDirectory::new(&source),
        LocalDirectory::new(&destination),
    )?;

    let progress_mgr = ProgressManager::new(args.should_show_progress());
    let mut bar = progress_mgr.create_sync_bar("Syncing");
    let mut cancel_requested = false;

    loop {
        if signal::interrupted() && !cancel_requested {
            cancel_requested = true;
            handle.cancel();
            bar.set_message("cancelling after the current file (Ctrl-C again to abort)");
        }

        match handle.events().recv_timeout(POLL_INTERVAL) {
            Ok(SyncEvent::Progress(percent)) => bar.set_percent(percent),
            Ok(SyncEvent::Complete) => bar.set_percent(100),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    bar.finish_and_clear();

    match handle.wait() {
        Ok(summary) => {
            output::print_summary(&summary);
            output::print_success();
            Ok(())
        }
        Err(SyncError::Cancelled {
            files_copied,
            files_total,
        }) => {
            output::print_cancelled(files_copied, files_total);
            std::process::exit(signal::INTERRUPTED_EXIT_CODE);
        }
        Err(e) => Err(e.into()),
    }
}

/// Resolve a location from the argument, the saved value, or a prompt.
fn resolve_location(
    label: &'static str,
    argument: Option<PathBuf>,
    saved: Option<PathBuf>,
    interactive: bool,
    cwd: &Path,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = match locations::pick(argument, saved) {
        Some(path) => path,
        None if interactive => interactive::prompt_location(label)?,
        None => return Err(LocationError::Missing(label).into()),
    };

    let path = locations::absolutize(&path, cwd);
    log::debug!("Using {label} {}", path.display());
    Ok(path)
}
