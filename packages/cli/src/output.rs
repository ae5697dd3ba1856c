//! Terminal output formatting.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;

use colored::Colorize;
use syncmedia_config::Locations;
use syncmedia_mirror::SyncSummary;

/// Print a header message.
pub fn print_header(message: &str) {
    println!("\n{} {}\n", "🔁", message.bold());
}

/// Print the locations about to be synced.
pub fn print_locations(source: &Path, destination: &Path) {
    println!("Source:      {}", source.display().to_string().cyan());
    println!("Destination: {}", destination.display().to_string().cyan());
    println!();
}

/// Print the saved locations.
pub fn print_saved_locations(locations: &Locations, store_path: &Path) {
    let show = |path: Option<&Path>| {
        path.map_or_else(
            || "(not set)".dimmed().to_string(),
            |p| p.display().to_string().cyan().to_string(),
        )
    };

    println!(
        "Saved locations ({}):",
        store_path.display().to_string().dimmed()
    );
    println!(
        "  {} source:      {}",
        "•".dimmed(),
        show(locations.source.as_deref())
    );
    println!(
        "  {} destination: {}",
        "•".dimmed(),
        show(locations.destination.as_deref())
    );
}

/// Print the outcome of a finished sync.
pub fn print_summary(summary: &SyncSummary) {
    println!(
        "{} {} of {} files copied",
        "✓".green(),
        summary.files_copied,
        summary.files_total
    );

    for conflict in &summary.conflicts {
        print_warning(&format!("Skipped {}: {}", conflict.source, conflict.kind));
    }

    for location in &summary.declined {
        print_warning(&format!("Could not create {location}"));
    }

    for location in &summary.skipped {
        print_warning(&format!("Not copied (not a regular file): {location}"));
    }
}

/// Print success message.
pub fn print_success() {
    println!("{} Sync complete!", "✅");
}

/// Print a cancellation notice.
pub fn print_cancelled(files_copied: u64, files_total: u64) {
    eprintln!(
        "{} Sync cancelled after {} of {} files. The destination is only partially mirrored.",
        "Cancelled:".yellow().bold(),
        files_copied,
        files_total
    );
}

/// Print error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", "Warning:".yellow().bold(), message);
}
