//! Interactive prompts using dialoguer.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::io;
use std::path::{Path, PathBuf};

use dialoguer::{Confirm, Input};

/// Prompt for a directory location.
///
/// # Errors
///
/// * If the user cancels the input
pub fn prompt_location(label: &str) -> io::Result<PathBuf> {
    let path: String = Input::new()
        .with_prompt(format!("Enter the {label} directory"))
        .interact_text()?;

    Ok(PathBuf::from(path))
}

/// Confirm that everything in the destination may be deleted.
///
/// # Errors
///
/// * If the user cancels the prompt
pub fn confirm_clear(destination: &Path) -> io::Result<bool> {
    Ok(Confirm::new()
        .with_prompt(format!(
            "Everything in {} will be deleted and replaced. Continue?",
            destination.display()
        ))
        .default(false)
        .interact()?)
}
