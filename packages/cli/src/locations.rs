//! Resolving and validating sync locations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use thiserror::Error;

/// Problems with the chosen source and destination.
#[derive(Debug, Error)]
pub enum LocationError {
    /// No location was given, saved, or entered.
    #[error("No {0} directory given. Pass it as an argument or run interactively.")]
    Missing(&'static str),

    /// The location is not an existing directory.
    #[error("The {label} is not a directory: {}", path.display())]
    NotADirectory {
        /// Which location ("source" or "destination").
        label: &'static str,
        /// The offending path.
        path: PathBuf,
    },

    /// Source and destination are the same directory.
    #[error("Source and destination are the same directory: {}", .0.display())]
    Same(PathBuf),

    /// One location is inside the other, so clearing or copying would eat the source.
    #[error("{} is inside {}; source and destination must not be nested", inner.display(), outer.display())]
    Nested {
        /// The nested location.
        inner: PathBuf,
        /// The enclosing location.
        outer: PathBuf,
    },

    /// A location could not be resolved.
    #[error("Failed to resolve {}: {source}", path.display())]
    ResolveError {
        /// The path being resolved.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Make `path` absolute against `cwd` and normalise `.`/`..` components.
#[must_use]
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf().clean()
    } else {
        cwd.join(path).clean()
    }
}

/// Pick the location to use: the argument wins over the saved value.
#[must_use]
pub fn pick(argument: Option<PathBuf>, saved: Option<PathBuf>) -> Option<PathBuf> {
    argument.or(saved)
}

fn canonical(label: &'static str, path: &Path) -> Result<PathBuf, LocationError> {
    if !path.is_dir() {
        return Err(LocationError::NotADirectory {
            label,
            path: path.to_path_buf(),
        });
    }
    fs::canonicalize(path).map_err(|e| LocationError::ResolveError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Check that `source` and `destination` can be mirrored safely.
///
/// # Errors
///
/// * If either is not an existing directory
/// * If they are the same directory or one contains the other
pub fn validate(source: &Path, destination: &Path) -> Result<(), LocationError> {
    let source = canonical("source", source)?;
    let destination = canonical("destination", destination)?;

    if source == destination {
        return Err(LocationError::Same(source));
    }
    if destination.starts_with(&source) {
        return Err(LocationError::Nested {
            inner: destination,
            outer: source,
        });
    }
    if source.starts_with(&destination) {
        return Err(LocationError::Nested {
            inner: source,
            outer: destination,
        });
    }

    Ok(())
}
