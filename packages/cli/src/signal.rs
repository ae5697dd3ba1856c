//! Ctrl-C handling.
//!
//! The first interrupt only raises a flag, which the main loop turns into a
//! cancellation request so the current file finishes cleanly. A second
//! interrupt exits immediately.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Exit status used when the process is interrupted.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Record an interrupt, returning whether one had already been received.
fn record_interrupt() -> bool {
    INTERRUPTED.swap(true, Ordering::SeqCst)
}

/// Install the Ctrl-C handler.
///
/// # Errors
///
/// * If a handler is already installed or the platform handler cannot be set
pub fn install_interrupt_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| {
        if record_interrupt() {
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    })
}

/// Whether an interrupt has been received.
#[must_use]
pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_interrupt_is_detected() {
        assert!(!interrupted());
        assert!(!record_interrupt());
        assert!(interrupted());
        assert!(record_interrupt());
    }
}
