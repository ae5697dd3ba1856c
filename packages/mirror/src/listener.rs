//! Progress and completion delivery.
//!
//! The engine reports through [`SyncListener`] and never assumes which thread
//! the host wants notifications on. Hosts pick a delivery policy by picking
//! a listener:
//!
//! * [`Callbacks`] calls closures inline on the syncing thread
//! * `mpsc::Sender<SyncEvent>` forwards events to whichever thread owns the
//!   receiver

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::mpsc;

/// A notification emitted by a sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEvent {
    /// A file finished copying; payload is the overall percentage.
    Progress(u8),
    /// Every file was copied.
    Complete,
}

/// Receiver of sync notifications.
///
/// `on_progress` is called once per copied file with a non-decreasing
/// percentage. `on_complete` is called exactly once after the last progress
/// update, and only when the sync succeeds.
pub trait SyncListener {
    /// Called after each file copy.
    fn on_progress(&self, percent: u8);

    /// Called once when the sync finishes successfully.
    fn on_complete(&self);
}

/// Closure-based listener.
#[derive(Debug, Clone)]
pub struct Callbacks<P, C> {
    on_progress: P,
    on_complete: C,
}

impl<P, C> Callbacks<P, C>
where
    P: Fn(u8),
    C: Fn(),
{
    /// Create a listener from a progress closure and a completion closure.
    #[must_use]
    pub const fn new(on_progress: P, on_complete: C) -> Self {
        Self {
            on_progress,
            on_complete,
        }
    }
}

impl<P, C> SyncListener for Callbacks<P, C>
where
    P: Fn(u8),
    C: Fn(),
{
    fn on_progress(&self, percent: u8) {
        (self.on_progress)(percent);
    }

    fn on_complete(&self) {
        (self.on_complete)();
    }
}

impl SyncListener for mpsc::Sender<SyncEvent> {
    fn on_progress(&self, percent: u8) {
        if self.send(SyncEvent::Progress(percent)).is_err() {
            log::trace!("Progress receiver dropped");
        }
    }

    fn on_complete(&self) {
        if self.send(SyncEvent::Complete).is_err() {
            log::debug!("Completion receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_callbacks_forward() {
        let seen = RefCell::new(Vec::new());
        let listener = Callbacks::new(
            |p| seen.borrow_mut().push(SyncEvent::Progress(p)),
            || seen.borrow_mut().push(SyncEvent::Complete),
        );

        listener.on_progress(50);
        listener.on_complete();

        assert_eq!(
            seen.into_inner(),
            vec![SyncEvent::Progress(50), SyncEvent::Complete]
        );
    }

    #[test]
    fn test_sender_tolerates_dropped_receiver() {
        let (tx, rx) = mpsc::channel();
        drop(rx);

        tx.on_progress(10);
        tx.on_complete();
    }
}
