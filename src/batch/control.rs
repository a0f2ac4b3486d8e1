//! Cooperative pause/resume/cancel flags shared with the run loop.
//!
//! The worker checks these only at the top of each per-input iteration; an
//! in-flight OCR call always runs to completion. A paused worker parks on
//! the condvar until resume or cancel wakes it, with no busy polling.

use std::sync::{Condvar, Mutex};

#[derive(Debug, Default)]
struct Flags {
    paused: bool,
    cancelled: bool,
}

/// Shared control surface for a batch run. The run loop reads; the owning
/// side toggles.
#[derive(Debug, Default)]
pub struct BatchControls {
    flags: Mutex<Flags>,
    wake: Condvar,
}

impl BatchControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pause(&self) {
        self.flags.lock().unwrap().paused = true;
    }

    pub fn resume(&self) {
        self.flags.lock().unwrap().paused = false;
        self.wake.notify_all();
    }

    pub fn cancel(&self) {
        self.flags.lock().unwrap().cancelled = true;
        self.wake.notify_all();
    }

    pub fn is_paused(&self) -> bool {
        self.flags.lock().unwrap().paused
    }

    pub fn is_cancelled(&self) -> bool {
        self.flags.lock().unwrap().cancelled
    }

    /// Block while paused. Returns true if cancellation was requested,
    /// either before or while waiting.
    pub(crate) fn wait_if_paused(&self) -> bool {
        let mut flags = self.flags.lock().unwrap();
        while flags.paused && !flags.cancelled {
            flags = self.wake.wait(flags).unwrap();
        }
        flags.cancelled
    }
}
