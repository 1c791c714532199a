//! First-error-wins slot shared by the walk thread and metadata workers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::{CancelFlag, FingerprintError};

/// Keeps the first error recorded by any pipeline thread. Later errors are dropped and only counted.
#[derive(Debug, Default)]
pub struct FirstError {
    slot: Mutex<Option<FingerprintError>>,
    discarded: AtomicUsize,
}

impl FirstError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `err` if the slot is empty. Returns true when `err` was kept.
    pub fn record(&self, err: FingerprintError) -> bool {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            self.discarded.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        *slot = Some(err);
        true
    }

    pub fn is_set(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn take(&self) -> Option<FingerprintError> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Errors that arrived after the slot was filled.
    pub fn discarded(&self) -> usize {
        self.discarded.load(Ordering::Relaxed)
    }
}

/// Check pipeline result after joining walk and workers: the recorded error if any, else
/// `Cancelled` if the flag was raised mid-run (entries may be incomplete).
pub fn check_for_first_error(
    first_error: &FirstError,
    cancel: Option<&CancelFlag>,
) -> Result<(), FingerprintError> {
    let discarded = first_error.discarded();
    if discarded > 0 {
        log::debug!("{} further errors discarded after the first", discarded);
    }
    if let Some(err) = first_error.take() {
        return Err(err);
    }
    if cancel.is_some_and(CancelFlag::is_cancelled) {
        return Err(FingerprintError::Cancelled);
    }
    Ok(())
}
