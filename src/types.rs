//! Public and internal types for the dirhash API and pipeline.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::utils::config::FingerprintDefaults;

/// Metadata for a single path (file or dir) beneath the scanned root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Path relative to the scanned root.
    pub path: PathBuf,
    /// Modification time in nanoseconds since epoch (negative before 1970).
    pub mtime_ns: i64,
    pub is_dir: bool,
}

/// Shared cancellation flag. Clone it into whatever needs to stop a run (e.g. a Ctrl+C handler).
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Options for [`fingerprint_dir`](crate::fingerprint_dir).
///
/// Zero for `batch_size` or `workers` means "use the default"; see [`FingerprintOpts::resolved`].
#[derive(Clone, Debug, Default)]
pub struct FingerprintOpts {
    /// Capacity of the path and entry channels. Default [`FingerprintDefaults::BATCH_SIZE`].
    pub batch_size: usize,
    /// Number of metadata worker threads. Default [`FingerprintDefaults::WORKERS`].
    pub workers: usize,
    /// Walk with jwalk on the rayon pool instead of a serial walkdir traversal.
    pub parallel_walk: bool,
    /// When set and cancelled, the run stops early with [`FingerprintError::Cancelled`](crate::FingerprintError::Cancelled).
    pub cancel: Option<CancelFlag>,
}

impl FingerprintOpts {
    /// Copy of these options with zero values replaced by defaults.
    pub fn resolved(&self) -> Self {
        Self {
            batch_size: match self.batch_size {
                0 => FingerprintDefaults::BATCH_SIZE,
                n => n,
            },
            workers: match self.workers {
                0 => FingerprintDefaults::WORKERS,
                n => n,
            },
            parallel_walk: self.parallel_walk,
            cancel: self.cancel.clone(),
        }
    }
}
