//! Error type for a fingerprint run.

use std::path::PathBuf;
use thiserror::Error;

/// The single failure reported by a run. Only the first error recorded is kept.
#[derive(Debug, Error)]
pub enum FingerprintError {
    /// Traversal could not continue (root missing or unreadable, permission error while descending).
    #[error("error walking directory{}: {message}", fmt_opt_path(.path))]
    Walk {
        path: Option<PathBuf>,
        message: String,
    },

    /// Metadata (or its modification time) unavailable for a discovered path.
    #[error("error stating {}: {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A discovered path is not under the scanned root.
    #[error("error getting relative path for {} (root {})", .path.display(), .root.display())]
    RelativePath { path: PathBuf, root: PathBuf },

    #[error("fingerprint cancelled")]
    Cancelled,

    #[error("{0} thread panicked")]
    ThreadPanicked(&'static str),
}

impl FingerprintError {
    pub fn walk(path: Option<PathBuf>, message: impl Into<String>) -> Self {
        Self::Walk {
            path,
            message: message.into(),
        }
    }

    /// Offending path, when the error has one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Walk { path, .. } => path.as_deref(),
            Self::Stat { path, .. } | Self::RelativePath { path, .. } => Some(path),
            Self::Cancelled | Self::ThreadPanicked(_) => None,
        }
    }
}

fn fmt_opt_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" at {}", p.display()))
        .unwrap_or_default()
}
