//! Pipeline context: shared data passed into the walk thread and each metadata worker.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;

use super::error_handler::FirstError;
use crate::{CancelFlag, Entry, FingerprintOpts};

/// Shared context for the walk + metadata pipeline. Cheap to clone; one copy per thread.
#[derive(Clone, Debug)]
pub struct PipelineContext {
    /// Canonical scan root. Walk paths are prefixed by it.
    pub root: PathBuf,
    pub first_error: Arc<FirstError>,
    pub cancel: Option<CancelFlag>,
}

impl PipelineContext {
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled)
    }
}

/// Handles returned by [`run_pipeline`](super::run_pipeline): receive entries, then join.
pub struct PipelineHandles {
    pub entry_rx: Receiver<Entry>,
    pub walk_handle: JoinHandle<usize>,
    pub worker_handles: Vec<JoinHandle<()>>,
    pub ctx: PipelineContext,
}

/// Channels and shared state for the pipeline. Walk thread gets path_tx; workers get path_rx, entry_tx.
pub struct PipelineChannels {
    pub path_tx: Sender<PathBuf>,
    pub path_rx: Receiver<PathBuf>,
    pub entry_tx: Sender<Entry>,
    pub entry_rx: Receiver<Entry>,
    pub ctx: PipelineContext,
}

/// Both channels are bounded at `opts.batch_size` (resolve opts first; zero would make them rendezvous channels).
pub fn create_pipeline_channels(root: &Path, opts: &FingerprintOpts) -> PipelineChannels {
    let (path_tx, path_rx) = bounded::<PathBuf>(opts.batch_size);
    let (entry_tx, entry_rx) = bounded::<Entry>(opts.batch_size);

    let ctx = PipelineContext {
        root: root.to_path_buf(),
        first_error: Arc::new(FirstError::new()),
        cancel: opts.cancel.clone(),
    };

    PipelineChannels {
        path_tx,
        path_rx,
        entry_tx,
        entry_rx,
        ctx,
    }
}
