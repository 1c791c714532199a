use crossbeam_channel::{Receiver, Sender};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use super::context::PipelineContext;
use crate::engine::tools::{path_relative_to, system_time_to_ns};
use crate::{Entry, FingerprintError};

/// Single metadata worker: read paths from path_rx, turn into entries, send on entry_tx.
/// A failed path is recorded and skipped; the worker keeps draining until path_rx closes.
fn metadata_worker_loop(path_rx: Receiver<PathBuf>, entry_tx: Sender<Entry>, ctx: PipelineContext) {
    while let Ok(abs_path) = path_rx.recv() {
        if ctx.is_cancelled() {
            continue;
        }
        match path_to_entry(&abs_path, &ctx.root) {
            Ok(entry) => {
                if entry_tx.send(entry).is_err() {
                    break;
                }
            }
            Err(err) => {
                ctx.first_error.record(err);
            }
        }
    }
    drop(entry_tx);
}

/// Spawn `num_threads` metadata workers. Caller must drop its `entry_tx` after this so the
/// entry channel closes once every worker exits.
pub fn spawn_metadata_workers(
    path_rx: Receiver<PathBuf>,
    entry_tx: &Sender<Entry>,
    ctx: &PipelineContext,
    num_threads: usize,
) -> Vec<JoinHandle<()>> {
    (0..num_threads)
        .map(|_| {
            let path_rx = path_rx.clone();
            let entry_tx = entry_tx.clone();
            let ctx = ctx.clone();
            thread::spawn(move || metadata_worker_loop(path_rx, entry_tx, ctx))
        })
        .collect()
}

/// Stat one discovered path and express it relative to `root`.
///
/// Follows symlinks, so a dangling link fails with [`FingerprintError::Stat`].
pub fn path_to_entry(abs_path: &Path, root: &Path) -> Result<Entry, FingerprintError> {
    let stat_err = |source| FingerprintError::Stat {
        path: abs_path.to_path_buf(),
        source,
    };
    let meta = std::fs::metadata(abs_path).map_err(stat_err)?;
    let mtime_ns = system_time_to_ns(meta.modified().map_err(stat_err)?);
    let path =
        path_relative_to(abs_path, root).ok_or_else(|| FingerprintError::RelativePath {
            path: abs_path.to_path_buf(),
            root: root.to_path_buf(),
        })?;
    Ok(Entry {
        path,
        mtime_ns,
        is_dir: meta.is_dir(),
    })
}
