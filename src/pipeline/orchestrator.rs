use log::debug;
use std::path::Path;
use std::thread::JoinHandle;

use crate::engine::tools::check_root_and_canonicalize;
use crate::pipeline;
use crate::{Entry, FingerprintError, FingerprintOpts};

/// Start the walk + metadata pipeline. Returns receiver and handles; caller receives from
/// `entry_rx` and must join `walk_handle` and `worker_handles` when done.
/// `opts` must already be resolved.
pub fn run_pipeline(
    root: &Path,
    opts: &FingerprintOpts,
) -> Result<pipeline::PipelineHandles, FingerprintError> {
    let root = check_root_and_canonicalize(root)?;

    let channels = pipeline::create_pipeline_channels(&root, opts);

    if opts.parallel_walk {
        debug!("Walking in parallel");
    } else {
        debug!("Walking serially");
    }
    let walk_handle =
        pipeline::spawn_walk_thread(channels.path_tx, channels.ctx.clone(), opts.parallel_walk);

    let worker_handles = pipeline::spawn_metadata_workers(
        channels.path_rx,
        &channels.entry_tx,
        &channels.ctx,
        opts.workers,
    );

    // Dropping the last sender closes the channel once workers exit.
    drop(channels.entry_tx);

    Ok(pipeline::PipelineHandles {
        entry_rx: channels.entry_rx,
        walk_handle,
        worker_handles,
        ctx: channels.ctx,
    })
}

/// Join walk and worker threads (after the entry stream is drained). Returns the walk's path count.
pub fn shutdown_pipeline_handles(
    walk_handle: JoinHandle<usize>,
    worker_handles: Vec<JoinHandle<()>>,
) -> Result<usize, FingerprintError> {
    let walked = walk_handle.join();
    let mut worker_panicked = false;
    for h in worker_handles {
        worker_panicked |= h.join().is_err();
    }
    let path_count = walked.map_err(|_| FingerprintError::ThreadPanicked("walk"))?;
    if worker_panicked {
        return Err(FingerprintError::ThreadPanicked("metadata worker"));
    }
    Ok(path_count)
}

/// Collect all entries under `root` via the streaming pipeline, in arrival order.
/// Walk → path channel → workers (metadata) → entry channel → Vec.
pub fn collect_entries(root: &Path, opts: &FingerprintOpts) -> Result<Vec<Entry>, FingerprintError> {
    let opts = opts.resolved();
    let pipeline::PipelineHandles {
        entry_rx,
        walk_handle,
        worker_handles,
        ctx,
    } = run_pipeline(root, &opts)?;

    let mut entries = Vec::new();
    while let Ok(entry) = entry_rx.recv() {
        entries.push(entry);
    }
    debug!(
        "main: channel closed, total {} entries (metadata phase done)",
        entries.len()
    );

    let path_count = shutdown_pipeline_handles(walk_handle, worker_handles)?;
    debug!("walk sent {} paths", path_count);

    pipeline::check_for_first_error(&ctx.first_error, ctx.cancel.as_ref())?;

    Ok(entries)
}
