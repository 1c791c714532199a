//! Common walk loop: consumes an iterator of Ok(path) / Err and sends to path_tx, stopping on the first error.

use crossbeam_channel::Sender;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use super::context::PipelineContext;
use crate::FingerprintError;
use crate::utils::config::PARALLEL_WALK_BUSY_TIMEOUT_SECS;

/// One result from a directory walk: either a path to consider or an error with optional path.
pub enum WalkOutcome {
    Ok(PathBuf),
    Err { msg: String, path: Option<PathBuf> },
}

/// Convert a jwalk result into [`WalkOutcome`].
/// jwalk reports an unreadable directory on the directory's own entry, not as an `Err` item.
pub fn to_outcome_jwalk(r: Result<jwalk::DirEntry<((), ())>, jwalk::Error>) -> WalkOutcome {
    match r {
        Ok(entry) => match &entry.read_children_error {
            Some(err) => WalkOutcome::Err {
                msg: format!("{}", err),
                path: Some(entry.path()),
            },
            None => WalkOutcome::Ok(entry.path()),
        },
        Err(err) => WalkOutcome::Err {
            msg: format!("{}", err),
            path: err.path().map(PathBuf::from),
        },
    }
}

/// Convert a walkdir result into [`WalkOutcome`].
pub fn to_outcome_walkdir(r: Result<walkdir::DirEntry, walkdir::Error>) -> WalkOutcome {
    match r {
        Ok(entry) => WalkOutcome::Ok(entry.into_path()),
        Err(err) => WalkOutcome::Err {
            msg: format!("{}", err),
            path: err.path().map(PathBuf::from),
        },
    }
}

// jwalk hides dotfiles by default; walkdir does not. Both walkers must see the same set.
// No min_depth here: the root entry carries the root's read error, and the walk loop skips the root path.
fn jwalk_iter(ctx: &PipelineContext) -> Box<dyn Iterator<Item = WalkOutcome>> {
    use jwalk::Parallelism;
    use std::time::Duration;
    Box::new(
        jwalk::WalkDir::new(&ctx.root)
            .skip_hidden(false)
            .follow_links(false)
            .parallelism(Parallelism::RayonDefaultPool {
                busy_timeout: Duration::from_secs(PARALLEL_WALK_BUSY_TIMEOUT_SECS),
            })
            .into_iter()
            .map(to_outcome_jwalk),
    )
}

fn walkdir_iter(ctx: &PipelineContext) -> Box<dyn Iterator<Item = WalkOutcome>> {
    use walkdir::WalkDir;
    Box::new(
        WalkDir::new(&ctx.root)
            .min_depth(1)
            .follow_links(false)
            .into_iter()
            .map(to_outcome_walkdir),
    )
}

pub fn spawn_walk_thread(
    path_tx: Sender<PathBuf>,
    ctx: PipelineContext,
    parallel_walk: bool,
) -> JoinHandle<usize> {
    thread::spawn(move || {
        let iter: Box<dyn Iterator<Item = WalkOutcome>> = match parallel_walk {
            true => jwalk_iter(&ctx),
            false => walkdir_iter(&ctx),
        };
        run_walk_loop(path_tx, &ctx, iter)
    })
}

/// Run the common walk loop: consume `iter` of [`WalkOutcome`] and send every path except the root to `path_tx`.
///
/// Stops at the first walk error (recorded as [`FingerprintError::Walk`]), when the cancel flag is raised
/// (recorded as [`FingerprintError::Cancelled`]), or when a worker has already recorded an error, since
/// the run cannot succeed after that. Drops `path_tx` when done so workers see the channel close.
/// Returns the count of paths sent.
pub fn run_walk_loop<I>(path_tx: Sender<PathBuf>, ctx: &PipelineContext, iter: I) -> usize
where
    I: Iterator<Item = WalkOutcome>,
{
    let mut count = 0_usize;
    for outcome in iter {
        if ctx.is_cancelled() {
            ctx.first_error.record(FingerprintError::Cancelled);
            break;
        }
        if ctx.first_error.is_set() {
            break;
        }
        match outcome {
            WalkOutcome::Ok(path) => {
                if path == ctx.root {
                    continue;
                }
                if path_tx.send(path).is_err() {
                    break;
                }
                count += 1;
            }
            WalkOutcome::Err { msg, path } => {
                ctx.first_error.record(FingerprintError::walk(path, msg));
                break;
            }
        }
    }
    drop(path_tx);
    count
}
