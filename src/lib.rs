//! dirhash: deterministic directory fingerprints from relative paths, mtimes and dir flags.

pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use error::FingerprintError;
pub use fingerprint::{fingerprint_entries, sort_canonical};
pub use pipeline::collect_entries;
pub use types::*;

pub use engine::digest::EMPTY_DIGEST;

use log::debug;
use std::path::Path;

/// Single entry point: fingerprint the tree under `root` (the root itself is not included).
///
/// Returns a 64-char lowercase hex BLAKE3 digest over every entry's relative path, mtime (ns) and
/// dir flag, in canonical order. The result does not depend on walk order, walker, or worker count.
/// Any walk or metadata failure fails the whole run; only the first error is reported.
///
/// ```ignore
/// let digest = dirhash::fingerprint_dir(Path::new("node_modules/foo"), &FingerprintOpts::default())?;
/// ```
pub fn fingerprint_dir(root: &Path, opts: &FingerprintOpts) -> Result<String, FingerprintError> {
    let opts = opts.resolved();
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    );
    fingerprint::fingerprint_dir_with_opts(root, &opts)
}
