//! Directory fingerprinting: collect entries, put them in canonical order, digest.

use log::debug;
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

use crate::engine::digest::digest_entries;
use crate::engine::tools::path_bytes;
use crate::pipeline::collect_entries;
use crate::{Entry, FingerprintError, FingerprintOpts};

/// Sort by relative path bytes, ascending. Ties (only possible with duplicate paths) fall back
/// to mtime then dir flag so the order never depends on arrival order.
pub fn sort_canonical(entries: &mut [Entry]) {
    entries.par_sort_unstable_by(|a, b| {
        path_bytes(&a.path)
            .cmp(path_bytes(&b.path))
            .then(a.mtime_ns.cmp(&b.mtime_ns))
            .then(a.is_dir.cmp(&b.is_dir))
    });
}

/// Canonically order `entries` in place and return their digest.
pub fn fingerprint_entries(entries: &mut [Entry]) -> String {
    sort_canonical(entries);
    digest_entries(entries)
}

/// Walk `root`, collect every entry beneath it and return the lowercase hex digest.
pub fn fingerprint_dir_with_opts(
    root: &Path,
    opts: &FingerprintOpts,
) -> Result<String, FingerprintError> {
    let start = Instant::now();
    let mut entries = collect_entries(root, opts)?;
    let digest = fingerprint_entries(&mut entries);
    debug!(
        "{}: {} entries in {:?} -> {}",
        root.display(),
        entries.len(),
        start.elapsed(),
        digest
    );
    Ok(digest)
}
