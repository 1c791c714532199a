//! Path and time utilities

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::FingerprintError;

/// Convert absolute path to relative path from base
pub fn path_relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    path.strip_prefix(base).ok().map(|p| p.to_path_buf())
}

/// Nanoseconds since the Unix epoch. Negative for times before 1970; saturates at the i64 range.
pub fn system_time_to_ns(t: SystemTime) -> i64 {
    match t.duration_since(UNIX_EPOCH) {
        Ok(d) => i64::try_from(d.as_nanos()).unwrap_or(i64::MAX),
        Err(e) => i64::try_from(e.duration().as_nanos())
            .map(|n| -n)
            .unwrap_or(i64::MIN),
    }
}

/// Byte view of a path used for canonical ordering and for the digest encoding.
pub fn path_bytes(path: &Path) -> &[u8] {
    path.as_os_str().as_encoded_bytes()
}

/// Canonicalize the scan root and require it to be a directory.
pub fn check_root_and_canonicalize(root: &Path) -> Result<PathBuf, FingerprintError> {
    let canonical = root
        .canonicalize()
        .map_err(|e| FingerprintError::walk(Some(root.to_path_buf()), e.to_string()))?;
    let meta = std::fs::metadata(&canonical)
        .map_err(|e| FingerprintError::walk(Some(canonical.clone()), e.to_string()))?;
    if !meta.is_dir() {
        return Err(FingerprintError::walk(Some(canonical), "not a directory"));
    }
    Ok(canonical)
}
