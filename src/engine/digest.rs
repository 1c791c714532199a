//! Fingerprint accumulation: fold canonically ordered entries into one BLAKE3 digest.

use blake3::Hasher;

use crate::Entry;
use crate::engine::tools::path_bytes;

/// Digest of the empty input; what an empty directory fingerprints to.
pub const EMPTY_DIGEST: &str = "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262";

/// Feed one entry to the hasher.
///
/// Encoding = path_len (u64 BE) || path bytes || mtime_ns (i64 BE) || is_dir (one byte).
/// The length prefix keeps the boundary between path and mtime unambiguous whatever the path contains.
pub fn update_with_entry(hasher: &mut Hasher, entry: &Entry) {
    let path = path_bytes(&entry.path);
    hasher.update(&(path.len() as u64).to_be_bytes());
    hasher.update(path);
    hasher.update(&entry.mtime_ns.to_be_bytes());
    hasher.update(&[u8::from(entry.is_dir)]);
}

/// Hash `entries` in the order given and return lowercase hex. Callers sort first.
pub fn digest_entries(entries: &[Entry]) -> String {
    let mut hasher = Hasher::new();
    for entry in entries {
        update_with_entry(&mut hasher, entry);
    }
    hasher.finalize().to_hex().to_string()
}
