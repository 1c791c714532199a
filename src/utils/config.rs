//! Application configuration constants.
//! Defaults and package-derived names in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    /// Name of the optional settings file looked up in the CLI's parent directory.
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- Pipeline defaults ----

/// Fallbacks applied by [`FingerprintOpts::resolved`](crate::FingerprintOpts::resolved) when a field is zero.
pub struct FingerprintDefaults;

impl FingerprintDefaults {
    /// Capacity of the path and entry channels.
    pub const BATCH_SIZE: usize = 100;
    /// Metadata worker threads. Workers only stat, so this can exceed the core count.
    pub const WORKERS: usize = 40;
}

// ---- Walk ----

/// How long jwalk's rayon workers spin waiting for the consumer before giving up.
pub const PARALLEL_WALK_BUSY_TIMEOUT_SECS: u64 = 60;
