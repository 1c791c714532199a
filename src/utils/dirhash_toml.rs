//! Load `.dirhash.toml` from a directory (CLI only). The library never reads it; callers pass
//! [`FingerprintOpts`](crate::FingerprintOpts) directly.

use serde::Deserialize;
use std::path::Path;

use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct DirhashToml {
    #[serde(default)]
    pub settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
pub struct SettingsSection {
    pub batch_size: Option<usize>,
    pub workers: Option<usize>,
    pub parallel_walk: Option<bool>,
    pub subpath: Option<String>,
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

/// Load `.dirhash.toml` from `dir`. `Ok(None)` when the file is missing or unreadable;
/// `Err` with a printable message when it exists but does not parse. The caller logs it once logging is up.
pub fn load_dirhash_toml(dir: &Path) -> Result<Option<DirhashToml>, String> {
    let path = dir.join(PackagePaths::get().config_filename());
    let Ok(s) = std::fs::read_to_string(&path) else {
        return Ok(None);
    };
    parse_dirhash_toml(&s)
        .map(Some)
        .map_err(|e| format!("{}: {}", path.display(), e))
}

pub fn parse_dirhash_toml(s: &str) -> Result<DirhashToml, toml::de::Error> {
    toml::from_str(s)
}
