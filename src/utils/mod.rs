pub mod config;
pub mod dirhash_toml;
pub mod logger;

pub use config::*;
pub use dirhash_toml::{DirhashToml, load_dirhash_toml};
pub use logger::setup_logging;
