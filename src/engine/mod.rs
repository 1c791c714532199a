//! Engine module: digest accumulation, path helpers and the CLI driver

pub mod arg_parser;
pub mod cli;
pub mod digest;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use cli::{handle_run, list_candidates};
pub use digest::{EMPTY_DIGEST, digest_entries, update_with_entry};
pub use tools::{check_root_and_canonicalize, path_bytes, path_relative_to, system_time_to_ns};
