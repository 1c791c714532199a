use clap::Parser;
use std::path::PathBuf;

struct DefaultArgs;

impl DefaultArgs {
    pub const DIR: &'static str = ".";
}

/// Deterministic directory fingerprints from paths and mtimes.
#[derive(Clone, Debug, Parser)]
#[command(name = "dirhash")]
#[command(about = "Fingerprint each subdirectory of DIR; use --single to fingerprint DIR itself.")]
pub struct Cli {
    /// Parent directory whose subdirectories are fingerprinted. Default: current directory.
    #[arg(value_name = "DIR", default_value = DefaultArgs::DIR)]
    pub dir: PathBuf,

    /// Fingerprint `<child>/<SUBPATH>` instead of each child (e.g. `package`).
    #[arg(long, short = 's')]
    pub subpath: Option<String>,

    /// Fingerprint DIR itself and print only the digest.
    #[arg(long)]
    pub single: bool,

    /// Path/entry channel capacity. 0 or unset: default.
    #[arg(long, short = 'b', value_parser = clap::value_parser!(usize))]
    pub batch_size: Option<usize>,

    /// Metadata worker threads. 0 or unset: default.
    #[arg(long, short = 'w', value_parser = clap::value_parser!(usize))]
    pub workers: Option<usize>,

    /// Walk in parallel (jwalk on the rayon pool).
    #[arg(long, short = 'p', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub parallel_walk: Option<bool>,

    /// Print one JSON object per line instead of `path: digest`.
    #[arg(long, short = 'j', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub json: Option<bool>,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}
