//! dirhash CLI: fingerprint each subdirectory of a parent directory.

use anyhow::Result;
use clap::Parser;
use dirhash::engine::arg_parser::Cli;
use dirhash::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
