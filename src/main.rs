//! # bones CLI
//!
//! Binary entry point for the `bones` command-line tool. It parses arguments
//! with `clap` and hands off to the subcommand. All configuration and
//! rendering logic lives in the `repo_bones` library; this binary only
//! resolves paths, prints results, and maps failures to exit codes.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
