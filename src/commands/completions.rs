//! # Completions Command Implementation
//!
//! `bones completions <shell>` prints a completion script generated by
//! `clap_complete`.
//!
//! ```bash
//! bones completions bash > ~/.local/share/bash-completion/completions/bones
//! bones completions zsh > ~/.zfunc/_bones
//! ```

use std::io;

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for `args.shell` to stdout.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "bones", &mut io::stdout());
    Ok(())
}
