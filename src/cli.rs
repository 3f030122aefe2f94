//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use crate::commands::Context;
use repo_bones::output::{ColorWhen, OutputConfig};

/// bones - generate and check shared project infrastructure files
#[derive(Parser, Debug)]
#[command(name = "bones")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the configuration file (default: search upward for .bones.yml)
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        env = "BONES_CONFIG"
    )]
    config: Option<PathBuf>,

    /// Directory of template overrides (default: .templates next to the config)
    #[arg(long, global = true, value_name = "DIR")]
    templates: Option<PathBuf>,

    /// Colorize output
    #[arg(long, global = true, value_name = "WHEN", value_enum, default_value_t = ColorWhen::Auto)]
    color: ColorWhen,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the configuration and optionally compare generated files
    Check(commands::check::CheckArgs),

    /// Render the configured files and write them to disk
    Generate(commands::generate::GenerateArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        let ctx = Context {
            config: self.config,
            templates: self.templates,
            out: OutputConfig::new(self.color),
        };

        match self.command {
            Commands::Check(args) => commands::check::execute(args, &ctx),
            Commands::Generate(args) => commands::generate::execute(args, &ctx),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// `RUST_LOG`, when set, takes precedence over `--log-level`.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when running under a test harness.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
