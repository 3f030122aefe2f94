//! # Generate Command Implementation
//!
//! `bones generate` renders every file in the plan and writes it under the
//! output directory, which defaults to the directory holding the
//! configuration file. Rendering is refused while the configuration has
//! error-level issues.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

use repo_bones::output::emoji;
use repo_bones::phases::orchestrator::{self, GenerateOptions};
use repo_bones::render::{RenderMode, RenderOutcome};
use repo_bones::resolver::ConfigResolver;
use repo_bones::schema::Schema;

use super::{project_root, Context};

/// Render the configured files and write them to disk
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Directory to write into (default: the config directory).
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// List the files that would be written without writing them.
    #[arg(long)]
    pub dry_run: bool,

    /// Keep rendering after a template fails and report all failures.
    #[arg(long)]
    pub best_effort: bool,

    /// Only render these templates (repeat or separate with commas).
    #[arg(long, value_name = "ID", value_delimiter = ',')]
    pub only: Vec<String>,
}

/// Execute the `generate` command.
pub fn execute(args: GenerateArgs, ctx: &Context) -> Result<()> {
    let (config_path, raw) = ctx.load_raw()?;
    let schema = Schema::builtin();
    let resolver = ConfigResolver::new(&schema);
    let renderer = ctx.renderer(&config_path)?;

    let output_dir = args
        .output_dir
        .unwrap_or_else(|| project_root(&config_path));
    let options = GenerateOptions {
        mode: if args.best_effort {
            RenderMode::BestEffort
        } else {
            RenderMode::FailFast
        },
        only: args.only,
    };

    let outcome = if args.dry_run {
        let rendered = orchestrator::execute_render(&raw, &resolver, &renderer, &options)?;
        for result in rendered.results() {
            println!(
                "{} {}",
                emoji(&ctx.out, "📝", "[DRY-RUN]"),
                output_dir.join(&result.output).display()
            );
        }
        rendered.into_outcome()
    } else {
        let (rendered, written) =
            orchestrator::execute_generate(&raw, &resolver, &renderer, &options, &output_dir)?;
        for path in &written {
            println!("{} {}", emoji(&ctx.out, "✅", "[WROTE]"), path.display());
        }
        rendered.into_outcome()
    };

    report_failures(ctx, &outcome)
}

fn report_failures(ctx: &Context, outcome: &RenderOutcome) -> Result<()> {
    if outcome.is_complete() {
        return Ok(());
    }
    for failure in &outcome.failures {
        eprintln!(
            "{} {} ({}): {}",
            emoji(&ctx.out, "❌", "[ERR]"),
            failure.spec.template,
            failure.spec.output.display(),
            failure.error
        );
    }
    bail!("{} template(s) failed to render", outcome.failures.len())
}
