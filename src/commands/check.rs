//! # Check Command Implementation
//!
//! `bones check` merges and validates the configuration and reports every
//! issue it finds in a single pass. With `--files` it also renders the plan
//! in memory and compares each output with the file already on disk. CI
//! scripts are not compared. When `license.add_to_files` is set, `--files`
//! also checks every Python file for the license notice.
//!
//! The command never writes files. It exits non-zero when any error-level
//! issue exists or, with `--files`, when any generated file is missing,
//! hand-written or out of date, or a Python file lacks the notice.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use repo_bones::output::{emoji, OutputConfig};
use repo_bones::phases::drift::{FileReport, FileStatus};
use repo_bones::phases::notice::NoticeReport;
use repo_bones::phases::orchestrator;
use repo_bones::resolver::{ConfigResolver, ValidationIssue};
use repo_bones::schema::Schema;

use super::{print_issues, print_summary, project_root, Context};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Validate the configuration and optionally compare generated files
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Also check that generated files on disk are up to date.
    #[arg(long)]
    pub files: bool,

    /// Project root holding the generated files (default: the config directory).
    #[arg(long, value_name = "DIR")]
    pub root_dir: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Also list files that are up to date and show the differing lines.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    config: &'a std::path::Path,
    errors: usize,
    warnings: usize,
    issues: &'a [ValidationIssue],
    #[serde(skip_serializing_if = "Option::is_none")]
    files: Option<&'a [FileReport]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notices: Option<&'a [NoticeReport]>,
}

/// Execute the `check` command.
pub fn execute(args: CheckArgs, ctx: &Context) -> Result<()> {
    let (config_path, raw) = ctx.load_raw()?;
    let schema = Schema::builtin();
    let resolver = ConfigResolver::new(&schema);

    let state = orchestrator::execute_check(&raw, &resolver)?;
    let errors = state.blocking_count();
    let warnings = state.issues().len() - errors;

    let (reports, notices) = if args.files && errors == 0 {
        let root = args
            .root_dir
            .clone()
            .unwrap_or_else(|| project_root(&config_path));
        let renderer = ctx.renderer(&config_path)?;
        (
            Some(orchestrator::execute_drift(&state, &renderer, &root)?),
            orchestrator::execute_notice(&state, &root)?,
        )
    } else {
        (None, None)
    };

    match args.format {
        ReportFormat::Json => {
            let report = JsonReport {
                config: &config_path,
                errors,
                warnings,
                issues: state.issues(),
                files: reports.as_deref(),
                notices: notices.as_deref(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        ReportFormat::Text => {
            println!(
                "{} Checking {}",
                emoji(&ctx.out, "🔍", "[SCAN]"),
                config_path.display()
            );
            print_issues(&ctx.out, state.issues());
            print_summary(&ctx.out, errors, warnings);
            if let Some(reports) = &reports {
                print_reports(&ctx.out, reports, args.verbose);
                if let Some(notices) = &notices {
                    print_notices(&ctx.out, notices, args.verbose);
                }
            } else if args.files {
                println!("Skipping file comparison until the errors are fixed");
            }
        }
    }

    if errors > 0 {
        bail!(
            "{} error(s) found in {}",
            errors,
            config_path.display()
        );
    }

    let outdated = reports
        .iter()
        .flatten()
        .filter(|report| !report.status.is_up_to_date())
        .count();
    let unmarked = notices
        .iter()
        .flatten()
        .filter(|notice| !notice.present)
        .count();

    let mut problems = Vec::new();
    if outdated > 0 {
        problems.push(format!(
            "{outdated} generated file(s) need updating; run 'bones generate'"
        ));
    }
    if unmarked > 0 {
        problems.push(format!("{unmarked} Python file(s) missing the license notice"));
    }
    if !problems.is_empty() {
        bail!("{}", problems.join("; "));
    }
    Ok(())
}

fn print_reports(out: &OutputConfig, reports: &[FileReport], verbose: bool) {
    for report in reports {
        if report.status.is_up_to_date() && !verbose {
            continue;
        }
        println!(
            "  {}: {}",
            report.path.display(),
            out.file_status(&report.status)
        );
        if let (true, FileStatus::Stale { line, expected, found }) = (verbose, &report.status) {
            println!("    line {line}");
            println!("    expected: {}", expected.as_deref().unwrap_or("<end of file>"));
            println!("    found:    {}", found.as_deref().unwrap_or("<end of file>"));
        }
    }

    let current = reports.iter().filter(|r| r.status.is_up_to_date()).count();
    println!(
        "{} {}/{} generated file(s) up to date",
        emoji(out, "📄", "[FILES]"),
        current,
        reports.len()
    );
}

fn print_notices(out: &OutputConfig, notices: &[NoticeReport], verbose: bool) {
    for notice in notices {
        if notice.present && !verbose {
            continue;
        }
        println!(
            "  {}: {}",
            notice.path.display(),
            out.notice_status(notice.present)
        );
    }

    let present = notices.iter().filter(|notice| notice.present).count();
    println!(
        "{} {}/{} Python file(s) carry the license notice",
        emoji(out, "📜", "[NOTICE]"),
        present,
        notices.len()
    );
}
