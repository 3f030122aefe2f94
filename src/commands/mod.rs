//! # CLI Command Implementations
//!
//! Each subcommand lives in its own file with an `Args` struct derived with
//! `clap` and an `execute` function. The shared [`Context`] carries the
//! global flags and knows how to locate the configuration file and build the
//! template registry.

pub mod check;
pub mod completions;
pub mod generate;

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use log::debug;
use serde_yaml::Value;

use repo_bones::config;
use repo_bones::defaults::default_template_dir;
use repo_bones::output::{emoji, OutputConfig};
use repo_bones::render::{TemplateRegistry, TemplateRenderer};
use repo_bones::resolver::ValidationIssue;
use repo_bones::suggestions;

/// Global options shared by every subcommand.
#[derive(Debug)]
pub struct Context {
    pub config: Option<PathBuf>,
    pub templates: Option<PathBuf>,
    pub out: OutputConfig,
}

impl Context {
    /// The configuration file to use: the explicit path, or the nearest
    /// `.bones.yml` above the working directory.
    pub fn config_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.config {
            if !path.is_file() {
                return Err(suggestions::config_not_found(path));
            }
            return Ok(path.clone());
        }

        let cwd = env::current_dir().context("Failed to read the current directory")?;
        config::find_config(&cwd).ok_or_else(|| suggestions::config_not_discovered(&cwd))
    }

    /// Locate and parse the configuration file.
    pub fn load_raw(&self) -> Result<(PathBuf, Value)> {
        let path = self.config_path()?;
        debug!("Loading configuration from {}", path.display());
        let raw = config::from_file(&path)?;
        Ok((path, raw))
    }

    /// Built-in templates plus any overrides for this configuration.
    pub fn renderer(&self, config_path: &Path) -> Result<TemplateRenderer> {
        let dir = self
            .templates
            .clone()
            .unwrap_or_else(|| default_template_dir(config_path));

        let mut registry = TemplateRegistry::builtin();
        registry.load_overrides(&dir)?;
        Ok(TemplateRenderer::new(&registry)?)
    }
}

/// The directory holding `config_path`, used as the default project root.
pub fn project_root(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Print issues one per line, errors and warnings alike.
pub fn print_issues(out: &OutputConfig, issues: &[ValidationIssue]) {
    for issue in issues {
        println!(
            "{} {}: {} [{}]",
            out.severity(issue.severity),
            issue.path,
            issue.message,
            issue.kind
        );
    }
}

/// One-line summary after the issue list.
pub fn print_summary(out: &OutputConfig, errors: usize, warnings: usize) {
    if errors == 0 && warnings == 0 {
        println!("{} Configuration is valid", emoji(out, "✅", "[OK]"));
    } else if errors == 0 {
        println!(
            "{} Configuration is valid with {} warning(s)",
            emoji(out, "⚠️", "[WARN]"),
            warnings
        );
    } else {
        println!(
            "{} Found {} error(s) and {} warning(s)",
            emoji(out, "❌", "[ERR]"),
            errors,
            warnings
        );
    }
}
