//! # Output Appearance
//!
//! Colour and symbol selection for the `bones` CLI.
//!
//! The `--color=never|always|auto` flag wins. In `auto` mode colour is
//! turned off by `NO_COLOR` (any value), `CLICOLOR=0`, `TERM=dumb`, or a
//! stdout that is not a terminal, and forced on by `CLICOLOR_FORCE`.

use std::env;
use std::fmt::Display;

use clap::ValueEnum;
use console::{style, StyledObject};

use crate::phases::drift::FileStatus;
use crate::resolver::Severity;

/// Value of the global `--color` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorWhen {
    Always,
    Never,
    #[default]
    Auto,
}

/// Whether the CLI decorates its output.
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    pub fn new(when: ColorWhen) -> Self {
        let use_color = match when {
            ColorWhen::Always => true,
            ColorWhen::Never => false,
            ColorWhen::Auto => Self::detect_color_support(),
        };
        Self { use_color }
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }
        console::Term::stdout().features().colors_supported()
    }

    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }

    /// Wrap `value` in a style; styling is a no-op without colour.
    fn styled<D: Display>(&self, value: D) -> StyledObject<D> {
        let styled = style(value);
        if self.use_color {
            styled.force_styling(true)
        } else {
            styled.force_styling(false)
        }
    }

    /// Label for an issue severity, e.g. `error` in red.
    pub fn severity(&self, severity: Severity) -> String {
        let label = self.styled(severity.to_string());
        match severity {
            Severity::Error => label.red().bold().to_string(),
            Severity::Warning => label.yellow().to_string(),
        }
    }

    /// Short label for a drift status.
    pub fn file_status(&self, status: &FileStatus) -> String {
        let (label, ok) = match status {
            FileStatus::UpToDate => ("up to date", true),
            FileStatus::Missing => ("missing", false),
            FileStatus::NotGenerated => ("not generated by bones", false),
            FileStatus::Stale { .. } => ("out of date", false),
        };
        let styled = self.styled(label);
        if ok {
            styled.green().to_string()
        } else {
            styled.red().to_string()
        }
    }

    /// Label for a license notice check.
    pub fn notice_status(&self, present: bool) -> String {
        if present {
            self.styled("notice present").green().to_string()
        } else {
            self.styled("missing license notice").red().to_string()
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new(ColorWhen::Auto)
    }
}

/// The emoji when colour is on, otherwise the plain marker.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}
