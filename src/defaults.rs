//! Default values for repo-bones configuration.
//!
//! This module provides centralized default names and locations used across
//! commands, ensuring consistency and avoiding duplication.

use std::path::{Path, PathBuf};

/// Configuration file names, in lookup order within one directory.
pub const CONFIG_FILE_NAMES: &[&str] = &[".bones.yml", ".bones.yaml", ".bones.toml"];

/// Directory (next to the config file) holding template overrides.
pub const TEMPLATE_OVERRIDE_DIR: &str = ".templates";

/// File extension of template assets and overrides.
pub const TEMPLATE_EXTENSION: &str = "template";

/// Marker every shipped template writes near the top of its output.
pub const GENERATED_MARKER: &str = "Automatically generated by bones";

/// Lines containing this text are skipped when comparing generated files.
pub const IGNORE_MARKER: &str = "# bones: ignore";

/// Number of leading lines searched for [`GENERATED_MARKER`].
pub const MARKER_SEARCH_LINES: usize = 50;

/// Returns the default template override directory for a configuration file.
///
/// Overrides live in `.templates/` beside the config file. A config path
/// without a parent resolves against the current directory.
pub fn default_template_dir(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(TEMPLATE_OVERRIDE_DIR)
}
