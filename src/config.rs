//! # Raw Configuration Loading
//!
//! This module turns the text of a repository's `.bones.yml` into the raw,
//! possibly sparse tree that [`ConfigResolver::merge`] consumes. It does not
//! apply defaults or validation.
//!
//! Two text formats decode into the same `serde_yaml::Value` tree:
//!
//! - **YAML** (`.bones.yml`, `.bones.yaml`), the primary format.
//! - **TOML** (`.bones.toml`), chosen by file extension.
//!
//! [`find_config`] performs the upward directory search the CLI uses to
//! locate the file when no explicit path is given.
//!
//! [`ConfigResolver::merge`]: crate::resolver::ConfigResolver::merge

use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::defaults::CONFIG_FILE_NAMES;
use crate::error::{Error, Result};
use crate::path::{type_name, with_article};

/// Text format of a configuration source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension; anything but `.toml` is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// Parse configuration text into a raw mapping tree.
///
/// An empty document is treated as an empty mapping. Any other non-mapping
/// top level is rejected.
///
/// # Examples
///
/// ```
/// use repo_bones::config::{parse, ConfigFormat};
///
/// let raw = parse("style:\n  max_line_length: 100\n", ConfigFormat::Yaml).unwrap();
/// assert!(raw.is_mapping());
/// ```
pub fn parse(text: &str, format: ConfigFormat) -> Result<Value> {
    let value: Value = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(text)?,
        ConfigFormat::Toml => toml::from_str(text)?,
    };

    match value {
        Value::Null => Ok(Value::Mapping(Mapping::new())),
        Value::Mapping(_) => Ok(value),
        other => Err(Error::ConfigParse {
            message: format!(
                "expected a mapping at the top level, found {}",
                with_article(type_name(&other))
            ),
            hint: Some("The configuration must be a set of 'key: value' entries".to_string()),
        }),
    }
}

/// Read and parse a configuration file, choosing the format by extension.
pub fn from_file(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).map_err(|e| Error::ConfigParse {
        message: format!("Failed to read '{}': {}", path.display(), e),
        hint: None,
    })?;
    parse(&text, ConfigFormat::from_path(path))
}

/// Search `start` and its ancestors for a configuration file.
///
/// Within one directory the names in [`CONFIG_FILE_NAMES`] are tried in order.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}
