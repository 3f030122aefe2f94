//! # Error Handling
//!
//! This module defines the centralized error type for `repo-bones`. It uses
//! the `thiserror` library to create a single `Error` enum that covers every
//! hard failure of the configuration and rendering pipeline.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Each variant carries the context needed to
//!   act on it (offending key path, template name, optional hint).
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Validation problems are *not* errors. They are collected as
//! [`ValidationIssue`](crate::resolver::ValidationIssue) records so a single
//! run can report all of them. Only failures that stop the pipeline live here:
//!
//! - Loading failures (unreadable file, invalid YAML/TOML).
//! - Schema mismatches during merge (unknown key, wrong container shape).
//! - Malformed documents that cannot be traversed during validation.
//! - Missing templates and undefined template variables.
//! - Rendering attempted while error-level issues exist.
//! - Filesystem failures while writing rendered output.

use thiserror::Error;

fn hint_suffix(hint: &Option<String>) -> String {
    hint.as_ref()
        .map(|h| format!("\n  hint: {}", h))
        .unwrap_or_default()
}

/// Main error type for repo-bones operations
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration text could not be decoded into nested mappings.
    #[error("Configuration parsing error: {message}{}", hint_suffix(hint))]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// The raw configuration disagrees with the schema: an unknown key, or a
    /// value whose container shape does not match the declared shape.
    #[error("Schema mismatch at '{path}': {message}{}", hint_suffix(hint))]
    SchemaMismatch {
        path: String,
        message: String,
        /// Optional suggestion, usually a "did you mean" for a misspelt key
        hint: Option<String>,
    },

    /// A document handed to validation cannot be walked by the schema.
    #[error("Malformed configuration document at '{path}': {message}")]
    MalformedDocument { path: String, message: String },

    /// No template is registered under the requested identifier.
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    /// A template referenced a variable the namespace does not provide.
    #[error("Undefined variable in template '{template}': {message}")]
    UndefinedVariable { template: String, message: String },

    /// Any other failure raised by the template evaluator.
    #[error("Template processing error in '{template}': {message}")]
    Template { template: String, message: String },

    /// Rendering was requested while error-level validation issues exist.
    #[error("Rendering blocked by {count} error-level validation issue(s)")]
    BlockingIssues { count: usize },

    /// An error occurred while writing or reading generated files.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A TOML parsing error, wrapped from `toml::de::Error`.
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
