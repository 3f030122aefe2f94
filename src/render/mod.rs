//! # Template Rendering
//!
//! This module expands named templates against a merged configuration
//! document. It never touches the filesystem: rendered text comes back as
//! [`RenderResult`] values for a writer to persist.
//!
//! ## Key Components
//!
//! - **`TemplateRegistry`**: template sources by identifier, built once
//!   from the shipped assets and an optional override directory.
//! - **`TemplateSpec`**: which template renders to which output path, and
//!   which configuration subtree is lifted into its namespace.
//! - **`Namespace`**: the read-only view of the document that templates see.
//! - **`TemplateRenderer`**: the `minijinja` environment plus the
//!   fail-fast and best-effort rendering passes.
//!
//! Rendering is deterministic. The namespace holds only the document and the
//! generator version, so equal inputs give byte-identical output.

mod namespace;
mod notice;
mod registry;
mod spec;

pub use namespace::{Namespace, BONES_ENTRY};
pub use notice::{comment_block, license_notice};
pub use registry::{TemplateRegistry, BUILTIN_PREFIX};
pub use spec::{default_specs, RenderResult, TemplateSpec, CI_SCRIPT_DIR};

use log::{debug, info, warn};
use minijinja::{Environment, ErrorKind, UndefinedBehavior};

use crate::document::ConfigDocument;
use crate::error::{Error, Result};

/// How [`TemplateRenderer::render_all`] treats per-template failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Stop at the first failing template.
    #[default]
    FailFast,
    /// Render everything possible and collect the failures.
    BestEffort,
}

/// A template that failed during a best-effort pass.
#[derive(Debug)]
pub struct RenderFailure {
    pub spec: TemplateSpec,
    pub error: Error,
}

/// Everything a rendering pass produced.
#[derive(Debug, Default)]
pub struct RenderOutcome {
    /// Successful renders in input order.
    pub results: Vec<RenderResult>,
    /// Always empty in fail-fast mode.
    pub failures: Vec<RenderFailure>,
}

impl RenderOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Strip trailing characters, whitespace when `chars` is omitted.
fn rstrip(value: String, chars: Option<String>) -> String {
    match chars {
        Some(chars) => value.trim_end_matches(|c| chars.contains(c)).to_string(),
        None => value.trim_end().to_string(),
    }
}

/// Renders templates from a registry against configuration documents.
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    /// Compile every template in `registry`.
    ///
    /// Syntax errors surface here rather than at render time.
    pub fn new(registry: &TemplateRegistry) -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_filter("rstrip", rstrip);
        env.add_filter("notice", |text: String| comment_block(&text));

        for (id, source) in registry.iter() {
            env.add_template_owned(id.to_string(), source.to_string())
                .map_err(|e| template_error(id, e))?;
        }
        debug!("Compiled {} templates", registry.len());

        Ok(Self { env })
    }

    pub fn has_template(&self, id: &str) -> bool {
        self.env.get_template(id).is_ok()
    }

    /// Render one spec against `doc`.
    pub fn render(&self, spec: &TemplateSpec, doc: &ConfigDocument) -> Result<RenderResult> {
        let template = self
            .env
            .get_template(&spec.template)
            .map_err(|e| match e.kind() {
                ErrorKind::TemplateNotFound => Error::TemplateNotFound {
                    name: spec.template.clone(),
                },
                _ => template_error(&spec.template, e),
            })?;

        let namespace = Namespace::for_spec(spec, doc)?;
        let content = template
            .render(namespace.into_value())
            .map_err(|e| template_error(&spec.template, e))?;

        debug!(
            "Rendered '{}' to {} ({} bytes)",
            spec.template,
            spec.output.display(),
            content.len()
        );
        Ok(RenderResult {
            template: spec.template.clone(),
            output: spec.output.clone(),
            content,
            executable: spec.executable,
        })
    }

    /// Render every spec in order.
    ///
    /// In [`RenderMode::FailFast`] the first failure is returned as an error.
    /// In [`RenderMode::BestEffort`] failures are logged and collected
    /// alongside the successful results.
    pub fn render_all(
        &self,
        specs: &[TemplateSpec],
        doc: &ConfigDocument,
        mode: RenderMode,
    ) -> Result<RenderOutcome> {
        let mut outcome = RenderOutcome::default();

        for spec in specs {
            match self.render(spec, doc) {
                Ok(result) => outcome.results.push(result),
                Err(error) if mode == RenderMode::BestEffort => {
                    warn!("Skipping {}: {}", spec.output.display(), error);
                    outcome.failures.push(RenderFailure {
                        spec: spec.clone(),
                        error,
                    });
                }
                Err(error) => return Err(error),
            }
        }

        info!(
            "Rendered {} of {} templates",
            outcome.results.len(),
            specs.len()
        );
        Ok(outcome)
    }
}

fn template_error(id: &str, err: minijinja::Error) -> Error {
    let mut message = err.to_string();
    if let Some(line) = err.line() {
        if !message.contains("line") {
            message = format!("{message} (line {line})");
        }
    }
    match err.kind() {
        ErrorKind::UndefinedError => Error::UndefinedVariable {
            template: id.to_string(),
            message,
        },
        _ => Error::Template {
            template: id.to_string(),
            message,
        },
    }
}
