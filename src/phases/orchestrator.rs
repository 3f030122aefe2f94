//! Orchestrator for the check and generate operations
//!
//! This module chains the pipeline states into the two operations the CLI
//! exposes, so callers do not have to drive each transition themselves.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::info;
use serde_yaml::Value;

use super::{drift, notice, write, Merged, Rendered, Validated};
use crate::error::{Error, Result};
use crate::render::{default_specs, license_notice, RenderMode, TemplateRenderer, TemplateSpec};
use crate::resolver::ConfigResolver;

/// Options for [`execute_generate`].
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub mode: RenderMode,
    /// Restrict the plan to these template identifiers. Empty means all.
    pub only: Vec<String>,
}

/// Merge and validate a raw configuration.
pub fn execute_check(raw: &Value, resolver: &ConfigResolver<'_>) -> Result<Validated> {
    Merged::from_raw(raw, resolver)?.validate(resolver)
}

/// The default plan for `state`, narrowed to `only` when it is non-empty.
///
/// Every identifier in `only` must match some spec in the plan.
pub fn plan(state: &Validated, only: &[String]) -> Result<Vec<TemplateSpec>> {
    let specs = default_specs(state.document());
    if only.is_empty() {
        return Ok(specs);
    }

    let known: HashSet<&str> = specs.iter().map(|spec| spec.template.as_str()).collect();
    if let Some(unknown) = only.iter().find(|id| !known.contains(id.as_str())) {
        return Err(Error::TemplateNotFound {
            name: unknown.clone(),
        });
    }
    Ok(specs
        .into_iter()
        .filter(|spec| only.contains(&spec.template))
        .collect())
}

/// Merge, validate and render, without writing anything.
pub fn execute_render(
    raw: &Value,
    resolver: &ConfigResolver<'_>,
    renderer: &TemplateRenderer,
    options: &GenerateOptions,
) -> Result<Rendered> {
    let state = execute_check(raw, resolver)?;
    let specs = plan(&state, &options.only)?;
    state.render(renderer, &specs, options.mode)
}

/// Render everything and write it under `output_dir`.
///
/// Returns the rendered state and the paths written.
pub fn execute_generate(
    raw: &Value,
    resolver: &ConfigResolver<'_>,
    renderer: &TemplateRenderer,
    options: &GenerateOptions,
    output_dir: &Path,
) -> Result<(Rendered, Vec<PathBuf>)> {
    let rendered = execute_render(raw, resolver, renderer, options)?;
    let written = write::execute(rendered.results(), output_dir)?;
    info!("Wrote {} file(s) to {}", written.len(), output_dir.display());
    Ok((rendered, written))
}

/// Compare the rendered plan with the files under `root`.
///
/// CI scripts are left out: they are regenerated by the CI run itself, so
/// local copies are leftovers rather than tracked files.
pub fn execute_drift(
    state: &Validated,
    renderer: &TemplateRenderer,
    root: &Path,
) -> Result<Vec<drift::FileReport>> {
    let specs: Vec<TemplateSpec> = plan(state, &[])?
        .into_iter()
        .filter(|spec| !spec.executable)
        .collect();
    let rendered = state.render(renderer, &specs, RenderMode::FailFast)?;
    drift::check(rendered.results(), root)
}

/// Check the Python files under `root` for the license notice.
///
/// Returns `None` when `license.add_to_files` is off.
pub fn execute_notice(
    state: &Validated,
    root: &Path,
) -> Result<Option<Vec<notice::NoticeReport>>> {
    match license_notice(state.document()) {
        Some(text) => notice::check(root, text).map(Some),
        None => Ok(None),
    }
}
