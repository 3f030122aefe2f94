//! Pipeline states for one `bones` invocation.
//!
//! ## Overview
//!
//! A configuration moves through three typed states:
//!
//! 1. [`Merged`] - raw input laid over the schema defaults
//! 2. [`Validated`] - every validation issue collected
//! 3. [`Rendered`] - templates expanded in memory
//!
//! Only [`Validated::render`] produces a [`Rendered`], and it refuses while
//! any error-level issue exists. The `check` command stops at `Validated`;
//! `generate` continues to rendering and hands the results to [`write`].
//! [`drift`] compares rendered results with files already on disk, and
//! [`notice`] checks Python sources for the license notice.

use log::warn;
use serde_yaml::Value;

use crate::document::ConfigDocument;
use crate::error::{Error, Result};
use crate::render::{RenderMode, RenderOutcome, RenderResult, TemplateRenderer, TemplateSpec};
use crate::resolver::{blocking_count, ConfigResolver, ValidationIssue};

pub mod drift;
pub mod notice;
pub mod orchestrator;
pub mod write;

/// A configuration with defaults filled in, not yet validated.
#[derive(Debug, Clone)]
pub struct Merged {
    doc: ConfigDocument,
}

impl Merged {
    pub fn from_raw(raw: &Value, resolver: &ConfigResolver<'_>) -> Result<Self> {
        Ok(Self {
            doc: resolver.merge(raw)?,
        })
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.doc
    }

    pub fn validate(self, resolver: &ConfigResolver<'_>) -> Result<Validated> {
        let issues = resolver.validate(&self.doc)?;
        Ok(Validated {
            doc: self.doc,
            issues,
        })
    }
}

/// A merged configuration together with all of its validation issues.
#[derive(Debug, Clone)]
pub struct Validated {
    doc: ConfigDocument,
    issues: Vec<ValidationIssue>,
}

impl Validated {
    pub fn document(&self) -> &ConfigDocument {
        &self.doc
    }

    /// Issues sorted by key path, then kind.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn blocking_count(&self) -> usize {
        blocking_count(&self.issues)
    }

    pub fn is_renderable(&self) -> bool {
        self.blocking_count() == 0
    }

    /// Render `specs` against the document.
    ///
    /// Fails with [`Error::BlockingIssues`] when any error-level issue
    /// exists. Warning-level issues are logged and do not block.
    pub fn render(
        &self,
        renderer: &TemplateRenderer,
        specs: &[TemplateSpec],
        mode: RenderMode,
    ) -> Result<Rendered> {
        let count = self.blocking_count();
        if count > 0 {
            return Err(Error::BlockingIssues { count });
        }

        let warnings = self.issues.len();
        if warnings > 0 {
            warn!(
                "Proceeding with {} validation warning(s); run 'bones check' for details",
                warnings
            );
        }

        let outcome = renderer.render_all(specs, &self.doc, mode)?;
        Ok(Rendered { outcome })
    }
}

/// Rendered output, ready to be written or compared with disk.
#[derive(Debug)]
pub struct Rendered {
    outcome: RenderOutcome,
}

impl Rendered {
    pub fn results(&self) -> &[RenderResult] {
        &self.outcome.results
    }

    pub fn outcome(&self) -> &RenderOutcome {
        &self.outcome
    }

    pub fn into_outcome(self) -> RenderOutcome {
        self.outcome
    }
}
