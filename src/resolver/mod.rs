//! # Configuration Resolver
//!
//! [`ConfigResolver`] turns a raw, sparse configuration tree into a complete
//! [`ConfigDocument`] and reports every problem with it in one pass.
//!
//! ## Flow
//!
//! 1. **Merge** ([`ConfigResolver::merge`]): walk the schema and fill every
//!    key the raw input leaves out with its default. Unknown keys and
//!    container-shape disagreements abort with
//!    [`Error::SchemaMismatch`](crate::error::Error::SchemaMismatch).
//! 2. **Validate** ([`ConfigResolver::validate`]): apply the generic
//!    schema checks (required keys, scalar types) and then the section rules.
//!    Problems come back as [`ValidationIssue`] records, never as errors.
//!
//! ## Example
//!
//! ```
//! use repo_bones::resolver::{ConfigResolver, IssueKind};
//! use repo_bones::schema::Schema;
//!
//! let schema = Schema::builtin();
//! let resolver = ConfigResolver::new(&schema);
//!
//! let raw = serde_yaml::from_str(
//!     "project_name: Demo\npkg_name: demo\nrepo_name: org/demo\nstyle:\n  max_line_length: -5\n",
//! )
//! .unwrap();
//! let doc = resolver.merge(&raw).unwrap();
//! let issues = resolver.validate(&doc).unwrap();
//!
//! assert_eq!(issues.len(), 1);
//! assert_eq!(issues[0].kind, IssueKind::OutOfRange);
//! ```

mod issue;
mod merge;
mod rules;
mod validate;

#[cfg(test)]
mod merge_proptest;

pub use issue::{blocking_count, sort_issues, IssueKind, Severity, ValidationIssue};
pub use rules::MAX_LINE_LENGTH;

use std::sync::LazyLock;

use log::debug;
use serde_yaml::Value;

use crate::document::ConfigDocument;
use crate::error::{Error, Result};
use crate::schema::Schema;

use rules::{Patterns, RuleContext};

static PATTERNS: LazyLock<std::result::Result<Patterns, regex::Error>> =
    LazyLock::new(Patterns::compile);

/// Merges and validates configuration against a borrowed schema.
#[derive(Debug, Clone, Copy)]
pub struct ConfigResolver<'s> {
    schema: &'s Schema,
}

impl<'s> ConfigResolver<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    /// Merge `raw` over the schema defaults.
    pub fn merge(&self, raw: &Value) -> Result<ConfigDocument> {
        merge::merge(raw, self.schema)
    }

    /// The document produced by merging an empty configuration.
    pub fn defaults(&self) -> Result<ConfigDocument> {
        merge::merge(&Value::Null, self.schema)
    }

    /// Collect every validation issue in `doc`, sorted by path then kind.
    ///
    /// Fails only when `doc` cannot be walked by the schema, which does not
    /// happen for documents produced by [`merge`](Self::merge).
    pub fn validate(&self, doc: &ConfigDocument) -> Result<Vec<ValidationIssue>> {
        let generic = validate::check_document(self.schema.fields(), doc.root())?;
        let patterns = PATTERNS.as_ref().map_err(|e| Error::Regex(e.clone()))?;

        let mut ctx = RuleContext::new(doc, &generic.skip, patterns);
        rules::run_all(&mut ctx);

        let mut issues = generic.issues;
        issues.extend(ctx.into_issues());
        sort_issues(&mut issues);

        debug!(
            "Validation found {} issue(s), {} blocking",
            issues.len(),
            blocking_count(&issues)
        );
        Ok(issues)
    }
}
