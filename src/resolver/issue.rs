//! Validation issue records.

use serde::Serialize;
use std::fmt;

use crate::path::KeyPath;

/// Category of a validation problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingRequired,
    TypeMismatch,
    OutOfRange,
    InvalidFormat,
    EmptyValue,
    MissingCredentials,
    Conflict,
}

impl IssueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueKind::MissingRequired => "missing_required",
            IssueKind::TypeMismatch => "type_mismatch",
            IssueKind::OutOfRange => "out_of_range",
            IssueKind::InvalidFormat => "invalid_format",
            IssueKind::EmptyValue => "empty_value",
            IssueKind::MissingCredentials => "missing_credentials",
            IssueKind::Conflict => "conflict",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Only error-level issues block rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// One problem found while validating a configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: KeyPath,
    pub kind: IssueKind,
    pub severity: Severity,
    pub message: String,
}

impl ValidationIssue {
    pub fn error(path: KeyPath, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(path: KeyPath, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {} [{}]",
            self.severity, self.path, self.message, self.kind
        )
    }
}

/// Order issues by key path, then by kind.
pub fn sort_issues(issues: &mut [ValidationIssue]) {
    issues.sort_by(|a, b| a.path.cmp(&b.path).then(a.kind.cmp(&b.kind)));
}

/// Number of error-level issues.
pub fn blocking_count(issues: &[ValidationIssue]) -> usize {
    issues.iter().filter(|issue| issue.is_blocking()).count()
}
