//! Generic, schema-directed validation
//!
//! Walks the schema against a merged document and records two kinds of
//! issue: required keys left null, and values whose type disagrees with the
//! declared [`ValueKind`]. Every path that produced a type mismatch is added
//! to the skip set so that section rules do not report the same value twice.
//!
//! A declared mapping holding something other than a mapping cannot be
//! walked at all. That is a [`Error::MalformedDocument`], not an issue.

use std::collections::HashSet;

use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};
use crate::path::{type_name, with_article, KeyPath};
use crate::schema::{Field, Shape, ValueKind};

use super::issue::{IssueKind, ValidationIssue};

/// Output of the generic pass.
#[derive(Debug, Default)]
pub struct GenericReport {
    pub issues: Vec<ValidationIssue>,
    /// Paths whose value has the wrong type.
    pub skip: HashSet<KeyPath>,
}

/// Check every field declared in `fields` against `map`.
pub fn check_document(fields: &[Field], map: &Mapping) -> Result<GenericReport> {
    let mut report = GenericReport::default();
    check_fields(fields, map, &KeyPath::root(), &mut report)?;
    Ok(report)
}

fn check_fields(
    fields: &[Field],
    map: &Mapping,
    path: &KeyPath,
    report: &mut GenericReport,
) -> Result<()> {
    for field in fields {
        let field_path = path.child(&field.name);
        let value = map.get(field.name.as_str()).unwrap_or(&Value::Null);
        check_field(field, value, &field_path, report)?;
    }
    Ok(())
}

fn check_field(
    field: &Field,
    value: &Value,
    path: &KeyPath,
    report: &mut GenericReport,
) -> Result<()> {
    match &field.shape {
        Shape::Mapping(children) => match value {
            Value::Null => check_fields(children, &Mapping::new(), path, report),
            Value::Mapping(map) => check_fields(children, map, path, report),
            other => Err(malformed(path, other)),
        },
        Shape::OpenMapping => match value {
            Value::Null | Value::Mapping(_) => Ok(()),
            other => Err(malformed(path, other)),
        },
        Shape::List(kind) => {
            match value {
                Value::Null => {}
                Value::Sequence(items) => {
                    for (idx, item) in items.iter().enumerate() {
                        if !kind.matches(item) {
                            type_mismatch(report, path.index(idx), *kind, item);
                        }
                    }
                }
                other => {
                    report.issues.push(ValidationIssue::error(
                        path.clone(),
                        IssueKind::TypeMismatch,
                        format!(
                            "expected a list, found {}; did you forget to add '-' before each entry?",
                            with_article(type_name(other))
                        ),
                    ));
                    report.skip.insert(path.clone());
                }
            }
            Ok(())
        }
        Shape::Scalar(kind) => {
            if value.is_null() {
                if field.is_required() {
                    report.issues.push(ValidationIssue::error(
                        path.clone(),
                        IssueKind::MissingRequired,
                        format!("required {} is not set", kind.name()),
                    ));
                }
            } else if !kind.matches(value) {
                type_mismatch(report, path.clone(), *kind, value);
            }
            Ok(())
        }
    }
}

fn type_mismatch(report: &mut GenericReport, path: KeyPath, kind: ValueKind, found: &Value) {
    report.issues.push(ValidationIssue::error(
        path.clone(),
        IssueKind::TypeMismatch,
        format!(
            "expected {}, found {}",
            with_article(kind.name()),
            with_article(type_name(found))
        ),
    ));
    report.skip.insert(path);
}

fn malformed(path: &KeyPath, found: &Value) -> Error {
    Error::MalformedDocument {
        path: path.to_string(),
        message: format!("expected a mapping, found {}", with_article(type_name(found))),
    }
}
