//! Schema-driven merge of raw configuration over defaults
//!
//! The merge walks the schema, not the raw input. Every declared key ends up
//! in the result, taking the raw value when one is supplied and the schema
//! default otherwise.
//!
//! ## Shape rules
//!
//! - `Mapping`: recurse key by key; unknown raw keys are rejected.
//! - `OpenMapping`: raw entries are laid over the default entries as-is.
//! - `List`: a raw sequence replaces the default outright.
//! - `Scalar`: a raw scalar replaces the default. Its *type* is checked later
//!   by validation, so a string in an integer slot is not a merge failure.
//!
//! A raw `null` counts as "not supplied". Container shape disagreements
//! (a list where a mapping belongs, a mapping where a scalar belongs) are
//! hard `SchemaMismatch` failures naming the offending path.

use log::{debug, trace};
use serde_yaml::{Mapping, Value};

use crate::document::ConfigDocument;
use crate::error::{Error, Result};
use crate::path::{type_name, with_article, KeyPath};
use crate::schema::{Field, Schema, Shape};
use crate::suggestions;

/// Merge `raw` over the defaults declared by `schema`.
///
/// Neither input is modified.
pub fn merge(raw: &Value, schema: &Schema) -> Result<ConfigDocument> {
    let root = KeyPath::root();
    let raw_map = match raw {
        Value::Null => None,
        Value::Mapping(map) => Some(map),
        other => {
            return Err(shape_mismatch(&root, "mapping", other, None));
        }
    };

    let merged = merge_fields(schema.fields(), raw_map, &root)?;
    debug!("Merged configuration with {} top-level keys", merged.len());
    Ok(ConfigDocument::from_mapping(merged))
}

fn merge_fields(fields: &[Field], raw: Option<&Mapping>, path: &KeyPath) -> Result<Mapping> {
    if let Some(raw) = raw {
        reject_unknown_keys(fields, raw, path)?;
    }

    let mut merged = Mapping::new();
    for field in fields {
        let field_path = path.child(&field.name);
        let supplied = raw
            .and_then(|map| map.get(field.name.as_str()))
            .filter(|value| !value.is_null());
        let value = merge_field(field, supplied, &field_path)?;
        merged.insert(Value::String(field.name.clone()), value);
    }
    Ok(merged)
}

fn reject_unknown_keys(fields: &[Field], raw: &Mapping, path: &KeyPath) -> Result<()> {
    for key in raw.keys() {
        let Some(name) = key.as_str() else {
            return Err(Error::SchemaMismatch {
                path: path.to_string(),
                message: format!(
                    "keys must be strings, found {}",
                    with_article(type_name(key))
                ),
                hint: None,
            });
        };

        if !fields.iter().any(|field| field.name == name) {
            let candidates: Vec<&str> = fields.iter().map(|field| field.name.as_str()).collect();
            return Err(Error::SchemaMismatch {
                path: path.child(name).to_string(),
                message: "unknown key".to_string(),
                hint: Some(suggestions::unknown_key(name, &candidates)),
            });
        }
    }
    Ok(())
}

fn merge_field(field: &Field, supplied: Option<&Value>, path: &KeyPath) -> Result<Value> {
    trace!(
        "{}: {}",
        path,
        if supplied.is_some() { "configured" } else { "default" }
    );

    match &field.shape {
        Shape::Mapping(children) => {
            let raw = match supplied {
                None => None,
                Some(Value::Mapping(map)) => Some(map),
                Some(other) => return Err(shape_mismatch(path, "mapping", other, None)),
            };
            Ok(Value::Mapping(merge_fields(children, raw, path)?))
        }
        Shape::OpenMapping => match supplied {
            None => Ok(field.default_value()),
            Some(Value::Mapping(map)) => {
                let mut merged = match field.default_value() {
                    Value::Mapping(defaults) => defaults,
                    _ => Mapping::new(),
                };
                for (key, value) in map {
                    merged.insert(key.clone(), value.clone());
                }
                Ok(Value::Mapping(merged))
            }
            Some(other) => Err(shape_mismatch(path, "mapping", other, None)),
        },
        Shape::List(_) => match supplied {
            None => Ok(field.default_value()),
            Some(value @ Value::Sequence(_)) => Ok(value.clone()),
            Some(other) => Err(shape_mismatch(
                path,
                "list",
                other,
                Some(suggestions::expected_list(&field.name)),
            )),
        },
        Shape::Scalar(kind) => match supplied {
            None => Ok(field.default_value()),
            Some(other @ (Value::Mapping(_) | Value::Sequence(_))) => {
                Err(shape_mismatch(path, kind.name(), other, None))
            }
            Some(value) => Ok(value.clone()),
        },
    }
}

fn shape_mismatch(path: &KeyPath, expected: &str, found: &Value, hint: Option<String>) -> Error {
    Error::SchemaMismatch {
        path: path.to_string(),
        message: format!(
            "expected {}, found {}",
            with_article(expected),
            with_article(type_name(found))
        ),
        hint,
    }
}
