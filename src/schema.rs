//! # Configuration Schema
//!
//! This module defines the typed schema that drives both merging and
//! validation of `.bones.yml` files. Every node of the schema carries an
//! explicit [`Shape`] tag, so the merge walks a known structure instead of
//! inspecting values at runtime.
//!
//! ## Key Components
//!
//! - **`Shape`**: the expected shape of one key. A scalar of some
//!   [`ValueKind`], a list of scalars, a nested mapping with a fixed set of
//!   fields, or an open mapping that accepts arbitrary keys.
//! - **`Field`**: one named key with its shape and its [`FieldDefault`]
//!   (a default value, optional, or required).
//! - **`Schema`**: the ordered set of top-level fields. Each top-level
//!   mapping field is a *section* (`ci`, `style`, `packaging`, ...).
//!
//! [`Schema::builtin`] returns the sections understood by the shipped
//! templates. The owning process builds it once and hands it to the
//! [`ConfigResolver`](crate::resolver::ConfigResolver) by reference.

use serde_yaml::{Mapping, Value};

use crate::path::{KeyPath, PathSegment};

/// The scalar types a schema can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Integer,
    Boolean,
    /// Anything goes; used for lists of structured entries (CI jobs, scripts).
    Any,
}

impl ValueKind {
    /// Whether `value` has this kind. Null never matches a concrete kind.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            ValueKind::String => value.is_string(),
            ValueKind::Integer => value.is_i64() || value.is_u64(),
            ValueKind::Boolean => value.is_bool(),
            ValueKind::Any => true,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Boolean => "boolean",
            ValueKind::Any => "value",
        }
    }
}

/// Expected shape of a configuration key.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Scalar(ValueKind),
    /// A sequence; supplied lists replace the default wholesale.
    List(ValueKind),
    /// A nested mapping with a fixed set of recognised keys.
    Mapping(Vec<Field>),
    /// A free-form mapping that accepts arbitrary caller-supplied keys.
    OpenMapping,
}

impl Shape {
    pub fn describe(&self) -> String {
        match self {
            Shape::Scalar(kind) => kind.name().to_string(),
            Shape::List(kind) => format!("list of {}", kind.name()),
            Shape::Mapping(_) | Shape::OpenMapping => "mapping".to_string(),
        }
    }
}

/// What a key holds when the raw configuration does not supply it.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDefault {
    Value(Value),
    /// Absent values become null.
    Optional,
    /// Absent values become null and are reported by validation.
    Required,
}

/// One recognised key of a schema section.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub shape: Shape,
    pub default: FieldDefault,
}

impl Field {
    pub fn new(name: &str, shape: Shape, default: FieldDefault) -> Self {
        Self {
            name: name.to_string(),
            shape,
            default,
        }
    }

    /// A scalar key that must be supplied.
    pub fn required(name: &str, kind: ValueKind) -> Self {
        Self::new(name, Shape::Scalar(kind), FieldDefault::Required)
    }

    /// A scalar key that defaults to null.
    pub fn optional(name: &str, kind: ValueKind) -> Self {
        Self::new(name, Shape::Scalar(kind), FieldDefault::Optional)
    }

    /// A scalar key with a default value.
    pub fn scalar(name: &str, kind: ValueKind, default: impl Into<Value>) -> Self {
        Self::new(name, Shape::Scalar(kind), FieldDefault::Value(default.into()))
    }

    /// A list key with a default list.
    pub fn list(name: &str, kind: ValueKind, default: &[&str]) -> Self {
        let items = default.iter().map(|item| Value::from(*item)).collect();
        Self::new(
            name,
            Shape::List(kind),
            FieldDefault::Value(Value::Sequence(items)),
        )
    }

    /// A nested mapping with a fixed set of fields.
    pub fn section(name: &str, fields: Vec<Field>) -> Self {
        Self::new(
            name,
            Shape::Mapping(fields),
            FieldDefault::Value(Value::Mapping(Mapping::new())),
        )
    }

    /// A free-form mapping defaulting to `{}`.
    pub fn open(name: &str) -> Self {
        Self::new(
            name,
            Shape::OpenMapping,
            FieldDefault::Value(Value::Mapping(Mapping::new())),
        )
    }

    /// The value inserted when the raw configuration omits this key.
    pub fn default_value(&self) -> Value {
        match &self.default {
            FieldDefault::Value(value) => value.clone(),
            FieldDefault::Optional | FieldDefault::Required => Value::Null,
        }
    }

    pub fn is_required(&self) -> bool {
        self.default == FieldDefault::Required
    }

    /// Child fields when this key is a fixed mapping.
    pub fn children(&self) -> Option<&[Field]> {
        match &self.shape {
            Shape::Mapping(fields) => Some(fields),
            _ => None,
        }
    }
}

/// The full configuration schema: an ordered list of top-level fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Names of the top-level mapping fields.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|field| field.children().is_some())
            .map(|field| field.name.as_str())
    }

    /// Find the field declared at `path`, descending through fixed mappings.
    ///
    /// Index segments are not part of the schema and never resolve.
    pub fn field_at(&self, path: &KeyPath) -> Option<&Field> {
        let mut fields = self.fields.as_slice();
        let mut found = None;
        for segment in path.segments() {
            let PathSegment::Key(key) = segment else {
                return None;
            };
            let field = fields.iter().find(|field| &field.name == key)?;
            fields = field.children().unwrap_or(&[]);
            found = Some(field);
        }
        found
    }

    /// The sections consumed by the shipped templates.
    pub fn builtin() -> Self {
        use ValueKind::{Any, Boolean, Integer, String};

        Self::new(vec![
            Field::required("project_name", String),
            Field::required("pkg_name", String),
            Field::required("repo_name", String),
            Field::optional("description", String),
            Field::scalar("author", String, "Applied Brain Research"),
            Field::scalar("author_email", String, "info@appliedbrainresearch.com"),
            Field::optional("copyright_start", Integer),
            Field::optional("copyright_end", Integer),
            Field::open("vars"),
            Field::section(
                "ci",
                vec![
                    Field::list("python_versions", String, &["3.8"]),
                    Field::list("os", String, &["ubuntu-latest"]),
                    Field::open("global_vars"),
                    Field::list("pip_install", String, &[]),
                    Field::list("apt_install", String, &[]),
                    Field::list("jobs", Any, &[]),
                    Field::list("scripts", Any, &[]),
                    Field::section(
                        "deploy",
                        vec![
                            Field::scalar("enabled", Boolean, false),
                            Field::optional("pypi_user", String),
                            Field::optional("token_var", String),
                            Field::list("dists", String, &["sdist"]),
                        ],
                    ),
                ],
            ),
            Field::section(
                "style",
                vec![
                    Field::scalar("max_line_length", Integer, 79),
                    Field::section(
                        "black",
                        vec![
                            Field::scalar("enabled", Boolean, true),
                            Field::list("exclude", String, &[]),
                        ],
                    ),
                    Field::section(
                        "pre_commit",
                        vec![
                            Field::scalar("enabled", Boolean, true),
                            Field::list("exclude", String, &[]),
                        ],
                    ),
                    Field::section(
                        "flake8",
                        vec![
                            Field::scalar("enabled", Boolean, true),
                            Field::list("ignore", String, &["E203", "W503"]),
                        ],
                    ),
                    Field::open("pytest"),
                ],
            ),
            Field::section(
                "packaging",
                vec![
                    Field::scalar("version", String, "0.1.0.dev0"),
                    Field::scalar("license", String, "Free for non-commercial use"),
                    Field::scalar("python_requires", String, ">=3.6"),
                    Field::optional("url", String),
                    Field::list("install_requires", String, &[]),
                    Field::open("extras_require"),
                    Field::list("classifiers", String, &[]),
                    Field::open("entry_points"),
                    Field::open("package_data"),
                    Field::scalar("include_package_data", Boolean, false),
                    Field::list("manifest_extra", String, &[]),
                ],
            ),
            Field::section(
                "codecov",
                vec![
                    Field::scalar("abs_target", String, "auto"),
                    Field::scalar("diff_target", String, "100%"),
                    Field::scalar("skip_appveyor", Boolean, true),
                ],
            ),
            Field::section(
                "docs",
                vec![
                    Field::scalar("logo", String, "general-full-light.svg"),
                    Field::scalar("logo_color", String, "#a8acaf"),
                    Field::list("exclude_patterns", String, &[]),
                    Field::open("intersphinx_mapping"),
                ],
            ),
            Field::section(
                "license",
                vec![
                    Field::scalar("type", String, "nengo"),
                    Field::optional("text", String),
                    Field::scalar("add_to_files", Boolean, false),
                ],
            ),
            Field::section(
                "contributing",
                vec![Field::scalar("enabled", Boolean, false)],
            ),
            Field::section(
                "contributors",
                vec![
                    Field::scalar("enabled", Boolean, false),
                    Field::optional("nengo_list", Boolean),
                ],
            ),
        ])
    }
}
