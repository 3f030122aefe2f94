//! Read-only variable namespace handed to templates.
//!
//! A [`Namespace`] wraps a configuration mapping and exposes it to
//! `minijinja` as a map object. Nested mappings are wrapped again on access,
//! so `section.key`, `section["key"]` and `section.nested.key` all resolve
//! through the same adapter.

use std::sync::Arc;

use minijinja::value::{Enumerator, Object, Value as TemplateValue};
use serde_yaml::{Mapping, Value};

use crate::document::ConfigDocument;
use crate::error::{Error, Result};
use crate::path::{self, type_name, with_article, KeyPath};

use super::notice::license_notice;
use super::spec::TemplateSpec;

/// Name of the reserved entry describing the generator itself.
pub const BONES_ENTRY: &str = "bones";

#[derive(Debug, Clone, PartialEq)]
pub struct Namespace {
    entries: Mapping,
}

impl Namespace {
    pub fn new(entries: Mapping) -> Self {
        Self { entries }
    }

    /// Build the namespace for one template.
    ///
    /// Starts from every top-level entry of `doc`. When the spec has a
    /// scope, the keys of that subtree are lifted to the top level,
    /// shadowing entries of the same name. Finally the reserved `bones`
    /// entry is added, holding the generator version, the template id and
    /// the license `notice` (null unless `license.add_to_files` is on).
    pub fn for_spec(spec: &TemplateSpec, doc: &ConfigDocument) -> Result<Self> {
        let mut entries = doc.root().clone();

        if let Some(scope) = &spec.scope {
            match doc.get_path(scope) {
                Some(Value::Mapping(subtree)) => {
                    for (key, value) in subtree {
                        entries.insert(key.clone(), value.clone());
                    }
                }
                Some(Value::Null) | None => {}
                Some(other) => {
                    return Err(Error::Template {
                        template: spec.template.clone(),
                        message: format!(
                            "scope '{}' must be a mapping, found {}",
                            scope,
                            with_article(type_name(other))
                        ),
                    })
                }
            }
        }

        let mut bones = Mapping::new();
        bones.insert(
            Value::from("version"),
            Value::from(env!("CARGO_PKG_VERSION")),
        );
        bones.insert(Value::from("template"), Value::from(spec.template.as_str()));
        bones.insert(
            Value::from("notice"),
            license_notice(doc).map_or(Value::Null, Value::from),
        );
        entries.insert(Value::from(BONES_ENTRY), Value::Mapping(bones));

        Ok(Self { entries })
    }

    /// Look up a dotted path such as `ci.python_versions[0]`.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        path::lookup_in(&self.entries, &KeyPath::parse(path))
    }

    pub fn entries(&self) -> &Mapping {
        &self.entries
    }

    /// The namespace as a template context value.
    pub fn into_value(self) -> TemplateValue {
        TemplateValue::from_object(self)
    }
}

fn to_template_value(value: &Value) -> TemplateValue {
    match value {
        Value::Mapping(map) => TemplateValue::from_object(Namespace::new(map.clone())),
        Value::Sequence(items) => {
            TemplateValue::from(items.iter().map(to_template_value).collect::<Vec<_>>())
        }
        Value::Tagged(tagged) => to_template_value(&tagged.value),
        scalar => TemplateValue::from_serialize(scalar),
    }
}

impl Object for Namespace {
    fn get_value(self: &Arc<Self>, key: &TemplateValue) -> Option<TemplateValue> {
        let key = key.as_str()?;
        self.entries.get(key).map(to_template_value)
    }

    fn enumerate(self: &Arc<Self>) -> Enumerator {
        let keys = self
            .entries
            .keys()
            .map(TemplateValue::from_serialize)
            .collect();
        Enumerator::Values(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> ConfigDocument {
        ConfigDocument::from_mapping(serde_yaml::from_str(text).unwrap())
    }

    #[test]
    fn test_top_level_entries_and_bones() {
        let doc = doc("project_name: Demo\nci:\n  os: [linux]\n");
        let ns = Namespace::for_spec(&TemplateSpec::new("codecov", ".codecov.yml"), &doc).unwrap();
        assert_eq!(ns.lookup("project_name"), Some(&Value::from("Demo")));
        assert_eq!(ns.lookup("ci.os[0]"), Some(&Value::from("linux")));
        assert_eq!(ns.lookup("bones.template"), Some(&Value::from("codecov")));
        assert_eq!(
            ns.lookup("bones.version"),
            Some(&Value::from(env!("CARGO_PKG_VERSION")))
        );
    }

    #[test]
    fn test_bones_notice() {
        let spec = TemplateSpec::new("setup_py", "setup.py").with_scope("packaging");
        let on = doc("license: {add_to_files: true, text: Licensed.}
packaging: {license: MIT}
");
        let ns = Namespace::for_spec(&spec, &on).unwrap();
        assert_eq!(ns.lookup("bones.notice"), Some(&Value::from("Licensed.")));

        let off = doc("license: {add_to_files: false, text: Licensed.}
");
        let ns = Namespace::for_spec(&spec, &off).unwrap();
        assert_eq!(ns.lookup("bones.notice"), Some(&Value::Null));
    }

    #[test]
    fn test_scope_lifts_and_shadows() {
        let doc = doc("license: {type: mit}\npackaging:\n  license: MIT\n  version: 1.0.0\n");
        let spec = TemplateSpec::new("setup_py", "setup.py").with_scope("packaging");
        let ns = Namespace::for_spec(&spec, &doc).unwrap();
        assert_eq!(ns.lookup("version"), Some(&Value::from("1.0.0")));
        assert_eq!(ns.lookup("license"), Some(&Value::from("MIT")));
        assert_eq!(ns.lookup("packaging.license"), Some(&Value::from("MIT")));
    }

    #[test]
    fn test_indexed_scope() {
        let doc = doc("pkg_name: demo\nci:\n  scripts:\n    - template: test\n      output_name: unit\n");
        let spec = TemplateSpec::new("test", ".ci/unit.sh").with_scope("ci.scripts[0]");
        let ns = Namespace::for_spec(&spec, &doc).unwrap();
        assert_eq!(ns.lookup("output_name"), Some(&Value::from("unit")));
        assert_eq!(ns.lookup("pkg_name"), Some(&Value::from("demo")));
    }

    #[test]
    fn test_scalar_scope_is_error() {
        let doc = doc("pkg_name: demo\n");
        let spec = TemplateSpec::new("x", "x").with_scope("pkg_name");
        let err = Namespace::for_spec(&spec, &doc).unwrap_err();
        assert!(matches!(err, Error::Template { .. }));
    }

    #[test]
    fn test_object_access() {
        let ns = Namespace::new(serde_yaml::from_str("style:\n  black:\n    enabled: true\nitems: [1, 2]\n").unwrap());
        let value = ns.into_value();
        let style = value.get_attr("style").unwrap();
        let black = style.get_item(&TemplateValue::from("black")).unwrap();
        assert_eq!(black.get_attr("enabled").unwrap(), TemplateValue::from(true));
        let items = value.get_attr("items").unwrap();
        assert_eq!(items.len(), Some(2));
        assert!(value.get_attr("missing").unwrap().is_undefined());
    }
}
