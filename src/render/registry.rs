//! The catalog of template sources, keyed by identifier.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::defaults::TEMPLATE_EXTENSION;
use crate::error::{Error, Result};

/// Prefix under which shipped templates stay reachable after an override.
pub const BUILTIN_PREFIX: &str = "builtin/";

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("ci_manifest", include_str!("../../templates/ci_manifest.template")),
    ("codecov", include_str!("../../templates/codecov.template")),
    ("license", include_str!("../../templates/license.template")),
    ("manifest", include_str!("../../templates/manifest.template")),
    ("setup_py", include_str!("../../templates/setup_py.template")),
    ("setup_cfg", include_str!("../../templates/setup_cfg.template")),
    ("pre_commit", include_str!("../../templates/pre_commit.template")),
    ("pyproject", include_str!("../../templates/pyproject.template")),
    ("docs_conf", include_str!("../../templates/docs_conf.template")),
    ("contributing", include_str!("../../templates/contributing.template")),
    ("contributors", include_str!("../../templates/contributors.template")),
    ("script_base", include_str!("../../templates/script_base.template")),
    ("test", include_str!("../../templates/test.template")),
    ("static", include_str!("../../templates/static.template")),
    ("docs", include_str!("../../templates/docs.template")),
];

/// Template sources by identifier.
///
/// Built once at startup and handed to
/// [`TemplateRenderer::new`](super::TemplateRenderer::new). Each shipped
/// template is registered twice: under its identifier, which an override may
/// replace, and under `builtin/<id>`, which always holds the shipped text so
/// an override can `{% include %}` or `{% extends %}` it.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, String>,
}

impl TemplateRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The templates compiled into the binary.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (id, source) in BUILTIN_TEMPLATES {
            registry.add(id, *source);
            registry.add(&format!("{BUILTIN_PREFIX}{id}"), *source);
        }
        registry
    }

    /// Register `source` under `id`, replacing any earlier entry.
    pub fn add(&mut self, id: &str, source: impl Into<String>) {
        self.templates.insert(id.to_string(), source.into());
    }

    /// Builder form of [`add`](Self::add).
    pub fn with_template(mut self, id: &str, source: impl Into<String>) -> Self {
        self.add(id, source);
        self
    }

    /// Register every `<id>.template` file in `dir`.
    ///
    /// A missing directory is not an error. Returns the number of templates
    /// loaded.
    pub fn load_overrides(&mut self, dir: &Path) -> Result<usize> {
        if !dir.is_dir() {
            debug!("No template override directory at {}", dir.display());
            return Ok(0);
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_template = path
                .extension()
                .is_some_and(|ext| ext == TEMPLATE_EXTENSION);
            if path.is_file() && is_template {
                paths.push(path);
            }
        }
        paths.sort();

        for path in &paths {
            let id = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .ok_or_else(|| Error::Filesystem {
                    message: format!("Invalid template file name: {}", path.display()),
                })?;
            let source = fs::read_to_string(path).map_err(|e| Error::Filesystem {
                message: format!("Failed to read template '{}': {}", path.display(), e),
            })?;
            info!("Loaded template override '{}' from {}", id, path.display());
            self.add(id, source);
        }
        Ok(paths.len())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.templates.get(id).map(String::as_str)
    }

    /// Registered identifiers in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.templates
            .iter()
            .map(|(id, source)| (id.as_str(), source.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_contains_default_plan() {
        let registry = TemplateRegistry::builtin();
        for id in [
            "ci_manifest",
            "codecov",
            "license",
            "manifest",
            "setup_py",
            "setup_cfg",
            "pre_commit",
            "pyproject",
            "docs_conf",
            "contributing",
            "contributors",
        ] {
            assert!(registry.contains(id), "missing {id}");
            assert!(registry.contains(&format!("builtin/{id}")));
        }
    }

    #[test]
    fn test_builtin_sources_carry_marker() {
        let registry = TemplateRegistry::builtin();
        for (id, source) in BUILTIN_TEMPLATES {
            let extends_base = source.starts_with("{% extends");
            assert!(
                extends_base || source.contains(crate::defaults::GENERATED_MARKER),
                "{id} has no generated marker"
            );
            assert_eq!(registry.get(id), Some(*source));
        }
    }

    #[test]
    fn test_add_replaces() {
        let registry = TemplateRegistry::new()
            .with_template("greeting", "hello")
            .with_template("greeting", "hi");
        assert_eq!(registry.get("greeting"), Some("hi"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_load_overrides() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("license.template"), "custom {{ project_name }}").unwrap();
        fs::write(temp.path().join("deploy.template"), "#!/bin/sh\n").unwrap();
        fs::write(temp.path().join("notes.txt"), "ignored").unwrap();

        let mut registry = TemplateRegistry::builtin();
        let loaded = registry.load_overrides(temp.path()).unwrap();

        assert_eq!(loaded, 2);
        assert_eq!(registry.get("license"), Some("custom {{ project_name }}"));
        assert!(registry.contains("deploy"));
        assert!(!registry.contains("notes"));
        assert!(registry
            .get("builtin/license")
            .is_some_and(|source| source.contains("License")));
    }

    #[test]
    fn test_load_overrides_missing_dir() {
        let temp = TempDir::new().unwrap();
        let mut registry = TemplateRegistry::new();
        assert_eq!(
            registry.load_overrides(&temp.path().join(".templates")).unwrap(),
            0
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_names_sorted() {
        let registry = TemplateRegistry::new()
            .with_template("b", "")
            .with_template("a", "");
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
