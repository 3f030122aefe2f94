//! Template-to-output mapping.

use std::path::PathBuf;

use serde_yaml::Value;

use crate::document::ConfigDocument;
use crate::path::KeyPath;

/// Directory that receives the generated CI scripts.
pub const CI_SCRIPT_DIR: &str = ".ci";

/// One template to render and where its output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSpec {
    pub template: String,
    /// Destination, relative to the output directory.
    pub output: PathBuf,
    /// Subtree whose keys are lifted into the template namespace.
    pub scope: Option<KeyPath>,
    pub executable: bool,
}

impl TemplateSpec {
    pub fn new(template: &str, output: impl Into<PathBuf>) -> Self {
        Self {
            template: template.to_string(),
            output: output.into(),
            scope: None,
            executable: false,
        }
    }

    pub fn with_scope(mut self, scope: &str) -> Self {
        self.scope = Some(KeyPath::parse(scope));
        self
    }

    pub fn as_executable(mut self) -> Self {
        self.executable = true;
        self
    }
}

/// Rendered text for one [`TemplateSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    pub template: String,
    pub output: PathBuf,
    pub content: String,
    pub executable: bool,
}

fn enabled(doc: &ConfigDocument, path: &str) -> bool {
    doc.get(path).and_then(Value::as_bool).unwrap_or(false)
}

/// The standard set of generated files for `doc`, in a fixed order.
///
/// The pre-commit and pyproject files only appear when their formatter is
/// enabled, and the contributor guides only when their section enables them. One executable script spec follows for every `ci.scripts`
/// entry that names a template.
pub fn default_specs(doc: &ConfigDocument) -> Vec<TemplateSpec> {
    let mut specs = vec![
        TemplateSpec::new("ci_manifest", ".github/workflows/ci.yml").with_scope("ci"),
        TemplateSpec::new("codecov", ".codecov.yml").with_scope("codecov"),
        TemplateSpec::new("license", "LICENSE.rst").with_scope("license"),
        TemplateSpec::new("manifest", "MANIFEST.in").with_scope("packaging"),
        TemplateSpec::new("setup_py", "setup.py").with_scope("packaging"),
        TemplateSpec::new("setup_cfg", "setup.cfg").with_scope("style"),
    ];
    if enabled(doc, "style.pre_commit.enabled") {
        specs.push(TemplateSpec::new("pre_commit", ".pre-commit-config.yaml").with_scope("style"));
    }
    if enabled(doc, "style.black.enabled") {
        specs.push(TemplateSpec::new("pyproject", "pyproject.toml").with_scope("style"));
    }
    specs.push(TemplateSpec::new("docs_conf", "docs/conf.py").with_scope("docs"));
    if enabled(doc, "contributing.enabled") {
        specs.push(TemplateSpec::new("contributing", "CONTRIBUTING.rst").with_scope("contributing"));
    }
    if enabled(doc, "contributors.enabled") {
        specs.push(TemplateSpec::new("contributors", "CONTRIBUTORS.rst").with_scope("contributors"));
    }

    if let Some(Value::Sequence(scripts)) = doc.get("ci.scripts") {
        for (idx, script) in scripts.iter().enumerate() {
            let Some(template) = script.get("template").and_then(Value::as_str) else {
                continue;
            };
            let name = script
                .get("output_name")
                .and_then(Value::as_str)
                .unwrap_or(template);
            let output = PathBuf::from(CI_SCRIPT_DIR).join(format!("{name}.sh"));
            specs.push(
                TemplateSpec::new(template, output)
                    .with_scope(&format!("ci.scripts[{idx}]"))
                    .as_executable(),
            );
        }
    }

    specs
}
