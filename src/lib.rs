//! # repo-bones
//!
//! Shared project infrastructure files (CI workflow, packaging metadata,
//! lint settings, license text, docs config) generated from one
//! `.bones.yml` per repository. The library backs the `bones` CLI and can be
//! embedded by other tools.
//!
//! ## Quick Example
//!
//! ```
//! use repo_bones::config::{parse, ConfigFormat};
//! use repo_bones::render::{TemplateRegistry, TemplateRenderer, TemplateSpec};
//! use repo_bones::resolver::ConfigResolver;
//! use repo_bones::schema::Schema;
//!
//! let raw = parse(
//!     "project_name: Demo\npkg_name: demo\nrepo_name: org/demo\n\
//!      ci:\n  python_versions: ['3.8', '3.9']\n",
//!     ConfigFormat::Yaml,
//! )
//! .unwrap();
//!
//! let schema = Schema::builtin();
//! let resolver = ConfigResolver::new(&schema);
//! let doc = resolver.merge(&raw).unwrap();
//! assert!(resolver.validate(&doc).unwrap().is_empty());
//!
//! let renderer = TemplateRenderer::new(&TemplateRegistry::builtin()).unwrap();
//! let spec = TemplateSpec::new("ci_manifest", ".github/workflows/ci.yml").with_scope("ci");
//! let result = renderer.render(&spec, &doc).unwrap();
//! assert!(result.content.contains("3.9"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Schema (`schema`)**: the expected shape of a configuration, with a
//!   default for every optional key.
//! - **Resolver (`resolver`)**: merges a sparse raw tree over the defaults
//!   and collects every validation issue in one pass.
//! - **Renderer (`render`)**: expands named `minijinja` templates against a
//!   merged document.
//! - **Phases (`phases`)**: the typed `Merged → Validated → Rendered`
//!   pipeline, plus writing results and comparing them with disk.
//!
//! Loading (`config`) and writing (`phases::write`) sit at the edges; the
//! resolver and renderer themselves never touch the filesystem.

pub mod config;
pub mod defaults;
pub mod document;
pub mod error;
pub mod output;
pub mod path;
pub mod phases;
pub mod render;
pub mod resolver;
pub mod schema;
pub mod suggestions;

#[cfg(test)]
mod path_proptest;
