//! Shared test utilities for integration and E2E tests.
//!
//! Add `mod common;` to a test file, then `use common::prelude::*;`.

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    pub use super::TestFixture;
}

/// Configuration snippets shared by the tests.
#[allow(dead_code)]
pub mod configs {
    /// The three required names and nothing else.
    pub const MINIMAL: &str = "\
project_name: Demo Project
pkg_name: demo
repo_name: org/demo
";

    /// A configuration touching every section, valid without warnings.
    pub const FULL: &str = "\
project_name: Demo Project
pkg_name: demo
repo_name: org/demo
author: Demo Team
author_email: team@example.com
copyright_start: 2019
copyright_end: 2024
ci:
  python_versions: ['3.8', '3.9']
  pip_install: [numpy]
  scripts:
    - template: static
    - template: test
      output_name: test-coverage
      coverage: true
style:
  max_line_length: 88
  black:
    enabled: true
  pre_commit:
    enabled: true
codecov:
  abs_target: 95%
license:
  type: mit
";

    /// Out-of-range line length plus a deploy without credentials.
    pub const TWO_ERRORS: &str = "\
project_name: Demo Project
pkg_name: demo
repo_name: org/demo
style:
  max_line_length: -5
ci:
  deploy:
    enabled: true
";

    /// A key no section recognises.
    pub const UNKNOWN_KEY: &str = "\
project_name: Demo Project
pkg_name: demo
repo_name: org/demo
style:
  max_line_lenght: 100
";

    /// Only a warning: an invalid logo colour.
    pub const WARNING_ONLY: &str = "\
project_name: Demo Project
pkg_name: demo
repo_name: org/demo
docs:
  logo_color: grey
";

    pub const INVALID_YAML: &str = "project_name: [unclosed\n";
}

/// A temporary project directory, optionally holding a `.bones.yml`.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child(".bones.yml")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    pub fn with_minimal_config(self) -> Self {
        self.with_config(configs::MINIMAL)
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join(".bones.yml")
    }

    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// A `bones` command running in this fixture's directory.
    ///
    /// `BONES_CONFIG` and `RUST_LOG` are cleared so the host environment
    /// does not leak into the test.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("bones");
        cmd.current_dir(self.path())
            .env_remove("BONES_CONFIG")
            .env_remove("RUST_LOG")
            .arg("--color")
            .arg("never");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
