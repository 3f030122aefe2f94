//! End-to-end tests for the `check` command
//!
//! These tests invoke the actual CLI binary and validate its behavior
//! from a user's perspective.

mod common;

use common::prelude::*;

#[test]
fn test_check_help() {
    TestFixture::new()
        .command()
        .arg("check")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--files"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn test_check_minimal_config() {
    let fixture = TestFixture::new().with_minimal_config();

    fixture
        .command()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("[OK] Configuration is valid"));
}

#[test]
fn test_check_reports_every_error() {
    let fixture = TestFixture::new().with_config(configs::TWO_ERRORS);

    fixture
        .command()
        .arg("check")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains(
            "error ci.deploy: deployment is enabled but pypi_user and token_var not set [missing_credentials]",
        ))
        .stdout(predicate::str::contains(
            "error style.max_line_length: must be between 1 and 500, found -5 [out_of_range]",
        ))
        .stdout(predicate::str::contains("Found 2 error(s) and 0 warning(s)"))
        .stderr(predicate::str::contains("2 error(s) found in"));
}

#[test]
fn test_check_warnings_do_not_fail() {
    let fixture = TestFixture::new().with_config(configs::WARNING_ONLY);

    fixture
        .command()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("warning docs.logo_color"))
        .stdout(predicate::str::contains("valid with 1 warning(s)"));
}

#[test]
fn test_check_unknown_key_suggests_fix() {
    let fixture = TestFixture::new().with_config(configs::UNKNOWN_KEY);

    fixture
        .command()
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Schema mismatch at 'style.max_line_lenght': unknown key",
        ))
        .stderr(predicate::str::contains("hint: Did you mean 'max_line_length'?"));
}

#[test]
fn test_check_invalid_yaml() {
    let fixture = TestFixture::new().with_config(configs::INVALID_YAML);

    fixture
        .command()
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("YAML parsing error"));
}

#[test]
fn test_check_json_format() {
    let fixture = TestFixture::new().with_config(configs::TWO_ERRORS);

    let output = fixture
        .command()
        .arg("check")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(!output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["errors"], 2);
    assert_eq!(report["warnings"], 0);
    let issues = report["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[1]["path"], "style.max_line_length");
    assert_eq!(issues[1]["kind"], "out_of_range");
    assert_eq!(issues[1]["severity"], "error");
    assert!(report.get("files").is_none());
}

#[test]
fn test_check_missing_default_config() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No .bones.yml found"));
}

#[test]
fn test_check_missing_explicit_config() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .arg("check")
        .arg("--config")
        .arg(fixture.path().join("nope.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"))
        .stderr(predicate::str::contains("hint: Set BONES_CONFIG"));
}

#[test]
fn test_check_config_from_environment() {
    let fixture = TestFixture::new().with_file("conf/project.yml", configs::MINIMAL);

    fixture
        .command()
        .env("BONES_CONFIG", fixture.path().join("conf/project.yml"))
        .arg("check")
        .assert()
        .success();
}

#[test]
fn test_check_finds_config_in_parent() {
    let fixture = TestFixture::new()
        .with_config(configs::TWO_ERRORS)
        .with_file("pkg/sub/.keep", "");

    fixture
        .command()
        .current_dir(fixture.path().join("pkg/sub"))
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Found 2 error(s)"));
}

#[test]
fn test_check_toml_config() {
    let fixture = TestFixture::new().with_file(
        ".bones.toml",
        "project_name = \"Demo\"\npkg_name = \"demo\"\nrepo_name = \"org/demo\"\n\n[style]\nmax_line_length = 0\n",
    );

    fixture
        .command()
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("error style.max_line_length"));
}

#[test]
fn test_check_files_before_and_after_generate() {
    let fixture = TestFixture::new().with_minimal_config();

    fixture
        .command()
        .arg("check")
        .arg("--files")
        .assert()
        .failure()
        .stdout(predicate::str::contains("setup.py: missing"))
        .stderr(predicate::str::contains("need updating"));

    fixture.command().arg("generate").assert().success();

    fixture
        .command()
        .arg("check")
        .arg("--files")
        .assert()
        .success()
        .stdout(predicate::str::contains("generated file(s) up to date"));
}

#[test]
fn test_check_files_reports_stale_line() {
    let fixture = TestFixture::new().with_minimal_config();
    fixture.command().arg("generate").assert().success();

    fixture
        .child(".bones.yml")
        .write_str(&format!("{}codecov:\n  diff_target: 90%\n", configs::MINIMAL))
        .unwrap();

    fixture
        .command()
        .arg("check")
        .arg("--files")
        .arg("--verbose")
        .assert()
        .failure()
        .stdout(predicate::str::contains(".codecov.yml: out of date"))
        .stdout(predicate::str::contains("expected:         target: 90%"))
        .stdout(predicate::str::contains("found:            target: 100%"))
        .stdout(predicate::str::contains("setup.py: up to date"));
}

#[test]
fn test_check_files_ignores_marked_lines() {
    let fixture = TestFixture::new().with_minimal_config();
    fixture.command().arg("generate").assert().success();

    let manifest = fixture.path().join("MANIFEST.in");
    let mut text = std::fs::read_to_string(&manifest).unwrap();
    text.push_str("include local.txt  # bones: ignore\n");
    std::fs::write(&manifest, text).unwrap();

    fixture
        .command()
        .arg("check")
        .arg("--files")
        .assert()
        .success();
}

#[test]
fn test_check_files_hand_written() {
    let fixture = TestFixture::new()
        .with_minimal_config()
        .with_file("setup.py", "from setuptools import setup\nsetup()\n");

    fixture
        .command()
        .arg("check")
        .arg("--files")
        .assert()
        .failure()
        .stdout(predicate::str::contains("setup.py: not generated by bones"));
}

#[test]
fn test_check_files_ignores_ci_scripts() {
    let fixture = TestFixture::new().with_config(configs::FULL);
    fixture.command().arg("generate").assert().success();
    std::fs::remove_dir_all(fixture.path().join(".ci")).unwrap();

    fixture
        .command()
        .arg("check")
        .arg("--files")
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains(".ci/").not());
}

#[test]
fn test_check_files_license_notice() {
    let config = format!(
        "{}license:\n  add_to_files: true\n  text: Copyright (c) Demo Team\n",
        configs::MINIMAL
    );
    let fixture = TestFixture::new()
        .with_config(&config)
        .with_file("demo/__init__.py", "# Copyright (c) Demo Team\n\nimport os\n")
        .with_file("demo/core.py", "import os\n");
    fixture.command().arg("generate").assert().success();

    fixture
        .command()
        .arg("check")
        .arg("--files")
        .assert()
        .failure()
        .stdout(predicate::str::contains("demo/core.py: missing license notice"))
        .stdout(predicate::str::contains("3/4 Python file(s) carry the license notice"))
        .stderr(predicate::str::contains(
            "1 Python file(s) missing the license notice",
        ));

    fixture
        .child("demo/core.py")
        .write_str("# Copyright (c) Demo Team\nimport os\n")
        .unwrap();

    fixture
        .command()
        .arg("check")
        .arg("--files")
        .assert()
        .success();
}

#[test]
fn test_check_rejects_escaping_script_name() {
    let config = format!(
        "{}ci:\n  scripts:\n    - template: static\n      output_name: ../../escaped\n",
        configs::MINIMAL
    );
    let fixture = TestFixture::new().with_config(&config);

    fixture
        .command()
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "error ci.scripts[0].output_name",
        ))
        .stdout(predicate::str::contains("[invalid_format]"));
}
