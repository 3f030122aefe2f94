//! Section-specific semantic rules
//!
//! Each rule reads the merged document through a [`RuleContext`], which
//! hides values that already failed the generic type check. Rules never stop
//! early: every applicable check runs and pushes its own issue.

use std::collections::HashSet;

use regex::Regex;
use serde_yaml::Value;

use crate::document::ConfigDocument;
use crate::path::{type_name, with_article, KeyPath};

use super::issue::{IssueKind, ValidationIssue};

/// Upper bound for `style.max_line_length`.
pub const MAX_LINE_LENGTH: i64 = 500;

/// Script entry keys that must hold lists.
const SCRIPT_LIST_KEYS: &[&str] = &["pip_install", "pre_commands", "post_commands"];

type Rule = fn(&mut RuleContext<'_>);

/// Rules applied to each section. Issues are sorted afterwards, so order here is free.
const SECTION_RULES: &[(&str, Rule)] = &[
    ("ci", check_ci),
    ("style", check_style),
    ("packaging", check_packaging),
    ("codecov", check_codecov),
    ("docs", check_docs),
    ("license", check_license),
    ("top-level", check_copyright),
];

/// Compiled patterns used by the format rules.
#[derive(Debug)]
pub struct Patterns {
    python_version: Regex,
    version: Regex,
    coverage_target: Regex,
    hex_colour: Regex,
}

impl Patterns {
    pub fn compile() -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            python_version: Regex::new(r"^\d+(\.\d+)?$")?,
            version: Regex::new(r"^\d+(\.\d+)*((a|b|rc)\d+)?(\.post\d+)?(\.dev\d+)?$")?,
            coverage_target: Regex::new(r"^(auto|\d+(\.\d+)?%)$")?,
            hex_colour: Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$")?,
        })
    }
}

/// Read access to the document plus the issue sink for one rule pass.
pub struct RuleContext<'a> {
    doc: &'a ConfigDocument,
    skip: &'a HashSet<KeyPath>,
    patterns: &'a Patterns,
    issues: Vec<ValidationIssue>,
}

impl<'a> RuleContext<'a> {
    pub fn new(doc: &'a ConfigDocument, skip: &'a HashSet<KeyPath>, patterns: &'a Patterns) -> Self {
        Self {
            doc,
            skip,
            patterns,
            issues: Vec::new(),
        }
    }

    /// The non-null value at `path`, unless it failed the generic checks.
    fn get(&self, path: &KeyPath) -> Option<&'a Value> {
        if self.skip.contains(path) {
            return None;
        }
        self.doc.get_path(path).filter(|value| !value.is_null())
    }

    fn get_str(&self, path: &KeyPath) -> Option<&'a str> {
        self.get(path).and_then(Value::as_str)
    }

    fn get_bool(&self, path: &KeyPath) -> Option<bool> {
        self.get(path).and_then(Value::as_bool)
    }

    fn error(&mut self, path: KeyPath, kind: IssueKind, message: impl Into<String>) {
        self.issues.push(ValidationIssue::error(path, kind, message));
    }

    fn warning(&mut self, path: KeyPath, kind: IssueKind, message: impl Into<String>) {
        self.issues.push(ValidationIssue::warning(path, kind, message));
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }
}

/// Run every section rule against the document.
pub fn run_all(ctx: &mut RuleContext<'_>) {
    for (name, rule) in SECTION_RULES {
        log::trace!("Applying {} rules", name);
        rule(ctx);
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |text| text.trim().is_empty())
}

fn check_ci(ctx: &mut RuleContext<'_>) {
    let deploy = KeyPath::parse("ci.deploy");
    if ctx.get_bool(&deploy.child("enabled")) == Some(true) {
        let missing: Vec<&str> = ["pypi_user", "token_var"]
            .into_iter()
            .filter(|key| {
                let path = deploy.child(key);
                !ctx.skip.contains(&path) && is_blank(ctx.get_str(&path))
            })
            .collect();
        if !missing.is_empty() {
            ctx.error(
                deploy,
                IssueKind::MissingCredentials,
                format!("deployment is enabled but {} not set", missing.join(" and ")),
            );
        }
    }

    let versions = KeyPath::parse("ci.python_versions");
    if let Some(Value::Sequence(items)) = ctx.get(&versions) {
        if items.is_empty() {
            ctx.error(
                versions.clone(),
                IssueKind::EmptyValue,
                "at least one Python version is required",
            );
        }
        for idx in 0..items.len() {
            let item_path = versions.index(idx);
            if let Some(version) = ctx.get_str(&item_path) {
                if !ctx.patterns.python_version.is_match(version) {
                    ctx.error(
                        item_path,
                        IssueKind::InvalidFormat,
                        format!("'{version}' is not a Python version like '3' or '3.9'"),
                    );
                }
            }
        }
    }

    let scripts = KeyPath::parse("ci.scripts");
    if let Some(Value::Sequence(entries)) = ctx.get(&scripts) {
        for (idx, entry) in entries.iter().enumerate() {
            check_script(ctx, scripts.index(idx), entry);
        }
    }

    let jobs = KeyPath::parse("ci.jobs");
    if let Some(Value::Sequence(entries)) = ctx.get(&jobs) {
        for (idx, entry) in entries.iter().enumerate() {
            if !entry.is_mapping() {
                ctx.error(
                    jobs.index(idx),
                    IssueKind::TypeMismatch,
                    format!(
                        "a CI job must be a mapping, found {}",
                        with_article(type_name(entry))
                    ),
                );
            }
        }
    }
}

fn check_script(ctx: &mut RuleContext<'_>, path: KeyPath, entry: &Value) {
    let Some(script) = entry.as_mapping() else {
        ctx.error(
            path,
            IssueKind::TypeMismatch,
            format!(
                "a CI script must be a mapping, found {}",
                with_article(type_name(entry))
            ),
        );
        return;
    };

    match script.get("template") {
        Some(Value::String(_)) => {}
        None | Some(Value::Null) => ctx.error(
            path.child("template"),
            IssueKind::MissingRequired,
            "a CI script needs a 'template' name",
        ),
        Some(other) => ctx.error(
            path.child("template"),
            IssueKind::TypeMismatch,
            format!(
                "the script 'template' must be a string, found {}",
                with_article(type_name(other))
            ),
        ),
    }

    match script.get("output_name") {
        None | Some(Value::Null) => {}
        Some(Value::String(name)) => {
            if !is_plain_file_name(name) {
                ctx.error(
                    path.child("output_name"),
                    IssueKind::InvalidFormat,
                    format!("'{name}' must be a plain file name without '/', '\\' or '..'"),
                );
            }
        }
        Some(other) => ctx.error(
            path.child("output_name"),
            IssueKind::TypeMismatch,
            format!("expected a string, found {}", with_article(type_name(other))),
        ),
    }

    for key in SCRIPT_LIST_KEYS {
        match script.get(*key) {
            None | Some(Value::Null) | Some(Value::Sequence(_)) => {}
            Some(other) => ctx.error(
                path.child(key),
                IssueKind::TypeMismatch,
                format!(
                    "expected a list, found {}; did you forget to add '-' before each entry?",
                    with_article(type_name(other))
                ),
            ),
        }
    }
}

/// A script name that stays inside the CI script directory.
fn is_plain_file_name(name: &str) -> bool {
    !name.trim().is_empty() && !name.contains(['/', '\\']) && !name.contains("..")
}

fn check_style(ctx: &mut RuleContext<'_>) {
    let line_length = KeyPath::parse("style.max_line_length");
    if let Some(value) = ctx.get(&line_length) {
        let in_range = value
            .as_i64()
            .map_or(false, |n| (1..=MAX_LINE_LENGTH).contains(&n));
        if !in_range {
            let shown = serde_yaml::to_string(value).unwrap_or_default();
            ctx.error(
                line_length,
                IssueKind::OutOfRange,
                format!(
                    "must be between 1 and {MAX_LINE_LENGTH}, found {}",
                    shown.trim_end()
                ),
            );
        }
    }

    let black = ctx.get_bool(&KeyPath::parse("style.black.enabled"));
    let pre_commit = ctx.get_bool(&KeyPath::parse("style.pre_commit.enabled"));
    match (black, pre_commit) {
        (Some(black), Some(pre_commit)) if black != pre_commit => {
            ctx.error(
                KeyPath::parse("style.pre_commit.enabled"),
                IssueKind::Conflict,
                format!(
                    "black and pre_commit must be enabled together (black: {black}, pre_commit: {pre_commit})"
                ),
            );
        }
        (Some(true), Some(true)) => {
            let black_exclude = ctx.get(&KeyPath::parse("style.black.exclude"));
            let pre_commit_path = KeyPath::parse("style.pre_commit.exclude");
            let pre_commit_exclude = ctx.get(&pre_commit_path);
            if let (Some(black_exclude), Some(pre_commit_exclude)) =
                (black_exclude, pre_commit_exclude)
            {
                if black_exclude != pre_commit_exclude {
                    ctx.error(
                        pre_commit_path,
                        IssueKind::Conflict,
                        "must match style.black.exclude so both formatters see the same files",
                    );
                }
            }
        }
        _ => {}
    }
}

fn check_packaging(ctx: &mut RuleContext<'_>) {
    let version = KeyPath::parse("packaging.version");
    if let Some(text) = ctx.get_str(&version) {
        if !ctx.patterns.version.is_match(text) {
            ctx.error(
                version,
                IssueKind::InvalidFormat,
                format!("'{text}' is not a valid release version (e.g. 1.2.0, 1.2.0rc1, 1.3.0.dev0)"),
            );
        }
    }

    for key in ["author", "author_email"] {
        let path = KeyPath::parse(key);
        if let Some(text) = ctx.get_str(&path) {
            if text.trim().is_empty() {
                ctx.error(path, IssueKind::EmptyValue, "must not be empty");
            }
        }
    }

    let email = KeyPath::parse("author_email");
    if let Some(text) = ctx.get_str(&email) {
        if !text.trim().is_empty() && !is_plausible_email(text) {
            ctx.warning(
                email,
                IssueKind::InvalidFormat,
                format!("'{text}' does not look like an email address"),
            );
        }
    }

    let url = KeyPath::parse("packaging.url");
    if let Some(text) = ctx.get_str(&url) {
        if !(text.starts_with("http://") || text.starts_with("https://")) {
            ctx.warning(
                url,
                IssueKind::InvalidFormat,
                format!("'{text}' should start with http:// or https://"),
            );
        }
    }
}

fn is_plausible_email(text: &str) -> bool {
    match text.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

fn check_codecov(ctx: &mut RuleContext<'_>) {
    for key in ["abs_target", "diff_target"] {
        let path = KeyPath::parse("codecov").child(key);
        if let Some(text) = ctx.get_str(&path) {
            if !ctx.patterns.coverage_target.is_match(text) {
                ctx.warning(
                    path,
                    IssueKind::InvalidFormat,
                    format!("'{text}' should be 'auto' or a percentage such as '95%'"),
                );
            }
        }
    }
}

fn check_docs(ctx: &mut RuleContext<'_>) {
    let colour = KeyPath::parse("docs.logo_color");
    if let Some(text) = ctx.get_str(&colour) {
        if !ctx.patterns.hex_colour.is_match(text) {
            ctx.warning(
                colour,
                IssueKind::InvalidFormat,
                format!("'{text}' is not a hex colour such as '#a8acaf'"),
            );
        }
    }
}

fn check_license(ctx: &mut RuleContext<'_>) {
    if ctx.get_bool(&KeyPath::parse("license.add_to_files")) == Some(true) {
        let text = KeyPath::parse("license.text");
        if !ctx.skip.contains(&text) && is_blank(ctx.get_str(&text)) {
            ctx.error(
                text,
                IssueKind::MissingRequired,
                "license text is required when add_to_files is enabled",
            );
        }
    }
}

fn check_copyright(ctx: &mut RuleContext<'_>) {
    let start = ctx.get(&KeyPath::parse("copyright_start")).and_then(Value::as_i64);
    let end_path = KeyPath::parse("copyright_end");
    let end = ctx.get(&end_path).and_then(Value::as_i64);
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            ctx.error(
                end_path,
                IssueKind::OutOfRange,
                format!("copyright_end ({end}) is before copyright_start ({start})"),
            );
        }
    }
}
