//! License notices at the top of Python files.
//!
//! When `license.add_to_files` is on, the `license.text` is written as a
//! `#` comment block at the start of every generated Python file, and
//! `check --files` expects the same block in the project's own sources.

use serde_yaml::Value;

use crate::document::ConfigDocument;

/// The notice text, when `license.add_to_files` is enabled and text is set.
pub fn license_notice(doc: &ConfigDocument) -> Option<&str> {
    if doc.get("license.add_to_files").and_then(Value::as_bool) != Some(true) {
        return None;
    }
    doc.get("license.text")
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
}

/// `text` as a block of Python comments, one `# ` line per input line.
///
/// Empty lines become a bare `#`. The block always ends with a newline.
pub fn comment_block(text: &str) -> String {
    text.trim_end()
        .lines()
        .map(|line| {
            let line = line.trim_end();
            if line.is_empty() {
                "#\n".to_string()
            } else {
                format!("# {line}\n")
            }
        })
        .collect()
}
