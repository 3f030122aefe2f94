//! Checking Python sources for the license notice.
//!
//! Every `*.py` file under the project root must open with the notice
//! comment block. A shebang line, an encoding declaration and blank lines
//! may come before it. Build output, caches and virtual environments are
//! not searched.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::render::comment_block;

/// Directories never searched for Python sources.
const SKIP_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".tox",
    ".nox",
    ".venv",
    "venv",
    ".eggs",
    ".mypy_cache",
    ".pytest_cache",
    "__pycache__",
    "build",
    "dist",
    "node_modules",
];

/// Whether one Python file carries the notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoticeReport {
    pub path: PathBuf,
    pub present: bool,
}

/// Check every Python file under `root` for `text` as a comment block.
///
/// Reports are sorted by path, relative to `root`.
pub fn check(root: &Path, text: &str) -> Result<Vec<NoticeReport>> {
    let block = comment_block(text);
    let mut reports = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| SKIP_DIRS.contains(&name))
        });

    for entry in walker {
        let entry = entry.map_err(|e| Error::Filesystem {
            message: format!("Failed to search '{}': {}", root.display(), e),
        })?;
        let is_python = entry.path().extension().is_some_and(|ext| ext == "py");
        if !entry.file_type().is_file() || !is_python {
            continue;
        }

        let bytes = fs::read(entry.path()).map_err(|e| Error::Filesystem {
            message: format!("Failed to read '{}': {}", entry.path().display(), e),
        })?;
        let path = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_path_buf();
        reports.push(NoticeReport {
            path,
            present: has_notice(&String::from_utf8_lossy(&bytes), &block),
        });
    }

    debug!(
        "Checked {} Python file(s) under {} for the license notice",
        reports.len(),
        root.display()
    );
    Ok(reports)
}

/// Whether `content` opens with `block` once the preamble is skipped.
pub fn has_notice(content: &str, block: &str) -> bool {
    let mut rest = content;
    while let Some((line, tail)) = rest.split_once('\n') {
        if !is_preamble(line) {
            break;
        }
        rest = tail;
    }
    rest.starts_with(block)
}

fn is_preamble(line: &str) -> bool {
    let line = line.trim();
    line.is_empty()
        || line.starts_with("#!")
        || (line.starts_with('#') && (line.contains("coding:") || line.contains("coding=")))
}
