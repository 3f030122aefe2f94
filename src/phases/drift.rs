//! Comparing rendered output with files already on disk.
//!
//! Each rendered file is classified as up to date, missing, not generated by
//! bones (no marker near the top), or stale. Lines carrying the ignore marker
//! are left out of the comparison on both sides. Lines are compared with
//! their endings, so CRLF endings or a lost final newline count as stale.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::defaults::{GENERATED_MARKER, IGNORE_MARKER, MARKER_SEARCH_LINES};
use crate::error::{Error, Result};
use crate::render::RenderResult;

/// State of one generated file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    UpToDate,
    Missing,
    /// The file exists but carries no generated marker.
    NotGenerated,
    /// The content differs; `line` is 1-based in the file on disk.
    Stale {
        line: usize,
        expected: Option<String>,
        found: Option<String>,
    },
}

impl FileStatus {
    pub fn is_up_to_date(&self) -> bool {
        matches!(self, FileStatus::UpToDate)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: FileStatus,
}

/// Compare each result with the file at the same path under `root`.
pub fn check(results: &[RenderResult], root: &Path) -> Result<Vec<FileReport>> {
    results
        .iter()
        .map(|result| {
            let full_path = root.join(&result.output);
            let status = match fs::read(&full_path) {
                Ok(bytes) => compare(&result.content, &String::from_utf8_lossy(&bytes)),
                Err(e) if e.kind() == ErrorKind::NotFound => FileStatus::Missing,
                Err(e) => {
                    return Err(Error::Filesystem {
                        message: format!("Failed to read '{}': {}", full_path.display(), e),
                    })
                }
            };
            Ok(FileReport {
                path: result.output.clone(),
                status,
            })
        })
        .collect()
}

/// Classify `actual` against the freshly rendered `expected` text.
pub fn compare(expected: &str, actual: &str) -> FileStatus {
    let marked = actual
        .lines()
        .take(MARKER_SEARCH_LINES)
        .any(|line| line.contains(GENERATED_MARKER));
    if !marked {
        return FileStatus::NotGenerated;
    }

    let mut expected_lines = significant_lines(expected);
    let mut actual_lines = significant_lines(actual);
    let mut last_line = 0;

    loop {
        match (expected_lines.next(), actual_lines.next()) {
            (None, None) => return FileStatus::UpToDate,
            (Some((_, want)), Some((line, got))) if want == got => last_line = line,
            (want, got) => {
                return FileStatus::Stale {
                    line: got.map_or(last_line + 1, |(line, _)| line),
                    expected: want.map(|(_, text)| shown(text)),
                    found: got.map(|(_, text)| shown(text)),
                }
            }
        }
    }
}

fn significant_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split_inclusive('\n')
        .enumerate()
        .filter(|(_, line)| !line.contains(IGNORE_MARKER))
        .map(|(idx, line)| (idx + 1, line))
}

/// A compared line as printed in a report.
fn shown(line: &str) -> String {
    match line.strip_suffix('\n') {
        Some(body) => body.replace('\r', "\\r"),
        None => format!("{} (no newline at end of file)", line.replace('\r', "\\r")),
    }
}
