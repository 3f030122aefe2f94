//! # Error Suggestions
//!
//! This module provides helper functions for generating helpful error
//! messages with hints and suggestions. Errors should tell users what went
//! wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::suggestions;
//!
//! // Instead of:
//! anyhow::bail!("Configuration file not found: {}", path.display());
//!
//! // Use:
//! return Err(suggestions::config_not_found(path));
//! ```

use std::path::Path;

/// Generate an error for when the configuration file is not found.
///
/// Includes hints about:
/// - Creating a new config file
/// - Using the -c/--config flag
/// - Using the BONES_CONFIG environment variable
pub fn config_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Configuration file not found: {path}\n\n\
         hint: Create a .bones.yml file in your project root\n\
         hint: Use -c/--config to specify a different path\n\
         hint: Set BONES_CONFIG environment variable",
        path = path.display()
    )
}

/// Generate an error for when no configuration file exists above `start`.
pub fn config_not_discovered(start: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "No .bones.yml found in {start} or any parent directory\n\n\
         hint: Run bones from inside the repository you want to manage\n\
         hint: Use -c/--config to specify the configuration file",
        start = start.display()
    )
}

/// Hint for an unknown configuration key.
///
/// Suggests the closest recognised key when one is within a small edit
/// distance, otherwise lists the recognised keys.
pub fn unknown_key(key: &str, candidates: &[&str]) -> String {
    match find_similar(key, candidates) {
        Some(similar) => format!("Did you mean '{similar}'?"),
        None if candidates.is_empty() => "This section accepts no keys".to_string(),
        None => format!("Recognised keys are: {}", candidates.join(", ")),
    }
}

/// Hint for a scalar given where a list was expected.
pub fn expected_list(key: &str) -> String {
    format!("'{key}' should be a list; did you forget to add '-' before each entry?")
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Two-row dynamic programme over the edit matrix.
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0usize; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}
