//! Key paths into nested configuration documents
//!
//! A [`KeyPath`] names one location in a configuration tree, such as
//! `style.max_line_length` or `ci.scripts[0].template`. Paths are used to
//! report schema mismatches and validation issues, and by templates' namespace
//! lookups.
//!
//! Paths order segment by segment (a path sorts before its extensions), which
//! gives validation reports a stable order.

use serde::{Serialize, Serializer};
use serde_yaml::{Mapping, Value};
use std::fmt;

/// Represents a segment in a path expression for navigating nested structures
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathSegment {
    /// A named key for accessing mapping members
    Key(String),
    /// A numeric index for accessing sequence elements
    Index(usize),
}

/// A location inside a configuration document.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyPath {
    segments: Vec<PathSegment>,
}

impl KeyPath {
    /// The empty path, naming the document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dotted path such as `ci.scripts[0].template`.
    ///
    /// # Examples
    ///
    /// ```
    /// use repo_bones::path::KeyPath;
    ///
    /// let path = KeyPath::parse("ci.scripts[0].template");
    /// assert_eq!(path.len(), 4);
    /// assert_eq!(path.to_string(), "ci.scripts[0].template");
    /// ```
    pub fn parse(path: &str) -> Self {
        Self {
            segments: parse_path(path),
        }
    }

    /// A new path extended by a mapping key.
    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.to_string()));
        Self { segments }
    }

    /// A new path extended by a sequence index.
    pub fn index(&self, idx: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(idx));
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether `self` equals `other` or lies underneath it.
    pub fn starts_with(&self, other: &KeyPath) -> bool {
        self.segments.starts_with(&other.segments)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "<root>");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{}", key)?,
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

impl Serialize for KeyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<&str> for KeyPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

/// Follow `path` from `root`, returning the value found there.
///
/// Key segments descend into mappings and index segments into sequences;
/// anything else ends the walk with `None`.
pub fn lookup<'a>(root: &'a Value, path: &KeyPath) -> Option<&'a Value> {
    descend(root, path.segments())
}

/// Like [`lookup`], starting from a mapping rather than a value.
///
/// The root path has no value inside a bare mapping and yields `None`.
pub fn lookup_in<'a>(map: &'a Mapping, path: &KeyPath) -> Option<&'a Value> {
    let (first, rest) = path.segments().split_first()?;
    let PathSegment::Key(key) = first else {
        return None;
    };
    descend(map.get(key.as_str())?, rest)
}

fn descend<'a>(root: &'a Value, segments: &[PathSegment]) -> Option<&'a Value> {
    let mut current = root;
    for segment in segments {
        current = match (segment, current) {
            (PathSegment::Key(key), Value::Mapping(map)) => map.get(key.as_str())?,
            (PathSegment::Index(idx), Value::Sequence(seq)) => seq.get(*idx)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Human-readable name of a YAML value's type, used in messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// `name` preceded by "a" or "an", for messages such as "found an integer".
pub fn with_article(name: &str) -> String {
    let article = match name.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    };
    format!("{article} {name}")
}

/// Parse a path string into segments
///
/// Supports:
/// - Dot notation: `foo.bar.baz`
/// - Bracket notation: `foo["bar"]` or `foo['bar']`
/// - Array indices: `foo[0]` or `items[1].name`
/// - Escaped characters: `foo\.bar` (literal dot)
pub fn parse_path(path: &str) -> Vec<PathSegment> {
    if path.trim().is_empty() {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();
    let mut escaped = false;

    while let Some(ch) = chars.next() {
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }

        match ch {
            '\\' => {
                escaped = true;
            }
            '.' => {
                if !current.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut current)));
                }
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut current)));
                }

                match chars.peek().copied() {
                    Some(quote_char @ ('"' | '\'')) => {
                        chars.next();
                        let mut key = String::new();
                        let mut bracket_escaped = false;

                        while let Some(ch) = chars.next() {
                            if bracket_escaped {
                                key.push(ch);
                                bracket_escaped = false;
                            } else if ch == '\\' {
                                bracket_escaped = true;
                            } else if ch == quote_char {
                                if chars.peek() == Some(&']') {
                                    chars.next();
                                    break;
                                }
                                key.push(ch);
                            } else {
                                key.push(ch);
                            }
                        }

                        segments.push(PathSegment::Key(key));
                    }
                    _ => {
                        let mut bracket_content = String::new();
                        for next_ch in chars.by_ref() {
                            if next_ch == ']' {
                                break;
                            }
                            bracket_content.push(next_ch);
                        }

                        let trimmed = bracket_content.trim();
                        if let Ok(idx) = trimmed.parse::<usize>() {
                            segments.push(PathSegment::Index(idx));
                        } else if !trimmed.is_empty() {
                            segments.push(PathSegment::Key(trimmed.to_string()));
                        }
                    }
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(PathSegment::Key(current));
    }

    segments
}
