//! Property-based tests for key paths.

#[cfg(test)]
mod proptest_tests {
    use crate::path::{lookup, KeyPath, PathSegment};
    use proptest::prelude::*;
    use serde_yaml::{Mapping, Value};

    fn segment() -> impl Strategy<Value = PathSegment> {
        prop_oneof![
            "[a-z_][a-z0-9_]{0,8}".prop_map(PathSegment::Key),
            (0usize..4).prop_map(PathSegment::Index),
        ]
    }

    /// Paths start with a key, as every configuration path does.
    fn key_path() -> impl Strategy<Value = KeyPath> {
        ("[a-z_][a-z0-9_]{0,8}", prop::collection::vec(segment(), 0..5)).prop_map(
            |(first, rest)| {
                rest.into_iter().fold(KeyPath::root().child(&first), |path, seg| match seg {
                    PathSegment::Key(key) => path.child(&key),
                    PathSegment::Index(idx) => path.index(idx),
                })
            },
        )
    }

    /// Build a value in which `path` leads to `leaf`.
    fn nest(path: &[PathSegment], leaf: Value) -> Value {
        match path.split_first() {
            None => leaf,
            Some((PathSegment::Key(key), rest)) => {
                let mut map = Mapping::new();
                map.insert(Value::from(key.as_str()), nest(rest, leaf));
                Value::Mapping(map)
            }
            Some((PathSegment::Index(idx), rest)) => {
                let mut seq = vec![Value::Null; *idx];
                seq.push(nest(rest, leaf));
                Value::Sequence(seq)
            }
        }
    }

    proptest! {
        /// Printing a path and parsing it back gives the same path.
        #[test]
        fn display_then_parse_is_identity(path in key_path()) {
            prop_assert_eq!(KeyPath::parse(&path.to_string()), path);
        }

        /// Extending a path keeps the original as a prefix and sorts after it.
        #[test]
        fn child_extends_and_sorts_after(path in key_path(), key in "[a-z]{1,6}") {
            let child = path.child(&key);
            prop_assert!(child.starts_with(&path));
            prop_assert_eq!(child.len(), path.len() + 1);
            prop_assert!(path < child);
        }

        /// Lookup follows a path through the tree it describes.
        #[test]
        fn lookup_finds_nested_leaf(path in key_path(), leaf in any::<i64>()) {
            let root = nest(path.segments(), Value::from(leaf));
            prop_assert_eq!(lookup(&root, &path), Some(&Value::from(leaf)));
        }
    }
}
