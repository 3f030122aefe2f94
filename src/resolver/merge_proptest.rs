//! Property-based tests for the schema-driven merge.
//!
//! These tests generate sparse override documents and check the merge laws
//! (defaults, locality of overrides, idempotence, unknown-key rejection)
//! against the built-in schema.

#[cfg(test)]
mod proptest_tests {
    use crate::error::Error;
    use crate::path::KeyPath;
    use crate::resolver::merge::merge;
    use crate::schema::Schema;
    use proptest::prelude::*;
    use serde_yaml::{Mapping, Value};

    /// Paths touched by [`overrides`], used to check locality.
    const OVERRIDABLE: &[&str] = &[
        "style.max_line_length",
        "ci.python_versions",
        "codecov.diff_target",
        "docs.logo_color",
        "vars.extra",
    ];

    fn set(root: &mut Mapping, path: &str, value: Value) {
        let mut segments: Vec<&str> = path.split('.').collect();
        let Some(last) = segments.pop() else {
            return;
        };
        let mut current = root;
        for segment in segments {
            let entry = current
                .entry(Value::from(segment))
                .or_insert_with(|| Value::Mapping(Mapping::new()));
            current = match entry {
                Value::Mapping(map) => map,
                _ => unreachable!("test helper only nests mappings"),
            };
        }
        current.insert(Value::from(last), value);
    }

    prop_compose! {
        fn overrides()(
            line_length in proptest::option::of(1i64..=500),
            versions in proptest::option::of(proptest::collection::vec("3\\.[0-9]{1,2}", 0..4)),
            diff_target in proptest::option::of("[0-9]{1,2}%"),
            logo_color in proptest::option::of("#[0-9a-f]{6}"),
            extra in proptest::option::of("[a-z ]{0,10}"),
        ) -> Vec<(&'static str, Value)> {
            let mut chosen = Vec::new();
            if let Some(n) = line_length {
                chosen.push(("style.max_line_length", Value::from(n)));
            }
            if let Some(versions) = versions {
                chosen.push((
                    "ci.python_versions",
                    Value::Sequence(versions.into_iter().map(Value::from).collect()),
                ));
            }
            if let Some(target) = diff_target {
                chosen.push(("codecov.diff_target", Value::from(target)));
            }
            if let Some(colour) = logo_color {
                chosen.push(("docs.logo_color", Value::from(colour)));
            }
            if let Some(extra) = extra {
                chosen.push(("vars.extra", Value::from(extra)));
            }
            chosen
        }
    }

    fn build_raw(entries: &[(&'static str, Value)]) -> Value {
        let mut root = Mapping::new();
        for (path, value) in entries {
            set(&mut root, path, value.clone());
        }
        Value::Mapping(root)
    }

    proptest! {
        /// Property: supplied paths take the supplied value, all others keep the default
        #[test]
        fn merge_overrides_only_supplied_paths(entries in overrides()) {
            let schema = Schema::builtin();
            let defaults = merge(&Value::Null, &schema).unwrap();
            let merged = merge(&build_raw(&entries), &schema).unwrap();

            for path in OVERRIDABLE {
                let key = KeyPath::parse(path);
                match entries.iter().find(|(p, _)| p == path) {
                    Some((_, value)) => prop_assert_eq!(merged.get_path(&key), Some(value)),
                    None => prop_assert_eq!(merged.get_path(&key), defaults.get_path(&key)),
                }
            }
            prop_assert_eq!(merged.get("packaging"), defaults.get("packaging"));
            prop_assert_eq!(merged.get("license"), defaults.get("license"));
        }

        /// Property: merging a merged document again changes nothing
        #[test]
        fn merge_is_idempotent(entries in overrides()) {
            let schema = Schema::builtin();
            let once = merge(&build_raw(&entries), &schema).unwrap();
            let twice = merge(&once.as_raw(), &schema).unwrap();
            prop_assert_eq!(once, twice);
        }

        /// Property: an unknown key under a fixed section is rejected by exact path
        #[test]
        fn merge_rejects_unknown_keys(key in "[a-z][a-z_]{0,11}") {
            let schema = Schema::builtin();
            prop_assume!(schema.field_at(&KeyPath::parse("style").child(&key)).is_none());

            let mut root = Mapping::new();
            set(&mut root, &format!("style.{key}"), Value::from(1));
            let err = merge(&Value::Mapping(root), &schema).unwrap_err();
            match err {
                Error::SchemaMismatch { path, .. } => prop_assert_eq!(path, format!("style.{key}")),
                other => prop_assert!(false, "unexpected error: {:?}", other),
            }
        }

        /// Property: open mappings accept any key
        #[test]
        fn merge_accepts_any_key_in_open_mapping(key in "[a-z][a-z_]{0,11}", value in any::<i64>()) {
            let schema = Schema::builtin();
            let mut root = Mapping::new();
            set(&mut root, &format!("vars.{key}"), Value::from(value));
            let merged = merge(&Value::Mapping(root), &schema).unwrap();
            let expected = Value::from(value);
            prop_assert_eq!(merged.get_path(&KeyPath::parse("vars").child(&key)), Some(&expected));
        }
    }
}
