//! The merged configuration document.

use serde_yaml::{Mapping, Value};

use crate::error::Result;
use crate::path::{self, KeyPath};

/// A repository's configuration after defaults have been filled in.
///
/// Produced by [`ConfigResolver::merge`](crate::resolver::ConfigResolver::merge).
/// Keys follow the schema's declaration order, so two merges of equal input
/// compare (and serialize) identically.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    root: Mapping,
}

impl ConfigDocument {
    /// Wrap an existing mapping without merging it.
    ///
    /// Documents built this way skip the schema walk, so validation may find
    /// them malformed.
    pub fn from_mapping(root: Mapping) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Mapping {
        &self.root
    }

    /// Look up a dotted path such as `ci.python_versions[0]`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.get_path(&KeyPath::parse(path))
    }

    pub fn get_path(&self, path: &KeyPath) -> Option<&Value> {
        path::lookup_in(&self.root, path)
    }

    /// A top-level section as a mapping.
    pub fn section(&self, name: &str) -> Option<&Mapping> {
        self.root.get(name).and_then(Value::as_mapping)
    }

    /// The document as a plain raw value, suitable for feeding back into merge.
    pub fn as_raw(&self) -> Value {
        Value::Mapping(self.root.clone())
    }

    /// Serialize the document as YAML text.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.root)?)
    }
}
