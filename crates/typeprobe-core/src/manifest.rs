//! Package.json model.
//!
//! Every field is optional and read leniently: a field holding an unexpected
//! JSON type reads as absent instead of failing the whole document. The
//! `exports` field is kept as an untyped [`ExportNode`] tree and probed
//! defensively by the resolver.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// File name of a package manifest.
pub const MANIFEST_FILE: &str = "package.json";

/// A node of the `exports` tree.
///
/// Conversion from JSON never fails: anything that is not a string or an
/// object (null, numbers, booleans, arrays) becomes [`ExportNode::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportNode {
    /// A literal path, e.g. `"./dist/index.js"`.
    Path(String),
    /// Subpath keys (`"."`, `"./feature"`) or condition names (`"import"`, `"default"`).
    Map(BTreeMap<String, ExportNode>),
    /// Any other JSON value.
    Other,
}

impl ExportNode {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Path(s) => Some(s),
            Self::Map(_) | Self::Other => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&BTreeMap<String, ExportNode>> {
        match self {
            Self::Map(map) => Some(map),
            Self::Path(_) | Self::Other => None,
        }
    }

    /// Look up a key when this node is a map.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ExportNode> {
        self.as_map()?.get(key)
    }
}

impl From<Value> for ExportNode {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::Path(s),
            Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::Array(_) => Self::Other,
        }
    }
}

impl<'de> Deserialize<'de> for ExportNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from)
    }
}

/// Parsed package.json.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub version: Option<String>,

    /// Runtime dependencies (name -> range).
    #[serde(default, deserialize_with = "lenient_ranges")]
    pub dependencies: BTreeMap<String, String>,

    /// Development dependencies (name -> range).
    #[serde(default, deserialize_with = "lenient_ranges")]
    pub dev_dependencies: BTreeMap<String, String>,

    /// Legacy declaration field. An empty string is kept as-is.
    #[serde(default, deserialize_with = "lenient_string")]
    pub types: Option<String>,

    /// Alias of `types`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub typings: Option<String>,

    /// `exports: null` reads as `None`.
    #[serde(default)]
    pub exports: Option<ExportNode>,
}

impl Manifest {
    /// Build a manifest from an already-parsed JSON value.
    ///
    /// Fails only when `value` is not an object.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Dependency names, unique and sorted.
    ///
    /// With `include_dev`, development dependencies are merged in.
    #[must_use]
    pub fn dependency_names(&self, include_dev: bool) -> Vec<String> {
        let mut names: BTreeSet<&str> = self.dependencies.keys().map(String::as_str).collect();
        if include_dev {
            names.extend(self.dev_dependencies.keys().map(String::as_str));
        }
        names.into_iter().map(str::to_string).collect()
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_ranges<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(section) = Value::deserialize(deserializer)? else {
        return Ok(BTreeMap::new());
    };

    Ok(section
        .into_iter()
        .filter_map(|(name, range)| match range {
            Value::String(range) => Some((name, range)),
            _ => None,
        })
        .collect())
}
