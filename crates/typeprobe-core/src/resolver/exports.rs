//! Declaration candidates from the package.json `exports` field.
//!
//! Only the `import` and `default` conditions and bare `types`/`typings`
//! keys are understood. Anything else in the tree is ignored, and a shape
//! mismatch at any step means "no match", never an error.

use super::ResolutionSource;
use crate::manifest::ExportNode;
use std::collections::BTreeMap;

/// Which part of an export map node produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportCondition {
    /// Under an `"import"` condition.
    Import,
    /// A bare `types`/`typings` key on the node itself.
    Root,
    /// Under a `"default"` condition.
    Default,
}

impl From<ExportCondition> for ResolutionSource {
    fn from(condition: ExportCondition) -> Self {
        match condition {
            ExportCondition::Import => Self::ExportsImport,
            ExportCondition::Root => Self::ExportsRoot,
            ExportCondition::Default => Self::ExportsDefault,
        }
    }
}

/// A declaration path found in the export map, as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportCandidate<'a> {
    pub relative_path: &'a str,
    pub condition: ExportCondition,
}

impl ExportCandidate<'_> {
    #[must_use]
    pub fn source(&self) -> ResolutionSource {
        self.condition.into()
    }
}

/// Probe one export map node for a declaration path.
///
/// First match wins:
/// 1. `import.types`, then `import.typings`
/// 2. `types`, then `typings` on the node itself
/// 3. `default.types`, then `default.typings`
///
/// A bare string node is an entry path, not a declaration, and yields `None`.
#[must_use]
pub fn probe(node: &ExportNode) -> Option<ExportCandidate<'_>> {
    let ExportNode::Map(conditions) = node else {
        return None;
    };

    let order: [(Option<&str>, ExportCondition); 3] = [
        (Some("import"), ExportCondition::Import),
        (None, ExportCondition::Root),
        (Some("default"), ExportCondition::Default),
    ];

    order.into_iter().find_map(|(key, condition)| {
        let fields = match key {
            Some(key) => conditions.get(key)?.as_map()?,
            None => conditions,
        };
        declaration_field(fields).map(|relative_path| ExportCandidate {
            relative_path,
            condition,
        })
    })
}

/// Probe the root of the `exports` tree.
#[must_use]
pub fn probe_root(exports: &ExportNode) -> Option<ExportCandidate<'_>> {
    probe(exports)
}

/// Probe the `"."` entry of the `exports` tree.
#[must_use]
pub fn probe_dot_entry(exports: &ExportNode) -> Option<ExportCandidate<'_>> {
    probe(exports.get(".")?)
}

fn declaration_field(fields: &BTreeMap<String, ExportNode>) -> Option<&str> {
    ["types", "typings"]
        .into_iter()
        .find_map(|key| fields.get(key).and_then(ExportNode::as_str))
}
