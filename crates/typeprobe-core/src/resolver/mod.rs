//! Declaration entry point resolver.
//!
//! Resolution order:
//! 1. `exports` root node
//! 2. `exports["."]`
//! 3. legacy `types`
//! 4. legacy `typings`
//!
//! Pure: no filesystem access. Whether the resolved file exists is checked by
//! the caller.

mod exports;

pub use exports::{probe, probe_dot_entry, probe_root, ExportCandidate, ExportCondition};

use crate::manifest::Manifest;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};
use typeprobe_util::fs::resolve_if_relative;

/// Which lookup branch produced a declaration path.
///
/// Variants are listed in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolutionSource {
    #[serde(rename = "exports.import")]
    ExportsImport,
    #[serde(rename = "exports.default")]
    ExportsDefault,
    #[serde(rename = "exports.root")]
    ExportsRoot,
    #[serde(rename = "types")]
    Types,
    #[serde(rename = "typings")]
    Typings,
}

impl ResolutionSource {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExportsImport => "exports.import",
            Self::ExportsDefault => "exports.default",
            Self::ExportsRoot => "exports.root",
            Self::Types => "types",
            Self::Typings => "typings",
        }
    }
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authoritative declaration entry of a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    /// `relative_path` resolved against the package directory.
    pub absolute_path: PathBuf,
    /// The path exactly as written in package.json.
    pub relative_path: String,
    pub source: ResolutionSource,
}

impl ResolutionResult {
    /// True only for declarations found under the `import` condition.
    #[must_use]
    pub fn is_esm_preferred(&self) -> bool {
        self.source == ResolutionSource::ExportsImport
    }
}

impl Serialize for ResolutionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ResolutionResult", 4)?;
        state.serialize_field("absolute_path", &self.absolute_path)?;
        state.serialize_field("relative_path", &self.relative_path)?;
        state.serialize_field("source", &self.source)?;
        state.serialize_field("is_esm_preferred", &self.is_esm_preferred())?;
        state.end()
    }
}

/// A declaration path as written, with the branch that produced it.
type Candidate<'a> = (&'a str, ResolutionSource);

/// Candidate steps in priority order. The first step yielding a path wins.
const STEPS: [fn(&Manifest) -> Option<Candidate<'_>>; 4] =
    [from_exports_root, from_exports_dot, from_types, from_typings];

/// Resolve the declaration entry point of a package.
///
/// Returns `None` when the package declares no types. Absolute paths in
/// package.json are returned unchanged; relative ones are joined onto
/// `package_dir` and normalized lexically.
#[must_use]
pub fn resolve(manifest: &Manifest, package_dir: &Path) -> Option<ResolutionResult> {
    let (relative_path, source) = STEPS.iter().find_map(|step| step(manifest))?;

    Some(ResolutionResult {
        absolute_path: resolve_if_relative(package_dir, relative_path),
        relative_path: relative_path.to_string(),
        source,
    })
}

fn from_exports_root(manifest: &Manifest) -> Option<Candidate<'_>> {
    let candidate = probe_root(manifest.exports.as_ref()?)?;
    Some((candidate.relative_path, candidate.source()))
}

fn from_exports_dot(manifest: &Manifest) -> Option<Candidate<'_>> {
    let candidate = probe_dot_entry(manifest.exports.as_ref()?)?;
    Some((candidate.relative_path, candidate.source()))
}

fn from_types(manifest: &Manifest) -> Option<Candidate<'_>> {
    legacy_field(manifest.types.as_deref(), ResolutionSource::Types)
}

fn from_typings(manifest: &Manifest) -> Option<Candidate<'_>> {
    legacy_field(manifest.typings.as_deref(), ResolutionSource::Typings)
}

fn legacy_field(value: Option<&str>, source: ResolutionSource) -> Option<Candidate<'_>> {
    value.filter(|path| !path.is_empty()).map(|path| (path, source))
}
