//! Per-dependency declaration analysis.
//!
//! For each dependency of a project: locate its package.json under
//! `node_modules`, resolve its declaration entry point, and summarize the
//! declaration file if it exists. Every stage may stop the pipeline early;
//! the resulting record then simply lacks the later fields.

use crate::error::Error;
use crate::manifest::MANIFEST_FILE;
use crate::reader::{file_exists, read_manifest, read_text};
use crate::resolver::resolve;
use crate::summary::{summarize, ParseSummary};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Schema version for the analyze output format.
/// Bump when the output structure changes incompatibly.
pub const ANALYZE_SCHEMA_VERSION: u32 = 1;

/// Analysis options.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzeOptions {
    /// Also analyze devDependencies.
    pub include_dev: bool,
}

/// How far the pipeline got for one dependency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyAnalysis {
    pub dependency_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_json_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types_absolute_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types_relative_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_esm_preferred: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_summary: Option<ParseSummary>,
}

/// Stage at which the pipeline stopped without a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No package.json under `node_modules/<name>`.
    ManifestMissing,
    /// The package declares no types.
    NoDeclarationEntry,
    /// The declared file does not exist.
    DeclarationFileMissing,
}

impl SkipReason {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::ManifestMissing => "DEP_NOT_INSTALLED",
            Self::NoDeclarationEntry => "DEP_NO_TYPES",
            Self::DeclarationFileMissing => "DEP_TYPES_FILE_MISSING",
        }
    }

    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            Self::ManifestMissing => "not installed (no package.json in node_modules)",
            Self::NoDeclarationEntry => "has no resolvable types",
            Self::DeclarationFileMissing => "declared types file not found",
        }
    }
}

impl DependencyAnalysis {
    #[must_use]
    pub fn new(dependency_name: impl Into<String>) -> Self {
        Self {
            dependency_name: dependency_name.into(),
            ..Self::default()
        }
    }

    /// Why no summary was produced, or `None` when one was.
    #[must_use]
    pub fn skip_reason(&self) -> Option<SkipReason> {
        if self.parse_summary.is_some() {
            None
        } else if self.package_json_path.is_none() {
            Some(SkipReason::ManifestMissing)
        } else if self.types_absolute_path.is_none() {
            Some(SkipReason::NoDeclarationEntry)
        } else {
            Some(SkipReason::DeclarationFileMissing)
        }
    }
}

/// A dependency whose analysis failed with an I/O or parse error.
#[derive(Debug)]
pub struct DependencyFailure {
    pub dependency_name: String,
    pub error: Error,
}

/// Result of analyzing every dependency of a project.
#[derive(Debug)]
pub struct ProjectAnalysis {
    /// The project's package.json.
    pub manifest_path: PathBuf,
    /// Completed analyses, sorted by dependency name.
    pub dependencies: Vec<DependencyAnalysis>,
    /// Dependencies that failed, sorted by dependency name.
    pub failures: Vec<DependencyFailure>,
}

/// Path of a dependency's package.json inside `node_modules`.
#[must_use]
pub fn dependency_manifest_path(project_dir: &Path, name: &str) -> PathBuf {
    project_dir
        .join("node_modules")
        .join(name)
        .join(MANIFEST_FILE)
}

/// Analyze a single dependency of the project at `project_dir`.
///
/// A missing dependency or declaration file is not an error; the record
/// stops at that stage. An unreadable or malformed manifest, or a
/// declaration file that cannot be read or parsed, is.
pub fn analyze_dependency(project_dir: &Path, name: &str) -> Result<DependencyAnalysis, Error> {
    let mut analysis = DependencyAnalysis::new(name);

    let manifest_path = dependency_manifest_path(project_dir, name);
    if !file_exists(&manifest_path) {
        return Ok(analysis);
    }
    let manifest = read_manifest(&manifest_path)?;
    let package_dir = project_dir.join("node_modules").join(name);
    analysis.package_json_path = Some(manifest_path);

    let Some(resolution) = resolve(&manifest, &package_dir) else {
        return Ok(analysis);
    };
    analysis.is_esm_preferred = Some(resolution.is_esm_preferred());
    analysis.types_relative_path = Some(resolution.relative_path);
    analysis.types_absolute_path = Some(resolution.absolute_path.clone());

    if !file_exists(&resolution.absolute_path) {
        return Ok(analysis);
    }
    let text = read_text(&resolution.absolute_path)?;
    analysis.parse_summary = Some(summarize(&text, resolution.absolute_path)?);

    Ok(analysis)
}

/// Analyze every dependency listed in the project's package.json.
///
/// Dependencies are analyzed in parallel. A failure for one dependency is
/// recorded in [`ProjectAnalysis::failures`] and does not affect the others.
///
/// # Errors
/// Returns an error only if the project's own package.json cannot be read.
pub fn analyze_project(
    project_dir: &Path,
    options: &AnalyzeOptions,
) -> Result<ProjectAnalysis, Error> {
    let manifest_path = project_dir.join(MANIFEST_FILE);
    let manifest = read_manifest(&manifest_path)?;
    let names = manifest.dependency_names(options.include_dev);

    let outcomes: Vec<(String, Result<DependencyAnalysis, Error>)> = names
        .into_par_iter()
        .map(|name| {
            let outcome = analyze_dependency(project_dir, &name);
            (name, outcome)
        })
        .collect();

    let mut dependencies = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();
    for (dependency_name, outcome) in outcomes {
        match outcome {
            Ok(analysis) => dependencies.push(analysis),
            Err(error) => failures.push(DependencyFailure {
                dependency_name,
                error,
            }),
        }
    }

    Ok(ProjectAnalysis {
        manifest_path,
        dependencies,
        failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn write_json(path: &Path, value: &serde_json::Value) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    }

    fn install(project: &Path, name: &str, manifest: &serde_json::Value) -> PathBuf {
        let dir = project.join("node_modules").join(name);
        write_json(&dir.join("package.json"), manifest);
        dir
    }

    #[test]
    fn test_dependency_not_installed() {
        let dir = tempdir().unwrap();
        let analysis = analyze_dependency(dir.path(), "missing").unwrap();

        assert_eq!(analysis, DependencyAnalysis::new("missing"));
        assert_eq!(analysis.skip_reason(), Some(SkipReason::ManifestMissing));
    }

    #[test]
    fn test_dependency_without_types() {
        let dir = tempdir().unwrap();
        install(dir.path(), "untyped", &json!({ "name": "untyped", "main": "index.js" }));

        let analysis = analyze_dependency(dir.path(), "untyped").unwrap();
        assert!(analysis.package_json_path.is_some());
        assert!(analysis.types_absolute_path.is_none());
        assert!(analysis.is_esm_preferred.is_none());
        assert_eq!(analysis.skip_reason(), Some(SkipReason::NoDeclarationEntry));
    }

    #[test]
    fn test_declaration_file_missing() {
        let dir = tempdir().unwrap();
        let pkg_dir = install(dir.path(), "ghost", &json!({ "types": "./index.d.ts" }));

        let analysis = analyze_dependency(dir.path(), "ghost").unwrap();
        assert_eq!(analysis.types_absolute_path, Some(pkg_dir.join("index.d.ts")));
        assert_eq!(analysis.types_relative_path.as_deref(), Some("./index.d.ts"));
        assert_eq!(analysis.is_esm_preferred, Some(false));
        assert!(analysis.parse_summary.is_none());
        assert_eq!(
            analysis.skip_reason(),
            Some(SkipReason::DeclarationFileMissing)
        );
    }

    #[test]
    fn test_full_pipeline() {
        let dir = tempdir().unwrap();
        let pkg_dir = install(
            dir.path(),
            "esm-lib",
            &json!({
                "exports": { ".": { "import": { "types": "./dist/index.d.mts" } } }
            }),
        );
        fs::create_dir_all(pkg_dir.join("dist")).unwrap();
        fs::write(
            pkg_dir.join("dist/index.d.mts"),
            "export declare const a: number;\nexport interface B { b: string }\n",
        )
        .unwrap();

        let analysis = analyze_dependency(dir.path(), "esm-lib").unwrap();
        assert_eq!(analysis.is_esm_preferred, Some(true));
        assert_eq!(analysis.skip_reason(), None);

        let summary = analysis.parse_summary.unwrap();
        assert_eq!(summary.statements, 2);
        assert_eq!(summary.file_name, pkg_dir.join("dist").join("index.d.mts"));
    }

    #[test]
    fn test_scoped_dependency() {
        let dir = tempdir().unwrap();
        let pkg_dir = install(dir.path(), "@scope/lib", &json!({ "typings": "lib.d.ts" }));
        fs::write(pkg_dir.join("lib.d.ts"), "export {};").unwrap();

        let analysis = analyze_dependency(dir.path(), "@scope/lib").unwrap();
        assert_eq!(analysis.parse_summary.map(|s| s.statements), Some(1));
    }

    #[test]
    fn test_malformed_dependency_manifest_is_an_error() {
        let dir = tempdir().unwrap();
        let pkg_dir = dir.path().join("node_modules").join("broken");
        fs::create_dir_all(&pkg_dir).unwrap();
        fs::write(pkg_dir.join("package.json"), "{ nope").unwrap();

        let err = analyze_dependency(dir.path(), "broken").unwrap_err();
        assert_eq!(err.code(), crate::error::codes::MANIFEST_INVALID);
    }

    #[test]
    fn test_unparseable_declaration_is_an_error() {
        let dir = tempdir().unwrap();
        let pkg_dir = install(dir.path(), "bad-types", &json!({ "types": "index.d.ts" }));
        fs::write(pkg_dir.join("index.d.ts"), "export interface A {\n").unwrap();

        let err = analyze_dependency(dir.path(), "bad-types").unwrap_err();
        assert_eq!(err.code(), crate::error::codes::DECLARATION_INVALID);
    }

    #[test]
    fn test_project_missing_manifest() {
        let dir = tempdir().unwrap();
        let err = analyze_project(dir.path(), &AnalyzeOptions::default()).unwrap_err();
        assert_eq!(err.code(), crate::error::codes::MANIFEST_NOT_FOUND);
    }

    #[test]
    fn test_project_collects_failures_without_aborting() {
        let dir = tempdir().unwrap();
        write_json(
            &dir.path().join("package.json"),
            &json!({
                "dependencies": { "broken": "1.0.0", "ok": "1.0.0", "absent": "1.0.0" },
                "devDependencies": { "dev-only": "1.0.0" }
            }),
        );
        let ok_dir = install(dir.path(), "ok", &json!({ "types": "index.d.ts" }));
        fs::write(ok_dir.join("index.d.ts"), "export {};").unwrap();
        let broken_dir = dir.path().join("node_modules").join("broken");
        fs::create_dir_all(&broken_dir).unwrap();
        fs::write(broken_dir.join("package.json"), "not json").unwrap();

        let project = analyze_project(dir.path(), &AnalyzeOptions::default()).unwrap();

        let names: Vec<_> = project
            .dependencies
            .iter()
            .map(|d| d.dependency_name.as_str())
            .collect();
        assert_eq!(names, vec!["absent", "ok"]);
        assert_eq!(project.failures.len(), 1);
        assert_eq!(project.failures[0].dependency_name, "broken");
        assert_eq!(project.manifest_path, dir.path().join("package.json"));
    }

    #[test]
    fn test_project_include_dev() {
        let dir = tempdir().unwrap();
        write_json(
            &dir.path().join("package.json"),
            &json!({
                "dependencies": { "a": "1.0.0" },
                "devDependencies": { "b": "1.0.0" }
            }),
        );

        let options = AnalyzeOptions { include_dev: true };
        let project = analyze_project(dir.path(), &options).unwrap();
        let names: Vec<_> = project
            .dependencies
            .iter()
            .map(|d| d.dependency_name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_analysis_serialization_omits_absent_fields() {
        let value = serde_json::to_value(DependencyAnalysis::new("x")).unwrap();
        assert_eq!(value, json!({ "dependency_name": "x" }));
    }

    #[test]
    fn test_skip_reason_codes_uppercase() {
        for reason in [
            SkipReason::ManifestMissing,
            SkipReason::NoDeclarationEntry,
            SkipReason::DeclarationFileMissing,
        ] {
            assert!(reason.code().chars().all(|c| c.is_uppercase() || c == '_'));
            assert!(!reason.describe().is_empty());
        }
    }
}
