#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod manifest;
pub mod reader;
pub mod resolver;
pub mod summary;
pub mod version;

pub use analysis::{
    analyze_dependency, analyze_project, AnalyzeOptions, DependencyAnalysis, DependencyFailure,
    ProjectAnalysis, SkipReason, ANALYZE_SCHEMA_VERSION,
};
pub use config::Config;
pub use error::{codes as error_codes, Error, ManifestError, ParseError, ReadError};
pub use manifest::{ExportNode, Manifest, MANIFEST_FILE};
pub use reader::{file_exists, read_manifest, read_text};
pub use resolver::{
    probe, resolve, ExportCandidate, ExportCondition, ResolutionResult, ResolutionSource,
};
pub use summary::{count_top_level_statements, summarize, ParseSummary};
pub use version::{VersionInfo, VERSION};
