//! Build and output-format versions reported by `typeprobe version`.

use crate::analysis::ANALYZE_SCHEMA_VERSION;
use serde::Serialize;
use std::fmt;

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything a consumer of `--json` output needs to pin against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    pub version: &'static str,
    /// Set when built with `TYPEPROBE_BUILD_GIT_HASH` in the environment.
    pub git_hash: Option<&'static str>,
    pub analyze_schema_version: u32,
}

impl VersionInfo {
    #[must_use]
    pub fn current() -> Self {
        Self {
            version: VERSION,
            git_hash: option_env!("TYPEPROBE_BUILD_GIT_HASH"),
            analyze_schema_version: ANALYZE_SCHEMA_VERSION,
        }
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "typeprobe {}", self.version)?;
        if let Some(hash) = self.git_hash {
            write!(f, " ({hash})")?;
        }
        write!(f, " [analyze schema v{}]", self.analyze_schema_version)
    }
}
