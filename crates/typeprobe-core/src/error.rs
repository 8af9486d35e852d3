use std::path::PathBuf;
use thiserror::Error;

/// Stable error codes for machine-readable output.
pub mod codes {
    pub const MANIFEST_NOT_FOUND: &str = "MANIFEST_NOT_FOUND";
    pub const MANIFEST_READ_FAILED: &str = "MANIFEST_READ_FAILED";
    pub const MANIFEST_INVALID: &str = "MANIFEST_INVALID";
    pub const DECLARATION_NOT_FOUND: &str = "DECLARATION_NOT_FOUND";
    pub const DECLARATION_READ_FAILED: &str = "DECLARATION_READ_FAILED";
    pub const DECLARATION_INVALID: &str = "DECLARATION_INVALID";
}

/// Failure loading a package.json.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("package.json not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ManifestError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => codes::MANIFEST_NOT_FOUND,
            Self::Read { .. } => codes::MANIFEST_READ_FAILED,
            Self::Parse { .. } => codes::MANIFEST_INVALID,
        }
    }
}

/// Failure reading a declaration file as text.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReadError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => codes::DECLARATION_NOT_FOUND,
            Self::Read { .. } => codes::DECLARATION_READ_FAILED,
        }
    }
}

/// Declaration text that the TypeScript parser rejected.
#[derive(Error, Debug)]
#[error("Failed to parse {}:{line}: {message}", path.display())]
pub struct ParseError {
    pub path: PathBuf,
    /// 1-based line of the offending token.
    pub line: usize,
    pub message: String,
}

impl ParseError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        codes::DECLARATION_INVALID
    }
}

/// Core error type for typeprobe operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    /// Stable SCREAMING_SNAKE_CASE code for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Manifest(e) => e.code(),
            Self::Read(e) => e.code(),
            Self::Parse(e) => e.code(),
        }
    }
}
