use crate::analysis::AnalyzeOptions;
use std::path::PathBuf;

/// Runtime configuration for the typeprobe CLI.
#[derive(Debug, Clone)]
pub struct Config {
    /// Project directory (holds the package.json and `node_modules`).
    pub cwd: PathBuf,

    /// Whether to emit JSON output and JSON logs.
    pub json: bool,

    /// Verbosity level (0 = INFO, 1 = DEBUG, 2+ = TRACE).
    pub verbosity: u8,

    /// Also analyze devDependencies.
    pub include_dev: bool,
}

impl Config {
    /// Create a new config with the given working directory.
    #[must_use]
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            json: false,
            verbosity: 0,
            include_dev: false,
        }
    }

    /// Set verbosity level.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set JSON output.
    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Include devDependencies in analysis.
    #[must_use]
    pub fn with_include_dev(mut self, include_dev: bool) -> Self {
        self.include_dev = include_dev;
        self
    }

    #[must_use]
    pub fn analyze_options(&self) -> AnalyzeOptions {
        AnalyzeOptions {
            include_dev: self.include_dev,
        }
    }
}
