//! Error types for the salesboard CLI.

use std::path::PathBuf;

use salesboard_core::AnalysisError;

/// CLI errors. Each one ends the run with a non-zero exit code.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid sales data JSON: {0}")]
    DataFormat(#[from] serde_json::Error),

    #[error("Invalid config file: {0}")]
    ConfigFormat(#[from] toml::de::Error),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Failed to render report: {0}")]
    Render(String),
}

impl CliError {
    /// Process exit code: 2 when the dataset or options were rejected before
    /// analysis, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Analysis(e) if e.is_validation() => 2,
            _ => 1,
        }
    }
}

/// Convenience type alias for Results with CliError.
pub type CliResult<T> = Result<T, CliError>;

// =============================================================================
// Unit Tests
// =============================================================================
