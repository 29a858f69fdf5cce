//! Error types and exit codes for flinspect

use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

use crate::schema::UnitKind;

/// Main error type for flinspect operations
#[derive(Error, Debug)]
pub enum FlinspectError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read {}: {message}", path.display())]
    IoError { path: PathBuf, message: String },

    /// Inconsistent nesting in a parse-tree dump. Recorded by the reader and
    /// recovered from; only surfaces as a diagnostic.
    #[error("Malformed parse tree in {}:{line}: {message}", path.display())]
    MalformedTree {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Name '{name}' is already registered as {existing}, cannot intern it as {requested}")]
    NameKindConflict {
        name: String,
        existing: UnitKind,
        requested: UnitKind,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Query error: {message}")]
    QueryError { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FlinspectError {
    /// Convert error to an exit code:
    /// - 1: File not found / IO error
    /// - 2: Configuration error
    /// - 3: Query or graph-level error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::FileNotFound { .. } | Self::IoError { .. } | Self::Io(_) => ExitCode::from(1),
            Self::ConfigError { .. } => ExitCode::from(2),
            Self::MalformedTree { .. } | Self::NameKindConflict { .. } | Self::QueryError { .. } => {
                ExitCode::from(3)
            }
        }
    }

    pub(crate) fn io_at(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for flinspect operations
pub type Result<T> = std::result::Result<T, FlinspectError>;
