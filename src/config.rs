//! flinspect configuration
//!
//! Loaded from a TOML file passed with `--config`:
//!
//! ```toml
//! [ingest]
//! ptree_suffix = "_ptree"
//! require_header = false
//! track_function_references = true
//! skip_intrinsics = true
//! threads = 8
//! follow_links = false
//!
//! [logging]
//! level = "info"
//! ```

use crate::error::{FlinspectError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FlinspectConfig {
    /// Dump discovery and extraction settings
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// File name suffix of parse-tree dumps
    #[serde(default = "default_ptree_suffix")]
    pub ptree_suffix: String,

    /// Skip files whose first line is not the flang dump banner
    #[serde(default)]
    pub require_header: bool,

    /// Record function references as call sites, not only CALL statements
    #[serde(default = "default_true")]
    pub track_function_references: bool,

    /// Ignore references to standard intrinsic procedures
    #[serde(default = "default_true")]
    pub skip_intrinsics: bool,

    /// Worker threads for per-file ingestion (rayon default when unset)
    #[serde(default)]
    pub threads: Option<usize>,

    /// Follow symbolic links while walking directories
    #[serde(default)]
    pub follow_links: bool,
}

fn default_ptree_suffix() -> String {
    "_ptree".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            ptree_suffix: default_ptree_suffix(),
            require_header: false,
            track_function_references: true,
            skip_intrinsics: true,
            threads: None,
            follow_links: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset (error, warn, info, debug)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl FlinspectConfig {
    /// Load configuration from a specific path; a missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| FlinspectError::io_at(path, e))?;

        let config: Self = toml::from_str(&content).map_err(|e| FlinspectError::ConfigError {
            message: format!("Failed to parse config: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.ingest.ptree_suffix.is_empty() {
            return Err(FlinspectError::ConfigError {
                message: "ingest.ptree_suffix must not be empty".to_string(),
            });
        }
        if self.ingest.threads == Some(0) {
            return Err(FlinspectError::ConfigError {
                message: "ingest.threads must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
