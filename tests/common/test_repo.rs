//! TestRepo builder: a build directory full of parse-tree dumps

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

use flinspect::{CodeGraph, EntityId, IngestConfig, IngestReport, ParseForest, UnitKind};

/// Temporary directory of `*_ptree` files
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a new empty test directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Get the path to the directory root
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn path_str(&self) -> String {
        self.dir.path().to_string_lossy().to_string()
    }

    /// Add a file with the given content
    pub fn add_file(&self, relative_path: &str, content: &str) -> &Self {
        let full_path = self.dir.path().join(relative_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        self
    }

    pub fn file(&self, relative_path: &str) -> PathBuf {
        self.dir.path().join(relative_path)
    }

    /// Ingest the whole directory with default settings
    pub fn ingest(&self) -> (ParseForest, IngestReport) {
        self.ingest_with(IngestConfig::default())
    }

    pub fn ingest_with(&self, config: IngestConfig) -> (ParseForest, IngestReport) {
        let forest = ParseForest::new(config);
        let report = forest
            .ingest_paths(&[self.path().to_path_buf()])
            .expect("ingestion failed");
        (forest, report)
    }

    /// Run the flinspect binary inside the directory
    pub fn run_cli(&self, args: &[&str]) -> std::io::Result<Output> {
        Command::new(env!("CARGO_BIN_EXE_flinspect"))
            .current_dir(self.path())
            .env_remove("RUST_LOG")
            .env_remove("FLINSPECT_CONFIG")
            .args(args)
            .output()
    }

    /// Run CLI and expect success, return stdout
    pub fn run_cli_success(&self, args: &[&str]) -> String {
        let output = self.run_cli(args).expect("Failed to run CLI");
        assert!(
            output.status.success(),
            "CLI command {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Run CLI and expect failure, return (exit code, stderr)
    pub fn run_cli_failure(&self, args: &[&str]) -> (Option<i32>, String) {
        let output = self.run_cli(args).expect("Failed to run CLI");
        assert!(
            !output.status.success(),
            "CLI command {:?} should have failed",
            args
        );
        (
            output.status.code(),
            String::from_utf8_lossy(&output.stderr).to_string(),
        )
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}

/// Id of the single non-shadow unit with this qualified name and kind
pub fn unit_id(graph: &CodeGraph, qualified_name: &str, kind: UnitKind) -> EntityId {
    graph
        .find_units(qualified_name)
        .into_iter()
        .find(|u| u.kind() == kind && !u.shadow)
        .unwrap_or_else(|| panic!("no {} named {}", kind, qualified_name))
        .id
}

/// `(callee, line, target qualified names)` for every call edge of `caller`
pub fn calls_from(graph: &CodeGraph, caller: EntityId) -> Vec<(String, usize, Vec<String>)> {
    graph
        .calls()
        .iter()
        .filter(|c| c.site.caller == caller)
        .map(|c| {
            (
                c.site.callee.clone(),
                c.site.location.line,
                c.status
                    .targets()
                    .iter()
                    .filter_map(|id| graph.unit(*id))
                    .map(|u| u.qualified_name.clone())
                    .collect(),
            )
        })
        .collect()
}
