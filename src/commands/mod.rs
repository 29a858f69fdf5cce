//! Command modules for the flinspect CLI
//!
//! Each command module implements a single top-level command:
//! - `summary` - unit counts, call status totals, diagnostics
//! - `calls` - call edges with status and candidates
//! - `trace` - traversal from one unit
//! - `deps` - module-level USE dependencies
//!
//! All command handlers take their `Args` struct from `cli.rs`, the ingested
//! graph and a shared `CommandContext`, and return the rendered output.

pub mod calls;
pub mod deps;
pub mod summary;
pub mod trace;

pub use calls::run_calls;
pub use deps::run_deps;
pub use summary::run_summary;
pub use trace::run_trace;

use serde::Serialize;

use crate::cli::{Commands, InputArgs, OutputFormat};
use crate::config::FlinspectConfig;
use crate::error::{FlinspectError, Result};
use crate::forest::{IngestReport, ParseForest};
use crate::graph::CodeGraph;
use crate::schema::EntityId;

/// Shared context passed to all command handlers
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    /// Output format (text or json)
    pub format: OutputFormat,
    /// Show verbose output
    pub verbose: bool,
}

impl CommandContext {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }
}

/// Ingest the command's inputs into a fresh forest
pub fn load_forest(input: &InputArgs, config: &FlinspectConfig) -> Result<(ParseForest, IngestReport)> {
    let forest = ParseForest::new(config.ingest.clone());
    let report = forest.ingest_paths(&input.paths)?;
    Ok((forest, report))
}

/// Dispatch a parsed command
pub fn run_command(command: &Commands, config: &FlinspectConfig, ctx: &CommandContext) -> Result<String> {
    let (forest, report) = load_forest(command.input(), config)?;
    let graph = forest.graph();
    let mut output = match command {
        Commands::Summary(args) => run_summary(args, &graph, &report, ctx)?,
        Commands::Calls(args) => run_calls(args, &graph, ctx)?,
        Commands::Trace(args) => run_trace(args, &graph, ctx)?,
        Commands::Deps(args) => run_deps(args, &graph, ctx)?,
    };
    if ctx.format == OutputFormat::Text && !report.failed.is_empty() {
        output.push_str(&format!("\n{} file(s) could not be read:\n", report.failed.len()));
        for failed in &report.failed {
            output.push_str(&format!("  {}: {}\n", failed.path.display(), failed.error));
        }
    }
    Ok(output)
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| FlinspectError::QueryError {
        message: format!("JSON serialization failed: {}", e),
    })
}

/// Qualified name of a unit, or its id when it is not in the graph
pub(crate) fn display_name(graph: &CodeGraph, id: EntityId) -> String {
    graph
        .unit(id)
        .map(|u| u.qualified_name.clone())
        .unwrap_or_else(|| id.to_string())
}

pub(crate) fn section(title: &str) -> String {
    format!(
        "═══════════════════════════════════════════\n  {}\n═══════════════════════════════════════════\n\n",
        title
    )
}
