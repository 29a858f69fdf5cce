//! CLI argument definitions using clap with subcommand architecture

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::graph::StatusKind;
use crate::trace::TraceDirection;

/// Call graph inspector for flang parse-tree dumps
#[derive(Parser, Debug)]
#[command(name = "flinspect")]
#[command(about = "Reconstructs units, USE dependencies and resolved calls from flang parse-tree dumps")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "FLINSPECT_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format (applies to all commands)
    #[arg(short, long, default_value = "text", value_enum, global = true)]
    pub format: OutputFormat,

    /// Show verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands for flinspect
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Counts per unit kind, call status totals and diagnostics
    #[command(visible_alias = "s")]
    Summary(SummaryArgs),

    /// List call edges with their resolution
    #[command(visible_alias = "c")]
    Calls(CallsArgs),

    /// Traverse the graph from one unit
    #[command(visible_alias = "t")]
    Trace(TraceArgs),

    /// Module-level USE dependencies
    #[command(visible_alias = "d")]
    Deps(DepsArgs),
}

/// Dump files or directories to ingest
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Dump files or directories containing `*_ptree` files
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// List every diagnostic, not just the count
    #[arg(long)]
    pub diagnostics: bool,
}

#[derive(Args, Debug)]
pub struct CallsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Only show edges with this status
    #[arg(long, value_enum)]
    pub status: Option<StatusFilter>,

    /// Only show calls made by this unit (qualified name)
    #[arg(long, value_name = "NAME")]
    pub caller: Option<String>,
}

#[derive(Args, Debug)]
pub struct TraceArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Qualified name of the root unit (e.g. `solver_mod::step`)
    #[arg(long, value_name = "QUALIFIED")]
    pub unit: String,

    /// Direction to traverse
    #[arg(long, value_enum, default_value = "out")]
    pub direction: DirectionArg,

    /// Maximum traversal depth
    #[arg(long, default_value = "3")]
    pub depth: usize,

    /// Maximum number of nodes to report
    #[arg(long, default_value = "500")]
    pub limit: usize,

    /// Edge kinds to follow
    #[arg(long, value_enum, value_delimiter = ',', default_value = "calls")]
    pub edges: Vec<EdgeArg>,
}

#[derive(Args, Debug)]
pub struct DepsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Include modules that no ingested dump defines
    #[arg(long)]
    pub external: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    #[value(alias = "pretty")]
    Text,
    /// JSON - standard JSON output for machine parsing
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusFilter {
    Resolved,
    Ambiguous,
    Unknown,
}

impl From<StatusFilter> for StatusKind {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::Resolved => StatusKind::Resolved,
            StatusFilter::Ambiguous => StatusKind::Ambiguous,
            StatusFilter::Unknown => StatusKind::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    #[value(alias = "incoming")]
    In,
    #[value(alias = "outgoing")]
    Out,
    Both,
}

impl From<DirectionArg> for TraceDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::In => TraceDirection::Incoming,
            DirectionArg::Out => TraceDirection::Outgoing,
            DirectionArg::Both => TraceDirection::Both,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EdgeArg {
    Contains,
    Uses,
    Calls,
}

impl From<EdgeArg> for crate::graph::EdgeKind {
    fn from(arg: EdgeArg) -> Self {
        match arg {
            EdgeArg::Contains => crate::graph::EdgeKind::Contains,
            EdgeArg::Uses => crate::graph::EdgeKind::Uses,
            EdgeArg::Calls => crate::graph::EdgeKind::Calls,
        }
    }
}

impl Commands {
    pub fn input(&self) -> &InputArgs {
        match self {
            Commands::Summary(args) => &args.input,
            Commands::Calls(args) => &args.input,
            Commands::Trace(args) => &args.input,
            Commands::Deps(args) => &args.input,
        }
    }
}
