//! flinspect: structural and call graphs from flang parse-tree dumps
//!
//! flang's `-fdebug-dump-parse-tree-no-sema` prints the syntax tree of a
//! Fortran translation unit without any semantic analysis. This library reads
//! those dumps, reconstructs program units with their containment and USE
//! dependencies, and resolves calls through overloaded generic interfaces
//! using only what the dump shows: declared type and rank in the calling
//! scope, argument count and keywords. Where that is not enough it reports
//! ambiguity instead of guessing.
//!
//! # Example
//!
//! ```no_run
//! use flinspect::{IngestConfig, ParseForest, StatusKind};
//! use std::path::PathBuf;
//!
//! let forest = ParseForest::new(IngestConfig::default());
//! let report = forest.ingest_paths(&[PathBuf::from("build/")])?;
//! println!("{} dumps ingested", report.ingested.len());
//!
//! let graph = forest.graph();
//! for edge in graph.calls_with(Some(StatusKind::Ambiguous)) {
//!     println!("{} at {}", edge.site.callee, edge.site.location);
//! }
//! # Ok::<(), flinspect::FlinspectError>(())
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod forest;
pub mod fs_utils;
pub mod graph;
pub mod intrinsics;
pub mod registry;
pub mod resolver;
pub mod schema;
pub mod trace;
pub mod tree;

// Re-export commonly used types
pub use cli::{Cli, OutputFormat};
pub use config::{FlinspectConfig, IngestConfig};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use error::{FlinspectError, Result};
pub use extract::{extract_trees, ExtractOptions, Extractor, FileExtraction};
pub use forest::{ingest_dump, ingest_reader, union, IngestReport, ParseForest};
pub use graph::{CodeGraph, DeclaredMember, EdgeKind, EdgeRef, GraphSummary, ModuleDependency, StatusKind};
pub use registry::NodeRegistry;
pub use resolver::{resolve_interfaces, resolve_sites, Resolver};
pub use schema::{
    ArgumentDescriptor, CallEdge, CallForm, CallSite, CallStatus, DataType, EntityId,
    ExpressionDescriptor, ProgramUnit, Rank, UnitKind, UnitPayload, UseEdge,
};
pub use trace::{TraceDirection, TraceOptions, TraceResult};
pub use tree::{Tag, TreeNode, TreeReader};
