//! Parse forest: per-file ingestion and the union of file graphs
//!
//! Every dump is read, extracted and resolved on its own rayon worker into a
//! file-local [`CodeGraph`]. File graphs are then folded into one merged
//! graph in path order. [`union`] is commutative: unit precedence, shadowing
//! and edge order depend only on the units and their source paths, never on
//! which side of the union they came from.

use parking_lot::{RwLock, RwLockReadGuard};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::IngestConfig;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::error::{FlinspectError, Result};
use crate::extract::{ExtractOptions, Extractor};
use crate::fs_utils::collect_ptree_files;
use crate::graph::CodeGraph;
use crate::registry::NodeRegistry;
use crate::resolver::{resolve_interfaces, resolve_sites, sort_edges};
use crate::schema::{CallEdge, CallSite, CallStatus, EntityId, ProgramUnit, UnitPayload, UseEdge, SCHEMA_VERSION};
use crate::tree::{starts_with_banner, TreeReader};

/// Build the file-local graph of one dump file
pub fn ingest_dump(path: &Path, config: &IngestConfig) -> Result<CodeGraph> {
    if config.require_header && !starts_with_banner(path)? {
        tracing::warn!("[FOREST] {} has no parse tree banner, skipping", path.display());
        let diagnostic = Diagnostic::new(
            DiagnosticKind::MissingHeader,
            "first line is not a flang parse tree banner",
        )
        .in_file(path);
        return Ok(CodeGraph::from_diagnostics(path, vec![diagnostic]));
    }
    let reader = TreeReader::open(path)?;
    ingest_reader(reader, config)
}

/// Build a file-local graph from an open reader
pub fn ingest_reader<R: BufRead>(mut reader: TreeReader<R>, config: &IngestConfig) -> Result<CodeGraph> {
    let path = reader.path().to_path_buf();
    let mut extractor = Extractor::new(&path, ExtractOptions::from(config));
    for tree in reader.by_ref() {
        extractor.extract_tree(&tree?);
    }

    let mut extraction = extractor.finish();
    for issue in reader.take_issues() {
        tracing::warn!("[READER] {}", issue);
        extraction.diagnostics.push(Diagnostic::from_error(&issue));
    }
    Ok(CodeGraph::from_extraction(&path, extraction))
}

/// Order in which two versions of a unit compete: definitions before
/// stubs, then the smaller source path
fn precedence(unit: &ProgramUnit) -> (bool, Option<&Path>, Option<usize>) {
    (
        !unit.defined,
        unit.location.as_ref().map(|l| l.file.as_path()),
        unit.location.as_ref().map(|l| l.line),
    )
}

/// Merge two versions of the same unit. Returns the merged unit and whether
/// the two versions disagreed on interface members.
fn merge_unit(x: ProgramUnit, y: ProgramUnit) -> (ProgramUnit, bool) {
    let (mut keep, other) = if precedence(&y) < precedence(&x) { (y, x) } else { (x, y) };

    if keep.defined && other.defined && keep.location != other.location {
        let mut diagnostic = Diagnostic::new(
            DiagnosticKind::DuplicateDefinition,
            format!(
                "{} '{}' is also defined at {}",
                keep.kind(),
                keep.qualified_name,
                other
                    .location
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default()
            ),
        )
        .on(keep.id);
        if let Some(loc) = &keep.location {
            diagnostic = diagnostic.at(&loc.file, loc.line);
        }
        tracing::warn!("[FOREST] {}", diagnostic.message);
        keep.diagnostics.push(diagnostic);
    }

    let tie = precedence(&keep) == precedence(&other);
    if tie {
        // Two stubs: neither side may decide alone
        keep.shadow &= other.shadow;
        if let (UnitPayload::Module(mine), UnitPayload::Module(theirs)) = (&mut keep.payload, &other.payload) {
            mine.intrinsic |= theirs.intrinsic;
        }
    }
    keep.diagnostics.extend(other.diagnostics);
    if !keep.shadow {
        // Conflicts lost by the other version are decided again after the merge
        keep.diagnostics.retain(|d| d.kind != DiagnosticKind::NameKindConflict);
    }
    keep.diagnostics.sort();
    keep.diagnostics.dedup();

    let mut members_changed = false;
    if let (UnitPayload::Interface(mine), UnitPayload::Interface(theirs)) = (&mut keep.payload, &other.payload) {
        members_changed = mine.members != theirs.members;
        for member in &theirs.members {
            match mine.members.iter_mut().find(|m| m.name == member.name) {
                Some(existing) => {
                    if existing.target.is_none() && member.target.is_some() {
                        existing.target = member.target;
                    }
                }
                None => mine.members.push(member.clone()),
            }
        }
    }
    (keep, members_changed)
}

/// Turn the later unit of every name/kind conflict into a shadow.
///
/// Returns the units that were shadowed.
fn shadow_conflicts(units: &mut BTreeMap<EntityId, ProgramUnit>) -> Vec<EntityId> {
    let mut by_name: BTreeMap<&str, Vec<&ProgramUnit>> = BTreeMap::new();
    for unit in units.values().filter(|u| !u.shadow) {
        by_name.entry(unit.qualified_name.as_str()).or_default().push(unit);
    }

    let mut losers = Vec::new();
    for group in by_name.values_mut().filter(|g| g.len() > 1) {
        group.sort_by(|a, b| precedence(a).cmp(&precedence(b)).then(a.kind().cmp(&b.kind())));
        let mut winners: Vec<&ProgramUnit> = Vec::new();
        for unit in group.iter() {
            match winners.iter().find(|w| !w.kind().may_share_name_with(unit.kind())) {
                Some(winner) => {
                    let conflict = FlinspectError::NameKindConflict {
                        name: unit.qualified_name.clone(),
                        existing: winner.kind(),
                        requested: unit.kind(),
                    };
                    losers.push((unit.id, conflict));
                }
                None => winners.push(unit),
            }
        }
    }

    let mut shadowed = Vec::with_capacity(losers.len());
    for (id, conflict) in losers {
        let Some(unit) = units.get_mut(&id) else {
            continue;
        };
        tracing::warn!("[FOREST] {}", conflict);
        unit.shadow = true;
        let mut diagnostic = Diagnostic::new(DiagnosticKind::NameKindConflict, conflict.to_string()).on(id);
        if let Some(loc) = &unit.location {
            diagnostic = diagnostic.at(&loc.file, loc.line);
        }
        unit.diagnostics.push(diagnostic);
        unit.diagnostics.sort();
        unit.diagnostics.dedup();
        shadowed.push(id);
    }
    shadowed
}

/// Union of two code graphs with incremental re-resolution of the call
/// edges the merge can affect
pub fn union(a: CodeGraph, b: CodeGraph) -> CodeGraph {
    let a_ids: HashSet<EntityId> = a.registry.ids().collect();
    let mut touched: HashSet<EntityId> = b.registry.ids().filter(|id| a_ids.contains(id)).collect();

    let mut files = a.files;
    files.extend(b.files);
    let mut diagnostics = a.diagnostics;
    diagnostics.extend(b.diagnostics);
    diagnostics.sort();
    diagnostics.dedup();

    let uses: BTreeSet<UseEdge> = a
        .registry
        .all_uses()
        .chain(b.registry.all_uses())
        .cloned()
        .collect();

    let mut units: BTreeMap<EntityId, ProgramUnit> = BTreeMap::new();
    let mut changed_interfaces: BTreeSet<EntityId> = BTreeSet::new();
    for unit in a.registry.into_units().chain(b.registry.into_units()) {
        let merged = match units.remove(&unit.id) {
            Some(existing) => {
                let (merged, members_changed) = merge_unit(existing, unit);
                if members_changed {
                    changed_interfaces.insert(merged.id);
                }
                merged
            }
            None => unit,
        };
        units.insert(merged.id, merged);
    }
    touched.extend(shadow_conflicts(&mut units));

    let mut registry = NodeRegistry::new();
    for unit in units.into_values() {
        registry.insert(unit);
    }
    for edge in uses {
        registry.add_use(edge);
    }
    changed_interfaces.extend(resolve_interfaces(&mut registry));

    // A site seen on both sides is resolved again against the merged registry
    let mut calls: BTreeMap<CallSite, CallEdge> = BTreeMap::new();
    let mut duplicated: BTreeSet<CallSite> = BTreeSet::new();
    for edge in a.calls.into_iter().chain(b.calls) {
        if calls.contains_key(&edge.site) {
            duplicated.insert(edge.site.clone());
        } else {
            calls.insert(edge.site.clone(), edge);
        }
    }

    let total = calls.len();
    let (stale, mut kept): (Vec<CallEdge>, Vec<CallEdge>) = calls.into_values().partition(|edge| {
        matches!(edge.status, CallStatus::Unknown | CallStatus::Pending)
            || duplicated.contains(&edge.site)
            || edge.via_interfaces.iter().any(|i| changed_interfaces.contains(i))
            || (!touched.is_empty() && registry.depends_on_any(edge.site.caller, &touched))
    });
    let stale_count = stale.len();
    let refreshed = resolve_sites(&registry, stale.into_iter().map(|e| e.site).collect());
    kept.extend(refreshed);
    sort_edges(&mut kept);

    tracing::debug!(
        "[FOREST] union: {} units, re-resolved {} of {} call edges",
        registry.len(),
        stale_count,
        total
    );

    CodeGraph {
        schema_version: SCHEMA_VERSION.to_string(),
        files,
        registry,
        calls: kept,
        diagnostics,
    }
}

/// A dump that could not be ingested
#[derive(Debug, Clone, Serialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of one ingestion run
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    pub ingested: Vec<PathBuf>,
    /// Files skipped for lacking the dump banner
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<FailedFile>,
    pub units: usize,
    pub calls: usize,
    pub elapsed_ms: u64,
}

impl IngestReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty()
    }
}

/// Per-file graphs and their union
pub struct ParseForest {
    config: IngestConfig,
    file_graphs: RwLock<BTreeMap<PathBuf, CodeGraph>>,
    merged: RwLock<CodeGraph>,
}

impl ParseForest {
    pub fn new(config: IngestConfig) -> Self {
        Self {
            config,
            file_graphs: RwLock::new(BTreeMap::new()),
            merged: RwLock::new(CodeGraph::empty()),
        }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Ingest dump files and every dump under the given directories
    pub fn ingest_paths(&self, paths: &[PathBuf]) -> Result<IngestReport> {
        let files = collect_ptree_files(paths, &self.config.ptree_suffix, self.config.follow_links)?;
        tracing::info!("[FOREST] found {} dump files", files.len());
        self.ingest_files(files)
    }

    /// Ingest (or re-ingest) a single dump
    pub fn ingest_file(&self, path: &Path) -> Result<IngestReport> {
        self.ingest_files(vec![path.to_path_buf()])
    }

    fn ingest_files(&self, files: Vec<PathBuf>) -> Result<IngestReport> {
        let start = Instant::now();
        let config = &self.config;
        let build = |files: &[PathBuf]| -> Vec<(PathBuf, Result<CodeGraph>)> {
            files
                .par_iter()
                .map(|path| (path.clone(), ingest_dump(path, config)))
                .collect()
        };
        let mut outcomes = match config.threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| FlinspectError::ConfigError {
                    message: format!("Failed to build thread pool: {}", e),
                })?
                .install(|| build(&files)),
            None => build(&files),
        };
        outcomes.sort_by(|a, b| a.0.cmp(&b.0));

        let mut report = IngestReport::default();
        let mut file_graphs = self.file_graphs.write();
        let mut merged = self.merged.write();
        let mut fresh = Vec::with_capacity(outcomes.len());
        let mut replaced = false;

        for (path, outcome) in outcomes {
            let graph = match outcome {
                Ok(graph) => {
                    let skipped = graph
                        .diagnostics
                        .iter()
                        .any(|d| d.kind == DiagnosticKind::MissingHeader);
                    if skipped {
                        report.skipped.push(path.clone());
                    } else {
                        tracing::info!(
                            "[FOREST] ingested {}: {} units, {} calls",
                            path.display(),
                            graph.registry.len(),
                            graph.calls.len()
                        );
                        report.ingested.push(path.clone());
                    }
                    graph
                }
                Err(err) => {
                    tracing::warn!("[FOREST] cannot ingest {}: {}", path.display(), err);
                    report.failed.push(FailedFile {
                        path: path.clone(),
                        error: err.to_string(),
                    });
                    let diagnostic = Diagnostic::new(DiagnosticKind::UnreadableFile, err.to_string()).in_file(&path);
                    CodeGraph::from_diagnostics(&path, vec![diagnostic])
                }
            };
            replaced |= file_graphs.insert(path, graph.clone()).is_some();
            fresh.push(graph);
        }

        // A re-ingested file replaces its old graph wholesale
        if replaced {
            *merged = fold(file_graphs.values().cloned());
        } else {
            let current = std::mem::replace(&mut *merged, CodeGraph::empty());
            *merged = fresh.into_iter().fold(current, union);
        }

        report.units = merged.registry.len();
        report.calls = merged.calls.len();
        report.elapsed_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            "[FOREST] {} files in forest, {} units, {} call edges ({} ms)",
            file_graphs.len(),
            report.units,
            report.calls,
            report.elapsed_ms
        );
        Ok(report)
    }

    /// Drop a file from the forest. Returns false when it was not ingested.
    pub fn remove_file(&self, path: &Path) -> bool {
        let mut file_graphs = self.file_graphs.write();
        if file_graphs.remove(path).is_none() {
            return false;
        }
        let mut merged = self.merged.write();
        *merged = fold(file_graphs.values().cloned());
        true
    }

    /// The merged graph
    pub fn graph(&self) -> RwLockReadGuard<'_, CodeGraph> {
        self.merged.read()
    }

    pub fn snapshot(&self) -> CodeGraph {
        self.merged.read().clone()
    }

    pub fn file_graph(&self, path: &Path) -> Option<CodeGraph> {
        self.file_graphs.read().get(path).cloned()
    }

    pub fn files(&self) -> Vec<PathBuf> {
        self.file_graphs.read().keys().cloned().collect()
    }
}

fn fold(graphs: impl Iterator<Item = CodeGraph>) -> CodeGraph {
    graphs.fold(CodeGraph::empty(), union)
}
