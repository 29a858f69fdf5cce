//! Read-only code graph over the units, containment, USE and call edges
//! of one file or of a merged forest

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::diagnostics::Diagnostic;
use crate::extract::FileExtraction;
use crate::registry::NodeRegistry;
use crate::resolver::{resolve_interfaces, resolve_sites};
use crate::schema::{
    ArgumentDescriptor, CallEdge, CallStatus, ComponentDescriptor, EntityId, InterfaceMember,
    ProgramUnit, UnitKind, UnitPayload, UseEdge, VariableDecl, SCHEMA_VERSION,
};
use crate::trace::{self, TraceDirection};

/// Edge families of the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Contains,
    Uses,
    Calls,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Contains => "contains",
            EdgeKind::Uses => "uses",
            EdgeKind::Calls => "calls",
        }
    }
}

/// Status family of a call edge, for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    Resolved,
    Ambiguous,
    Unknown,
}

impl StatusKind {
    pub fn matches(&self, status: &CallStatus) -> bool {
        matches!(
            (self, status),
            (StatusKind::Resolved, CallStatus::Resolved(_))
                | (StatusKind::Ambiguous, CallStatus::Ambiguous(_))
                | (StatusKind::Unknown, CallStatus::Unknown)
        )
    }
}

/// An edge incident to a unit
#[derive(Debug, Clone, Copy)]
pub enum EdgeRef<'g> {
    Contains { parent: EntityId, child: EntityId },
    Uses(&'g UseEdge),
    Calls(&'g CallEdge),
}

impl EdgeRef<'_> {
    pub fn kind(&self) -> EdgeKind {
        match self {
            EdgeRef::Contains { .. } => EdgeKind::Contains,
            EdgeRef::Uses(_) => EdgeKind::Uses,
            EdgeRef::Calls(_) => EdgeKind::Calls,
        }
    }
}

/// Something a unit declares
#[derive(Debug, Clone, Copy)]
pub enum DeclaredMember<'g> {
    Dummy(&'g ArgumentDescriptor),
    Component(&'g ComponentDescriptor),
    InterfaceMember(&'g InterfaceMember),
    Variable(&'g VariableDecl),
}

/// Module-level USE dependency
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ModuleDependency {
    pub from: String,
    pub to: String,
    /// The used module is not defined in any ingested dump
    pub external: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphSummary {
    pub files: usize,
    pub units: BTreeMap<String, usize>,
    pub calls: BTreeMap<String, usize>,
    pub diagnostics: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CodeGraph {
    pub(crate) schema_version: String,
    pub(crate) files: BTreeSet<PathBuf>,
    pub(crate) registry: NodeRegistry,
    pub(crate) calls: Vec<CallEdge>,
    /// Graph-level diagnostics; unit diagnostics live on the units
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl CodeGraph {
    pub fn empty() -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            ..Default::default()
        }
    }

    /// File-local graph: resolve interfaces and call sites of one extraction
    pub fn from_extraction(file: &Path, extraction: FileExtraction) -> Self {
        let FileExtraction {
            mut registry,
            call_sites,
            mut diagnostics,
        } = extraction;
        resolve_interfaces(&mut registry);
        let calls = resolve_sites(&registry, call_sites);
        diagnostics.sort();
        diagnostics.dedup();
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            files: BTreeSet::from([file.to_path_buf()]),
            registry,
            calls,
            diagnostics,
        }
    }

    /// Graph for a file that produced nothing but diagnostics
    pub fn from_diagnostics(file: &Path, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            files: BTreeSet::from([file.to_path_buf()]),
            diagnostics,
            ..Default::default()
        }
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn files(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.iter()
    }

    pub fn calls(&self) -> &[CallEdge] {
        &self.calls
    }

    /// Units, optionally restricted to one kind
    pub fn units(&self, kind: Option<UnitKind>) -> Vec<&ProgramUnit> {
        self.registry
            .units()
            .filter(|u| kind.map_or(true, |k| u.kind() == k))
            .collect()
    }

    pub fn unit(&self, id: EntityId) -> Option<&ProgramUnit> {
        self.registry.unit(id)
    }

    /// Units with the given qualified name, shadows included
    pub fn find_units(&self, qualified_name: &str) -> Vec<&ProgramUnit> {
        let name = qualified_name.to_ascii_lowercase();
        self.registry
            .units()
            .filter(|u| u.qualified_name == name)
            .collect()
    }

    pub fn children(&self, id: EntityId) -> Vec<EntityId> {
        self.registry.children(id).collect()
    }

    pub fn declared_members(&self, id: EntityId) -> Vec<DeclaredMember<'_>> {
        let Some(unit) = self.registry.unit(id) else {
            return Vec::new();
        };
        let mut members: Vec<DeclaredMember<'_>> = match &unit.payload {
            UnitPayload::Subroutine(sig) => sig.args.iter().map(DeclaredMember::Dummy).collect(),
            UnitPayload::Function(info) => info
                .signature
                .args
                .iter()
                .map(DeclaredMember::Dummy)
                .collect(),
            UnitPayload::Interface(info) => info
                .members
                .iter()
                .map(DeclaredMember::InterfaceMember)
                .collect(),
            UnitPayload::DerivedType(info) => info
                .components
                .iter()
                .map(DeclaredMember::Component)
                .collect(),
            UnitPayload::Module(_) | UnitPayload::Program => Vec::new(),
        };
        let dummies: BTreeSet<&str> = unit
            .signature()
            .map(|s| s.arg_names().into_iter().collect())
            .unwrap_or_default();
        members.extend(
            unit.variables
                .values()
                .filter(|v| !dummies.contains(v.name.as_str()))
                .map(DeclaredMember::Variable),
        );
        members
    }

    /// Edges incident to `id` in the given direction
    pub fn edges_of(&self, id: EntityId, direction: TraceDirection) -> Vec<EdgeRef<'_>> {
        let outgoing = matches!(direction, TraceDirection::Outgoing | TraceDirection::Both);
        let incoming = matches!(direction, TraceDirection::Incoming | TraceDirection::Both);
        let mut edges = Vec::new();

        if outgoing {
            edges.extend(
                self.registry
                    .children(id)
                    .map(|child| EdgeRef::Contains { parent: id, child }),
            );
            edges.extend(self.registry.uses_from(id).iter().map(EdgeRef::Uses));
            edges.extend(
                self.calls
                    .iter()
                    .filter(|c| c.site.caller == id)
                    .map(EdgeRef::Calls),
            );
        }
        if incoming {
            if let Some(parent) = self.registry.unit(id).and_then(|u| u.parent) {
                edges.push(EdgeRef::Contains { parent, child: id });
            }
            edges.extend(
                self.registry
                    .all_uses()
                    .filter(|u| u.to == id)
                    .map(EdgeRef::Uses),
            );
            edges.extend(
                self.calls
                    .iter()
                    .filter(|c| c.status.targets().contains(&id))
                    .map(EdgeRef::Calls),
            );
        }
        edges
    }

    /// Single-hop neighbours over the given edge kinds. Ambiguous calls
    /// count as edges to every candidate.
    pub fn neighbors(&self, id: EntityId, kinds: &[EdgeKind], direction: TraceDirection) -> Vec<EntityId> {
        let mut out = BTreeSet::new();
        for edge in self.edges_of(id, direction) {
            if !kinds.contains(&edge.kind()) {
                continue;
            }
            match edge {
                EdgeRef::Contains { parent, child } => {
                    out.insert(if parent == id { child } else { parent });
                }
                EdgeRef::Uses(u) => {
                    out.insert(if u.from == id { u.to } else { u.from });
                }
                EdgeRef::Calls(c) => {
                    if c.site.caller == id && direction != TraceDirection::Incoming {
                        out.extend(c.status.targets().iter().copied());
                    }
                    if c.status.targets().contains(&id) && direction != TraceDirection::Outgoing {
                        out.insert(c.site.caller);
                    }
                }
            }
        }
        out.remove(&id);
        out.into_iter().collect()
    }

    /// Transitive closure from `id` (breadth first, `id` excluded)
    pub fn reachable(&self, id: EntityId, kinds: &[EdgeKind], direction: TraceDirection) -> Vec<EntityId> {
        let mut reached = trace::breadth_first(self, id, kinds, direction, None)
            .into_iter()
            .map(|(node, _)| node)
            .filter(|node| *node != id)
            .collect::<Vec<_>>();
        reached.sort();
        reached
    }

    /// USE graph between top-level units; nested USE statements are lifted
    /// to their enclosing module or program
    pub fn module_dependencies(&self, include_external: bool) -> Vec<ModuleDependency> {
        let mut deps = BTreeSet::new();
        for edge in self.registry.all_uses() {
            let from = self.registry.top_level(edge.from);
            if from == edge.to {
                continue;
            }
            let (Some(from_unit), Some(to_unit)) = (self.registry.unit(from), self.registry.unit(edge.to)) else {
                continue;
            };
            let external = !to_unit.defined;
            if external && !include_external {
                continue;
            }
            deps.insert(ModuleDependency {
                from: from_unit.qualified_name.clone(),
                to: to_unit.qualified_name.clone(),
                external,
            });
        }
        deps.into_iter().collect()
    }

    /// Graph-level and unit-attached diagnostics
    pub fn diagnostics(&self) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .chain(self.registry.units().flat_map(|u| u.diagnostics.iter()))
            .collect()
    }

    /// Calls edges whose status is in the given family (all when `None`)
    pub fn calls_with(&self, status: Option<StatusKind>) -> Vec<&CallEdge> {
        self.calls
            .iter()
            .filter(|c| status.map_or(true, |s| s.matches(&c.status)))
            .collect()
    }

    pub fn summary(&self) -> GraphSummary {
        let mut summary = GraphSummary {
            files: self.files.len(),
            diagnostics: self.diagnostics().len(),
            ..Default::default()
        };
        for unit in self.registry.units() {
            *summary.units.entry(unit.kind().as_str().to_string()).or_default() += 1;
        }
        for call in &self.calls {
            *summary.calls.entry(call.status.label().to_string()).or_default() += 1;
        }
        summary
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| crate::error::FlinspectError::QueryError {
            message: format!("Failed to serialize graph: {}", e),
        })
    }
}
