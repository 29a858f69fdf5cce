//! Trace utility for traversal across the containment, USE and call graphs.

use std::collections::{BTreeSet, HashSet, VecDeque};

use serde::Serialize;

use crate::error::{FlinspectError, Result};
use crate::graph::{CodeGraph, EdgeKind, EdgeRef};
use crate::schema::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceDirection {
    Incoming,
    Outgoing,
    Both,
}

impl TraceDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "incoming" | "in" => Some(TraceDirection::Incoming),
            "outgoing" | "out" => Some(TraceDirection::Outgoing),
            "both" => Some(TraceDirection::Both),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TraceOptions {
    /// Qualified name of the root unit
    pub target: String,
    pub depth: usize,
    pub limit: usize,
    pub kinds: Vec<EdgeKind>,
    pub direction: TraceDirection,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            target: String::new(),
            depth: 3,
            limit: 500,
            kinds: vec![EdgeKind::Calls],
            direction: TraceDirection::Outgoing,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TraceNode {
    pub id: EntityId,
    pub name: String,
    pub kind: String,
    pub depth: usize,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct TraceEdge {
    pub from: EntityId,
    pub to: EntityId,
    pub kind: String,
    /// Call status for Calls edges
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TraceStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub depth_reached: usize,
    pub truncated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TraceResult {
    pub roots: Vec<EntityId>,
    pub nodes: Vec<TraceNode>,
    pub edges: Vec<TraceEdge>,
    pub stats: TraceStats,
}

/// Breadth-first walk from `root`, returning every visited unit with its
/// depth (root included at depth 0)
pub(crate) fn breadth_first(
    graph: &CodeGraph,
    root: EntityId,
    kinds: &[EdgeKind],
    direction: TraceDirection,
    max_depth: Option<usize>,
) -> Vec<(EntityId, usize)> {
    let mut visited = HashSet::new();
    let mut order = Vec::new();
    let mut queue = VecDeque::new();
    queue.push_back((root, 0usize));

    while let Some((current, depth)) = queue.pop_front() {
        if !visited.insert(current) {
            continue;
        }
        order.push((current, depth));
        if max_depth.map_or(false, |max| depth >= max) {
            continue;
        }
        for next in graph.neighbors(current, kinds, direction) {
            if !visited.contains(&next) {
                queue.push_back((next, depth + 1));
            }
        }
    }
    order
}

/// Trace the neighbourhood of one unit, collecting nodes and edges
pub fn trace(graph: &CodeGraph, options: &TraceOptions) -> Result<TraceResult> {
    let roots: Vec<EntityId> = graph
        .find_units(&options.target)
        .into_iter()
        .map(|u| u.id)
        .collect();
    if roots.is_empty() {
        return Err(FlinspectError::QueryError {
            message: format!("No unit named '{}'", options.target),
        });
    }

    let mut nodes = Vec::new();
    let mut seen = HashSet::new();
    let mut depth_reached = 0;
    let mut truncated = false;

    'roots: for root in &roots {
        for (id, depth) in breadth_first(graph, *root, &options.kinds, options.direction, Some(options.depth)) {
            if seen.contains(&id) {
                continue;
            }
            if nodes.len() >= options.limit {
                truncated = true;
                break 'roots;
            }
            let Some(unit) = graph.unit(id) else {
                continue;
            };
            seen.insert(id);
            depth_reached = depth_reached.max(depth);
            nodes.push(TraceNode {
                id,
                name: unit.qualified_name.clone(),
                kind: unit.kind().as_str().to_string(),
                depth,
                location: unit.location.as_ref().map(ToString::to_string),
            });
        }
    }

    let mut edges = BTreeSet::new();
    for id in &seen {
        for edge in graph.edges_of(*id, TraceDirection::Outgoing) {
            if !options.kinds.contains(&edge.kind()) {
                continue;
            }
            match edge {
                EdgeRef::Contains { parent, child } if seen.contains(&child) => {
                    edges.insert(TraceEdge {
                        from: parent,
                        to: child,
                        kind: EdgeKind::Contains.as_str().to_string(),
                        status: None,
                    });
                }
                EdgeRef::Uses(u) if seen.contains(&u.to) => {
                    edges.insert(TraceEdge {
                        from: u.from,
                        to: u.to,
                        kind: EdgeKind::Uses.as_str().to_string(),
                        status: None,
                    });
                }
                EdgeRef::Calls(c) => {
                    for target in c.status.targets().iter().filter(|t| seen.contains(t)) {
                        edges.insert(TraceEdge {
                            from: c.site.caller,
                            to: *target,
                            kind: EdgeKind::Calls.as_str().to_string(),
                            status: Some(c.status.label().to_string()),
                        });
                    }
                }
                _ => {}
            }
        }
    }
    let edges: Vec<TraceEdge> = edges.into_iter().collect();

    tracing::debug!(
        "[TRACE] {}: {} nodes, {} edges",
        options.target,
        nodes.len(),
        edges.len()
    );

    Ok(TraceResult {
        roots,
        stats: TraceStats {
            total_nodes: nodes.len(),
            total_edges: edges.len(),
            depth_reached,
            truncated,
        },
        nodes,
        edges,
    })
}
