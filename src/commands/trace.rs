//! Trace command handler - traverse the graph from one unit.

use crate::cli::{OutputFormat, TraceArgs};
use crate::commands::{display_name, section, to_json, CommandContext};
use crate::error::Result;
use crate::graph::CodeGraph;
use crate::trace::{self, TraceDirection, TraceOptions};

pub fn run_trace(args: &TraceArgs, graph: &CodeGraph, ctx: &CommandContext) -> Result<String> {
    let options = TraceOptions {
        target: args.unit.clone(),
        depth: args.depth,
        limit: args.limit,
        kinds: args.edges.iter().copied().map(Into::into).collect(),
        direction: args.direction.into(),
    };
    let result = trace::trace(graph, &options)?;

    let direction = match options.direction {
        TraceDirection::Incoming => "incoming",
        TraceDirection::Outgoing => "outgoing",
        TraceDirection::Both => "both",
    };

    if ctx.format == OutputFormat::Json {
        return to_json(&serde_json::json!({
            "_type": "trace",
            "roots": result.roots,
            "nodes": result.nodes,
            "edges": result.edges,
            "stats": result.stats,
            "direction": direction,
            "depth": options.depth,
            "limit": options.limit,
        }));
    }

    let mut output = section("TRACE");
    output.push_str(&format!("root: {}\n", options.target));
    output.push_str(&format!("direction: {}\n", direction));
    output.push_str(&format!("nodes[{}]:\n", result.nodes.len()));
    for node in &result.nodes {
        output.push_str(&format!("  {}{} ({})", "  ".repeat(node.depth), node.name, node.kind));
        if let (true, Some(location)) = (ctx.verbose, &node.location) {
            output.push_str(&format!(" {}", location));
        }
        output.push('\n');
    }
    output.push_str(&format!("edges[{}]:\n", result.edges.len()));
    for edge in &result.edges {
        output.push_str(&format!(
            "  {} -{}-> {}",
            display_name(graph, edge.from),
            edge.kind,
            display_name(graph, edge.to)
        ));
        if let Some(status) = &edge.status {
            output.push_str(&format!(" [{}]", status));
        }
        output.push('\n');
    }
    output.push_str(&format!(
        "\nstats: nodes={}, edges={}, depth={}, truncated={}\n",
        result.stats.total_nodes, result.stats.total_edges, result.stats.depth_reached, result.stats.truncated
    ));
    Ok(output)
}
