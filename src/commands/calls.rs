//! Calls command handler - call edges with their resolution

use serde::Serialize;

use crate::cli::{CallsArgs, OutputFormat};
use crate::commands::{display_name, section, to_json, CommandContext};
use crate::error::{FlinspectError, Result};
use crate::graph::CodeGraph;

#[derive(Debug, Serialize)]
struct CallRow {
    caller: String,
    callee: String,
    status: &'static str,
    targets: Vec<String>,
    location: String,
}

pub fn run_calls(args: &CallsArgs, graph: &CodeGraph, ctx: &CommandContext) -> Result<String> {
    let caller = match &args.caller {
        Some(name) => {
            let ids: Vec<_> = graph.find_units(name).into_iter().map(|u| u.id).collect();
            if ids.is_empty() {
                return Err(FlinspectError::QueryError {
                    message: format!("No unit named '{}'", name),
                });
            }
            Some(ids)
        }
        None => None,
    };

    let rows: Vec<CallRow> = graph
        .calls_with(args.status.map(Into::into))
        .into_iter()
        .filter(|edge| caller.as_ref().map_or(true, |ids| ids.contains(&edge.site.caller)))
        .map(|edge| CallRow {
            caller: display_name(graph, edge.site.caller),
            callee: edge.site.callee.clone(),
            status: edge.status.label(),
            targets: edge
                .status
                .targets()
                .iter()
                .map(|id| display_name(graph, *id))
                .collect(),
            location: edge.site.location.to_string(),
        })
        .collect();

    if ctx.format == OutputFormat::Json {
        return to_json(&serde_json::json!({
            "_type": "calls",
            "total": rows.len(),
            "calls": rows,
        }));
    }

    let mut output = section("CALLS");
    for row in &rows {
        output.push_str(&format!("{} -> {} [{}]", row.caller, row.callee, row.status));
        if !row.targets.is_empty() {
            output.push_str(&format!(" {}", row.targets.join(", ")));
        }
        if ctx.verbose {
            output.push_str(&format!("  ({})", row.location));
        }
        output.push('\n');
    }
    output.push_str(&format!("\ntotal: {}\n", rows.len()));
    Ok(output)
}
