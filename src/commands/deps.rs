//! Deps command handler - module-level USE graph

use crate::cli::{DepsArgs, OutputFormat};
use crate::commands::{section, to_json, CommandContext};
use crate::error::Result;
use crate::graph::CodeGraph;

pub fn run_deps(args: &DepsArgs, graph: &CodeGraph, ctx: &CommandContext) -> Result<String> {
    let deps = graph.module_dependencies(args.external);

    if ctx.format == OutputFormat::Json {
        return to_json(&serde_json::json!({
            "_type": "deps",
            "total": deps.len(),
            "dependencies": deps,
        }));
    }

    let mut output = section("MODULE DEPENDENCIES");
    for dep in &deps {
        output.push_str(&format!("{} -> {}", dep.from, dep.to));
        if dep.external {
            output.push_str(" (external)");
        }
        output.push('\n');
    }
    output.push_str(&format!("\ntotal: {}\n", deps.len()));
    Ok(output)
}
