//! Summary command handler - counts per kind, call statuses, diagnostics

use crate::cli::{OutputFormat, SummaryArgs};
use crate::commands::{section, to_json, CommandContext};
use crate::error::Result;
use crate::forest::IngestReport;
use crate::graph::CodeGraph;

pub fn run_summary(
    args: &SummaryArgs,
    graph: &CodeGraph,
    report: &IngestReport,
    ctx: &CommandContext,
) -> Result<String> {
    let summary = graph.summary();
    let diagnostics = graph.diagnostics();

    if ctx.format == OutputFormat::Json {
        let listed = args.diagnostics.then_some(&diagnostics);
        let value = serde_json::json!({
            "_type": "summary",
            "summary": summary,
            "report": report,
            "diagnostics": listed,
        });
        return to_json(&value);
    }

    let mut output = section("SUMMARY");
    output.push_str(&format!("files: {}\n", summary.files));
    output.push_str("units:\n");
    for (kind, count) in &summary.units {
        output.push_str(&format!("  {}: {}\n", kind, count));
    }
    output.push_str("calls:\n");
    for (status, count) in &summary.calls {
        output.push_str(&format!("  {}: {}\n", status, count));
    }
    output.push_str(&format!("diagnostics: {}\n", summary.diagnostics));
    if args.diagnostics {
        for diagnostic in &diagnostics {
            output.push_str(&format!("  {}\n", diagnostic));
        }
    }
    if ctx.verbose {
        output.push_str(&format!("\ningested in {} ms\n", report.elapsed_ms));
    }
    Ok(output)
}
