//! Tests for the `summary`, `calls`, `trace` and `deps` commands

use serde_json::Value;

use crate::common::dumps::{BASIC_CALLER, BASIC_LIB, SOLVER, SOLVER_CALLER};
use crate::common::TestRepo;

fn solver_repo() -> TestRepo {
    let repo = TestRepo::new();
    repo.add_file("build/solver.f90_ptree", SOLVER);
    repo.add_file("build/solver_driver.f90_ptree", SOLVER_CALLER);
    repo
}

fn json(output: &str) -> Value {
    serde_json::from_str(output).unwrap_or_else(|e| panic!("invalid JSON ({}): {}", e, output))
}

// ============================================================================
// SUMMARY
// ============================================================================

#[test]
fn test_summary_json() {
    let repo = solver_repo();
    let output = repo.run_cli_success(&["--format", "json", "summary", "build"]);
    let value = json(&output);

    assert_eq!(value["_type"], "summary");
    assert_eq!(value["summary"]["files"], 2);
    assert_eq!(value["summary"]["units"]["program"], 1);
    assert_eq!(value["summary"]["calls"]["ambiguous"], 3);
    assert_eq!(value["report"]["ingested"].as_array().map(Vec::len), Some(2));
    assert!(value["diagnostics"].is_null());
}

#[test]
fn test_summary_text_lists_diagnostics() {
    let repo = TestRepo::new();
    repo.add_file("a/interface_basic.f90_ptree", BASIC_LIB);
    repo.add_file("b/interface_basic.f90_ptree", BASIC_LIB);
    let output = repo.run_cli_success(&["summary", "--diagnostics", "."]);

    assert!(output.contains("SUMMARY"));
    assert!(output.contains("files: 2"));
    assert!(output.contains("duplicate_definition"), "{}", output);
}

// ============================================================================
// CALLS
// ============================================================================

#[test]
fn test_calls_filtered_by_status() {
    let repo = solver_repo();
    let output = repo.run_cli_success(&["calls", "--status", "ambiguous", "build"]);

    assert!(output.contains("solver_driver -> solve [ambiguous]"), "{}", output);
    assert!(output.contains("solver_mod::solve_basic"));
    assert!(output.contains("total: 3"));
    assert!(!output.contains("[resolved]"));
}

#[test]
fn test_calls_json_for_one_caller() {
    let repo = TestRepo::new();
    repo.add_file("interface_basic.f90_ptree", BASIC_LIB);
    repo.add_file("caller_basic.f90_ptree", BASIC_CALLER);
    let output = repo.run_cli_success(&[
        "calls",
        "--caller",
        "caller_basic_mod::test_calls",
        "--format",
        "json",
        ".",
    ]);
    let value = json(&output);

    assert_eq!(value["_type"], "calls");
    assert_eq!(value["total"], 3);
    let targets: Vec<&str> = value["calls"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["targets"][0].as_str().unwrap())
        .collect();
    assert_eq!(
        targets,
        vec![
            "interface_basic_mod::compute_real",
            "interface_basic_mod::compute_int",
            "interface_basic_mod::compute_logical",
        ]
    );
}

// ============================================================================
// TRACE
// ============================================================================

#[test]
fn test_trace_incoming_text() {
    let repo = solver_repo();
    let output = repo.run_cli_success(&[
        "trace",
        "--unit",
        "solver_mod::solve_full",
        "--direction",
        "in",
        "build",
    ]);

    assert!(output.contains("direction: incoming"));
    assert!(output.contains("solver_driver (program)"), "{}", output);
    assert!(output.contains("solver_driver -calls-> solver_mod::solve_full [resolved]"));
}

#[test]
fn test_trace_json_with_contains_edges() {
    let repo = solver_repo();
    let output = repo.run_cli_success(&[
        "--format",
        "json",
        "trace",
        "--unit",
        "solver_mod",
        "--edges",
        "contains",
        "--depth",
        "1",
        "build",
    ]);
    let value = json(&output);

    assert_eq!(value["_type"], "trace");
    // module, config_t, three interfaces, seven procedures
    assert_eq!(value["stats"]["total_nodes"], 12);
    assert_eq!(value["stats"]["total_edges"], 11);
    assert!(value["edges"]
        .as_array()
        .unwrap()
        .iter()
        .all(|e| e["kind"] == "contains"));
}

// ============================================================================
// DEPS
// ============================================================================

#[test]
fn test_deps_external_flag() {
    let repo = TestRepo::new();
    repo.add_file("caller_basic.f90_ptree", BASIC_CALLER);

    let output = repo.run_cli_success(&["deps", "."]);
    assert!(output.contains("total: 0"));

    let output = repo.run_cli_success(&["deps", "--external", "."]);
    assert!(output.contains("caller_basic_mod -> interface_basic_mod (external)"));
    assert!(output.contains("total: 1"));
}
