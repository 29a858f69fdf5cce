//! Exit codes and failure reporting

use crate::common::dumps::{BASIC_LIB, SOLVER};
use crate::common::TestRepo;

#[test]
fn test_missing_input_path_exits_1() {
    let repo = TestRepo::new();
    let (code, stderr) = repo.run_cli_failure(&["summary", "does_not_exist"]);
    assert_eq!(code, Some(1));
    assert!(stderr.contains("File not found"), "{}", stderr);
}

#[test]
fn test_invalid_config_exits_2() {
    let repo = TestRepo::new();
    repo.add_file("interface_basic.f90_ptree", BASIC_LIB);
    repo.add_file("flinspect.toml", "[ingest]\nthreads = 0\n");
    let (code, stderr) = repo.run_cli_failure(&["summary", "."]);
    assert_eq!(code, Some(2));
    assert!(stderr.contains("threads"), "{}", stderr);
}

#[test]
fn test_explicit_config_file() {
    let repo = TestRepo::new();
    repo.add_file("dumps/interface_basic.f90.tree", BASIC_LIB);
    repo.add_file("conf/custom.toml", "[ingest]\nptree_suffix = \".tree\"\n");

    let output = repo.run_cli_success(&["--config", "conf/custom.toml", "summary", "dumps"]);
    assert!(output.contains("files: 1"), "{}", output);
}

#[test]
fn test_unknown_trace_unit_exits_3() {
    let repo = TestRepo::new();
    repo.add_file("solver.f90_ptree", SOLVER);
    let (code, stderr) = repo.run_cli_failure(&["trace", "--unit", "nowhere", "."]);
    assert_eq!(code, Some(3));
    assert!(stderr.contains("No unit named 'nowhere'"), "{}", stderr);
}

#[test]
fn test_paths_are_required() {
    let repo = TestRepo::new();
    let (code, _) = repo.run_cli_failure(&["calls"]);
    assert_eq!(code, Some(2));
}
