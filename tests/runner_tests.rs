//! End-to-end runner behavior against a stub tool under test.

#![cfg(unix)]

mod common;

use std::path::PathBuf;
use std::time::Duration;

use goldrun::cli::output::TerminalReporter;
use goldrun::report::JsonReporter;
use goldrun::runner::{run_suite, RunnerConfig, SuiteSummary};
use goldrun::RunnerError;
use tempfile::tempdir;
use termcolor::NoColor;

/// Runs the suite with a plain-text capturing reporter.
fn run_captured(config: &RunnerConfig) -> (String, SuiteSummary) {
    let mut reporter = TerminalReporter::new(NoColor::new(Vec::new()));
    let summary = run_suite(config, &mut reporter).unwrap();
    let text = String::from_utf8(reporter.into_inner().into_inner()).unwrap();
    (text, summary)
}

fn config(root: PathBuf, tool: PathBuf) -> RunnerConfig {
    RunnerConfig {
        root,
        tool,
        timeout: None,
        filter: None,
    }
}

#[test]
fn matching_output_reports_pass() {
    let root = tempdir().unwrap();
    common::write_case(root.path(), "parse", "basic", "1+1", "2\n");
    let tool = root.path().join("stub-tool");
    common::write_tool(&tool, "printf '2\\n'");

    let (text, summary) = run_captured(&config(root.path().to_path_buf(), tool));
    assert!(text.contains("[PASS] parse/basic"));
    assert_eq!(summary, SuiteSummary { passed: 1, failed: 0 });
}

#[test]
fn mismatched_output_reports_fail_with_a_diff() {
    let root = tempdir().unwrap();
    common::write_case(root.path(), "parse", "basic", "1+1", "2\n");
    let tool = root.path().join("stub-tool");
    common::write_tool(&tool, "printf '3\\n'");

    let (text, summary) = run_captured(&config(root.path().to_path_buf(), tool));
    assert!(text.contains("[FAIL] parse/basic"));
    assert!(text.contains("@@"));
    assert!(text.contains("-3"));
    assert!(text.contains("+2"));
    assert_eq!(summary, SuiteSummary { passed: 0, failed: 1 });
}

#[test]
fn nonzero_exit_reports_fail_without_a_diff() {
    let root = tempdir().unwrap();
    common::write_case(root.path(), "parse", "basic", "1+1", "2\n");
    let tool = root.path().join("stub-tool");
    common::write_tool(&tool, "echo 'syntax error'\nexit 1");

    let (text, summary) = run_captured(&config(root.path().to_path_buf(), tool));
    assert!(text.contains("[FAIL] parse/basic"));
    assert!(text.contains("exit status: 1"));
    assert!(text.contains("syntax error"));
    assert!(!text.contains("@@"));
    assert_eq!(summary, SuiteSummary { passed: 0, failed: 1 });
}

#[test]
fn one_failing_case_does_not_stop_the_run() {
    let root = tempdir().unwrap();
    common::write_case(root.path(), "alpha", "basic", "1+1", "2\n");
    common::write_case(root.path(), "crash", "basic", "1+1", "2\n");
    common::write_case(root.path(), "zeta", "basic", "1+1", "2\n");
    let tool = root.path().join("stub-tool");
    common::write_tool(
        &tool,
        "case \"$2\" in\n  crash) echo boom >&2; exit 7 ;;\n  *) printf '2\\n' ;;\nesac",
    );

    let (text, summary) = run_captured(&config(root.path().to_path_buf(), tool));
    assert!(text.contains("[PASS] alpha/basic"));
    assert!(text.contains("[FAIL] crash/basic"));
    assert!(text.contains("exit status: 7"));
    assert!(text.contains("boom"));
    assert!(text.contains("[PASS] zeta/basic"));
    assert_eq!(summary, SuiteSummary { passed: 2, failed: 1 });
}

#[test]
fn missing_expectation_aborts_the_run() {
    let root = tempdir().unwrap();
    let dir = root.path().join("parse");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("orphan.in"), "1+1").unwrap();
    let tool = root.path().join("stub-tool");
    common::write_tool(&tool, "printf '2\\n'");

    let mut reporter = TerminalReporter::new(NoColor::new(Vec::new()));
    let err = run_suite(&config(root.path().to_path_buf(), tool), &mut reporter).unwrap_err();
    assert!(matches!(err, RunnerError::MissingExpectation { .. }));
}

#[test]
fn unlaunchable_tool_aborts_the_run() {
    let root = tempdir().unwrap();
    common::write_case(root.path(), "parse", "basic", "1+1", "2\n");
    let tool = root.path().join("no-such-tool");

    let mut reporter = TerminalReporter::new(NoColor::new(Vec::new()));
    let err = run_suite(&config(root.path().to_path_buf(), tool), &mut reporter).unwrap_err();
    assert!(matches!(err, RunnerError::ToolLaunch { .. }));
}

#[test]
fn timeout_fails_the_case_and_the_run_continues() {
    let root = tempdir().unwrap();
    common::write_case(root.path(), "slow", "basic", "1+1", "2\n");
    common::write_case(root.path(), "zeta", "basic", "1+1", "2\n");
    let tool = root.path().join("stub-tool");
    common::write_tool(
        &tool,
        "case \"$2\" in\n  slow) sleep 5; printf '2\\n' ;;\n  *) printf '2\\n' ;;\nesac",
    );

    let mut cfg = config(root.path().to_path_buf(), tool);
    cfg.timeout = Some(Duration::from_secs(1));
    let (text, summary) = run_captured(&cfg);
    assert!(text.contains("[FAIL] slow/basic"));
    assert!(text.contains("timed out after 1s"));
    assert!(text.contains("[PASS] zeta/basic"));
    assert_eq!(summary, SuiteSummary { passed: 1, failed: 1 });
}

#[test]
fn filter_restricts_the_categories_run() {
    let root = tempdir().unwrap();
    common::write_case(root.path(), "lexer", "basic", "1+1", "2\n");
    common::write_case(root.path(), "parse", "basic", "1+1", "2\n");
    let tool = root.path().join("stub-tool");
    common::write_tool(&tool, "printf '2\\n'");

    let mut cfg = config(root.path().to_path_buf(), tool);
    cfg.filter = Some("parse".to_string());
    let (text, summary) = run_captured(&cfg);
    assert!(text.contains("parse/basic"));
    assert!(!text.contains("lexer/basic"));
    assert_eq!(summary.total(), 1);
}

#[test]
fn captured_report_contains_no_escape_sequences() {
    let root = tempdir().unwrap();
    common::write_case(root.path(), "parse", "basic", "1+1", "2\n");
    let tool = root.path().join("stub-tool");
    common::write_tool(&tool, "printf '3\\n'");

    let (text, _) = run_captured(&config(root.path().to_path_buf(), tool));
    assert!(!text.contains('\u{1b}'));
}

#[test]
fn json_reporter_emits_one_object_per_case_plus_summary() {
    let root = tempdir().unwrap();
    common::write_case(root.path(), "good", "basic", "1+1", "2\n");
    common::write_case(root.path(), "wrong", "basic", "1+1", "2\n");
    let tool = root.path().join("stub-tool");
    common::write_tool(
        &tool,
        "case \"$2\" in\n  good) printf '2\\n' ;;\n  *) printf '3\\n' ;;\nesac",
    );

    let mut reporter = JsonReporter::new(Vec::new());
    let summary = run_suite(&config(root.path().to_path_buf(), tool), &mut reporter).unwrap();
    let text = String::from_utf8(reporter.into_inner()).unwrap();

    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["status"], "pass");
    assert_eq!(lines[0]["category"], "good");
    assert_eq!(lines[1]["status"], "fail");
    assert_eq!(lines[1]["failure"], "mismatch");
    assert_eq!(lines[2]["passed"], 1);
    assert_eq!(lines[2]["failed"], 1);
    assert_eq!(summary.total(), 2);
}
