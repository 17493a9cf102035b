//! The suite orchestrator.
//!
//! Drives discovery, invocation, and comparison for every fixture case in
//! turn, pushing per-case outcomes through a [`Reporter`]. Cases are fully
//! independent: one case's failure, crash, or timeout never affects the
//! next. Only a missing expectation file (or a tool that cannot be spawned
//! at all) aborts the run.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use crate::diagnostics::RunnerError;
use crate::discovery::{self, FixtureCase};
use crate::invoke::{InvocationResult, ToolInvoker};

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Immutable run configuration, constructed once at startup and passed down
/// explicitly. Nothing here is ever read from ambient global state.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Root directory of `<category>/<case>.in` fixtures.
    pub root: PathBuf,
    /// Path to the tool under test.
    pub tool: PathBuf,
    /// Optional per-invocation time limit. `None` blocks indefinitely.
    pub timeout: Option<Duration>,
    /// Optional case-insensitive substring restricting the categories run.
    pub filter: Option<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("tests/fixtures"),
            tool: PathBuf::from("bin/subject"),
            timeout: None,
            filter: None,
        }
    }
}

// ============================================================================
// OUTCOMES
// ============================================================================

/// How a single case resolved. Derived per case and handed straight to the
/// reporter; never persisted.
#[derive(Debug)]
pub enum CaseOutcome {
    /// Exit zero and stdout byte-identical to the expectation.
    Pass,
    /// The tool exited non-zero. Content comparison was not attempted; the
    /// raw captured output is reported instead of a diff.
    ExitFailure(InvocationResult),
    /// The tool exited zero but its stdout differed from the expectation.
    Mismatch { actual: String, expected: String },
    /// The tool was killed at the configured time limit.
    TimedOut(Duration),
}

impl CaseOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, CaseOutcome::Pass)
    }
}

/// Aggregate pass/fail counts for a completed run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SuiteSummary {
    pub passed: usize,
    pub failed: usize,
}

impl SuiteSummary {
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Reporting seam between the runner and its output surface.
///
/// The CLI paints to a terminal; tests capture into in-memory buffers; the
/// JSON mode serializes. The runner itself never writes anywhere.
pub trait Reporter {
    fn case(&mut self, case: &FixtureCase, outcome: &CaseOutcome);
    fn summary(&mut self, summary: &SuiteSummary);
}

// ============================================================================
// EXECUTION
// ============================================================================

/// Runs every discovered fixture case sequentially, reporting each outcome
/// as it completes, and returns the aggregate counts.
pub fn run_suite(
    config: &RunnerConfig,
    reporter: &mut dyn Reporter,
) -> Result<SuiteSummary, RunnerError> {
    let invoker = ToolInvoker::new(config.tool.clone(), config.timeout);
    let mut summary = SuiteSummary::default();
    for case in discover_filtered(config)? {
        let outcome = run_case(&invoker, &case)?;
        if outcome.passed() {
            summary.passed += 1;
        } else {
            summary.failed += 1;
        }
        reporter.case(&case, &outcome);
    }
    reporter.summary(&summary);
    Ok(summary)
}

fn discover_filtered(config: &RunnerConfig) -> Result<Vec<FixtureCase>, RunnerError> {
    let mut cases = discovery::discover_cases(&config.root)?;
    if let Some(filter) = &config.filter {
        let filter = filter.to_lowercase();
        cases.retain(|case| case.category.to_lowercase().contains(&filter));
    }
    Ok(cases)
}

/// Processes one case: read the expectation, invoke the tool, compare.
///
/// The expectation is read first, fully, and closed before the tool runs; a
/// read failure is fatal and propagates. A timeout is recovered here as an
/// ordinary failing outcome.
fn run_case(invoker: &ToolInvoker, case: &FixtureCase) -> Result<CaseOutcome, RunnerError> {
    let expected =
        fs::read_to_string(&case.expected).map_err(|source| RunnerError::MissingExpectation {
            path: case.expected.clone(),
            source,
        })?;

    let result = match invoker.invoke(&case.category, &case.input) {
        Ok(result) => result,
        Err(RunnerError::ToolTimeout { limit }) => return Ok(CaseOutcome::TimedOut(limit)),
        Err(err) => return Err(err),
    };

    if !result.success() {
        return Ok(CaseOutcome::ExitFailure(result));
    }
    if result.stdout == expected {
        return Ok(CaseOutcome::Pass);
    }
    Ok(CaseOutcome::Mismatch {
        actual: result.stdout,
        expected,
    })
}
