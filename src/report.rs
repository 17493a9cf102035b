//! Machine-readable case reports.
//!
//! The JSON mode emits one object per case as it completes, then a summary
//! object, each on its own line. The shape mirrors the text report: status,
//! identifier, and the failure kind when there is one.

use std::io::{self, Write};

use serde::Serialize;

use crate::discovery::FixtureCase;
use crate::runner::{CaseOutcome, Reporter, SuiteSummary};

/// Serialized form of one case outcome.
#[derive(Debug, Serialize)]
pub struct CaseReport<'a> {
    pub status: &'static str,
    pub category: &'a str,
    pub case: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

impl<'a> CaseReport<'a> {
    pub fn for_case(case: &'a FixtureCase, outcome: &CaseOutcome) -> Self {
        let (status, failure, exit_code) = match outcome {
            CaseOutcome::Pass => ("pass", None, None),
            CaseOutcome::ExitFailure(result) => ("fail", Some("exit-status"), result.exit_code()),
            CaseOutcome::Mismatch { .. } => ("fail", Some("mismatch"), None),
            CaseOutcome::TimedOut(_) => ("fail", Some("timeout"), None),
        };
        Self {
            status,
            category: &case.category,
            case: &case.name,
            failure,
            exit_code,
        }
    }
}

/// Reporter emitting newline-delimited JSON.
pub struct JsonReporter<W: Write> {
    out: W,
}

impl JsonReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn case(&mut self, case: &FixtureCase, outcome: &CaseOutcome) {
        if let Ok(line) = serde_json::to_string(&CaseReport::for_case(case, outcome)) {
            let _ = writeln!(self.out, "{line}");
        }
    }

    fn summary(&mut self, summary: &SuiteSummary) {
        if let Ok(line) = serde_json::to_string(summary) {
            let _ = writeln!(self.out, "{line}");
        }
    }
}
