//! Unified error type for every fatal failure mode of the runner.
//!
//! Only conditions that abort a run (or, for the time limit, abort a single
//! invocation) live here. A tool exiting non-zero or printing the wrong
//! output is not an error: those are ordinary case outcomes handled by the
//! runner and its reporters.

use std::path::PathBuf;
use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;

/// All runner failure modes, rendered at top level as miette diagnostics.
#[derive(Debug, Error, Diagnostic)]
pub enum RunnerError {
    /// The fixture tree could not be enumerated.
    #[error("failed to scan fixture directory '{path}'")]
    #[diagnostic(
        code(goldrun::discovery),
        help("the fixture root must be a readable directory of category subdirectories")
    )]
    Discovery {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The `.out` sibling of a discovered `.in` fixture could not be read.
    #[error("cannot read expectation file '{path}'")]
    #[diagnostic(
        code(goldrun::expectation),
        help("every '<case>.in' fixture needs a readable '<case>.out' sibling")
    )]
    MissingExpectation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tool under test could not be spawned at all.
    #[error("failed to launch tool '{program}'")]
    #[diagnostic(
        code(goldrun::launch),
        help("check the --tool path; the default is 'bin/subject' relative to the working directory")
    )]
    ToolLaunch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on a spawned tool process failed.
    #[error("failed to monitor tool process")]
    #[diagnostic(code(goldrun::wait))]
    ToolWait {
        #[source]
        source: std::io::Error,
    },

    /// The tool ran past the configured time limit and was killed.
    ///
    /// Recovered per case by the runner; it never aborts the run.
    #[error("tool exceeded the {}s time limit", limit.as_secs())]
    #[diagnostic(code(goldrun::timeout))]
    ToolTimeout { limit: Duration },
}
