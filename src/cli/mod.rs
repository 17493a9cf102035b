//! The goldrun command-line interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;

use crate::cli::args::{ColorMode, Command, GoldrunArgs, ReportFormat};
use crate::cli::output::TerminalReporter;
use crate::diagnostics::RunnerError;
use crate::discovery;
use crate::report::JsonReporter;
use crate::runner::{run_suite, RunnerConfig, SuiteSummary};

pub mod args;
pub mod output;

/// Parses arguments, dispatches, and returns the process exit code:
/// 0 when every case passed, 1 when any case failed, 2 on a fatal error.
pub fn run() -> i32 {
    let args = GoldrunArgs::parse();

    let result = match args.command {
        Command::Run {
            root,
            filter,
            tool,
            timeout,
            color,
            format,
        } => run_command(root, filter, tool, timeout, color, format),
        Command::List { root } => list_command(&root),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            let report = miette::Report::new(err);
            eprintln!("{report:?}");
            2
        }
    }
}

/// Handles the `run` subcommand.
fn run_command(
    root: PathBuf,
    filter: Option<String>,
    tool: PathBuf,
    timeout: Option<u64>,
    color: ColorMode,
    format: ReportFormat,
) -> Result<i32, RunnerError> {
    let config = RunnerConfig {
        root,
        tool,
        timeout: timeout.map(Duration::from_secs),
        filter,
    };
    let summary = match format {
        ReportFormat::Text => {
            let mut reporter = TerminalReporter::stdout(color);
            run_suite(&config, &mut reporter)?
        }
        ReportFormat::Json => {
            let mut reporter = JsonReporter::stdout();
            run_suite(&config, &mut reporter)?
        }
    };
    Ok(exit_code(&summary))
}

/// Handles the `list` subcommand.
fn list_command(root: &Path) -> Result<i32, RunnerError> {
    for case in discovery::discover_cases(root)? {
        println!("{}", case.id());
    }
    Ok(0)
}

fn exit_code(summary: &SuiteSummary) -> i32 {
    if summary.all_passed() {
        0
    } else {
        1
    }
}
