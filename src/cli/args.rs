//! Defines the command-line arguments and subcommands for the goldrun CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "goldrun",
    version,
    about = "Golden-fixture conformance runner for command-line tools."
)]
pub struct GoldrunArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Discover fixtures and run the tool under test against each one.
    Run {
        /// Root directory of category subdirectories holding fixture pairs.
        #[arg(default_value = "tests/fixtures")]
        root: PathBuf,
        /// Only run categories whose name contains this substring.
        #[arg(long)]
        filter: Option<String>,
        /// Path to the tool under test.
        #[arg(long, default_value = "bin/subject")]
        tool: PathBuf,
        /// Kill an invocation that runs longer than this many seconds.
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
        /// When to colorize the report.
        #[arg(long, value_enum, default_value = "auto")]
        color: ColorMode,
        /// Report format.
        #[arg(long, value_enum, default_value = "text")]
        format: ReportFormat,
    },
    /// List discovered category/case pairs without running anything.
    List {
        /// Root directory of category subdirectories holding fixture pairs.
        #[arg(default_value = "tests/fixtures")]
        root: PathBuf,
    },
}

/// Colorization policy for the text report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Colorize only when stdout is an interactive terminal.
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable report with colorized diffs.
    Text,
    /// One JSON object per case, then a summary object.
    Json,
}
