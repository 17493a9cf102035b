//! Handles all user-facing output for the CLI.
//!
//! This module is responsible for the per-case status lines, the colorized
//! diff painting, and the closing summary. By centralizing output logic here,
//! we ensure a consistent report shape across all commands, and that a
//! non-interactive destination never receives an escape sequence.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::cli::args::ColorMode;
use crate::diff::{self, DiffLine};
use crate::discovery::FixtureCase;
use crate::invoke::InvocationResult;
use crate::runner::{CaseOutcome, Reporter, SuiteSummary};

/// Maps the CLI color flag onto a termcolor choice. `Auto` suppresses color
/// whenever stdout is not an interactive terminal, so captured or redirected
/// report text stays free of escape sequences.
pub fn color_choice(mode: ColorMode) -> ColorChoice {
    match mode {
        ColorMode::Always => ColorChoice::Always,
        ColorMode::Never => ColorChoice::Never,
        ColorMode::Auto => {
            if atty::is(atty::Stream::Stdout) {
                ColorChoice::Auto
            } else {
                ColorChoice::Never
            }
        }
    }
}

/// Paints the human-readable report onto any color-aware writer.
pub struct TerminalReporter<W: WriteColor> {
    out: W,
}

impl TerminalReporter<StandardStream> {
    /// Reporter writing to stdout under the given color policy.
    pub fn stdout(mode: ColorMode) -> Self {
        Self::new(StandardStream::stdout(color_choice(mode)))
    }
}

impl<W: WriteColor> TerminalReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes the `[PASS] category/case` line with a colorized tag.
    fn status_line(&mut self, label: &str, color: Color, case: &FixtureCase) {
        let _ = write!(self.out, "[");
        let _ = self
            .out
            .set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
        let _ = write!(self.out, "{label}");
        let _ = self.out.reset();
        let _ = writeln!(self.out, "] {}", case.id());
    }

    /// Exit-status block: the numeric status and the raw captured streams.
    /// No diff is shown; a non-zero exit is not a content mismatch.
    fn exit_block(&mut self, result: &InvocationResult) {
        match result.exit_code() {
            Some(code) => {
                let _ = writeln!(self.out, "  exit status: {code}");
            }
            None => {
                let _ = writeln!(self.out, "  terminated abnormally: {}", result.status);
            }
        }
        self.raw_block(&result.stdout);
        if !result.stderr.is_empty() {
            let _ = writeln!(self.out, "  stderr:");
            self.raw_block(&result.stderr);
        }
    }

    /// Writes captured output verbatim, closing it with a newline only when
    /// the capture itself lacks one.
    fn raw_block(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let _ = write!(self.out, "{text}");
        if !text.ends_with('\n') {
            let _ = writeln!(self.out);
        }
    }

    fn paint_diff(&mut self, lines: &[DiffLine]) {
        for line in lines {
            match line {
                DiffLine::Hunk(header) => {
                    let _ = self.out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)));
                    let _ = writeln!(self.out, "{header}");
                }
                DiffLine::Context(text) => {
                    let _ = self.out.reset();
                    let _ = writeln!(self.out, " {text}");
                }
                DiffLine::Removed(text) => {
                    let _ = self.out.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
                    let _ = writeln!(self.out, "-{text}");
                }
                DiffLine::Added(text) => {
                    let _ = self.out.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
                    let _ = writeln!(self.out, "+{text}");
                }
            }
        }
        let _ = self.out.reset();
    }
}

impl<W: WriteColor> Reporter for TerminalReporter<W> {
    fn case(&mut self, case: &FixtureCase, outcome: &CaseOutcome) {
        match outcome {
            CaseOutcome::Pass => self.status_line("PASS", Color::Green, case),
            _ => self.status_line("FAIL", Color::Red, case),
        }
        match outcome {
            CaseOutcome::Pass => {}
            CaseOutcome::ExitFailure(result) => self.exit_block(result),
            CaseOutcome::Mismatch { actual, expected } => {
                self.paint_diff(&diff::diff_lines(actual, expected));
            }
            CaseOutcome::TimedOut(limit) => {
                let _ = writeln!(self.out, "  timed out after {}s", limit.as_secs());
            }
        }
    }

    fn summary(&mut self, summary: &SuiteSummary) {
        let _ = writeln!(self.out);
        let _ = write!(self.out, "suite summary: {} total, ", summary.total());
        let _ = self.out.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
        let _ = write!(self.out, "{} passed", summary.passed);
        let _ = self.out.reset();
        let _ = write!(self.out, ", ");
        let _ = self.out.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
        let _ = write!(self.out, "{} failed", summary.failed);
        let _ = self.out.reset();
        let _ = writeln!(self.out);
    }
}
