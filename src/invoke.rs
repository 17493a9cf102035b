//! Subprocess invocation of the tool under test.
//!
//! The invocation contract is fixed: `<program> test <category> <fixture>`,
//! with working directory and environment inherited from the runner. Stdout
//! is the channel compared against expectations; stderr is captured only for
//! failure diagnostics.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::diagnostics::RunnerError;

/// How often a deadline-bounded invocation polls the child for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Observed outcome of one tool invocation.
#[derive(Debug)]
pub struct InvocationResult {
    pub status: ExitStatus,
    /// Captured stdout, verbatim: no trimming, no line-ending normalization.
    pub stdout: String,
    /// Captured stderr; surfaced in failure diagnostics, never compared.
    pub stderr: String,
}

impl InvocationResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Numeric exit code, or `None` when the process was killed by a signal.
    pub fn exit_code(&self) -> Option<i32> {
        self.status.code()
    }
}

/// Invokes the tool under test once per fixture.
#[derive(Debug, Clone)]
pub struct ToolInvoker {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl ToolInvoker {
    pub fn new(program: PathBuf, timeout: Option<Duration>) -> Self {
        Self { program, timeout }
    }

    /// Runs `<program> test <category> <fixture>` to completion and captures
    /// both output streams.
    ///
    /// With no timeout configured this blocks until the child exits, however
    /// long that takes. With a timeout, a child still running at the deadline
    /// is killed and `RunnerError::ToolTimeout` is returned.
    pub fn invoke(&self, category: &str, fixture: &Path) -> Result<InvocationResult, RunnerError> {
        let mut command = Command::new(&self.program);
        command.arg("test").arg(category).arg(fixture);
        match self.timeout {
            None => self.run_blocking(command),
            Some(limit) => self.run_with_deadline(command, limit),
        }
    }

    fn run_blocking(&self, mut command: Command) -> Result<InvocationResult, RunnerError> {
        let output = command.output().map_err(|source| RunnerError::ToolLaunch {
            program: self.program.clone(),
            source,
        })?;
        Ok(InvocationResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn run_with_deadline(
        &self,
        mut command: Command,
        limit: Duration,
    ) -> Result<InvocationResult, RunnerError> {
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        let mut child = command.spawn().map_err(|source| RunnerError::ToolLaunch {
            program: self.program.clone(),
            source,
        })?;

        // The streams must be drained while waiting, or a chatty child blocks
        // on a full pipe and never exits.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let deadline = Instant::now() + limit;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(RunnerError::ToolTimeout { limit });
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(source) => {
                    let _ = child.kill();
                    return Err(RunnerError::ToolWait { source });
                }
            }
        };

        Ok(InvocationResult {
            status,
            stdout: collect(stdout),
            stderr: collect(stderr),
        })
    }
}

/// Reads a child stream to the end on a scoped helper thread.
fn drain<R: Read + Send + 'static>(stream: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut stream) = stream {
            let _ = stream.read_to_end(&mut buffer);
        }
        buffer
    })
}

fn collect(handle: thread::JoinHandle<Vec<u8>>) -> String {
    let bytes = handle.join().unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}
