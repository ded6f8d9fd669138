//! ProcessRunner trait for abstracting subprocess execution.
//!
//! The generator never spawns processes itself. It hands a complete shell
//! command line to a runner and inspects the captured result, which keeps the
//! orchestration testable without a real renderer installed.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::time::Duration;
use thiserror::Error;

/// Error type for process execution.
///
/// Only failures to start or observe the child end up here. A child that runs
/// and exits badly is reported through [`ProcessOutput`] instead.
#[derive(Error, Debug, Clone)]
pub enum ExecutorError {
    #[error("Failed to spawn '{command}': {message}")]
    Spawn { command: String, message: String },

    #[error("Failed to wait for '{command}': {message}")]
    Wait { command: String, message: String },
}

/// Captured result of one subprocess run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code. `None` when the process did not terminate on its own
    /// (killed after a timeout, or by a signal).
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn new(status: Option<i32>, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            status,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// A run that exited with status 0 and printed nothing.
    pub fn success() -> Self {
        Self::new(Some(0), "", "")
    }

    pub fn terminated(&self) -> bool {
        self.status.is_some()
    }
}

/// Runs a shell command line to completion.
///
/// # Arguments
///
/// * `command` - The complete, already escaped command line
/// * `env` - Extra environment variables, added on top of the inherited ones
/// * `timeout` - Upper bound on the wall-clock run time; `None` waits forever
pub trait ProcessRunner: Send + Sync + Debug {
    fn run(
        &self,
        command: &str,
        env: Option<&BTreeMap<String, String>>,
        timeout: Option<Duration>,
    ) -> Result<ProcessOutput, ExecutorError>;

    /// Returns a human-readable name for this runner (for logging/debugging).
    fn name(&self) -> &'static str;
}
