//! Process runner implementations for weasy.
//!
//! ## Available Runners
//!
//! - [`ShellRunner`]: runs the command line through the platform shell
//!   (`sh -c` / `cmd /C`) with optional extra environment and a timeout
//!
//! ## Usage
//!
//! ```ignore
//! use weasy_executor::ShellRunner;
//! use weasy_traits::ProcessRunner;
//!
//! let output = ShellRunner::new().run("weasyprint 'in.html' 'out.pdf'", None, None)?;
//! assert_eq!(output.status, Some(0));
//! ```

// Re-export from weasy-traits
pub use weasy_traits::{ExecutorError, ProcessOutput, ProcessRunner};

use std::collections::BTreeMap;
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Runs command lines through the platform shell.
///
/// Both output streams are drained on background threads while the child
/// runs, so a chatty renderer cannot block on a full pipe. When a timeout is
/// given and elapses, the child is killed and the returned output has no
/// status.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    poll_interval: Duration,
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl ShellRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// How often the child is checked for completion while a timeout is armed.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    fn shell(command: &str) -> Command {
        #[cfg(windows)]
        {
            let mut shell = Command::new("cmd");
            shell.arg("/C").arg(command);
            shell
        }
        #[cfg(not(windows))]
        {
            use std::os::unix::process::CommandExt;

            let mut shell = Command::new("sh");
            // Own process group, so a timeout can take down grandchildren too.
            shell.arg("-c").arg(command).process_group(0);
            shell
        }
    }

    fn kill(child: &mut Child) {
        #[cfg(not(windows))]
        {
            let _ = Command::new("kill")
                .args(["-9", "--", &format!("-{}", child.id())])
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();
        }
        // The child may already be gone.
        let _ = child.kill();
    }

    /// Waits for the child, killing it once `timeout` has elapsed.
    ///
    /// Returns `Ok(None)` when the child had to be killed.
    fn wait(
        &self,
        child: &mut Child,
        command: &str,
        timeout: Option<Duration>,
    ) -> Result<Option<ExitStatus>, ExecutorError> {
        let wait_error = |e: std::io::Error| ExecutorError::Wait {
            command: command.to_string(),
            message: e.to_string(),
        };

        let Some(timeout) = timeout else {
            return child.wait().map(Some).map_err(wait_error);
        };

        let start = Instant::now();
        loop {
            if let Some(status) = child.try_wait().map_err(wait_error)? {
                return Ok(Some(status));
            }
            if start.elapsed() >= timeout {
                log::warn!(
                    "Killing '{}' after {}s timeout.",
                    command,
                    timeout.as_secs_f64()
                );
                Self::kill(child);
                child.wait().map_err(wait_error)?;
                return Ok(None);
            }
            thread::sleep(self.poll_interval);
        }
    }
}

fn drain<R: Read + Send + 'static>(stream: Option<R>) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut stream) = stream {
            let _ = stream.read_to_end(&mut buffer);
        }
        String::from_utf8_lossy(&buffer).into_owned()
    })
}

fn join(handle: JoinHandle<String>) -> String {
    handle.join().unwrap_or_default()
}

impl ProcessRunner for ShellRunner {
    fn run(
        &self,
        command: &str,
        env: Option<&BTreeMap<String, String>>,
        timeout: Option<Duration>,
    ) -> Result<ProcessOutput, ExecutorError> {
        let mut shell = Self::shell(command);
        shell
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(env) = env {
            shell.envs(env);
        }

        let mut child = shell.spawn().map_err(|e| ExecutorError::Spawn {
            command: command.to_string(),
            message: e.to_string(),
        })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = self.wait(&mut child, command, timeout)?;

        Ok(ProcessOutput {
            // `code()` is None when a signal ended the child.
            status: status.and_then(|s| s.code()),
            stdout: join(stdout),
            stderr: join(stderr),
        })
    }

    fn name(&self) -> &'static str {
        "ShellRunner"
    }
}
