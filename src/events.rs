// src/events.rs
//! Structured events emitted around each renderer invocation.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::path::Path;
use std::time::Duration;

/// One lifecycle step of a `generate` call.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationEvent<'a> {
    Starting {
        input: &'a str,
        output: &'a Path,
        command: &'a str,
        env: Option<&'a BTreeMap<String, String>>,
        timeout: Option<Duration>,
    },
    Succeeded {
        output: &'a Path,
        command: &'a str,
        stdout: &'a str,
        stderr: &'a str,
    },
    Failed {
        output: &'a Path,
        command: &'a str,
        status: Option<i32>,
        stdout: &'a str,
        stderr: &'a str,
    },
}

impl GenerationEvent<'_> {
    pub fn command(&self) -> &str {
        match self {
            GenerationEvent::Starting { command, .. }
            | GenerationEvent::Succeeded { command, .. }
            | GenerationEvent::Failed { command, .. } => command,
        }
    }
}

/// Receives generation events.
pub trait EventSink: Send + Sync + Debug {
    fn emit(&self, event: &GenerationEvent<'_>);
}

/// Forwards events to the `log` facade. Nothing is printed until the host
/// installs a logger.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: &GenerationEvent<'_>) {
        match event {
            GenerationEvent::Starting {
                input,
                output,
                command,
                env,
                timeout,
            } => log::info!(
                "Generate from file(s) \"{}\" to file \"{}\". command={} env={:?} timeout={:?}",
                input,
                output.display(),
                command,
                env,
                timeout
            ),
            GenerationEvent::Succeeded {
                output,
                command,
                stdout,
                stderr,
            } => log::info!(
                "File \"{}\" has been successfully generated. command={} stdout={:?} stderr={:?}",
                output.display(),
                command,
                stdout,
                stderr
            ),
            GenerationEvent::Failed {
                output,
                command,
                status,
                stdout,
                stderr,
            } => log::error!(
                "An error happened while generating \"{}\". command={} status={:?} stdout={:?} stderr={:?}",
                output.display(),
                command,
                status,
                stdout,
                stderr
            ),
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &GenerationEvent<'_>) {}
}
