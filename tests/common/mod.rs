#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use weasy::{EventSink, ExecutorError, GenerationEvent, ProcessOutput, ProcessRunner};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// One recorded runner call.
#[derive(Debug, Clone)]
pub struct Call {
    pub command: String,
    pub env: Option<BTreeMap<String, String>>,
    pub timeout: Option<Duration>,
}

/// A `ProcessRunner` that never spawns anything.
///
/// `--version` calls answer with `version`. Every other call writes `output`
/// (when set) to the output path taken from the command's last argument and
/// returns `status`/`stdout`/`stderr`.
#[derive(Debug, Clone)]
pub struct SpyRunner {
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub output: Option<Vec<u8>>,
    pub version: String,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Default for SpyRunner {
    fn default() -> Self {
        Self {
            status: Some(0),
            stdout: String::new(),
            stderr: String::new(),
            output: Some(b"%PDF-1.7 spy".to_vec()),
            version: "WeasyPrint version 52.5\n".to_string(),
            calls: Arc::default(),
        }
    }
}

impl SpyRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: Option<i32>, stderr: &str) -> Self {
        self.status = status;
        self.stderr = stderr.to_string();
        self
    }

    pub fn with_output(mut self, output: Option<&[u8]>) -> Self {
        self.output = output.map(<[u8]>::to_vec);
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.command).collect()
    }

    /// Calls other than version probes.
    pub fn renders(&self) -> Vec<String> {
        self.commands()
            .into_iter()
            .filter(|c| !c.ends_with("--version"))
            .collect()
    }
}

impl ProcessRunner for SpyRunner {
    fn run(
        &self,
        command: &str,
        env: Option<&BTreeMap<String, String>>,
        timeout: Option<Duration>,
    ) -> Result<ProcessOutput, ExecutorError> {
        self.calls.lock().unwrap().push(Call {
            command: command.to_string(),
            env: env.cloned(),
            timeout,
        });

        if command.ends_with("--version") {
            return Ok(ProcessOutput::new(Some(0), self.version.as_str(), ""));
        }
        if let Some(bytes) = &self.output {
            fs::write(last_argument(command), bytes).unwrap();
        }
        Ok(ProcessOutput::new(self.status, self.stdout.as_str(), self.stderr.as_str()))
    }

    fn name(&self) -> &'static str {
        "SpyRunner"
    }
}

/// The last single-quoted argument of a command line.
pub fn last_argument(command: &str) -> PathBuf {
    let trimmed = command.trim_end().trim_end_matches('\'');
    let start = trimmed.rfind('\'').map_or(0, |i| i + 1);
    PathBuf::from(&trimmed[start..])
}

/// Every single-quoted value following `--{flag} `.
pub fn flag_values(command: &str, flag: &str) -> Vec<String> {
    let marker = format!("--{flag} '");
    command
        .match_indices(&marker)
        .filter_map(|(i, _)| {
            let rest = &command[i + marker.len()..];
            rest.find('\'').map(|end| rest[..end].to_string())
        })
        .collect()
}

/// Records the kind and command of every event.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<(&'static str, String)>>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<(&'static str, String)> {
        self.events.lock().unwrap().clone()
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.events().into_iter().map(|(kind, _)| kind).collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &GenerationEvent<'_>) {
        let kind = match event {
            GenerationEvent::Starting { .. } => "starting",
            GenerationEvent::Succeeded { .. } => "succeeded",
            GenerationEvent::Failed { .. } => "failed",
        };
        self.events
            .lock()
            .unwrap()
            .push((kind, event.command().to_string()));
    }
}
