// src/version.rs
//! Renderer version detection.

use crate::error::{GeneratorError, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use std::time::Duration;
use weasy_traits::ProcessRunner;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^WeasyPrint version (?P<full>(?P<major>\d+)\.?(?P<minor>.*))$")
        .expect("BUG: invalid VERSION_RE regex literal")
});

/// A renderer version as reported by `--version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    /// Everything after `WeasyPrint version `, e.g. `53.0b2`.
    pub full: String,
    pub major: u32,
    /// The part after the first dot, `"0"` when there is none.
    pub minor: String,
}

impl Version {
    /// Parses the first line of `--version` output.
    pub fn parse(output: &str) -> Result<Self> {
        let line = output.lines().next().unwrap_or("").trim();
        let captures = VERSION_RE
            .captures(line)
            .ok_or_else(|| GeneratorError::VersionParse(output.to_string()))?;

        let major = captures["major"]
            .parse()
            .map_err(|_| GeneratorError::VersionParse(output.to_string()))?;
        let minor = match &captures["minor"] {
            "" => "0".to_string(),
            minor => minor.to_string(),
        };

        Ok(Self {
            full: captures["full"].to_string(),
            major,
            minor,
        })
    }

    /// Runs `{binary} --version` and parses the answer.
    pub fn probe(
        runner: &dyn ProcessRunner,
        binary: &str,
        env: Option<&BTreeMap<String, String>>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let command = format!("{} --version", weasy_command::binary_token(binary));
        let output = runner.run(&command, env, timeout)?;

        match output.status {
            Some(0) => Self::parse(&output.stdout),
            Some(status) => Err(GeneratorError::ProcessFailed {
                status,
                command,
                stdout: output.stdout,
                stderr: output.stderr,
            }),
            None => Err(GeneratorError::ProcessNotTerminated {
                command,
                stdout: output.stdout,
                stderr: output.stderr,
            }),
        }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full)
    }
}
