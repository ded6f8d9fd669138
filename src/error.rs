// src/error.rs
//! Defines the error type for every generator operation.

use std::path::PathBuf;
use thiserror::Error;
use weasy_options::OptionError;
use weasy_traits::{ExecutorError, ResourceError};

/// The main error enum for all generator operations.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Unknown option names and duplicate declarations.
    #[error(transparent)]
    Option(#[from] OptionError),

    /// Temporary folder, scratch file and URL fetch failures.
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// The renderer could not be started or observed.
    #[error(transparent)]
    Executor(#[from] ExecutorError),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("The output file '{}' already exists.", .0.display())]
    FileAlreadyExists(PathBuf),

    #[error("{message}")]
    OutputPreparation { path: PathBuf, message: String },

    #[error("Could not read file '{}' content: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not read file '{}' size: {source}", .path.display())]
    FileSize {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("The command is not terminated.\nstderr: \"{stderr}\"\nstdout: \"{stdout}\"\ncommand: {command}")]
    ProcessNotTerminated {
        command: String,
        stdout: String,
        stderr: String,
    },

    #[error("The exit status code '{status}' says something went wrong:\nstderr: \"{stderr}\"\nstdout: \"{stdout}\"\ncommand: {command}")]
    ProcessFailed {
        status: i32,
        command: String,
        stdout: String,
        stderr: String,
    },

    #[error("The file '{}' was not created (command: {command}).", .path.display())]
    OutputMissing { path: PathBuf, command: String },

    #[error("The file '{}' was created but is empty (command: {command}).", .path.display())]
    OutputEmpty { path: PathBuf, command: String },

    #[error("Image generation is unsupported in WeasyPrint >= 53 (found {0})")]
    UnsupportedVersion(String),

    #[error("Could not parse renderer version from '{0}'")]
    VersionParse(String),

    #[error("Configuration error: {0}")]
    Config(String),


    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GeneratorError {
    /// The renderer's exit code, for failures that carry one.
    pub fn code(&self) -> Option<i32> {
        match self {
            GeneratorError::ProcessFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GeneratorError>;
