// src/lib.rs
//! Drive the WeasyPrint renderer from Rust.
//!
//! The crate wraps the `weasyprint` binary: options are declared up front
//! and validated by name, merged with per-call overrides, rendered into a
//! shell command line and executed with a timeout. Inline stylesheets,
//! remote attachments and raw HTML are spilled to scratch files that are
//! removed when the [`Generator`] is dropped.
//!
//! The building blocks live in their own crates and are re-exported here:
//!
//! - `weasy-options`: the option registry and [`OptionValue`]
//! - `weasy-command`: command line assembly and shell escaping
//! - `weasy-executor`: the [`ShellRunner`] process runner
//! - `weasy-resource`: scratch files and URL fetching
//! - `weasy-traits`: the [`ProcessRunner`] and [`ContentFetcher`] seams

pub mod config;
pub mod error;
pub mod events;
pub mod generator;
pub mod version;

pub use config::{GeneratorConfig, PdfOptions};
pub use error::{GeneratorError, Result};
pub use events::{EventSink, GenerationEvent, LogSink, NullSink};
pub use generator::{ContentOption, DEFAULT_TIMEOUT, Generator, MediaKind, Overrides};
pub use version::Version;

pub use weasy_command::{build_command, escape_arg};
pub use weasy_executor::ShellRunner;
pub use weasy_options::{OptionError, OptionSet, OptionValue, ResolvedOptions};
pub use weasy_resource::{HttpFetcher, TemporaryFiles};
pub use weasy_traits::{
    ContentFetcher, ExecutorError, InMemoryFetcher, ProcessOutput, ProcessRunner, ResourceError,
};
