// src/generator/mod.rs
//! The generator facade.
//!
//! A [`Generator`] owns a declared option set, a scratch-file registry and
//! the collaborators it needs to drive the renderer: a [`ProcessRunner`], a
//! [`ContentFetcher`] for remote attachments and an [`EventSink`].
//!
//! ```no_run
//! use weasy::Generator;
//!
//! let mut generator = Generator::pdf("weasyprint")?;
//! generator.set_option("media-type", "print")?;
//! let pdf = generator.get_output_from_html("<h1>Hello</h1>", &[])?;
//! # Ok::<(), weasy::GeneratorError>(())
//! ```

pub mod checks;
pub mod media;

pub use media::{ContentOption, MediaKind};

use crate::config::GeneratorConfig;
use crate::error::{GeneratorError, Result};
use crate::events::{EventSink, GenerationEvent, LogSink};
use crate::version::Version;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use weasy_executor::ShellRunner;
use weasy_options::{OptionSet, OptionValue, ResolvedOptions};
use weasy_resource::{HttpFetcher, TemporaryFiles, is_url};
use weasy_traits::{ContentFetcher, ProcessOutput, ProcessRunner};

/// How long the renderer may run before it is killed.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// First renderer major version without image output.
const IMAGE_UNSUPPORTED_SINCE: u32 = 53;

/// Per-call option overrides.
pub type Overrides<'a> = [(&'a str, OptionValue)];

#[derive(Debug)]
pub struct Generator {
    kind: MediaKind,
    binary: String,
    options: OptionSet,
    env: Option<BTreeMap<String, String>>,
    timeout: Option<Duration>,
    temporary: TemporaryFiles,
    default_extension: String,
    runner: Box<dyn ProcessRunner>,
    fetcher: Box<dyn ContentFetcher>,
    sink: Box<dyn EventSink>,
    version: Option<Version>,
}

impl Generator {
    pub fn new(kind: MediaKind, binary: impl Into<String>) -> Result<Self> {
        Ok(Self {
            kind,
            binary: binary.into(),
            options: kind.declare_options()?,
            env: None,
            timeout: Some(DEFAULT_TIMEOUT),
            temporary: TemporaryFiles::new(),
            default_extension: kind.default_extension().to_string(),
            runner: Box::new(ShellRunner::new()),
            fetcher: Box::new(HttpFetcher::new()),
            sink: Box::new(LogSink),
            version: None,
        })
    }

    pub fn pdf(binary: impl Into<String>) -> Result<Self> {
        Self::new(MediaKind::Pdf, binary)
    }

    pub fn image(binary: impl Into<String>) -> Result<Self> {
        Self::new(MediaKind::Image, binary)
    }

    /// Builds a generator from its serialized configuration. Unknown option
    /// names in the config are rejected.
    pub fn from_config(kind: MediaKind, config: &GeneratorConfig) -> Result<Self> {
        let mut generator = Self::new(kind, config.binary.clone())?;
        generator.timeout = config.timeout();
        generator.env = config.env();
        if let Some(folder) = &config.temporary_folder {
            generator.temporary.set_folder(folder);
        }
        generator
            .options
            .set_many(config.options.iter().map(|(k, v)| (k.as_str(), v.clone())))?;
        Ok(generator)
    }

    pub fn with_runner(mut self, runner: impl ProcessRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    pub fn with_fetcher(mut self, fetcher: impl ContentFetcher + 'static) -> Self {
        self.fetcher = Box::new(fetcher);
        self
    }

    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = Some(env);
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_temporary_folder<P: AsRef<Path>>(mut self, folder: P) -> Self {
        self.temporary.set_folder(folder);
        self
    }

    pub fn with_options(mut self, values: &Overrides<'_>) -> Result<Self> {
        self.set_options(values)?;
        Ok(self)
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Changing the binary forgets the cached version.
    pub fn set_binary(&mut self, binary: impl Into<String>) {
        self.binary = binary.into();
        self.version = None;
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn set_option(&mut self, name: &str, value: impl Into<OptionValue>) -> Result<&mut Self> {
        self.options.set(name, value)?;
        Ok(self)
    }

    /// Sets several options in order. Stops at the first unknown name;
    /// options before it stay set.
    pub fn set_options(&mut self, values: &Overrides<'_>) -> Result<&mut Self> {
        self.options
            .set_many(values.iter().map(|(name, value)| (*name, value.clone())))?;
        Ok(self)
    }

    pub fn reset_options(&mut self) {
        self.options.reset();
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub fn env(&self) -> Option<&BTreeMap<String, String>> {
        self.env.as_ref()
    }

    pub fn set_env(&mut self, env: Option<BTreeMap<String, String>>) {
        self.env = env;
    }

    pub fn default_extension(&self) -> &str {
        &self.default_extension
    }

    pub fn set_default_extension(&mut self, extension: impl Into<String>) {
        self.default_extension = extension.into();
    }

    pub fn temporary_folder(&self) -> PathBuf {
        self.temporary.folder()
    }

    pub fn set_temporary_folder<P: AsRef<Path>>(&mut self, folder: P) {
        self.temporary.set_folder(folder);
    }

    pub fn temporary_files(&self) -> &[PathBuf] {
        self.temporary.paths()
    }

    /// Deletes every registered scratch file. Safe to call repeatedly.
    pub fn remove_temporary_files(&mut self) {
        self.temporary.remove_all();
    }

    /// The command `generate` would run, without running it. Inline content
    /// is not spilled, so no scratch files are created.
    pub fn command(&self, input: &str, output: &str, overrides: &Overrides<'_>) -> Result<String> {
        let options = self.merge(overrides)?;
        Ok(weasy_command::build_command(&self.binary, input, output, &options))
    }

    /// Renders `input` (a path or URL) into `output`.
    pub fn generate<P: AsRef<Path>>(
        &mut self,
        input: &str,
        output: P,
        overrides: &Overrides<'_>,
        overwrite: bool,
    ) -> Result<()> {
        let output = output.as_ref();
        self.ensure_supported()?;
        checks::prepare_output(output, overwrite)?;

        let mut options = self.merge(overrides)?;
        self.spill_content(&mut options)?;

        let output_arg = output.to_string_lossy();
        let command = weasy_command::build_command(&self.binary, input, &output_arg, &options);

        self.sink.emit(&GenerationEvent::Starting {
            input,
            output,
            command: &command,
            env: self.env.as_ref(),
            timeout: self.timeout,
        });

        let result = match self.runner.run(&command, self.env.as_ref(), self.timeout) {
            Ok(result) => result,
            Err(e) => {
                self.emit_failed(output, &command, &ProcessOutput::default());
                return Err(e.into());
            }
        };

        if let Err(e) = checks::check_process_status(&result, &command)
            .and_then(|()| checks::check_output(output, &command))
        {
            self.emit_failed(output, &command, &result);
            return Err(e);
        }

        self.sink.emit(&GenerationEvent::Succeeded {
            output,
            command: &command,
            stdout: &result.stdout,
            stderr: &result.stderr,
        });
        Ok(())
    }

    /// Spills `html` to a scratch `.html` file and renders it.
    pub fn generate_from_html<P: AsRef<Path>>(
        &mut self,
        html: &str,
        output: P,
        overrides: &Overrides<'_>,
        overwrite: bool,
    ) -> Result<()> {
        self.ensure_supported()?;
        let input = self.temporary.create(Some(html.as_bytes()), Some("html"))?;
        self.generate(&input.to_string_lossy(), output, overrides, overwrite)
    }

    /// Renders `input` into a scratch file and returns its bytes. The scratch
    /// file stays registered until the next cleanup.
    pub fn get_output(&mut self, input: &str, overrides: &Overrides<'_>) -> Result<Vec<u8>> {
        self.ensure_supported()?;
        let extension = self.default_extension.clone();
        let output = self.temporary.create(None, Some(extension.as_str()))?;
        // The reserved path is fresh; anything found there is not ours.
        self.generate(input, &output, overrides, false)?;
        fs::read(&output).map_err(|source| GeneratorError::FileRead {
            path: output,
            source,
        })
    }

    pub fn get_output_from_html(&mut self, html: &str, overrides: &Overrides<'_>) -> Result<Vec<u8>> {
        self.ensure_supported()?;
        let input = self.temporary.create(Some(html.as_bytes()), Some("html"))?;
        self.get_output(&input.to_string_lossy(), overrides)
    }

    fn merge(&self, overrides: &Overrides<'_>) -> Result<ResolvedOptions> {
        let merged = self
            .options
            .merge(overrides.iter().map(|(name, value)| (*name, value.clone())))?;
        Ok(merged.without_nulls())
    }

    /// Image output needs a renderer older than 53. Probed once and cached.
    fn ensure_supported(&mut self) -> Result<()> {
        if self.kind != MediaKind::Image {
            return Ok(());
        }
        if self.version.is_none() {
            let probed = Version::probe(
                self.runner.as_ref(),
                &self.binary,
                self.env.as_ref(),
                self.timeout,
            )?;
            log::debug!("Detected renderer version {probed}");
            self.version = Some(probed);
        }
        if let Some(version) = &self.version
            && version.major >= IMAGE_UNSUPPORTED_SINCE
        {
            return Err(GeneratorError::UnsupportedVersion(version.full.clone()));
        }
        Ok(())
    }

    /// Replaces inline content in content-checked options with paths to
    /// scratch files holding it.
    fn spill_content(&mut self, options: &mut ResolvedOptions) -> Result<()> {
        let kind = self.kind;
        for (name, value) in options.iter_mut() {
            let Some(content) = kind.content_option(name) else {
                continue;
            };
            match value {
                OptionValue::Str(item) => {
                    if let Some(path) = self.spill(content, item)? {
                        *item = path;
                    }
                }
                OptionValue::List(items) => {
                    for item in items.iter_mut() {
                        if let Some(path) = self.spill(content, item)? {
                            *item = path;
                        }
                    }
                }
                OptionValue::Null | OptionValue::Bool(_) => {}
            }
        }
        Ok(())
    }

    /// The scratch path standing in for `value`, or `None` to keep `value`.
    fn spill(&mut self, option: &ContentOption, value: &str) -> Result<Option<String>> {
        if value.is_empty() || Path::new(value).is_file() {
            return Ok(None);
        }
        let bytes = if is_url(value) {
            if !option.fetch_urls {
                return Ok(None);
            }
            self.fetcher.fetch(value)?
        } else {
            value.as_bytes().to_vec()
        };
        let path = self.temporary.create(Some(bytes.as_slice()), Some(option.extension))?;
        log::debug!("Spilled '{}' content to {}", option.name, path.display());
        Ok(Some(path.to_string_lossy().into_owned()))
    }

    fn emit_failed(&self, output: &Path, command: &str, result: &ProcessOutput) {
        self.sink.emit(&GenerationEvent::Failed {
            output,
            command,
            status: result.status,
            stdout: &result.stdout,
            stderr: &result.stderr,
        });
    }
}
