// src/config.rs
//! Generator configuration.
//!
//! [`GeneratorConfig`] is the serializable description of a generator (the
//! JSON form the CLI reads with `--config`). [`PdfOptions`] is a typed view
//! of the PDF option set for callers that prefer compile-time checked names
//! over string keys.

use crate::error::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use weasy_options::OptionValue;

/// Default renderer binary, resolved through `PATH`.
pub const DEFAULT_BINARY: &str = "weasyprint";

/// Default renderer timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Everything needed to build a generator.
///
/// ```json
/// {
///   "binary": "/usr/local/bin/weasyprint",
///   "timeout_secs": 30,
///   "temporary_folder": "/var/tmp/weasy",
///   "env": { "LANG": "en_US.UTF-8" },
///   "options": { "media-type": "print", "stylesheet": ["base.css"] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub binary: String,
    /// `null` disables the timeout.
    pub timeout_secs: Option<u64>,
    pub temporary_folder: Option<PathBuf>,
    pub env: BTreeMap<String, String>,
    pub options: BTreeMap<String, OptionValue>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            binary: DEFAULT_BINARY.to_string(),
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            temporary_folder: None,
            env: BTreeMap::new(),
            options: BTreeMap::new(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// The environment, or `None` when empty.
    pub fn env(&self) -> Option<BTreeMap<String, String>> {
        if self.env.is_empty() {
            None
        } else {
            Some(self.env.clone())
        }
    }
}

/// Typed PDF options. Unset fields (`None`, empty lists, `false`) are left
/// out of [`PdfOptions::into_overrides`], so they never clobber values
/// already stored on a generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PdfOptions {
    pub encoding: Option<String>,
    pub stylesheet: Vec<String>,
    pub media_type: Option<String>,
    pub base_url: Option<String>,
    pub attachment: Vec<String>,
    pub presentational_hints: bool,
    pub optimize_size: Option<String>,
    pub pdf_identifier: Option<String>,
    pub pdf_variant: Option<String>,
    pub pdf_version: Option<String>,
    pub pdf_forms: bool,
    pub custom_metadata: bool,
    pub uncompressed_pdf: bool,
    pub full_fonts: bool,
    pub hinting: bool,
    pub dpi: Option<u32>,
    pub jpeg_quality: Option<u8>,
    pub cache_folder: Option<String>,
    pub srgb: bool,
    pub timeout: Option<u32>,
}

impl PdfOptions {
    /// The set fields as `(name, value)` pairs in declaration order.
    pub fn into_overrides(self) -> Vec<(&'static str, OptionValue)> {
        let mut overrides = Vec::new();

        let mut text = |name: &'static str, value: Option<String>| {
            if let Some(value) = value {
                overrides.push((name, OptionValue::Str(value)));
            }
        };
        text("encoding", self.encoding);
        text("media-type", self.media_type);
        text("base-url", self.base_url);
        text("optimize-size", self.optimize_size);
        text("pdf-identifier", self.pdf_identifier);
        text("pdf-variant", self.pdf_variant);
        text("pdf-version", self.pdf_version);
        text("dpi", self.dpi.map(|v| v.to_string()));
        text("jpeg-quality", self.jpeg_quality.map(|v| v.to_string()));
        text("cache-folder", self.cache_folder);
        text("timeout", self.timeout.map(|v| v.to_string()));

        for (name, items) in [("stylesheet", self.stylesheet), ("attachment", self.attachment)] {
            if !items.is_empty() {
                overrides.push((name, OptionValue::List(items)));
            }
        }

        for (name, flag) in [
            ("presentational-hints", self.presentational_hints),
            ("pdf-forms", self.pdf_forms),
            ("custom-metadata", self.custom_metadata),
            ("uncompressed-pdf", self.uncompressed_pdf),
            ("full-fonts", self.full_fonts),
            ("hinting", self.hinting),
            ("srgb", self.srgb),
        ] {
            if flag {
                overrides.push((name, OptionValue::Bool(true)));
            }
        }

        overrides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_when_fields_missing() {
        let config = GeneratorConfig::from_json_str("{}").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.timeout(), Some(Duration::from_secs(10)));
        assert!(config.env().is_none());
    }

    #[test]
    fn null_timeout_disables_it() {
        let config = GeneratorConfig::from_json_str(r#"{"timeout_secs": null}"#).unwrap();
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn parses_full_config() {
        let config = GeneratorConfig::from_json_str(
            r#"{
                "binary": "/opt/weasyprint",
                "timeout_secs": 30,
                "env": {"LANG": "C"},
                "options": {"media-type": "print", "stylesheet": ["a.css"], "dpi": 300, "encoding": null}
            }"#,
        )
        .unwrap();
        assert_eq!(config.binary, "/opt/weasyprint");
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.env().unwrap()["LANG"], "C");
        assert_eq!(config.options["dpi"], OptionValue::from("300"));
        assert_eq!(config.options["stylesheet"], OptionValue::from(["a.css"]));
        assert_eq!(config.options["encoding"], OptionValue::Null);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let result = GeneratorConfig::from_json_str(r#"{"binary": 3}"#);
        assert!(matches!(result, Err(GeneratorError::Json(_))));
    }

    #[test]
    fn missing_config_file_is_a_config_error() {
        let result = GeneratorConfig::from_file("/definitely/not/here.json");
        assert!(matches!(result, Err(GeneratorError::Config(_))));
    }

    #[test]
    fn pdf_options_skip_unset_fields() {
        assert!(PdfOptions::default().into_overrides().is_empty());

        let overrides = PdfOptions {
            media_type: Some("print".into()),
            stylesheet: vec!["a.css".into()],
            presentational_hints: true,
            dpi: Some(150),
            ..Default::default()
        }
        .into_overrides();

        assert_eq!(
            overrides,
            vec![
                ("media-type", OptionValue::from("print")),
                ("dpi", OptionValue::from("150")),
                ("stylesheet", OptionValue::from(["a.css"])),
                ("presentational-hints", OptionValue::Bool(true)),
            ]
        );
    }

    #[test]
    fn pdf_options_deserialize_from_kebab_case() {
        let options: PdfOptions =
            serde_json::from_str(r#"{"pdf-variant": "pdf/a-3b", "full-fonts": true}"#).unwrap();
        assert_eq!(options.pdf_variant.as_deref(), Some("pdf/a-3b"));
        assert!(options.full_fonts);
    }
}
