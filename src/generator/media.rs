//! What each kind of output declares.

use weasy_options::{OptionError, OptionSet, OptionValue};

/// The kind of document a generator produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Pdf,
    /// PNG snapshots. Only renderers older than version 53 can produce them.
    Image,
}

/// Options declared for PDF output, with their defaults.
const PDF_OPTIONS: &[(&str, Initial)] = &[
    ("encoding", Initial::Null),
    ("stylesheet", Initial::List),
    ("media-type", Initial::Null),
    ("base-url", Initial::Null),
    ("attachment", Initial::List),
    ("presentational-hints", Initial::Null),
    // Added in 53.0b2.
    ("optimize-size", Initial::Null),
    ("pdf-identifier", Initial::Null),
    ("pdf-variant", Initial::Null),
    ("pdf-version", Initial::Null),
    ("pdf-forms", Initial::Null),
    ("custom-metadata", Initial::Null),
    ("uncompressed-pdf", Initial::Null),
    ("full-fonts", Initial::Null),
    ("hinting", Initial::Null),
    ("dpi", Initial::Null),
    ("jpeg-quality", Initial::Null),
    ("cache-folder", Initial::Null),
    ("srgb", Initial::Null),
    ("timeout", Initial::Null),
    // Deprecated.
    ("format", Initial::Null),
    ("optimize-images", Initial::Null),
    ("resolution", Initial::Null),
];

/// Options declared for image output, with their defaults.
const IMAGE_OPTIONS: &[(&str, Initial)] = &[
    // Should not be overridden.
    ("format", Initial::Png),
    ("encoding", Initial::Null),
    ("stylesheet", Initial::List),
    ("media-type", Initial::Null),
    ("resolution", Initial::Null),
    ("base-url", Initial::Null),
    ("attachment", Initial::List),
    ("presentational-hints", Initial::Null),
    ("optimize-images", Initial::Null),
    ("optimize-size", Initial::Null),
];

/// An option whose value may carry inline content or a URL instead of a
/// local path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentOption {
    pub name: &'static str,
    /// Extension of the file the content is spilled to.
    pub extension: &'static str,
    /// URLs are downloaded and spilled too, instead of being passed through.
    pub fetch_urls: bool,
}

const PDF_CONTENT_OPTIONS: &[ContentOption] = &[
    ContentOption {
        name: "stylesheet",
        extension: "css",
        fetch_urls: false,
    },
    ContentOption {
        name: "attachment",
        extension: "temp",
        fetch_urls: true,
    },
];

#[derive(Debug, Clone, Copy)]
enum Initial {
    Null,
    List,
    Png,
}

impl From<Initial> for OptionValue {
    fn from(initial: Initial) -> Self {
        match initial {
            Initial::Null => OptionValue::Null,
            Initial::List => OptionValue::empty_list(),
            Initial::Png => OptionValue::from("png"),
        }
    }
}

impl MediaKind {
    /// A registry holding this kind's declared options at their defaults.
    pub fn declare_options(self) -> Result<OptionSet, OptionError> {
        let declared = match self {
            MediaKind::Pdf => PDF_OPTIONS,
            MediaKind::Image => IMAGE_OPTIONS,
        };
        let mut options = OptionSet::new();
        options.declare_all(declared.iter().copied())?;
        Ok(options)
    }

    pub fn default_extension(self) -> &'static str {
        match self {
            MediaKind::Pdf => "pdf",
            MediaKind::Image => "png",
        }
    }

    /// Options checked for inline content before the command is built.
    pub fn content_options(self) -> &'static [ContentOption] {
        match self {
            MediaKind::Pdf => PDF_CONTENT_OPTIONS,
            MediaKind::Image => &[],
        }
    }

    pub fn content_option(self, name: &str) -> Option<&'static ContentOption> {
        self.content_options().iter().find(|option| option.name == name)
    }
}
