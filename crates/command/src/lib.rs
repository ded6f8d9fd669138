//! Command line assembly.
//!
//! Turns a binary, an input, an output and a resolved option mapping into
//! a single shell command string:
//!
//! ```text
//! {binary} [--flag | --key value]* {input} {output}
//! ```
//!
//! ## Value rules
//!
//! - `null` / `false` options are skipped
//! - `true` becomes a bare `--key`
//! - lists repeat `--key value` once per element, in order
//! - scalars are shell-escaped, except numeric options (rendered as bare
//!   integers) and the legacy `format` option (emitted verbatim)

mod escape;

pub use escape::escape_arg;

use std::path::Path;
use weasy_options::{OptionValue, ResolvedOptions};

/// Options whose values are always rendered as unquoted integers.
pub const INTEGER_OPTIONS: &[&str] = &["dpi", "jpeg-quality", "resolution", "timeout"];

/// Options whose values are emitted without any quoting.
pub const RAW_OPTIONS: &[&str] = &["format"];

/// How a scalar option value is written after its flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    Escaped,
    Integer,
    Raw,
}

impl ValueFormat {
    pub fn for_option(name: &str) -> Self {
        if INTEGER_OPTIONS.contains(&name) {
            ValueFormat::Integer
        } else if RAW_OPTIONS.contains(&name) {
            ValueFormat::Raw
        } else {
            ValueFormat::Escaped
        }
    }

    pub fn render(self, value: &str) -> String {
        match self {
            ValueFormat::Escaped => escape_arg(value),
            ValueFormat::Integer => coerce_integer(value).to_string(),
            ValueFormat::Raw => value.to_string(),
        }
    }
}

/// Lenient integer cast: leading whitespace is skipped, an optional sign and
/// the leading run of digits are read, and anything else yields what was read
/// so far (`0` when nothing was). Saturates instead of overflowing.
pub fn coerce_integer(value: &str) -> i64 {
    let trimmed = value.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut magnitude: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(byte - b'0');
        magnitude = magnitude.saturating_mul(10).saturating_add(digit);
    }

    if negative { magnitude.saturating_neg() } else { magnitude }
}

/// True when `path` names an existing file the current user may execute.
pub fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = path.metadata() else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}

/// The binary as it appears at the head of a command line.
///
/// A binary that names an executable file is escaped; anything else is used
/// verbatim so bare names resolved through `PATH` (and tokens carrying their
/// own arguments, like `python -m weasyprint`) keep working.
pub fn binary_token(binary: &str) -> String {
    if is_executable(Path::new(binary)) {
        escape_arg(binary)
    } else {
        binary.to_string()
    }
}

/// Builds the full command line.
pub fn build_command(binary: &str, input: &str, output: &str, options: &ResolvedOptions) -> String {
    let mut command = binary_token(binary);

    for (key, value) in options.iter() {
        push_option(&mut command, key, value);
    }

    command.push(' ');
    command.push_str(&escape_arg(input));
    command.push(' ');
    command.push_str(&escape_arg(output));
    command
}

fn push_option(command: &mut String, key: &str, value: &OptionValue) {
    if value.is_omitted() {
        return;
    }
    match value {
        OptionValue::List(items) => {
            for item in items {
                command.push_str(" --");
                command.push_str(key);
                command.push(' ');
                command.push_str(&escape_arg(item));
            }
        }
        OptionValue::Str(scalar) => {
            command.push_str(" --");
            command.push_str(key);
            command.push(' ');
            command.push_str(&ValueFormat::for_option(key).render(scalar));
        }
        // `true`: a bare flag.
        _ => {
            command.push_str(" --");
            command.push_str(key);
        }
    }
}
