//! Shell argument quoting.

/// Quotes `arg` so the platform shell passes it through as one literal
/// argument.
///
/// On Unix the argument is wrapped in single quotes and embedded single
/// quotes become `'\''`.
#[cfg(not(windows))]
pub fn escape_arg(arg: &str) -> String {
    let mut escaped = String::with_capacity(arg.len() + 2);
    escaped.push('\'');
    for ch in arg.chars() {
        if ch == '\'' {
            escaped.push_str("'\\''");
        } else {
            escaped.push(ch);
        }
    }
    escaped.push('\'');
    escaped
}

/// Quotes `arg` so the platform shell passes it through as one literal
/// argument.
///
/// `cmd.exe` has no reliable escape for `"`, `%` or `!`, so those are
/// replaced by spaces and the result is wrapped in double quotes.
#[cfg(windows)]
pub fn escape_arg(arg: &str) -> String {
    let mut escaped = String::with_capacity(arg.len() + 2);
    escaped.push('"');
    for ch in arg.chars() {
        match ch {
            '"' | '%' | '!' => escaped.push(' '),
            other => escaped.push(other),
        }
    }
    escaped.push('"');
    escaped
}

#[cfg(all(test, not(windows)))]
mod tests {
    use super::*;

    #[test]
    fn wraps_plain_values() {
        assert_eq!(escape_arg("in.html"), "'in.html'");
        assert_eq!(escape_arg(""), "''");
    }

    #[test]
    fn keeps_shell_metacharacters_literal() {
        assert_eq!(escape_arg("a b;rm -rf $HOME"), "'a b;rm -rf $HOME'");
    }

    #[test]
    fn escapes_single_quotes() {
        assert_eq!(escape_arg("it's"), "'it'\\''s'");
    }
}
