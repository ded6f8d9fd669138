//! URL detection for option values.

use regex::Regex;
use std::sync::LazyLock;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z][A-Za-z0-9+.\-]*://[^\s/?#]+(?:[/?#]\S*)?|(?i:file):///\S+)$")
        .expect("BUG: invalid URL_RE regex literal")
});

/// True when `value` is an absolute URL with a scheme and an authority,
/// e.g. `https://example.com/style.css`. `file:` URLs may leave the authority
/// empty, as in `file:///srv/print.css`.
pub fn is_url(value: &str) -> bool {
    URL_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_absolute_urls() {
        assert!(is_url("https://google.com"));
        assert!(is_url("https://www.google.com/favicon.ico"));
        assert!(is_url("http://localhost:8080/a?b=c#d"));
        assert!(is_url("file://host/share/style.css"));
    }

    #[test]
    fn accepts_local_file_urls() {
        assert!(is_url("file:///srv/print.css"));
        assert!(is_url("FILE:///C:/styles/print.css"));
        assert!(!is_url("file:///"));
        assert!(!is_url("https:///srv/print.css"));
    }

    #[test]
    fn rejects_paths_and_inline_content() {
        assert!(!is_url("/tmp/style.css"));
        assert!(!is_url("style.css"));
        assert!(!is_url("html {font-size: 16px;}"));
        assert!(!is_url("https://"));
        assert!(!is_url("https://exa mple.com"));
        assert!(!is_url(""));
    }
}
