//! HTTP content fetcher.

use std::fs;
use std::io::Read;
use weasy_traits::{ContentFetcher, ResourceError};

/// Fetches URL content with a blocking HTTP GET.
///
/// Only 2xx answers count as success; every other status and every
/// transport failure becomes `ResourceError::Fetch`. Host-less `file:///`
/// URLs are read from disk.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher;

impl HttpFetcher {
    pub fn new() -> Self {
        Self
    }
}

impl ContentFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ResourceError> {
        let fetch_error = |message: String| ResourceError::Fetch {
            url: url.to_string(),
            message,
        };

        if let Some(path) = local_path(url) {
            let body = fs::read(path).map_err(|e| fetch_error(format!("read failed: {e}")))?;
            log::debug!("Read {} bytes from '{}'.", body.len(), url);
            return Ok(body);
        }

        let response = match ureq::get(url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => {
                return Err(fetch_error(format!("HTTP status {code}")));
            }
            Err(e) => return Err(fetch_error(e.to_string())),
        };

        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|e| fetch_error(format!("read failed: {e}")))?;

        log::debug!("Fetched {} bytes from '{}'.", body.len(), url);
        Ok(body)
    }

    fn name(&self) -> &'static str {
        "HttpFetcher"
    }
}

/// The path of a host-less `file:///` URL.
fn local_path(url: &str) -> Option<&str> {
    url.get(..8)?
        .eq_ignore_ascii_case("file:///")
        .then(|| &url[7..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_fetcher_rejects_unreachable_host() {
        // Port 9 on localhost is not expected to answer HTTP.
        let result = HttpFetcher::new().fetch("http://127.0.0.1:9/nothing");
        assert!(matches!(result, Err(ResourceError::Fetch { .. })));
    }

    #[test]
    fn test_http_fetcher_reads_local_file_urls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"attached").unwrap();

        let url = format!("file://{}", path.display());
        assert_eq!(HttpFetcher::new().fetch(&url).unwrap(), b"attached");

        let missing = format!("file://{}", dir.path().join("gone.txt").display());
        let result = HttpFetcher::new().fetch(&missing);
        assert!(matches!(result, Err(ResourceError::Fetch { .. })));
    }

    #[test]
    fn test_http_fetcher_name() {
        assert_eq!(HttpFetcher::new().name(), "HttpFetcher");
    }
}
