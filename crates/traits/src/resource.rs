//! ContentFetcher trait for abstracting remote content retrieval.
//!
//! Option values such as attachments may name a URL whose content has to be
//! downloaded and spilled to a local file before the renderer sees it. This
//! trait lets the generator do that without being tied to an HTTP client.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;
use thiserror::Error;

/// Error type for temporary file and content operations.
#[derive(Error, Debug, Clone)]
pub enum ResourceError {
    #[error("Unable to use directory '{path}': {message}")]
    Directory { path: String, message: String },

    #[error("Failed to write temporary file '{path}': {message}")]
    Write { path: String, message: String },

    #[error("Failed to fetch '{url}': {message}")]
    Fetch { url: String, message: String },
}

/// A trait for retrieving the content behind a URL.
///
/// # Implementations
///
/// - `HttpFetcher` (weasy-resource): performs a blocking HTTP GET
/// - `InMemoryFetcher`: answers from a pre-populated map (tests, offline use)
pub trait ContentFetcher: Send + Sync + Debug {
    /// Fetch the full body behind `url`.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ResourceError>;

    /// Returns a human-readable name for this fetcher (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// A fetcher answering from memory.
///
/// Unknown URLs produce `ResourceError::Fetch`.
#[derive(Debug, Default)]
pub struct InMemoryFetcher {
    bodies: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the body returned for `url`.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::Fetch` if the internal lock is poisoned.
    pub fn add(&self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Result<(), ResourceError> {
        let url = url.into();
        let mut bodies = self.bodies.write().map_err(|_| ResourceError::Fetch {
            url: url.clone(),
            message: "fetcher lock poisoned".to_string(),
        })?;
        bodies.insert(url, body.into());
        Ok(())
    }

    /// Number of registered URLs. Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.bodies.read().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ContentFetcher for InMemoryFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ResourceError> {
        let bodies = self.bodies.read().map_err(|_| ResourceError::Fetch {
            url: url.to_string(),
            message: "fetcher lock poisoned".to_string(),
        })?;
        bodies.get(url).cloned().ok_or_else(|| ResourceError::Fetch {
            url: url.to_string(),
            message: "no content registered".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "InMemoryFetcher"
    }
}
