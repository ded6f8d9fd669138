//! Resources for the weasy generator.
//!
//! This crate provides the filesystem- and network-facing pieces the
//! generator needs around a renderer invocation.
//!
//! ## Available Pieces
//!
//! - [`TemporaryFiles`]: uniquely named scratch files with bulk cleanup
//! - [`HttpFetcher`]: `ContentFetcher` backed by a blocking HTTP client
//! - [`is_url`]: tells URLs apart from local paths and inline content
//!
//! ## Re-exports
//!
//! For convenience, we also re-export from weasy-traits:
//! - [`InMemoryFetcher`]: pre-populated in-memory fetcher

mod http;
mod temporary;
mod url;

pub use http::HttpFetcher;
pub use temporary::{DEFAULT_PREFIX, TemporaryFiles};
pub use url::is_url;

// Re-export from weasy-traits for convenience
pub use weasy_traits::{ContentFetcher, InMemoryFetcher, ResourceError};
