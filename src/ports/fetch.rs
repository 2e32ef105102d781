//! Fetch port for retrieving the raw API description.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

/// Boxed future type alias used by [`Fetcher`] to keep the trait dyn-compatible.
pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<serde_json::Value, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Retrieves a JSON document by URL.
///
/// Failures are reported as-is; retrying is left to the caller.
pub trait Fetcher: Send + Sync {
    /// Fetches and parses the JSON document at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, a non-success status, or a body
    /// that is not valid JSON.
    fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a>;
}
