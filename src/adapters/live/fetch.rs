//! Live adapter for the `Fetcher` port over HTTP.

use reqwest::Client;

use crate::ports::fetch::{FetchFuture, Fetcher};

/// Fetches API descriptions with a plain HTTP GET.
pub struct LiveFetcher {
    client: Client,
}

impl LiveFetcher {
    /// Creates a new live fetcher.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for LiveFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for LiveFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        Box::pin(async move {
            tracing::info!(url, "fetching API description");

            let response = self.client.get(url).send().await.map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("request to {url} failed: {e}").into()
                },
            )?;

            let status = response.status();
            let body =
                response.text().await.map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("failed to read response from {url}: {e}").into()
                })?;

            if !status.is_success() {
                return Err(format!("{url} returned HTTP {}", status.as_u16()).into());
            }
            tracing::debug!(url, bytes = body.len(), "description received");

            serde_json::from_str(&body).map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                format!("{url} did not return JSON: {e}").into()
            })
        })
    }
}
