//! Recording adapter for the `Fetcher` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{FetchFuture, Fetcher};

/// Records fetches while delegating to an inner implementation.
pub struct RecordingFetcher {
    inner: Box<dyn Fetcher>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingFetcher {
    /// Creates a new recording fetcher wrapping the given implementation.
    pub fn new(inner: Box<dyn Fetcher>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct UrlInput<'a> {
    url: &'a str,
}

impl Fetcher for RecordingFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        Box::pin(async move {
            let result = self.inner.fetch(url).await;
            record_result(&self.recorder, "fetch", "fetch", &UrlInput { url }, &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct StaticFetcher;

    impl Fetcher for StaticFetcher {
        fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
            Box::pin(async move {
                if url.ends_with("missing") {
                    Err("HTTP 404".into())
                } else {
                    Ok(json!({"paths": {}}))
                }
            })
        }
    }

    #[tokio::test]
    async fn records_success_and_failure() {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new("/unused.yaml", "test")));
        let fetcher = RecordingFetcher::new(Box::new(StaticFetcher), Arc::clone(&recorder));

        assert_eq!(fetcher.fetch("http://api/docs").await.unwrap(), json!({"paths": {}}));
        assert!(fetcher.fetch("http://api/missing").await.is_err());

        assert_eq!(recorder.lock().unwrap().len(), 2);
    }
}
