//! Replaying adapter for the `Fetcher` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{FetchFuture, Fetcher};

/// Serves recorded API descriptions from a cassette.
pub struct ReplayingFetcher {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingFetcher {
    /// Create a replaying fetcher backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl Fetcher for ReplayingFetcher {
    fn fetch<'a>(&'a self, _url: &'a str) -> FetchFuture<'a> {
        let output = next_output(&self.replayer, "fetch", "fetch");
        Box::pin(async move { replay_result(output?, "fetch::fetch") })
    }
}
