//! Replaying adapters that serve recorded interactions.

pub mod fetch;
pub mod filesystem;

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;

pub use fetch::ReplayingFetcher;
pub use filesystem::ReplayingFileSystem;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Pulls the next recorded output for `port::method`.
pub(crate) fn next_output(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> Result<serde_json::Value, BoxError> {
    let mut guard = replayer.lock().map_err(|_| format!("{port}::{method}: replayer lock poisoned"))?;
    let interaction = guard.next_interaction(port, method)?;
    Ok(interaction.output.clone())
}

/// Decodes a recorded `{"Ok": v}` / `{"Err": "message"}` output.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
    context: &str,
) -> Result<T, BoxError> {
    if let Some(err) = output.get("Err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = match output {
        serde_json::Value::Object(mut map) if map.contains_key("Ok") => {
            map.remove("Ok").unwrap_or_default()
        }
        other => other,
    };
    serde_json::from_value(value).map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}
