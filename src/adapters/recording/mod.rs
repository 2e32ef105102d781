//! Recording adapters that capture interactions to cassettes.

pub mod fetch;
pub mod filesystem;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

pub use fetch::RecordingFetcher;
pub use filesystem::RecordingFileSystem;

/// Record an interaction with a simple (non-Result) return value.
pub(crate) fn record_interaction<I, O>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    push(recorder, port, method, to_json(input), to_json(output));
}

/// Record a `Result<T, E>` interaction using the Ok/Err JSON convention.
///
/// - `Ok(v)` is serialized as `{"Ok": v}`
/// - `Err(e)` is serialized as `{"Err": e.to_string()}`
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let output = match result {
        Ok(v) => serde_json::json!({ "Ok": to_json(v) }),
        Err(e) => serde_json::json!({ "Err": e.to_string() }),
    };
    push(recorder, port, method, to_json(input), output);
}

fn to_json<T: Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to serialize recorded value");
        serde_json::Value::Null
    })
}

fn push(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: serde_json::Value,
    output: serde_json::Value,
) {
    match recorder.lock() {
        Ok(mut guard) => guard.record(port, method, input, output),
        Err(_) => tracing::warn!(port, method, "recorder lock poisoned, interaction dropped"),
    }
}
