//! Replaying adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::FileSystem;

/// Replays recorded filesystem operations from a cassette.
pub struct ReplayingFileSystem {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a shared cassette replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(
        &self,
        _path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "fs", "read_to_string")?;
        replay_result(output, "fs::read_to_string")
    }

    fn write(
        &self,
        _path: &Path,
        _contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "fs", "write")?;
        replay_result::<serde_json::Value>(output, "fs::write").map(|_| ())
    }

    fn exists(&self, path: &Path) -> bool {
        match next_output(&self.replayer, "fs", "exists")
            .and_then(|output| replay_result::<bool>(output, "fs::exists"))
        {
            Ok(exists) => exists,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "no replayable fs::exists");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn make_fs(interactions: Vec<Interaction>) -> ReplayingFileSystem {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            origin: String::new(),
            interactions,
        };
        ReplayingFileSystem::new(Arc::new(Mutex::new(CassetteReplayer::new(&cassette))))
    }

    fn fs_call(seq: u64, method: &str, output: serde_json::Value) -> Interaction {
        Interaction {
            seq,
            port: "fs".into(),
            method: method.into(),
            input: json!({"path": "/p/service/swag.lock"}),
            output,
        }
    }

    #[test]
    fn replaying_fs_read_to_string() {
        let fs = make_fs(vec![fs_call(0, "read_to_string", json!({"Ok": "{\"mods\": []}"}))]);
        let result = fs.read_to_string(Path::new("/p/service/swag.lock")).unwrap();
        assert_eq!(result, "{\"mods\": []}");
    }

    #[test]
    fn replaying_fs_read_to_string_error() {
        let fs = make_fs(vec![fs_call(0, "read_to_string", json!({"Err": "file not found"}))]);
        let err = fs.read_to_string(Path::new("/missing")).unwrap_err();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn replaying_fs_write_and_exists() {
        let fs = make_fs(vec![fs_call(0, "exists", json!(true)), fs_call(1, "write", json!({"Ok": null}))]);
        assert!(fs.exists(Path::new("/p/service/swag.lock")));
        fs.write(Path::new("/p/service/swag.lock"), "{}").unwrap();
    }

    #[test]
    fn exhausted_exists_reads_as_missing() {
        let fs = make_fs(vec![]);
        assert!(!fs.exists(Path::new("/p")));
    }
}
