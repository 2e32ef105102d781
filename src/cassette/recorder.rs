//! Records interactions into a cassette file.

use std::path::PathBuf;

use chrono::Utc;

use super::format::{Cassette, Interaction};

/// Records interactions and writes them as a YAML cassette file.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    origin: String,
    interactions: Vec<Interaction>,
    next_seq: u64,
}

impl CassetteRecorder {
    /// Create a new recorder that will write to the given path.
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            origin: String::new(),
            interactions: Vec::new(),
            next_seq: 0,
        }
    }

    /// Record an interaction. The `seq` field is assigned automatically.
    ///
    /// The first `fetch` input carrying a `url` becomes the cassette origin.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        let port = port.into();
        if port == "fetch" && self.origin.is_empty() {
            if let Some(url) = input.get("url").and_then(serde_json::Value::as_str) {
                self.origin = url.to_string();
            }
        }
        self.interactions.push(Interaction {
            seq: self.next_seq,
            port,
            method: method.into(),
            input,
            output,
        });
        self.next_seq += 1;
    }

    /// Number of interactions recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    /// Finish recording and write the cassette YAML file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        let cassette = Cassette {
            name: self.name,
            recorded_at: Utc::now(),
            origin: self.origin,
            interactions: self.interactions,
        };
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_and_finish() {
        let dir = std::env::temp_dir().join("swag_cassette_recorder_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sync.cassette.yaml");

        let mut recorder = CassetteRecorder::new(&path, "sync");
        recorder.record("fs", "exists", json!({"path": "/p/swag-config.json"}), json!(false));
        recorder.record("fetch", "fetch", json!({"url": "http://api/docs"}), json!({"Ok": {}}));
        recorder.record("fetch", "fetch", json!({"url": "http://other"}), json!({"Ok": {}}));
        assert_eq!(recorder.len(), 3);

        let result_path = recorder.finish().expect("finish should succeed");
        assert_eq!(result_path, path);

        let content = std::fs::read_to_string(&path).unwrap();
        let cassette = Cassette::from_yaml(&content).unwrap();
        assert_eq!(cassette.name, "sync");
        assert_eq!(cassette.origin, "http://api/docs");
        let seqs: Vec<u64> = cassette.interactions.iter().map(|i| i.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2]);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
