//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::{LiveFetcher, LiveFileSystem};
use crate::adapters::recording::{RecordingFetcher, RecordingFileSystem};
use crate::adapters::replaying::{ReplayingFetcher, ReplayingFileSystem};
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{Fetcher, FileSystem};

/// Bundles all port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live, replaying,
/// recording).
pub struct ServiceContext {
    /// Filesystem for config and lock file I/O.
    pub fs: Box<dyn FileSystem>,
    /// Fetcher for the raw API description.
    pub fetch: Box<dyn Fetcher>,
    /// Optional cassette recorder; written to disk on drop.
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a live context backed by the real disk and network.
    #[must_use]
    pub fn live() -> Self {
        Self::from_parts(Box::new(LiveFileSystem), Box::new(LiveFetcher::new()))
    }

    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn from_parts(fs: Box<dyn FileSystem>, fetch: Box<dyn Fetcher>) -> Self {
        Self { fs, fetch, recorder: None }
    }

    /// Creates a recording context that writes a cassette file on drop.
    ///
    /// Uses live adapters for actual work. This is the developer-only
    /// mechanism for capturing cassettes via the `SWAG_RECORD` env var.
    #[must_use]
    pub fn recording(path: &Path) -> Self {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("swag-session")
            .trim_end_matches(".cassette")
            .to_string();
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(path, name)));
        Self {
            fs: Box::new(RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&recorder))),
            fetch: Box::new(RecordingFetcher::new(
                Box::new(LiveFetcher::new()),
                Arc::clone(&recorder),
            )),
            recorder: Some(recorder),
        }
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// Both ports are served by one cassette; each port/method pair is
    /// dispatched to its own interaction stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette = Cassette::from_yaml(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        Ok(Self::replaying_cassette(&cassette))
    }

    /// Creates a replaying context from an already loaded cassette.
    #[must_use]
    pub fn replaying_cassette(cassette: &Cassette) -> Self {
        let replayer = Arc::new(Mutex::new(CassetteReplayer::new(cassette)));
        Self::from_parts(
            Box::new(ReplayingFileSystem::new(Arc::clone(&replayer))),
            Box::new(ReplayingFetcher::new(replayer)),
        )
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        let Some(recorder) = self.recorder.take() else {
            return;
        };
        // The adapters hold the other references; release them first.
        self.fs = Box::new(LiveFileSystem);
        self.fetch = Box::new(LiveFetcher::new());
        let finished = Arc::try_unwrap(recorder)
            .map_err(|_| "recorder still shared".to_string())
            .and_then(|m| m.into_inner().map_err(|_| "recorder lock poisoned".to_string()))
            .and_then(|r| r.finish().map_err(|e| e.to_string()));
        match finished {
            Ok(path) => eprintln!("Recording saved to: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to write cassette: {e}"),
        }
    }
}
