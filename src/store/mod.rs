//! Lock store: persistence of the last synced snapshot.
//!
//! The lock lives at `<root>/<outDir>/<lockPath>` and all I/O goes through
//! the `FileSystem` port, so the store works with live, recording and
//! replaying adapters.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Result, SwagError};
use crate::ports::FileSystem;
use crate::snapshot::Snapshot;

/// Reads and writes the lock file of one project.
pub struct LockStore<'a> {
    fs: &'a dyn FileSystem,
    path: PathBuf,
}

impl<'a> LockStore<'a> {
    /// Creates a store for the lock file at `path`.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, path: &Path) -> Self {
        Self { fs, path: path.to_path_buf() }
    }

    /// Creates a store for the lock file configured for `root`.
    #[must_use]
    pub fn for_project(fs: &'a dyn FileSystem, config: &Config, root: &Path) -> Self {
        Self::new(fs, &config.lock_file(root))
    }

    /// Full path of the lock file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if a lock file has been written.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.fs.exists(&self.path)
    }

    /// Loads the locked snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid lock.
    pub fn load(&self) -> Result<Snapshot> {
        let content = self.fs.read_to_string(&self.path).map_err(|e| self.io_error(&e))?;
        let snapshot = Snapshot::from_lock(&content)?;
        tracing::debug!(
            path = %self.path.display(),
            mods = snapshot.mods.len(),
            definitions = snapshot.definitions.len(),
            "lock loaded"
        );
        Ok(snapshot)
    }

    /// Loads the locked snapshot, or `None` when no lock exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing lock cannot be read or parsed.
    pub fn load_if_exists(&self) -> Result<Option<Snapshot>> {
        if self.exists() {
            self.load().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Writes `snapshot` as the new lock.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let content = snapshot.to_lock()?;
        self.fs.write(&self.path, &content).map_err(|e| self.io_error(&e))?;
        tracing::info!(path = %self.path.display(), "lock written");
        Ok(())
    }

    fn io_error(&self, err: &dyn std::fmt::Display) -> SwagError {
        SwagError::Io { path: self.path.display().to_string(), message: err.to_string() }
    }
}
