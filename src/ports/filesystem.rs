//! Filesystem port for lock and config file I/O.

use std::path::Path;

/// Provides filesystem access for reading and writing files.
///
/// Abstracting the filesystem allows deterministic replay and testing
/// without touching the real disk.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Writes the given contents to a file, creating parent directories and
    /// overwriting any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;
}

pub use mem::MemFs;

mod mem {
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::{Mutex, MutexGuard, PoisonError};

    use super::FileSystem;

    /// In-memory filesystem, used by tests and replay harnesses.
    #[derive(Debug, Default)]
    pub struct MemFs {
        files: Mutex<HashMap<PathBuf, String>>,
    }

    impl MemFs {
        /// Creates an empty filesystem.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a filesystem holding `files` as `(path, contents)` pairs.
        #[must_use]
        pub fn with_files<'a>(files: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
            let fs = Self::new();
            {
                let mut map = fs.files();
                for (path, contents) in files {
                    map.insert(PathBuf::from(path), contents.to_string());
                }
            }
            fs
        }

        fn files(&self) -> MutexGuard<'_, HashMap<PathBuf, String>> {
            self.files.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    impl FileSystem for MemFs {
        fn read_to_string(
            &self,
            path: &Path,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            self.files()
                .get(path)
                .cloned()
                .ok_or_else(|| format!("File not found: {}", path.display()).into())
        }

        fn write(
            &self,
            path: &Path,
            contents: &str,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            self.files().insert(path.to_path_buf(), contents.to_string());
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            let files = self.files();
            // Exact file, or a directory some file lives under.
            files.contains_key(path) || files.keys().any(|k| k.starts_with(path) && k != path)
        }
    }

}
