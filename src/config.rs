//! Project configuration read from `swag-config.json`.
//!
//! Missing files and missing keys fall back to defaults. `SWAG_ORIGIN_URL`
//! overrides the origin URL after the file is read.

use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, SwagError};
use crate::ports::FileSystem;

/// File name looked up in the project root.
pub const CONFIG_FILE: &str = "swag-config.json";

/// How endpoint names are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Naming {
    /// From the path relative to the module's shared prefix.
    #[default]
    Url,
    /// From the operation id, falling back to the path when absent.
    OperationId,
}

/// What to do when several raw definitions share one canonical name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollapsePolicy {
    /// Keep the first definition in source order.
    #[default]
    FirstWins,
    /// Keep the last definition in source order.
    LastWins,
    /// Fail the build.
    Reject,
}

/// Settings for one project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// URL the API description is fetched from.
    pub origin_url: String,
    /// Output directory, relative to the project root.
    pub out_dir: String,
    /// Custom template module (`<templatePath>.ts`), relative to the project root.
    ///
    /// Custom templates are not executed; `swag show` reports when one is
    /// present and renders with the built-in template instead.
    pub template_path: String,
    /// Lock file name inside `out_dir`.
    pub lock_path: String,
    /// Endpoint naming strategy.
    pub naming: Naming,
    /// Merge policy for colliding definition names.
    pub collapse_policy: CollapsePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            origin_url: String::new(),
            out_dir: "service".to_string(),
            template_path: "serviceTemplate".to_string(),
            lock_path: "swag.lock".to_string(),
            naming: Naming::default(),
            collapse_policy: CollapsePolicy::default(),
        }
    }
}

impl Config {
    /// Reads `swag-config.json` from `root`, or returns defaults when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(fs: &dyn FileSystem, root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !fs.exists(&path) {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs.read_to_string(&path).map_err(|e| SwagError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content)
            .map_err(|e| SwagError::Config(format!("{}: {e}", path.display())))
    }

    /// Applies environment overrides (`SWAG_ORIGIN_URL`).
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = env::var("SWAG_ORIGIN_URL") {
            self.origin_url = url;
        }
        self
    }

    /// Output directory under `root`.
    #[must_use]
    pub fn out_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.out_dir)
    }

    /// Path of the custom template source under `root`.
    #[must_use]
    pub fn template_file(&self, root: &Path) -> PathBuf {
        root.join(format!("{}.ts", self.template_path))
    }

    /// Full path of the lock file under `root`.
    #[must_use]
    pub fn lock_file(&self, root: &Path) -> PathBuf {
        self.out_dir(root).join(&self.lock_path)
    }
}

/// Project root: `SWAG_ROOT` if set, otherwise the current directory.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn project_root() -> Result<PathBuf> {
    if let Ok(root) = env::var("SWAG_ROOT") {
        return Ok(PathBuf::from(root));
    }
    env::current_dir()
        .map_err(|e| SwagError::Io { path: ".".to_string(), message: e.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::filesystem::MemFs;

    #[test]
    fn missing_file_yields_defaults() {
        let fs = MemFs::new();
        let config = Config::load(&fs, Path::new("/project")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.lock_file(Path::new("/project")), Path::new("/project/service/swag.lock"));
        assert_eq!(
            config.template_file(Path::new("/project")),
            Path::new("/project/serviceTemplate.ts")
        );
    }

    #[test]
    fn partial_file_merges_with_defaults() {
        let fs = MemFs::with_files([(
            "/project/swag-config.json",
            r#"{"originUrl": "http://api/v2/api-docs", "outDir": "src/api",
                "naming": "operationId", "collapsePolicy": "reject"}"#,
        )]);
        let config = Config::load(&fs, Path::new("/project")).unwrap();
        assert_eq!(config.origin_url, "http://api/v2/api-docs");
        assert_eq!(config.out_dir, "src/api");
        assert_eq!(config.lock_path, "swag.lock");
        assert_eq!(config.naming, Naming::OperationId);
        assert_eq!(config.collapse_policy, CollapsePolicy::Reject);
    }

    #[test]
    fn invalid_file_is_a_config_error() {
        let fs = MemFs::with_files([("/project/swag-config.json", "{not json")]);
        let err = Config::load(&fs, Path::new("/project")).unwrap_err();
        assert!(matches!(err, SwagError::Config(_)));
    }
}
