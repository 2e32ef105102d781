//! Command dispatch and handlers.
//!
//! Each handler has an `execute` function returning the text to print, and a
//! `run` wrapper that prints it. Errors cross the CLI boundary as strings.

pub mod diff;
pub mod impact;
pub mod show;
pub mod sync;
pub mod update;

use std::env;
use std::path::{Path, PathBuf};

use crate::cli::Command;
use crate::config::{self, Config};
use crate::context::ServiceContext;
use crate::error::{Result, SwagError};
use crate::snapshot::{BuildOutput, Snapshot, SnapshotBuilder};
use crate::source::DataSource;
use crate::store::LockStore;

/// A project root together with its configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Directory holding `swag-config.json`.
    pub root: PathBuf,
    /// Settings read from the config file and environment.
    pub config: Config,
}

impl Project {
    /// Loads the configuration of the project at `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing config file cannot be read or parsed.
    pub fn load(ctx: &ServiceContext, root: &Path) -> Result<Self> {
        let config = Config::load(ctx.fs.as_ref(), root)?.with_env_overrides();
        tracing::debug!(root = %root.display(), ?config, "project loaded");
        Ok(Self { root: root.to_path_buf(), config })
    }

    /// Lock store of this project.
    #[must_use]
    pub fn lock<'a>(&self, ctx: &'a ServiceContext) -> LockStore<'a> {
        LockStore::for_project(ctx.fs.as_ref(), &self.config, &self.root)
    }

    /// Loads the lock, failing with a hint when none was written yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is missing or invalid.
    pub fn locked_snapshot(&self, ctx: &ServiceContext) -> Result<Snapshot> {
        let store = self.lock(ctx);
        store.load_if_exists()?.ok_or_else(|| SwagError::Io {
            path: store.path().display().to_string(),
            message: "no lock file; run `swag sync` first".to_string(),
        })
    }

    /// Fetches the current description and builds a snapshot from it.
    ///
    /// # Errors
    ///
    /// Returns an error if no origin URL is configured, the fetch fails, or
    /// the build rejects a definition collision.
    pub fn fetch_current(&self, ctx: &ServiceContext) -> Result<BuildOutput> {
        let url = self.config.origin_url.as_str();
        if url.is_empty() {
            return Err(SwagError::Config(format!(
                "originUrl is not set in {} (or SWAG_ORIGIN_URL)",
                config::CONFIG_FILE
            )));
        }

        let fetch_error = |message: String| SwagError::Fetch { url: url.to_string(), message };
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| fetch_error(format!("failed to start async runtime: {e}")))?;
        let raw = runtime.block_on(ctx.fetch.fetch(url)).map_err(|e| fetch_error(e.to_string()))?;

        let source = DataSource::from_value(raw)?;
        SnapshotBuilder::from_config(&self.config).build(&source)
    }
}

/// Dispatch a parsed command to its handler.
///
/// When `SWAG_RECORD` is set to a file path, all port interactions are
/// recorded to that cassette.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> std::result::Result<(), String> {
    let ctx = match env::var("SWAG_RECORD") {
        Ok(path) => ServiceContext::recording(Path::new(&path)),
        Err(_) => ServiceContext::live(),
    };
    let root = config::project_root().map_err(|e| e.to_string())?;
    dispatch_with_context(command, &ctx, &root)
}

/// Dispatch a command with the given service context and project root.
///
/// # Errors
///
/// Returns an error string if the project cannot be loaded or the handler fails.
pub fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    root: &Path,
) -> std::result::Result<(), String> {
    let project = Project::load(ctx, root).map_err(|e| e.to_string())?;
    match command {
        Command::Sync => sync::run(ctx, &project),
        Command::Diff => diff::run(ctx, &project),
        Command::Impact { definition } => impact::run(ctx, &project, definition),
        Command::Update { all, module, definition } => {
            let target = update::Target::from_flags(*all, module.as_deref(), definition.as_deref())?;
            update::run(ctx, &project, &target)
        }
        Command::Show { name } => show::run(ctx, &project, name),
    }
}

/// Prints a handler's output, mapping its error to the CLI string form.
fn print_result(result: Result<String>) -> std::result::Result<(), String> {
    let text = result.map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}
