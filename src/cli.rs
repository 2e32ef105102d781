//! CLI argument definitions.

use clap::{ArgGroup, Parser, Subcommand};

/// Top-level CLI parser for `swag`.
#[derive(Debug, Parser)]
#[command(
    name = "swag",
    version,
    about = "Track API description changes and the modules they impact"
)]
pub struct Cli {
    /// Log at debug level unless `SWAG_LOG` says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the lock, or fetch the description and write the first lock.
    Sync,
    /// Compare the current description with the lock.
    Diff,
    /// Show which definitions and modules a definition change reaches.
    Impact {
        /// Definition name.
        definition: String,
    },
    /// Copy modules or definitions from the current description into the lock.
    #[command(group(ArgGroup::new("target").required(true).args(["all", "module", "definition"])))]
    Update {
        /// Replace the whole lock.
        #[arg(long)]
        all: bool,
        /// Upsert one module by name.
        #[arg(long = "mod", value_name = "NAME")]
        module: Option<String>,
        /// Upsert one definition by name.
        #[arg(long = "def", value_name = "NAME")]
        definition: Option<String>,
    },
    /// Print the declaration of a locked definition or module.
    Show {
        /// Definition or module name.
        name: String,
    },
}
