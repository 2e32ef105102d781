//! Error types shared across the crate.

use thiserror::Error;

/// Errors raised while building or indexing a snapshot and while talking to ports.
#[derive(Debug, Error)]
pub enum SwagError {
    /// The API description could not be fetched.
    #[error("failed to fetch {url}: {message}")]
    Fetch {
        /// The URL that was requested.
        url: String,
        /// Transport or decoding error reported by the fetcher.
        message: String,
    },

    /// A filesystem operation failed.
    #[error("I/O error on {path}: {message}")]
    Io {
        /// Path that was being read or written.
        path: String,
        /// Underlying error message.
        message: String,
    },

    /// JSON could not be (de)serialized.
    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration file is unreadable or invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Several raw definitions collapsed onto one canonical name under the `reject` policy.
    #[error("definitions {raw_names:?} all collapse to `{name}`")]
    AmbiguousCollapse {
        /// The canonical name shared by the raw definitions.
        name: String,
        /// Raw definition names in source order.
        raw_names: Vec<String>,
    },

    /// The impact graph could not be built.
    #[error(transparent)]
    Impact(#[from] ImpactError),

    /// A module or definition was requested by name and does not exist.
    #[error("{kind} `{name}` not found")]
    NotFound {
        /// Either `module` or `definition`.
        kind: &'static str,
        /// The requested name.
        name: String,
    },
}

/// Errors raised by the impact graph builder.
///
/// Any of these aborts the whole computation: a partial graph would report
/// arbitrarily incomplete impact sets.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImpactError {
    /// A dependency edge points at a definition missing from the snapshot.
    #[error("`{referenced_by}` depends on unknown definition `{name}`")]
    UnknownDefinition {
        /// The dependency name that failed to resolve.
        name: String,
        /// The definition or module holding the reference.
        referenced_by: String,
    },
}

/// Convenience alias for results carrying a [`SwagError`].
pub type Result<T, E = SwagError> = std::result::Result<T, E>;
