//! Diagnostic logging on stderr.
//!
//! `SWAG_LOG` (or `RUST_LOG`) sets the filter: either a plain level such as
//! `debug`, applied to this crate, or a full filter spec. Command output stays
//! on stdout.

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const CRATE_TARGET: &str = "swag";
const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Installs the global subscriber. `verbose` raises the default level to `debug`.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init(verbose: bool) {
    let env = std::env::var("SWAG_LOG").or_else(|_| std::env::var("RUST_LOG")).ok();
    let filter = filter_spec(env.as_deref(), verbose);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry().with(fmt_layer).try_init().is_err() {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn filter_spec(env: Option<&str>, verbose: bool) -> String {
    match env {
        Some(level) if LEVELS.contains(&level) => format!("{CRATE_TARGET}={level}"),
        Some(spec) if !spec.trim().is_empty() => spec.to_string(),
        _ if verbose => format!("{CRATE_TARGET}=debug"),
        _ => format!("{CRATE_TARGET}=info"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_level_is_scoped_to_crate() {
        assert_eq!(filter_spec(Some("trace"), false), "swag=trace");
    }

    #[test]
    fn full_spec_passes_through() {
        assert_eq!(filter_spec(Some("swag=debug,reqwest=warn"), false), "swag=debug,reqwest=warn");
    }

    #[test]
    fn default_depends_on_verbosity() {
        assert_eq!(filter_spec(None, false), "swag=info");
        assert_eq!(filter_spec(None, true), "swag=debug");
        assert_eq!(filter_spec(Some(" "), true), "swag=debug");
    }
}
