//! `swag diff` command.

use super::{print_result, Project};
use crate::context::ServiceContext;
use crate::diff::{diff_snapshots, format_diff};
use crate::error::Result;
use crate::impact::{compute_impact, format_impact_report};

/// Execute the `diff` command.
///
/// # Errors
///
/// Returns an error string if the lock or the current description cannot be loaded.
pub fn run(ctx: &ServiceContext, project: &Project) -> Result<(), String> {
    print_result(execute(ctx, project))
}

/// Compares the lock with the current description.
///
/// Changed definitions are annotated with their impact, computed on the
/// current description. When the impact graph cannot be built the plain
/// diff is still returned, followed by the reason impact is missing.
///
/// # Errors
///
/// Returns an error if either snapshot cannot be loaded.
pub fn execute(ctx: &ServiceContext, project: &Project) -> Result<String> {
    let locked = project.locked_snapshot(ctx)?;
    let current = project.fetch_current(ctx)?.snapshot;

    let diff = diff_snapshots(&locked, &current);
    if diff.is_empty() {
        return Ok(format_diff(&diff, None));
    }

    let sections = match compute_impact(&current.definitions, &current.mods) {
        Ok(index) => {
            let report = index.report(&diff.touched_definitions());
            [format_diff(&diff, Some(&index)), String::new(), format_impact_report(&report)]
        }
        Err(err) => {
            tracing::warn!(error = %err, "impact graph unavailable");
            [format_diff(&diff, None), String::new(), format!("Impact unavailable: {err}")]
        }
    };
    Ok(sections.join("\n"))
}
