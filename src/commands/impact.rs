//! `swag impact` command.

use super::{print_result, Project};
use crate::context::ServiceContext;
use crate::error::{Result, SwagError};
use crate::impact::{compute_impact, format_definition_impact};
use crate::model::EntityKind;

/// Execute the `impact` command.
///
/// # Errors
///
/// Returns an error string if the lock cannot be loaded or the definition is unknown.
pub fn run(ctx: &ServiceContext, project: &Project, definition: &str) -> Result<(), String> {
    print_result(execute(ctx, project, definition))
}

/// Reports the direct and transitive impact of `definition` in the lock.
///
/// # Errors
///
/// Returns an error if the lock is missing, its graph references unknown
/// definitions, or `definition` is not in it.
pub fn execute(ctx: &ServiceContext, project: &Project, definition: &str) -> Result<String> {
    let snapshot = project.locked_snapshot(ctx)?;
    let index = compute_impact(&snapshot.definitions, &snapshot.mods)?;
    let entry = index.get(definition).ok_or_else(|| SwagError::NotFound {
        kind: EntityKind::Definition.label(),
        name: definition.to_string(),
    })?;
    Ok(format_definition_impact(entry))
}
