//! `swag update` command.

use super::{print_result, Project};
use crate::context::ServiceContext;
use crate::error::{Result, SwagError};
use crate::model::{EntityKind, Named};
use crate::snapshot::Upsert;

/// What to copy from the current description into the lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Replace the whole lock.
    All,
    /// Upsert one module.
    Module(String),
    /// Upsert one definition.
    Definition(String),
}

impl Target {
    /// Builds a target from the mutually exclusive CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error unless exactly one flag is set.
    pub fn from_flags(
        all: bool,
        module: Option<&str>,
        definition: Option<&str>,
    ) -> std::result::Result<Self, String> {
        match (all, module, definition) {
            (true, None, None) => Ok(Self::All),
            (false, Some(name), None) => Ok(Self::Module(name.to_string())),
            (false, None, Some(name)) => Ok(Self::Definition(name.to_string())),
            _ => Err("choose exactly one of --all, --mod or --def".to_string()),
        }
    }
}

/// Execute the `update` command.
///
/// # Errors
///
/// Returns an error string if the lock cannot be updated.
pub fn run(ctx: &ServiceContext, project: &Project, target: &Target) -> Result<(), String> {
    print_result(execute(ctx, project, target))
}

/// Upserts `target` from the current description and rewrites the lock.
///
/// # Errors
///
/// Returns an error if the lock is missing, the fetch fails, or the named
/// module or definition is not in the current description.
pub fn execute(ctx: &ServiceContext, project: &Project, target: &Target) -> Result<String> {
    let store = project.lock(ctx);
    let mut locked = project.locked_snapshot(ctx)?;
    let current = project.fetch_current(ctx)?.snapshot;

    let message = match target {
        Target::All => {
            let message = format!(
                "Lock replaced ({} modules, {} definitions).",
                current.mods.len(),
                current.definitions.len()
            );
            locked = current;
            message
        }
        Target::Module(name) => {
            let module = find(current.find_mod(name), name)?;
            describe(module, locked.update_mod(module.clone()))
        }
        Target::Definition(name) => {
            let def = find(current.find_definition(name), name)?;
            describe(def, locked.update_definition(def.clone()))
        }
    };

    store.save(&locked)?;
    Ok(message)
}

fn find<'a, T: Named>(found: Option<&'a T>, name: &str) -> Result<&'a T> {
    found.ok_or_else(|| SwagError::NotFound { kind: T::KIND.label(), name: name.to_string() })
}

fn describe<T: Named>(item: &T, outcome: Upsert) -> String {
    let kind = match T::KIND {
        EntityKind::Module => "Module",
        EntityKind::Definition => "Definition",
    };
    let verb = match outcome {
        Upsert::Created => "added to",
        Upsert::Updated => "updated in",
    };
    format!("{kind} `{}` {verb} the lock.", item.name())
}
