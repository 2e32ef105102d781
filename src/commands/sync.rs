//! `swag sync` command.

use super::{print_result, Project};
use crate::context::ServiceContext;
use crate::error::Result;

/// Execute the `sync` command.
///
/// # Errors
///
/// Returns an error string if the lock cannot be loaded or first created.
pub fn run(ctx: &ServiceContext, project: &Project) -> Result<(), String> {
    print_result(execute(ctx, project))
}

/// Loads the existing lock, or fetches the description and writes the first lock.
///
/// # Errors
///
/// Returns an error if the lock is invalid, or if there is none and the
/// fetch, build or write fails.
pub fn execute(ctx: &ServiceContext, project: &Project) -> Result<String> {
    let store = project.lock(ctx);
    if let Some(snapshot) = store.load_if_exists()? {
        return Ok(format!(
            "Lock {} is in place ({} modules, {} definitions). \
             Run `swag diff` to compare it with the current description.",
            store.path().display(),
            snapshot.mods.len(),
            snapshot.definitions.len()
        ));
    }

    let output = project.fetch_current(ctx)?;
    store.save(&output.snapshot)?;

    let mut lines = vec![format!(
        "{} created ({} modules, {} definitions).",
        store.path().display(),
        output.snapshot.mods.len(),
        output.snapshot.definitions.len()
    )];
    if !output.warnings.is_empty() {
        lines.push(format!("{} warning(s):", output.warnings.len()));
        lines.extend(output.warnings.iter().map(|w| format!("  {w}")));
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::commands::fixtures;

    #[test]
    fn first_sync_writes_lock_then_reuses_it() {
        let ctx = fixtures::context(vec![fixtures::petstore(None)]);
        let project = Project::load(&ctx, Path::new("/p")).unwrap();

        let first = execute(&ctx, &project).unwrap();
        assert!(first.starts_with("/p/service/swag.lock created (2 modules, 4 definitions)."));
        assert!(ctx.fs.exists(Path::new("/p/service/swag.lock")));

        // The fixture has no second document; a second fetch would fail.
        let second = execute(&ctx, &project).unwrap();
        assert!(second.contains("is in place (2 modules, 4 definitions)"));
    }

    #[test]
    fn sync_without_origin_is_config_error() {
        let ctx = fixtures::context(vec![]);
        let mut project = Project::load(&ctx, Path::new("/p")).unwrap();
        project.config.origin_url.clear();
        let err = execute(&ctx, &project).unwrap_err();
        assert!(err.to_string().contains("originUrl is not set"));
    }

    #[test]
    fn fetch_failure_surfaces_url() {
        let ctx = fixtures::context(vec![]);
        let project = Project::load(&ctx, Path::new("/p")).unwrap();
        let err = execute(&ctx, &project).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to fetch http://petstore/v2/api-docs: no more documents"
        );
    }
}
