//! `swag show` command.

use super::{print_result, Project};
use crate::context::ServiceContext;
use crate::error::{Result, SwagError};
use crate::model::Module;
use crate::render::{
    definition_class, module_declaration, module_implementation, value_class, DeclarationTemplate,
};

/// Execute the `show` command.
///
/// # Errors
///
/// Returns an error string if the lock cannot be loaded or nothing is named `name`.
pub fn run(ctx: &ServiceContext, project: &Project, name: &str) -> Result<(), String> {
    print_result(execute(ctx, project, name))
}

/// Renders the locked definition and/or module called `name`.
///
/// # Errors
///
/// Returns an error if the lock is missing or holds neither a definition
/// nor a module with that name.
pub fn execute(ctx: &ServiceContext, project: &Project, name: &str) -> Result<String> {
    let snapshot = project.locked_snapshot(ctx)?;
    let mut sections = Vec::new();

    if let Some(def) = snapshot.find_definition(name) {
        sections.push(definition_class(def, true));
        sections.push(value_class(def));
    }
    if let Some(module) = snapshot.find_mod(name) {
        sections.push(owners_line(module));
        if let Some(note) = custom_template_note(ctx, project) {
            sections.push(note);
        }
        sections.push(module_declaration(module, &DeclarationTemplate));
        sections.push(module_implementation(module, &DeclarationTemplate));
    }

    if sections.is_empty() {
        return Err(SwagError::NotFound {
            kind: "definition or module",
            name: name.to_string(),
        });
    }
    Ok(sections.join("\n\n"))
}

/// Note printed when the project ships a template `swag` cannot execute.
fn custom_template_note(ctx: &ServiceContext, project: &Project) -> Option<String> {
    let path = project.config.template_file(&project.root);
    if !ctx.fs.exists(&path) {
        return None;
    }
    tracing::warn!(path = %path.display(), "custom template is not executed");
    Some(format!(
        "// template {} ignored; using the built-in declaration template",
        path.display()
    ))
}

fn owners_line(module: &Module) -> String {
    let owners = module.owners();
    let list = |names: Option<Vec<String>>| names.map_or_else(|| "-".to_string(), |n| n.join(", "));
    format!("// owners: fe {} | be {}", list(owners.fe), list(owners.be))
}
