//! Builds a [`Snapshot`] from a raw API description.

use std::fmt;

use crate::config::{CollapsePolicy, Config, Naming};
use crate::error::{Result, SwagError};
use crate::model::identifier::{identifier_from_operation_id, identifier_from_url, max_same_path};
use crate::model::resolve::canonical_name;
use crate::model::{Definition, Interface, Module, Parameter};
use crate::source::{DataSource, RawOperation, Tag};

use super::Snapshot;

/// Something the builder skipped or collapsed while building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    /// Several raw definitions normalized to one canonical name.
    Collapsed {
        /// Canonical name.
        name: String,
        /// Raw name whose body was kept.
        kept: String,
        /// Raw names whose bodies were discarded.
        dropped: Vec<String>,
    },
    /// Two endpoints of one module derived the same name; the later one was dropped.
    DuplicateEndpoint {
        /// Module name.
        module: String,
        /// Derived endpoint name.
        name: String,
        /// Path of the dropped endpoint.
        path: String,
        /// Method of the dropped endpoint.
        method: String,
    },
    /// Two tags produced the same module name; the later one was dropped.
    DuplicateModule {
        /// Module name.
        name: String,
        /// Tag name of the dropped module.
        tag: String,
    },
    /// An operation could not be read and was left out.
    MalformedOperation {
        /// Path template.
        path: String,
        /// HTTP method.
        method: String,
        /// Parse error.
        message: String,
    },
    /// A definition could not be read and was left out.
    MalformedDefinition {
        /// Raw definition name.
        name: String,
        /// Parse error.
        message: String,
    },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collapsed { name, kept, dropped } => {
                write!(f, "definitions {dropped:?} collapse to `{name}`; kept `{kept}`")
            }
            Self::DuplicateEndpoint { module, name, path, method } => {
                write!(f, "{module}: `{method} {path}` also derives `{name}`; dropped")
            }
            Self::DuplicateModule { name, tag } => {
                write!(f, "tag `{tag}` repeats module `{name}`; dropped")
            }
            Self::MalformedOperation { path, method, message } => {
                write!(f, "skipped `{method} {path}`: {message}")
            }
            Self::MalformedDefinition { name, message } => {
                write!(f, "skipped definition `{name}`: {message}")
            }
        }
    }
}

/// A built snapshot plus everything that was skipped or collapsed on the way.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    /// The normalized model.
    pub snapshot: Snapshot,
    /// Recoverable problems, in the order they were found.
    pub warnings: Vec<BuildWarning>,
}

/// Turns a raw description into a [`Snapshot`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotBuilder {
    naming: Naming,
    collapse: CollapsePolicy,
}

impl SnapshotBuilder {
    /// Creates a builder with explicit naming and collapse settings.
    #[must_use]
    pub fn new(naming: Naming, collapse: CollapsePolicy) -> Self {
        Self { naming, collapse }
    }

    /// Creates a builder from project configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.naming, config.collapse_policy)
    }

    /// Builds modules and definitions.
    ///
    /// Malformed operations and definitions are skipped and reported as
    /// warnings; the rest of the description is still built.
    ///
    /// # Errors
    ///
    /// Returns [`SwagError::AmbiguousCollapse`] when definitions collide
    /// under [`CollapsePolicy::Reject`].
    pub fn build(&self, source: &DataSource) -> Result<BuildOutput> {
        let mut warnings = Vec::new();

        let interfaces = collect_interfaces(source, &mut warnings);
        let mods = self.build_modules(&source.tags, &interfaces, &mut warnings);
        let definitions = self.build_definitions(source, &mut warnings)?;

        for warning in &warnings {
            tracing::warn!("{warning}");
        }
        tracing::info!(
            modules = mods.len(),
            definitions = definitions.len(),
            warnings = warnings.len(),
            "snapshot built"
        );

        Ok(BuildOutput { snapshot: Snapshot { mods, definitions }, warnings })
    }

    fn build_modules(
        &self,
        tags: &[Tag],
        interfaces: &[Interface],
        warnings: &mut Vec<BuildWarning>,
    ) -> Vec<Module> {
        let mut mods: Vec<Module> = Vec::new();
        for tag in tags {
            let module = self.build_module(tag, interfaces, warnings);
            if mods.iter().any(|m| m.name == module.name) {
                warnings.push(BuildWarning::DuplicateModule {
                    name: module.name,
                    tag: tag.name.clone(),
                });
            } else {
                mods.push(module);
            }
        }
        mods
    }

    fn build_module(
        &self,
        tag: &Tag,
        interfaces: &[Interface],
        warnings: &mut Vec<BuildWarning>,
    ) -> Module {
        let name = module_name(&tag.description);
        let members: Vec<&Interface> =
            interfaces.iter().filter(|i| i.tags.contains(&tag.name)).collect();

        let paths: Vec<&str> =
            members.iter().map(|i| i.path.strip_prefix('/').unwrap_or(&i.path)).collect();
        let same_path = max_same_path(&paths);

        let mut named: Vec<Interface> = Vec::with_capacity(members.len());
        for member in members {
            let mut interface = member.clone();
            interface.name = self.endpoint_name(&interface, &same_path);
            interface.same_path.clone_from(&same_path);
            if named.iter().any(|i| i.name == interface.name) {
                tracing::debug!(module = %name, endpoint = %interface.name, "duplicate endpoint name");
                warnings.push(BuildWarning::DuplicateEndpoint {
                    module: name.clone(),
                    name: interface.name,
                    path: interface.path,
                    method: interface.method,
                });
            } else {
                named.push(interface);
            }
        }

        Module { name, description: tag.name.clone(), interfaces: named }
    }

    fn endpoint_name(&self, interface: &Interface, same_path: &str) -> String {
        match (self.naming, interface.operation_id.as_deref()) {
            (Naming::OperationId, Some(op_id)) => identifier_from_operation_id(op_id),
            _ => identifier_from_url(&interface.path, &interface.method, same_path),
        }
    }

    fn build_definitions(
        &self,
        source: &DataSource,
        warnings: &mut Vec<BuildWarning>,
    ) -> Result<Vec<Definition>> {
        let mut definitions: Vec<Definition> = Vec::new();
        // Raw names per canonical name, parallel to `definitions`.
        let mut origins: Vec<Vec<String>> = Vec::new();

        for (raw_name, raw) in source.definitions() {
            let parsed = raw.and_then(|raw| Ok((raw.properties()?, raw.description)));
            let (properties, description) = match parsed {
                Ok(parsed) => parsed,
                Err(e) => {
                    warnings.push(BuildWarning::MalformedDefinition {
                        name: raw_name.to_string(),
                        message: e.to_string(),
                    });
                    continue;
                }
            };
            let def =
                Definition { name: canonical_name(raw_name).to_string(), description, properties };

            match definitions.iter().position(|d| d.name == def.name) {
                Some(idx) => {
                    origins[idx].push(raw_name.to_string());
                    if self.collapse == CollapsePolicy::LastWins {
                        definitions[idx] = def;
                    }
                }
                None => {
                    definitions.push(def);
                    origins.push(vec![raw_name.to_string()]);
                }
            }
        }

        for (def, raw_names) in definitions.iter().zip(origins) {
            if raw_names.len() < 2 {
                continue;
            }
            let mut dropped = raw_names;
            let kept = match self.collapse {
                CollapsePolicy::Reject => {
                    return Err(SwagError::AmbiguousCollapse {
                        name: def.name.clone(),
                        raw_names: dropped,
                    });
                }
                CollapsePolicy::FirstWins => dropped.remove(0),
                CollapsePolicy::LastWins => dropped.pop().unwrap_or_default(),
            };
            warnings.push(BuildWarning::Collapsed { name: def.name.clone(), kept, dropped });
        }

        Ok(definitions)
    }
}

/// Parses every operation once, in source order.
fn collect_interfaces(source: &DataSource, warnings: &mut Vec<BuildWarning>) -> Vec<Interface> {
    let mut interfaces = Vec::new();
    for (path, method, op) in source.operations() {
        match op.and_then(|op| build_interface(path, method, op)) {
            Ok(interface) => interfaces.push(interface),
            Err(e) => warnings.push(BuildWarning::MalformedOperation {
                path: path.to_string(),
                method: method.to_string(),
                message: e.to_string(),
            }),
        }
    }
    interfaces
}

fn build_interface(
    path: &str,
    method: &str,
    op: RawOperation,
) -> std::result::Result<Interface, serde_json::Error> {
    let response = op.ok_schema()?;

    let mut parameters: Vec<Parameter> = Vec::with_capacity(op.parameters.len());
    for mut param in op.parameters {
        if parameters.iter().any(|p| p.name == param.name) {
            continue;
        }
        param.description = continue_doc_lines(&param.description);
        parameters.push(param);
    }

    Ok(Interface {
        name: String::new(),
        method: method.to_string(),
        path: path.to_string(),
        same_path: String::new(),
        summary: op.summary,
        description: op.description,
        tags: op.tags,
        consumes: op.consumes,
        operation_id: op.operation_id,
        parameters,
        response,
    })
}

/// Prefixes every line after the first with `* ` so it sits inside a doc comment.
fn continue_doc_lines(description: &str) -> String {
    description
        .split('\n')
        .enumerate()
        .map(|(idx, line)| if idx == 0 { line.to_string() } else { format!("* {line}") })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Module identifier from a tag description: first word, identifier
/// characters only, first letter lower-cased.
fn module_name(description: &str) -> String {
    let word = description.split(' ').next().unwrap_or_default();
    let mut chars = word.chars().filter(|c| c.is_alphanumeric() || *c == '_');
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
