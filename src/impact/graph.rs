//! Dependency graph between definitions, and from definitions to modules.

use std::collections::{HashMap, VecDeque};

use crate::error::ImpactError;
use crate::model::{Definition, Module};

/// Everything a single definition affects, by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinitionImpact {
    /// The definition these sets belong to.
    pub name: String,
    /// Definitions with a property referencing this one.
    pub dependents: Vec<String>,
    /// Definitions reaching this one through any chain of references.
    /// Includes `dependents`; never includes `name` itself.
    pub indirect_dependents: Vec<String>,
    /// Modules with an endpoint whose response references this definition.
    pub modules: Vec<String>,
    /// Modules referencing any of `indirect_dependents`.
    pub indirect_modules: Vec<String>,
}

impl DefinitionImpact {
    /// Every definition that must be reviewed when this one changes.
    #[must_use]
    pub fn all_dependents(&self) -> &[String] {
        &self.indirect_dependents
    }

    /// Every module that must be regenerated when this one changes.
    #[must_use]
    pub fn all_modules(&self) -> Vec<String> {
        let mut modules = self.modules.clone();
        push_unique(&mut modules, &self.indirect_modules);
        modules
    }
}

/// Impact sets for every definition of one snapshot, keyed by name.
///
/// Only meaningful for the snapshot it was computed from; rebuild it after
/// any module or definition changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImpactIndex {
    entries: Vec<DefinitionImpact>,
    by_name: HashMap<String, usize>,
}

impl ImpactIndex {
    /// Impact sets of the named definition.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DefinitionImpact> {
        self.by_name.get(name).map(|&idx| &self.entries[idx])
    }

    /// All entries in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &DefinitionImpact> {
        self.entries.iter()
    }

    /// Number of indexed definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no definition is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Modules affected, directly or not, by a change to `name`.
    #[must_use]
    pub fn impacted_modules(&self, name: &str) -> Vec<String> {
        self.get(name).map(DefinitionImpact::all_modules).unwrap_or_default()
    }
}

/// Builds the impact index for `definitions` and `modules`.
///
/// Edges run from a dependency to its dependents: changing the dependency
/// impacts every definition that references it. Transitive sets come from a
/// breadth-first walk with a visited set, so reference cycles terminate and
/// a definition never lists itself.
///
/// # Errors
///
/// Returns [`ImpactError::UnknownDefinition`] if any property or response
/// references a definition that is not in `definitions`. No partial index is
/// returned.
pub fn compute_impact(
    definitions: &[Definition],
    modules: &[Module],
) -> Result<ImpactIndex, ImpactError> {
    let mut by_name: HashMap<String, usize> = HashMap::with_capacity(definitions.len());
    for (idx, def) in definitions.iter().enumerate() {
        by_name.entry(def.name.clone()).or_insert(idx);
    }
    let lookup = |name: &str, referenced_by: &str| {
        by_name.get(name).copied().ok_or_else(|| ImpactError::UnknownDefinition {
            name: name.to_string(),
            referenced_by: referenced_by.to_string(),
        })
    };

    // Direct dependents, as indices into `definitions`.
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); definitions.len()];
    for (idx, def) in definitions.iter().enumerate() {
        for dep in def.deps() {
            let target = lookup(&dep, &def.name)?;
            if !dependents[target].contains(&idx) {
                dependents[target].push(idx);
            }
        }
    }

    // Direct modules, as indices into `modules`.
    let mut direct_modules: Vec<Vec<usize>> = vec![Vec::new(); definitions.len()];
    for (mod_idx, module) in modules.iter().enumerate() {
        for interface in &module.interfaces {
            let Some(dep) = interface.response.dep() else {
                continue;
            };
            let target = lookup(&dep, &format!("{}.{}", module.name, interface.name))?;
            if !direct_modules[target].contains(&mod_idx) {
                direct_modules[target].push(mod_idx);
            }
        }
    }

    let def_names = |indices: &[usize]| -> Vec<String> {
        indices.iter().map(|&i| definitions[i].name.clone()).collect()
    };

    let entries = definitions
        .iter()
        .enumerate()
        .map(|(idx, def)| {
            let reachable = reachable_from(idx, &dependents);
            let mut indirect_modules: Vec<String> = Vec::new();
            for &dependent in &reachable {
                let names: Vec<String> =
                    direct_modules[dependent].iter().map(|&m| modules[m].name.clone()).collect();
                push_unique(&mut indirect_modules, &names);
            }
            DefinitionImpact {
                name: def.name.clone(),
                dependents: def_names(&dependents[idx]),
                indirect_dependents: def_names(&reachable),
                modules: direct_modules[idx].iter().map(|&m| modules[m].name.clone()).collect(),
                indirect_modules,
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!(definitions = entries.len(), modules = modules.len(), "impact index built");

    Ok(ImpactIndex { entries, by_name })
}

/// Breadth-first walk over `edges` from `start`, excluding `start` itself.
fn reachable_from(start: usize, edges: &[Vec<usize>]) -> Vec<usize> {
    let mut visited = vec![false; edges.len()];
    visited[start] = true;
    let mut order = Vec::new();
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        for &next in &edges[current] {
            if !visited[next] {
                visited[next] = true;
                order.push(next);
                queue.push_back(next);
            }
        }
    }
    order
}

fn push_unique(target: &mut Vec<String>, names: &[String]) {
    for name in names {
        if !target.contains(name) {
            target.push(name.clone());
        }
    }
}
