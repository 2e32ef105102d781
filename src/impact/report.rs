//! Impact reports: which modules need regenerating after definitions change.

use super::graph::{DefinitionImpact, ImpactIndex};

/// Impact of a single changed definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpactEntry {
    /// The changed definition.
    pub definition: String,
    /// Definitions affected directly or transitively.
    pub dependents: Vec<String>,
    /// Modules affected directly or transitively.
    pub modules: Vec<String>,
}

/// Aggregated impact of a set of changed definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImpactReport {
    /// Per-definition entries, in the order the names were given.
    pub entries: Vec<ImpactEntry>,
    /// Names that are not in the index (typically removed definitions).
    pub unknown: Vec<String>,
}

impl ImpactReport {
    /// Returns `true` if no module is affected.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.entries.iter().all(|e| e.modules.is_empty())
    }

    /// Union of affected modules across all entries, first-seen order.
    #[must_use]
    pub fn affected_modules(&self) -> Vec<String> {
        let mut modules: Vec<String> = Vec::new();
        for name in self.entries.iter().flat_map(|e| &e.modules) {
            if !modules.contains(name) {
                modules.push(name.clone());
            }
        }
        modules
    }
}

impl ImpactIndex {
    /// Builds a report for the given changed definition names.
    #[must_use]
    pub fn report<S: AsRef<str>>(&self, changed: &[S]) -> ImpactReport {
        let mut report = ImpactReport::default();
        for name in changed {
            let name = name.as_ref();
            match self.get(name) {
                Some(entry) => report.entries.push(ImpactEntry {
                    definition: name.to_string(),
                    dependents: entry.all_dependents().to_vec(),
                    modules: entry.all_modules(),
                }),
                None => report.unknown.push(name.to_string()),
            }
        }
        report
    }
}

/// Formats the impact of one definition as a human-readable string.
#[must_use]
pub fn format_definition_impact(impact: &DefinitionImpact) -> String {
    let mut lines = vec![format!("Definition: {}", impact.name)];
    push_list(&mut lines, "Direct dependents", &impact.dependents);
    push_list(&mut lines, "Transitive dependents", &impact.indirect_dependents);
    push_list(&mut lines, "Direct modules", &impact.modules);
    push_list(&mut lines, "Transitive modules", &impact.indirect_modules);
    lines.join("\n")
}

/// Formats an impact report as a human-readable string.
#[must_use]
pub fn format_impact_report(report: &ImpactReport) -> String {
    if report.is_clean() && report.unknown.is_empty() {
        return "No modules affected.".to_string();
    }

    let mut lines = Vec::new();
    for entry in &report.entries {
        if entry.modules.is_empty() {
            continue;
        }
        lines.push(format!("  {}", entry.definition));
        for module in &entry.modules {
            lines.push(format!("    [REGENERATE] {module}"));
        }
    }
    for name in &report.unknown {
        lines.push(format!("  {name} (not in current description)"));
    }
    lines.push(String::new());

    let total = report.affected_modules().len();
    lines.push(format!("{total} module{} affected.", if total == 1 { "" } else { "s" }));

    lines.join("\n")
}

fn push_list(lines: &mut Vec<String>, label: &str, names: &[String]) {
    if names.is_empty() {
        lines.push(format!("  {label}: (none)"));
    } else {
        lines.push(format!("  {label}: {}", names.join(", ")));
    }
}
