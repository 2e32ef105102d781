//! Impact analysis: which definitions and modules a definition change reaches.

pub mod graph;
pub mod report;

pub use graph::{compute_impact, DefinitionImpact, ImpactIndex};
pub use report::{format_definition_impact, format_impact_report, ImpactEntry, ImpactReport};
