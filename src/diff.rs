//! Diffing logic for snapshots.
//!
//! Entities are matched by name only: a renamed definition shows up as one
//! removal plus one addition, never as a change.

use crate::impact::ImpactIndex;
use crate::model::{Definition, EntityKind, Interface, Module, Named, Property};
use crate::snapshot::Snapshot;

/// How an entity changed between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffKind {
    /// Present only in the new snapshot.
    Added,
    /// Present only in the old snapshot.
    Removed,
    /// Present in both with different content.
    Changed,
}

/// Member-level detail of a changed entity (endpoints of a module, properties of a definition).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberChanges {
    /// Members present only in the new entity.
    pub added: Vec<String>,
    /// Members present only in the old entity.
    pub removed: Vec<String>,
    /// Members present in both with different content.
    pub changed: Vec<String>,
}

impl MemberChanges {
    /// Returns `true` if no member changed (only entity-level fields differ).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// One classified entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRecord {
    /// Whether this is a module or a definition.
    pub entity: EntityKind,
    /// Entity name.
    pub name: String,
    /// Classification.
    pub kind: DiffKind,
    /// Member detail; empty unless `kind` is [`DiffKind::Changed`].
    pub members: MemberChanges,
}

/// Entities that can be diffed member by member.
pub trait Diffable: Named + PartialEq {
    /// Member type compared for [`MemberChanges`].
    type Member: PartialEq;

    /// Members keyed by name, in order.
    fn members(&self) -> Vec<(&str, &Self::Member)>;
}

impl Diffable for Module {
    type Member = Interface;

    fn members(&self) -> Vec<(&str, &Interface)> {
        self.interfaces.iter().map(|i| (i.name.as_str(), i)).collect()
    }
}

impl Diffable for Definition {
    type Member = Property;

    fn members(&self) -> Vec<(&str, &Property)> {
        self.properties.iter().map(|p| (p.name.as_str(), p)).collect()
    }
}

/// Classifies every entity of `old` and `new` by name.
///
/// Records follow `new` order; entities only in `old` come last, in `old`
/// order. Identical entities produce no record.
#[must_use]
pub fn diff<T: Diffable>(old: &[T], new: &[T]) -> Vec<DiffRecord> {
    let mut records = Vec::new();

    for new_item in new {
        match old.iter().find(|o| o.name() == new_item.name()) {
            None => {
                records.push(record::<T>(new_item.name(), DiffKind::Added, MemberChanges::default()));
            }
            Some(old_item) if old_item != new_item => records.push(record::<T>(
                new_item.name(),
                DiffKind::Changed,
                diff_members(old_item, new_item),
            )),
            Some(_) => {}
        }
    }

    for old_item in old {
        if !new.iter().any(|n| n.name() == old_item.name()) {
            records.push(record::<T>(old_item.name(), DiffKind::Removed, MemberChanges::default()));
        }
    }

    records
}

fn record<T: Named>(name: &str, kind: DiffKind, members: MemberChanges) -> DiffRecord {
    DiffRecord { entity: T::KIND, name: name.to_string(), kind, members }
}

fn diff_members<T: Diffable>(old: &T, new: &T) -> MemberChanges {
    let old_members = old.members();
    let new_members = new.members();

    let mut changes = MemberChanges::default();
    for (name, member) in &new_members {
        match find_member(&old_members, name) {
            None => changes.added.push((*name).to_string()),
            Some(old_member) if old_member != *member => changes.changed.push((*name).to_string()),
            Some(_) => {}
        }
    }
    for (name, _) in &old_members {
        if find_member(&new_members, name).is_none() {
            changes.removed.push((*name).to_string());
        }
    }
    changes
}

fn find_member<'a, M>(members: &[(&str, &'a M)], name: &str) -> Option<&'a M> {
    members.iter().find(|(n, _)| *n == name).map(|(_, m)| *m)
}

/// Module and definition differences between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotDiff {
    /// Module records.
    pub mod_diffs: Vec<DiffRecord>,
    /// Definition records.
    pub def_diffs: Vec<DiffRecord>,
}

impl SnapshotDiff {
    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mod_diffs.is_empty() && self.def_diffs.is_empty()
    }

    /// Names of added or changed definitions, in record order.
    #[must_use]
    pub fn touched_definitions(&self) -> Vec<&str> {
        self.def_diffs
            .iter()
            .filter(|r| r.kind != DiffKind::Removed)
            .map(|r| r.name.as_str())
            .collect()
    }
}

/// Diffs both the modules and the definitions of two snapshots.
#[must_use]
pub fn diff_snapshots(old: &Snapshot, new: &Snapshot) -> SnapshotDiff {
    SnapshotDiff {
        mod_diffs: diff(&old.mods, &new.mods),
        def_diffs: diff(&old.definitions, &new.definitions),
    }
}

/// Format a `SnapshotDiff` for human-readable display.
///
/// When `impact` is given, every added or changed definition also lists the
/// definitions and modules it affects.
#[must_use]
pub fn format_diff(diff: &SnapshotDiff, impact: Option<&ImpactIndex>) -> String {
    if diff.is_empty() {
        return "No changes since last sync.".to_string();
    }

    let mut lines = Vec::new();

    if !diff.mod_diffs.is_empty() {
        lines.push("Modules:".to_string());
        for rec in &diff.mod_diffs {
            push_record(&mut lines, rec);
        }
    }
    if !diff.def_diffs.is_empty() {
        lines.push("Definitions:".to_string());
        for rec in &diff.def_diffs {
            push_record(&mut lines, rec);
            if rec.kind == DiffKind::Removed {
                continue;
            }
            let Some(entry) = impact.and_then(|index| index.get(&rec.name)) else {
                continue;
            };
            let definitions = entry.all_dependents();
            if !definitions.is_empty() {
                lines.push(format!("      affects definitions: {}", definitions.join(", ")));
            }
            let modules = entry.all_modules();
            if !modules.is_empty() {
                lines.push(format!("      affects modules: {}", modules.join(", ")));
            }
        }
    }

    lines.join("\n")
}

fn push_record(lines: &mut Vec<String>, rec: &DiffRecord) {
    let marker = match rec.kind {
        DiffKind::Added => '+',
        DiffKind::Removed => '-',
        DiffKind::Changed => '~',
    };
    lines.push(format!("  {marker} {}", rec.name));
    for name in &rec.members.added {
        lines.push(format!("      + {name}"));
    }
    for name in &rec.members.removed {
        lines.push(format!("      - {name}"));
    }
    for name in &rec.members.changed {
        lines.push(format!("      ~ {name}"));
    }
}
