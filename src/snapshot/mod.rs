//! Snapshot of a whole API description: modules plus type definitions.
//!
//! This is the unit of diffing and the unit persisted to the lock file.
//! Impact data is never part of it; see [`crate::impact`].

pub mod builder;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Definition, Module, Named};

pub use builder::{BuildOutput, BuildWarning, SnapshotBuilder};

/// Normalized model of one API description at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Modules in tag order, unique by name.
    #[serde(default)]
    pub mods: Vec<Module>,
    /// Type definitions in source order, unique by name.
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

/// Outcome of an upsert by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// No entity had that name; it was appended.
    Created,
    /// An entity with that name was replaced in place.
    Updated,
}

impl Snapshot {
    /// Serializes to the lock file format: pretty JSON `{ mods, definitions }`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_lock(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rebuilds a snapshot from lock file contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the contents are not a valid lock document.
    pub fn from_lock(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Looks up a module by name.
    #[must_use]
    pub fn find_mod(&self, name: &str) -> Option<&Module> {
        self.mods.iter().find(|m| m.name == name)
    }

    /// Looks up a definition by name.
    #[must_use]
    pub fn find_definition(&self, name: &str) -> Option<&Definition> {
        self.definitions.iter().find(|d| d.name == name)
    }

    /// Replaces the module with the same name, or appends it.
    pub fn update_mod(&mut self, module: Module) -> Upsert {
        tracing::info!(module = %module.name, description = %module.description, "upserting module");
        upsert(&mut self.mods, module)
    }

    /// Replaces the definition with the same name, or appends it.
    pub fn update_definition(&mut self, def: Definition) -> Upsert {
        tracing::info!(definition = %def.name, "upserting definition");
        upsert(&mut self.definitions, def)
    }
}

fn upsert<T: Named>(items: &mut Vec<T>, item: T) -> Upsert {
    if let Some(existing) = items.iter_mut().find(|i| i.name() == item.name()) {
        tracing::debug!(kind = T::KIND.label(), name = item.name(), "exists, updating in place");
        *existing = item;
        Upsert::Updated
    } else {
        tracing::debug!(kind = T::KIND.label(), name = item.name(), "not found, creating");
        items.push(item);
        Upsert::Created
    }
}
