//! Raw API description as published by the backend.
//!
//! Only the parts the snapshot builder reads are modelled; unknown keys are
//! ignored and every part defaults to empty when absent.

use serde::Deserialize;

use crate::model::{Parameter, Property, Schema};

/// `serde_json` is built with `preserve_order`, so its map keeps source order.
type OrderedMap<V> = serde_json::Map<String, V>;

/// Keys under a path entry that hold operations.
const HTTP_METHODS: &[&str] = &["get", "put", "post", "delete", "options", "head", "patch"];

/// Top-level raw description: `paths`, `tags` and `definitions`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataSource {
    /// Path template → method → operation.
    #[serde(default)]
    pub paths: OrderedMap<serde_json::Value>,
    /// Tags grouping operations into modules.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Definition name → definition body.
    #[serde(default)]
    pub definitions: OrderedMap<serde_json::Value>,
}

/// A tag entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tag {
    /// Tag name; may carry owner markers.
    #[serde(default)]
    pub name: String,
    /// Tag description; its first word names the module.
    #[serde(default)]
    pub description: String,
}

/// One operation under a path and method.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOperation {
    /// Tags the operation belongs to.
    #[serde(default)]
    pub tags: Vec<String>,
    /// One-line summary.
    #[serde(default)]
    pub summary: String,
    /// Longer description.
    #[serde(default)]
    pub description: String,
    /// Operation id.
    #[serde(default)]
    pub operation_id: Option<String>,
    /// Accepted content types.
    #[serde(default)]
    pub consumes: Vec<String>,
    /// Inputs.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Status code → response.
    #[serde(default)]
    pub responses: OrderedMap<serde_json::Value>,
}

/// A raw definition body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDefinition {
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Names of required properties.
    #[serde(default)]
    pub required: Vec<String>,
    /// Property name → property shape.
    #[serde(default)]
    pub properties: OrderedMap<serde_json::Value>,
}

impl DataSource {
    /// Parses a raw description from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if the top-level parts have the wrong JSON shape.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Operations in source order as `(path, method, operation)`.
    ///
    /// Each operation is parsed on its own so one malformed entry does not
    /// hide the rest. Keys that are not HTTP methods (such as path-level
    /// `parameters`) are skipped.
    pub fn operations(
        &self,
    ) -> impl Iterator<Item = (&str, &str, Result<RawOperation, serde_json::Error>)> {
        self.paths
            .iter()
            .filter_map(|(path, methods)| methods.as_object().map(|m| (path, m)))
            .flat_map(|(path, methods)| {
                methods
                    .iter()
                    .filter(|(method, _)| HTTP_METHODS.contains(&method.as_str()))
                    .map(move |(method, op)| {
                        (path.as_str(), method.as_str(), RawOperation::deserialize(op))
                    })
            })
    }

    /// Definitions in source order as `(raw name, definition)`, parsed one by one.
    pub fn definitions(
        &self,
    ) -> impl Iterator<Item = (&str, Result<RawDefinition, serde_json::Error>)> {
        self.definitions.iter().map(|(name, def)| (name.as_str(), RawDefinition::deserialize(def)))
    }
}

impl RawOperation {
    /// Schema of the `200` response, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema has the wrong shape.
    pub fn ok_schema(&self) -> Result<Schema, serde_json::Error> {
        match self.responses.get("200").and_then(|r| r.get("schema")) {
            Some(schema) => Schema::deserialize(schema),
            None => Ok(Schema::default()),
        }
    }
}

impl RawDefinition {
    /// Properties in source order, with names and required flags filled in.
    ///
    /// # Errors
    ///
    /// Returns an error if a property has the wrong shape.
    pub fn properties(&self) -> Result<Vec<Property>, serde_json::Error> {
        self.properties
            .iter()
            .map(|(name, raw)| {
                let mut prop = Property::deserialize(raw)?;
                prop.name.clone_from(name);
                prop.required = self.required.contains(name);
                Ok(prop)
            })
            .collect()
    }
}
