//! Normalized API model: modules of endpoints plus reusable type definitions.
//!
//! These are the durable shapes persisted in the lock file. Anything derived
//! from a whole snapshot (impact sets, owners) is computed on demand and never
//! stored on the records themselves.

pub mod identifier;
pub mod owners;
pub mod resolve;

use serde::{Deserialize, Deserializer, Serialize};

pub use owners::Owners;

/// Primitive type kinds used by the API description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    /// Whole numbers.
    Integer,
    /// Text.
    String,
    /// Floating point numbers.
    Number,
    /// `true` / `false`.
    Boolean,
    /// A list; element shape is given by `items`.
    Array,
    /// A free-form object.
    Object,
    /// A file upload.
    File,
}

impl PrimitiveType {
    /// The keyword as written in the description.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::File => "file",
        }
    }
}

/// Element shape of an array field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemShape {
    /// Primitive element type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PrimitiveType>,
    /// Reference to a definition, e.g. `#/definitions/User`.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// A property of a type definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Property name (the key in the raw `properties` map).
    #[serde(default)]
    pub name: String,
    /// Primitive kind, absent for pure references.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PrimitiveType>,
    /// Allowed values, normalized to strings.
    #[serde(
        rename = "enum",
        default,
        deserialize_with = "enum_values",
        skip_serializing_if = "Option::is_none"
    )]
    pub enum_values: Option<Vec<String>>,
    /// Array element shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<ItemShape>,
    /// Reference to another definition.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Whether the owning definition lists this property as required.
    #[serde(default)]
    pub required: bool,
}

/// Where an endpoint parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamLocation {
    /// Query string.
    Query,
    /// Request body.
    Body,
    /// Path template segment.
    Path,
    /// HTTP header.
    Header,
    /// Form field.
    FormData,
}

/// Schema attached to a body parameter or a response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Primitive kind.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PrimitiveType>,
    /// Element shape for arrays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<ItemShape>,
    /// Reference to a definition.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// An endpoint input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Location of the parameter.
    #[serde(rename = "in")]
    pub location: ParamLocation,
    /// Free-text description; continuation lines are prefixed with `* `.
    #[serde(default)]
    pub description: String,
    /// Whether the parameter must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Primitive kind for non-body parameters.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PrimitiveType>,
    /// Element shape for array parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<ItemShape>,
    /// Schema for body parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// A single HTTP endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interface {
    /// Derived identifier, unique inside its module.
    pub name: String,
    /// Lower-case HTTP method.
    pub method: String,
    /// Path template, e.g. `/user/{id}`.
    pub path: String,
    /// Path prefix shared by every endpoint of the module.
    #[serde(default)]
    pub same_path: String,
    /// One-line summary.
    #[serde(default)]
    pub summary: String,
    /// Longer description.
    #[serde(default)]
    pub description: String,
    /// Tags the endpoint was published under.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Accepted request content types.
    #[serde(default)]
    pub consumes: Vec<String>,
    /// Operation id from the description, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Inputs, deduplicated by name.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Shape of the `200` response.
    #[serde(default)]
    pub response: Schema,
}

/// A named group of endpoints, built from one tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Identifier derived from the tag description.
    pub name: String,
    /// The tag name; also carries owner markers.
    #[serde(default)]
    pub description: String,
    /// Endpoints, deduplicated by derived name.
    #[serde(default)]
    pub interfaces: Vec<Interface>,
}

impl Module {
    /// Front-end and back-end owners parsed from the description.
    #[must_use]
    pub fn owners(&self) -> Owners {
        owners::parse_owners(&self.description)
    }
}

/// A reusable data shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    /// Canonical name (generic suffix stripped).
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Properties in source order.
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl Definition {
    /// Names of the definitions this one depends on, deduplicated, in property order.
    #[must_use]
    pub fn deps(&self) -> Vec<String> {
        let mut deps: Vec<String> = Vec::new();
        for dep in self.properties.iter().filter_map(|p| p.dep(&self.name)) {
            if !deps.contains(&dep) {
                deps.push(dep);
            }
        }
        deps
    }
}

/// Which kind of snapshot entity a record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// An API module.
    Module,
    /// A type definition.
    Definition,
}

impl EntityKind {
    /// Lower-case label used in messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Definition => "definition",
        }
    }
}

/// Entities identified by name within a snapshot.
pub trait Named {
    /// Kind reported in diff records and log lines.
    const KIND: EntityKind;

    /// The identifying name.
    fn name(&self) -> &str;
}

impl Named for Module {
    const KIND: EntityKind = EntityKind::Module;

    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Definition {
    const KIND: EntityKind = EntityKind::Definition;

    fn name(&self) -> &str {
        &self.name
    }
}

/// Accepts enum members written as strings, numbers or booleans.
fn enum_values<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|values| {
        values
            .into_iter()
            .map(|value| match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect()
    }))
}
