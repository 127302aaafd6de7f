//! Structured form of a schema document after references have been rewritten.
//!
//! Deserialization doubles as the structural check: a keyword with the wrong
//! shape (for example `properties` that is not an object) fails with the JSON
//! path of the offending value. Keywords the generator does not use are ignored.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON schema primitive type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
  String,
  Integer,
  Number,
  Boolean,
  Object,
  Array,
  Null,
  Any,
}

/// `type` may be a single name or a list of names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaTypeSet {
  Single(SchemaType),
  Multiple(Vec<SchemaType>),
}

impl SchemaTypeSet {
  /// The first non-null type, which is what the generated declaration uses.
  #[must_use]
  pub fn primary(&self) -> Option<SchemaType> {
    match self {
      Self::Single(SchemaType::Null) => None,
      Self::Single(single) => Some(*single),
      Self::Multiple(types) => types.iter().copied().find(|t| *t != SchemaType::Null),
    }
  }
}

/// Base schema named by the `extends` keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Extends {
  Reference(String),
  Schema(Box<SchemaNode>),
}

impl Extends {
  #[must_use]
  pub fn reference(&self) -> Option<&str> {
    match self {
      Self::Reference(reference) => Some(reference),
      Self::Schema(schema) => schema.reference.as_deref(),
    }
  }
}

/// `required` is a flag on the property itself, or a list of property names
/// on the enclosing object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Required {
  Flag(bool),
  Properties(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaNode {
  pub id: Option<String>,
  #[serde(rename = "$ref")]
  pub reference: Option<String>,
  #[serde(rename = "type")]
  pub schema_type: Option<SchemaTypeSet>,
  pub title: Option<String>,
  pub description: Option<String>,
  pub format: Option<String>,
  pub properties: IndexMap<String, SchemaNode>,
  pub items: Option<Box<SchemaNode>>,
  #[serde(rename = "enum")]
  pub enum_values: Option<Vec<Value>>,
  pub default: Option<Value>,
  pub extends: Option<Extends>,
  pub definitions: IndexMap<String, SchemaNode>,
  /// Output-type override: `Namespace.Path.TypeName`.
  #[serde(rename = "csharpType")]
  pub type_override: Option<String>,
  /// Marker interfaces the generated class declares.
  #[serde(rename = "csharpInterfaces")]
  pub interfaces: Vec<String>,
  pub required: Option<Required>,
  #[serde(rename = "minLength")]
  pub min_length: Option<u64>,
  #[serde(rename = "maxLength")]
  pub max_length: Option<u64>,
  #[serde(rename = "minItems")]
  pub min_items: Option<u64>,
  #[serde(rename = "maxItems")]
  pub max_items: Option<u64>,
  pub minimum: Option<f64>,
  pub maximum: Option<f64>,
  pub pattern: Option<String>,
}

impl SchemaNode {
  #[must_use]
  pub fn primary_type(&self) -> Option<SchemaType> {
    self.schema_type.as_ref().and_then(SchemaTypeSet::primary)
  }

  #[must_use]
  pub fn is_array(&self) -> bool {
    self.primary_type() == Some(SchemaType::Array)
  }

  /// Whether the object lists `property` as required, or the property flags itself.
  #[must_use]
  pub fn requires(&self, property: &str, node: &SchemaNode) -> bool {
    let listed = matches!(&self.required, Some(Required::Properties(names)) if names.iter().any(|name| name == property));
    listed || node.required == Some(Required::Flag(true))
  }

  #[must_use]
  pub fn declares_properties(&self) -> bool {
    !self.properties.is_empty()
  }

  /// Walks the node and every sub-schema, depth first, in declaration order.
  pub fn visit<'a>(&'a self, visitor: &mut impl FnMut(&'a SchemaNode)) {
    visitor(self);
    for child in self.properties.values().chain(self.definitions.values()) {
      child.visit(visitor);
    }
    if let Some(items) = &self.items {
      items.visit(visitor);
    }
    if let Some(Extends::Schema(base)) = &self.extends {
      base.visit(visitor);
    }
  }
}

/// Text form of a literal used for enum members and defaults.
///
/// Strings are used verbatim; every other JSON value uses its compact JSON text.
#[must_use]
pub fn literal_text(value: &Value) -> String {
  match value {
    Value::String(text) => text.clone(),
    other => other.to_string(),
  }
}
