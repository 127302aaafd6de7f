use itertools::Itertools;
use thiserror::Error;

use super::schema_id::SchemaId;

/// Fatal failures of the resolve → build → emit pipeline.
///
/// Any of these aborts the enclosing call chain; documents that finished
/// resolving before the failure stay valid in the session graph.
#[derive(Debug, Error)]
pub enum GenerateError {
  #[error("could not load schema '{id}': {source}")]
  Load {
    id: SchemaId,
    #[source]
    source: anyhow::Error,
  },

  #[error("could not parse schema '{id}' at '{path}': {message}")]
  SchemaParse { id: SchemaId, path: String, message: String },

  #[error(
    "'{pointer}' in '{id}' is a JSON pointer; its last segment '{segment}' is not an id declared in this document"
  )]
  UnresolvedReference {
    id: SchemaId,
    pointer: String,
    segment: String,
  },

  #[error("reference cycle detected: {}", .chain.iter().join(" -> "))]
  Cycle { chain: Vec<SchemaId> },

  #[error("custom type '{name}' in '{id}' cannot be resolved: {reason}")]
  CustomTypeResolution { id: SchemaId, name: String, reason: String },

  #[error("property '{property}' in '{id}' cannot be mapped to a type: {reason}")]
  UnmappableType {
    id: SchemaId,
    property: String,
    reason: String,
  },

  #[error("could not create the directory for namespace '{namespace}': {source}")]
  DirectoryCreation {
    namespace: String,
    #[source]
    source: anyhow::Error,
  },

  #[error("'{path}' cannot be used as a schema root: {reason}")]
  InvalidRoot { path: String, reason: String },

  #[error("could not render '{type_name}': {message}")]
  Render { type_name: String, message: String },
}

impl GenerateError {
  pub(crate) fn schema_parse(id: &SchemaId, path: impl ToString, message: impl ToString) -> Self {
    Self::SchemaParse {
      id: id.clone(),
      path: path.to_string(),
      message: message.to_string(),
    }
  }

  pub(crate) fn unmappable(id: &SchemaId, property: &str, reason: impl Into<String>) -> Self {
    Self::UnmappableType {
      id: id.clone(),
      property: property.to_string(),
      reason: reason.into(),
    }
  }

  pub(crate) fn custom_type(id: &SchemaId, name: &str, reason: impl Into<String>) -> Self {
    Self::CustomTypeResolution {
      id: id.clone(),
      name: name.to_string(),
      reason: reason.into(),
    }
  }
}
