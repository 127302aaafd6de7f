use std::collections::BTreeSet;

use crate::generator::{
  ast::{NamedType, Primitive, TypeRef},
  errors::GenerateError,
  naming::identifiers::{sanitize_identifier, split_qualified_name},
  resolver::SELF_ID,
  schema::{SchemaNode, SchemaType},
  schema_graph::{SchemaDocument, SchemaGraph},
  schema_id::SchemaId,
};

const INT64_FORMAT: &str = "int64";
const FLOAT_FORMAT: &str = "float";

/// Maps property schemas of one document onto target type references.
pub(crate) struct TypeMapper<'a> {
  graph: &'a SchemaGraph,
  document: &'a SchemaDocument,
}

/// Where in the property's schema the mapper currently is.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Position {
  /// The property's own shape, or its array items.
  Shape,
  /// A sub-schema reached through a local id.
  LocalTarget,
}

impl<'a> TypeMapper<'a> {
  pub(crate) fn new(graph: &'a SchemaGraph, document: &'a SchemaDocument) -> Self {
    Self { graph, document }
  }

  /// Maps the schema declared for `property`.
  ///
  /// Precedence: enum, array, reference, output-type override, nested object
  /// shape, primitive table.
  pub(crate) fn map_property(&self, property: &str, node: &SchemaNode) -> Result<TypeRef, GenerateError> {
    self.map_node(property, node, Position::Shape, &mut BTreeSet::new())
  }

  /// Maps a reference value that the edit pass already rewrote.
  pub(crate) fn map_reference(&self, property: &str, reference: &str) -> Result<TypeRef, GenerateError> {
    self.map_reference_guarded(property, reference, &mut BTreeSet::new())
  }

  /// The node carrying the enum list for a property, looking through array
  /// items and local references.
  pub(crate) fn find_enum<'n>(&'n self, node: &'n SchemaNode) -> Option<&'n SchemaNode> {
    let mut visited = BTreeSet::new();
    let mut current = node;
    loop {
      if current.enum_values.is_some() {
        return Some(current);
      }
      if let Some(items) = current.items.as_deref()
        && current.is_array()
      {
        current = items;
        continue;
      }
      let reference = current.reference.as_deref()?;
      if !visited.insert(reference) {
        return None;
      }
      current = self.document.local_ids.get(reference)?;
    }
  }

  /// The referenced document when a property points at a document that is
  /// itself an enum.
  pub(crate) fn enum_document(&self, node: &SchemaNode) -> Option<&'a SchemaDocument> {
    let reference = node.reference.as_deref()?;
    let document = self.graph.get(&SchemaId::from_reference(reference))?;
    document.is_enum().then_some(document.as_ref())
  }

  fn map_node<'n>(
    &self,
    property: &str,
    node: &'n SchemaNode,
    position: Position,
    visited: &mut BTreeSet<&'n str>,
  ) -> Result<TypeRef, GenerateError>
  where
    'a: 'n,
  {
    if node.enum_values.is_some() {
      return Ok(TypeRef::named(&self.document.namespace, sanitize_identifier(property)));
    }

    if node.is_array() {
      let item = match node.items.as_deref() {
        Some(items) => self.map_node(property, items, position, visited)?,
        None => Primitive::Object.into(),
      };
      return Ok(TypeRef::list_of(item));
    }

    if let Some(reference) = node.reference.as_deref() {
      return self.map_reference_guarded(property, reference, visited);
    }

    if let Some(name) = node.type_override.as_deref().filter(|name| !name.is_empty()) {
      let (qualifier, type_name) = split_qualified_name(name)
        .ok_or_else(|| GenerateError::custom_type(&self.document.id, name, "not a dotted identifier"))?;
      return Ok(TypeRef::Named(NamedType::new(
        qualifier.unwrap_or(&self.document.namespace),
        type_name,
      )));
    }

    if node.declares_properties() && position == Position::Shape {
      let nested_id = self.document.id.nested(property);
      return match self.graph.get(&nested_id) {
        Some(nested) => Ok(TypeRef::Named(nested.nominal_type())),
        None => Err(GenerateError::unmappable(
          &self.document.id,
          property,
          format!("nested object '{nested_id}' was not resolved"),
        )),
      };
    }

    Ok(primitive_for(node).into())
  }

  fn map_reference_guarded<'n>(
    &self,
    property: &str,
    reference: &'n str,
    visited: &mut BTreeSet<&'n str>,
  ) -> Result<TypeRef, GenerateError>
  where
    'a: 'n,
  {
    if reference == SELF_ID || self.document.schema.id.as_deref() == Some(reference) {
      return Ok(TypeRef::Named(self.document.nominal_type()));
    }

    if let Some(target) = self.document.local_ids.get(reference) {
      if !visited.insert(reference) {
        return Err(GenerateError::unmappable(
          &self.document.id,
          property,
          format!("local reference '{reference}' refers back to itself"),
        ));
      }
      return self.map_node(property, target, Position::LocalTarget, visited);
    }

    match self.graph.get(&SchemaId::from_reference(reference)) {
      Some(target) => Ok(TypeRef::Named(target.nominal_type())),
      None => Err(GenerateError::unmappable(
        &self.document.id,
        property,
        format!("reference '{reference}' is not part of the resolved graph"),
      )),
    }
  }
}

fn primitive_for(node: &SchemaNode) -> Primitive {
  let format = node.format.as_deref();
  match node.primary_type() {
    Some(SchemaType::Boolean) => Primitive::Boolean,
    Some(SchemaType::Integer) if format == Some(INT64_FORMAT) => Primitive::Int64,
    Some(SchemaType::Integer) => Primitive::Int32,
    Some(SchemaType::Number) if format == Some(FLOAT_FORMAT) => Primitive::Float,
    Some(SchemaType::Number) => Primitive::Double,
    Some(SchemaType::String) => Primitive::String,
    _ => Primitive::Object,
  }
}
