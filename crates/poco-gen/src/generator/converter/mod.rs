//! Builds the dialect-agnostic [`CodeModel`] for one resolved document.

mod type_mapper;


use std::collections::BTreeSet;

use itertools::Itertools;

use self::type_mapper::TypeMapper;
use crate::{
  generator::{
    ast::{
      ClassDef, CodeModel, Constraint, DefaultValue, EnumDef, Initializer, NamedType, Primitive, PropertyDef, TypeDef,
      TypeRef,
    },
    errors::GenerateError,
    naming::identifiers::sanitize_identifier,
    schema::literal_text,
    schema_graph::{SchemaDocument, SchemaGraph},
  },
  utils::unescape,
};

const EXTENDS_PROPERTY: &str = "extends";

pub struct CodeModelBuilder<'a> {
  graph: &'a SchemaGraph,
}

impl<'a> CodeModelBuilder<'a> {
  #[must_use]
  pub fn new(graph: &'a SchemaGraph) -> Self {
    Self { graph }
  }

  /// Converts a document into its enums followed by its class.
  ///
  /// A document whose whole schema is an enum list yields a single enum.
  pub fn build(&self, document: &SchemaDocument) -> Result<CodeModel, GenerateError> {
    let mapper = TypeMapper::new(self.graph, document);

    if document.is_enum() {
      let members = enum_members(document.schema.enum_values.as_deref().unwrap_or_default());
      return Ok(CodeModel {
        namespace: document.namespace.clone(),
        imports: BTreeSet::new(),
        types: vec![TypeDef::Enum(EnumDef {
          name: document.title.clone(),
          docs: document.description().map(unescape),
          members,
        })],
      });
    }

    let mut types = Vec::new();
    let mut properties = Vec::with_capacity(document.properties().len());

    for (raw_name, node) in document.properties() {
      let name = sanitize_identifier(raw_name);
      let enum_source = mapper.find_enum(node);

      if let Some(source) = enum_source {
        types.push(TypeDef::Enum(EnumDef {
          name: name.clone(),
          docs: source.description.as_deref().filter(|_| !std::ptr::eq(source, node)).map(unescape),
          members: enum_members(source.enum_values.as_deref().unwrap_or_default()),
        }));
      }

      let is_enum = enum_source.is_some() || mapper.enum_document(node).is_some();
      let default = node.default.as_ref().map(|value| DefaultValue::resolve(value, is_enum));
      let type_ref = widen_for_default(mapper.map_property(raw_name, node)?, default.as_ref());
      let required = document.schema.requires(raw_name, node);

      properties.push(
        PropertyDef::builder()
          .name(name)
          .type_ref(type_ref)
          .maybe_docs(node.description.as_deref().map(unescape))
          .maybe_default(default)
          .constraints(Constraint::collect(node, required))
          .build(),
      );
    }

    let base = self.base_type(&mapper, document)?;
    let initializers = collect_initializers(&properties);
    let class = ClassDef::builder()
      .name(document.title.clone())
      .namespace(document.namespace.clone())
      .maybe_docs(document.description().map(unescape))
      .maybe_base(base)
      .interfaces(document.interfaces.clone())
      .properties(properties)
      .maybe_initializers(initializers)
      .build();

    let imports = self.collect_imports(document, &class);
    types.push(TypeDef::Class(class));

    Ok(CodeModel {
      namespace: document.namespace.clone(),
      imports,
      types,
    })
  }

  fn base_type(&self, mapper: &TypeMapper<'_>, document: &SchemaDocument) -> Result<Option<NamedType>, GenerateError> {
    let Some(reference) = document.extends() else {
      return Ok(None);
    };

    match mapper.map_reference(EXTENDS_PROPERTY, reference)? {
      TypeRef::Named(named) if named == document.nominal_type() => Err(GenerateError::unmappable(
        &document.id,
        EXTENDS_PROPERTY,
        "a class cannot extend itself",
      )),
      TypeRef::Named(named) => Ok(Some(named)),
      other => Err(GenerateError::unmappable(
        &document.id,
        EXTENDS_PROPERTY,
        format!("base type must be a generated class, found {other:?}"),
      )),
    }
  }

  /// Namespaces of every referenced custom type and dependency, minus the document's own.
  fn collect_imports(&self, document: &SchemaDocument, class: &ClassDef) -> BTreeSet<String> {
    let referenced = class
      .properties
      .iter()
      .filter_map(|property| property.type_ref.named_type())
      .chain(class.bases())
      .map(|named| named.namespace.clone());

    let dependencies = self
      .graph
      .dependencies(&document.id)
      .filter_map(|id| self.graph.get(id))
      .map(|dependency| dependency.namespace.clone());

    referenced
      .chain(dependencies)
      .filter(|namespace| !namespace.is_empty() && *namespace != document.namespace)
      .collect()
  }
}

fn enum_members(values: &[serde_json::Value]) -> Vec<String> {
  values
    .iter()
    .map(|value| sanitize_identifier(&literal_text(value)))
    .unique()
    .collect()
}

/// An integer default outside the `Int32` range widens the property to `Int64`.
fn widen_for_default(type_ref: TypeRef, default: Option<&DefaultValue>) -> TypeRef {
  match (type_ref, default) {
    (TypeRef::Primitive(Primitive::Int32), Some(DefaultValue::Integer(value))) if i32::try_from(*value).is_err() => {
      Primitive::Int64.into()
    }
    (type_ref, _) => type_ref,
  }
}

fn collect_initializers(properties: &[PropertyDef]) -> Option<Vec<Initializer>> {
  let initializers: Vec<Initializer> = properties
    .iter()
    .filter_map(|property| {
      property.default.clone().map(|value| Initializer {
        property: property.name.clone(),
        type_ref: property.type_ref.clone(),
        value,
      })
    })
    .collect();

  (!initializers.is_empty()).then_some(initializers)
}
