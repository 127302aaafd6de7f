use std::{
  collections::{BTreeMap, BTreeSet},
  rc::Rc,
};

use indexmap::IndexMap;

use super::{
  ast::NamedType,
  schema::SchemaNode,
  schema_id::SchemaId,
};

/// One resolved schema unit, owned by the [`SchemaGraph`] that resolved it.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
  pub id: SchemaId,
  /// Namespace of the generated type; the override namespace when one is declared.
  pub namespace: String,
  /// Sanitized type name.
  pub title: String,
  pub schema: SchemaNode,
  pub type_override: Option<NamedType>,
  pub interfaces: Vec<NamedType>,
  /// Sub-schemas declaring a local `id`, addressable by plain id references.
  pub local_ids: BTreeMap<String, SchemaNode>,
}

impl SchemaDocument {
  /// The nominal type other documents use when they reference this one.
  #[must_use]
  pub fn nominal_type(&self) -> NamedType {
    NamedType::new(&self.namespace, &self.title)
  }

  #[must_use]
  pub fn description(&self) -> Option<&str> {
    self.schema.description.as_deref()
  }

  #[must_use]
  pub fn properties(&self) -> &IndexMap<String, SchemaNode> {
    &self.schema.properties
  }

  /// A document whose whole schema is an enum list generates an enum, not a class.
  #[must_use]
  pub fn is_enum(&self) -> bool {
    self.schema.enum_values.is_some() && !self.schema.declares_properties()
  }

  /// Rewritten reference of the base schema named by `extends`.
  #[must_use]
  pub fn extends(&self) -> Option<&str> {
    self.schema.extends.as_ref().and_then(|extends| extends.reference())
  }
}

/// Outcome of registering a document under its canonical identifier.
#[derive(Debug, Clone)]
pub(crate) enum GraphInsert {
  Inserted(Rc<SchemaDocument>),
  /// The identifier was already registered; the existing instance is kept.
  Duplicate(Rc<SchemaDocument>),
}

/// Session-scoped mapping from canonical identifier to resolved document,
/// plus the direct dependencies of each document.
#[derive(Debug, Default)]
pub struct SchemaGraph {
  /// Documents in the order their resolution completed, so dependencies
  /// precede their dependents.
  documents: IndexMap<SchemaId, Rc<SchemaDocument>>,
  dependencies: BTreeMap<SchemaId, BTreeSet<SchemaId>>,
}

impl SchemaGraph {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn get(&self, id: &SchemaId) -> Option<&Rc<SchemaDocument>> {
    self.documents.get(id)
  }

  #[must_use]
  pub fn contains(&self, id: &SchemaId) -> bool {
    self.documents.contains_key(id)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.documents.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.documents.is_empty()
  }

  pub fn documents(&self) -> impl Iterator<Item = &Rc<SchemaDocument>> {
    self.documents.values()
  }

  /// Registers a document, keeping the first instance on identifier collisions.
  pub(crate) fn insert(&mut self, document: SchemaDocument) -> GraphInsert {
    if let Some(existing) = self.documents.get(&document.id) {
      return GraphInsert::Duplicate(Rc::clone(existing));
    }
    let document = Rc::new(document);
    self.documents.insert(document.id.clone(), Rc::clone(&document));
    self.dependencies.entry(document.id.clone()).or_default();
    GraphInsert::Inserted(document)
  }

  /// Records a direct dependency edge. Self edges are elided.
  pub(crate) fn add_dependency(&mut self, from: &SchemaId, to: &SchemaId) {
    if from == to {
      return;
    }
    self.dependencies.entry(from.clone()).or_default().insert(to.clone());
  }

  pub fn dependencies(&self, id: &SchemaId) -> impl Iterator<Item = &SchemaId> {
    self.dependencies.get(id).into_iter().flatten()
  }

  /// Looks up a generated type by its plain or namespace-qualified name.
  #[must_use]
  pub fn find_type(&self, name: &str) -> Option<&Rc<SchemaDocument>> {
    self
      .documents
      .values()
      .find(|document| document.title == name || document.nominal_type().qualified() == name)
  }
}
