//! Discovers, canonicalizes and memoizes the graph of schema documents
//! reachable from a root file.
//!
//! One [`ResolveSession`] owns one [`SchemaGraph`]. Resolution is recursive:
//! a document resolves its external references and anonymous nested shapes
//! before it is parsed and registered, so dependencies always land in the
//! graph before their dependents.

mod references;
mod source;


use std::{
  collections::{BTreeMap, BTreeSet},
  path::Path,
  rc::Rc,
};

use indexmap::IndexSet;
pub(crate) use references::SELF_ID;
use serde_json::Value;
pub use source::{FileSource, MemorySource, NamespaceDirectories, NamespaceDirs, NoDirectories, SchemaSource, namespace_path};
use url::Url;

use self::references::{collect_local_ids, rewrite_references};
use super::{
  ast::NamedType,
  errors::GenerateError,
  metrics::{GenerationStats, GenerationWarning},
  naming::identifiers::{DEFAULT_CLASS_NAME, sanitize_identifier, split_qualified_name, type_name_from_stem},
  schema::SchemaNode,
  schema_graph::{GraphInsert, SchemaDocument, SchemaGraph},
  schema_id::{SchemaId, file_stem, root_url},
};

/// Namespace used for documents without an output-type override.
pub const DEFAULT_NAMESPACE: &str = "generated";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
  pub namespace: String,
  /// Invoke the directory capability for every override namespace.
  pub create_dirs: bool,
}

impl Default for ResolveOptions {
  fn default() -> Self {
    Self {
      namespace: DEFAULT_NAMESPACE.to_string(),
      create_dirs: false,
    }
  }
}

/// Where a document's text came from and what it is called when no title is given.
struct DocumentSite<'u> {
  id: SchemaId,
  file: &'u Url,
  fallback_title: String,
  /// Local-id index of the enclosing file; `None` for the file document itself.
  file_ids: Option<&'u BTreeMap<String, SchemaNode>>,
}

pub struct ResolveSession<'a> {
  source: &'a dyn SchemaSource,
  dirs: &'a dyn NamespaceDirs,
  options: ResolveOptions,
  graph: SchemaGraph,
  /// Files currently being resolved, outermost first.
  in_flight: IndexSet<SchemaId>,
  stats: GenerationStats,
}

impl<'a> ResolveSession<'a> {
  pub fn new(source: &'a dyn SchemaSource, dirs: &'a dyn NamespaceDirs, options: ResolveOptions) -> Self {
    Self {
      source,
      dirs,
      options,
      graph: SchemaGraph::new(),
      in_flight: IndexSet::new(),
      stats: GenerationStats::default(),
    }
  }

  #[must_use]
  pub fn graph(&self) -> &SchemaGraph {
    &self.graph
  }

  /// Hands over the graph and the statistics gathered so far. Documents
  /// resolved before a failure are still part of the graph.
  #[must_use]
  pub fn into_parts(self) -> (SchemaGraph, GenerationStats) {
    (self.graph, self.stats)
  }

  /// Resolves the document at a command-line path.
  pub fn resolve_path(&mut self, path: &Path) -> Result<Rc<SchemaDocument>, GenerateError> {
    let url = root_url(path)?;
    self.resolve(&url)
  }

  /// Resolves a file document, returning the cached instance when the
  /// identifier was already resolved in this session.
  pub fn resolve(&mut self, url: &Url) -> Result<Rc<SchemaDocument>, GenerateError> {
    let id = SchemaId::from(url);
    if let Some(document) = self.graph.get(&id) {
      return Ok(Rc::clone(document));
    }

    if let Some(start) = self.in_flight.get_index_of(&id) {
      let mut chain: Vec<SchemaId> = self.in_flight.iter().skip(start).cloned().collect();
      chain.push(id);
      return Err(GenerateError::Cycle { chain });
    }

    self.in_flight.insert(id.clone());
    let result = self.load(url, id.clone());
    self.in_flight.shift_remove(&id);
    result
  }

  fn load(&mut self, url: &Url, id: SchemaId) -> Result<Rc<SchemaDocument>, GenerateError> {
    let text = self
      .source
      .load(url)
      .map_err(|source| GenerateError::Load { id: id.clone(), source })?;
    let value: Value = serde_json::from_str(&text).map_err(|e| GenerateError::schema_parse(&id, "$", e))?;
    let ids = collect_local_ids(&value);

    let fallback_title = file_stem(url).map_or_else(|| DEFAULT_CLASS_NAME.to_string(), type_name_from_stem);
    let site = DocumentSite {
      id,
      file: url,
      fallback_title,
      file_ids: None,
    };
    self.resolve_document(site, value, &ids)
  }

  fn resolve_document(
    &mut self,
    site: DocumentSite<'_>,
    mut value: Value,
    ids: &BTreeSet<String>,
  ) -> Result<Rc<SchemaDocument>, GenerateError> {
    let file_id = SchemaId::from(site.file);

    for url in rewrite_references(&mut value, site.file, ids, &site.id)? {
      let dependency = SchemaId::from(&url);
      if dependency == file_id {
        continue;
      }
      if !self.graph.contains(&dependency) {
        self.resolve(&url)?;
      }
      self.graph.add_dependency(&site.id, &dependency);
    }

    let schema: SchemaNode =
      serde_path_to_error::deserialize(&value).map_err(|e| GenerateError::schema_parse(&site.id, e.path(), e.inner()))?;

    // Plain ids inside nested shapes resolve against the enclosing file.
    let local_ids = match site.file_ids {
      Some(file_ids) => file_ids.clone(),
      None => index_local_ids(&schema),
    };
    self.resolve_nested(&site, &value, ids, &local_ids)?;

    let document = self.describe(site, schema, local_ids)?;
    Ok(self.register(document))
  }

  /// Adds a document to the graph. On an identifier collision the first
  /// instance is kept and a warning is recorded.
  fn register(&mut self, document: SchemaDocument) -> Rc<SchemaDocument> {
    match self.graph.insert(document) {
      GraphInsert::Inserted(document) => {
        self.stats.record_document();
        document
      }
      GraphInsert::Duplicate(existing) => {
        self.stats.record_warning(GenerationWarning::DuplicateSchemaId {
          id: existing.id.clone(),
        });
        existing
      }
    }
  }

  /// Resolves properties whose shape declares its own `properties`, directly
  /// or through `items`, as synthetic documents named `parent/property`.
  fn resolve_nested(
    &mut self,
    site: &DocumentSite<'_>,
    value: &Value,
    ids: &BTreeSet<String>,
    local_ids: &BTreeMap<String, SchemaNode>,
  ) -> Result<(), GenerateError> {
    let Some(Value::Object(properties)) = value.get("properties") else {
      return Ok(());
    };

    for (name, property) in properties {
      let Some(shape) = nested_shape(property) else {
        continue;
      };

      let nested_id = site.id.nested(name);
      if !self.graph.contains(&nested_id) {
        let nested = DocumentSite {
          id: nested_id.clone(),
          file: site.file,
          fallback_title: sanitize_identifier(name),
          file_ids: Some(local_ids),
        };
        self.resolve_document(nested, shape.clone(), ids)?;
      }
      self.graph.add_dependency(&site.id, &nested_id);
    }

    Ok(())
  }

  /// Applies title sanitization, the output-type override and marker interfaces.
  fn describe(
    &mut self,
    site: DocumentSite<'_>,
    schema: SchemaNode,
    local_ids: BTreeMap<String, SchemaNode>,
  ) -> Result<SchemaDocument, GenerateError> {
    let DocumentSite { id, fallback_title, .. } = site;

    let mut namespace = self.options.namespace.clone();
    let mut title = schema
      .title
      .as_deref()
      .filter(|title| !title.trim().is_empty())
      .map_or(fallback_title, sanitize_identifier);

    let type_override = match schema.type_override.as_deref().filter(|name| !name.is_empty()) {
      Some(name) => {
        let (qualifier, type_name) =
          split_qualified_name(name).ok_or_else(|| GenerateError::custom_type(&id, name, "not a dotted identifier"))?;
        if let Some(qualifier) = qualifier {
          namespace = qualifier.to_string();
        }
        title = type_name.to_string();

        if self.options.create_dirs {
          self
            .dirs
            .materialize(&namespace)
            .map_err(|source| GenerateError::DirectoryCreation {
              namespace: namespace.clone(),
              source,
            })?;
        }
        Some(NamedType::new(&namespace, &title))
      }
      None => None,
    };

    let interfaces = schema
      .interfaces
      .iter()
      .map(|name| self.resolve_interface(&id, &namespace, name))
      .collect::<Result<Vec<_>, _>>()?;

    Ok(SchemaDocument {
      id,
      namespace,
      title,
      schema,
      type_override,
      interfaces,
      local_ids,
    })
  }

  /// Finds a marker interface among the generated types, or synthesizes a
  /// placeholder carrying just its name.
  fn resolve_interface(&mut self, document: &SchemaId, namespace: &str, name: &str) -> Result<NamedType, GenerateError> {
    let (qualifier, type_name) =
      split_qualified_name(name).ok_or_else(|| GenerateError::custom_type(document, name, "not a dotted identifier"))?;

    if let Some(existing) = self.graph.find_type(name) {
      return Ok(existing.nominal_type());
    }

    self.stats.record_warning(GenerationWarning::SynthesizedInterface {
      name: name.to_string(),
      document: document.clone(),
    });
    Ok(NamedType::new(qualifier.unwrap_or(namespace), type_name))
  }
}

/// Sub-schemas declaring a local `id`, first declaration wins.
fn index_local_ids(schema: &SchemaNode) -> BTreeMap<String, SchemaNode> {
  let mut local_ids = BTreeMap::new();
  schema.visit(&mut |node| {
    if std::ptr::eq(node, schema) {
      return;
    }
    if let Some(local) = &node.id
      && local != SELF_ID
    {
      local_ids.entry(local.clone()).or_insert_with(|| node.clone());
    }
  });
  local_ids
}

fn nested_shape(property: &Value) -> Option<&Value> {
  if property.get("properties").is_some() {
    return Some(property);
  }
  property.get("items").filter(|items| items.get("properties").is_some())
}
