use std::cell::RefCell;

use url::Url;

use crate::generator::{
  ast::CodeModel,
  codegen::{Dialect, emitter_for},
  converter::CodeModelBuilder,
  resolver::{MemorySource, NamespaceDirs, NoDirectories, ResolveOptions, ResolveSession},
  schema_graph::SchemaGraph,
  schema_id::SchemaId,
};

pub(crate) fn url(path: &str) -> Url {
  Url::parse(&format!("file:///schemas/{path}")).expect("valid test url")
}

pub(crate) fn source(documents: &[(&str, &str)]) -> MemorySource {
  documents
    .iter()
    .fold(MemorySource::new(), |source, (path, text)| source.with(&url(path), *text))
}

/// Resolves `root` out of in-memory documents with default options.
pub(crate) fn resolve_graph(documents: &[(&str, &str)], root: &str) -> SchemaGraph {
  let source = source(documents);
  let mut session = ResolveSession::new(&source, &NoDirectories, ResolveOptions::default());
  session.resolve(&url(root)).expect("test schemas should resolve");
  session.into_parts().0
}

/// Builds the code model of the root document.
pub(crate) fn build_model(documents: &[(&str, &str)], root: &str) -> CodeModel {
  let graph = resolve_graph(documents, root);
  build_document(&graph, &SchemaId::from(&url(root)))
}

pub(crate) fn build_document(graph: &SchemaGraph, id: &SchemaId) -> CodeModel {
  let document = graph.get(id).expect("document should be in the graph");
  CodeModelBuilder::new(graph)
    .build(document)
    .expect("code model should build")
}

pub(crate) fn render(dialect: Dialect, model: &CodeModel) -> String {
  emitter_for(dialect).render(model).expect("model should render")
}

pub(crate) fn assert_contains(code: &str, expected: &str, context: &str) {
  assert!(code.contains(expected), "missing {context}: expected '{expected}' in\n{code}");
}

pub(crate) fn assert_not_contains(code: &str, unexpected: &str, context: &str) {
  assert!(!code.contains(unexpected), "unexpected {context}: found '{unexpected}' in\n{code}");
}

/// Records requested namespaces instead of touching the filesystem.
#[derive(Default)]
pub(crate) struct RecordingDirs {
  pub(crate) created: RefCell<Vec<String>>,
}

impl NamespaceDirs for RecordingDirs {
  fn materialize(&self, namespace: &str) -> anyhow::Result<()> {
    self.created.borrow_mut().push(namespace.to_string());
    Ok(())
  }
}
