//! Drives the resolve → build → render pipeline.
//!
//! ```no_run
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = Orchestrator::new(Dialect::CSharp, ResolveOptions::default());
//! let root = root_url(std::path::Path::new("schemas/person.json"))?;
//! let output = orchestrator.generate(&root, &FileSource, &NoDirectories)?;
//! for file in &output.files {
//!   std::fs::write(&file.path, &file.code)?;
//! }
//! # Ok(())
//! # }
//! ```

use std::{collections::BTreeSet, path::PathBuf};

use url::Url;

use super::{
  codegen::{Dialect, Emitter, emitter_for},
  converter::CodeModelBuilder,
  errors::GenerateError,
  metrics::{GenerationStats, GenerationWarning},
  resolver::{MemorySource, NamespaceDirs, NoDirectories, ResolveOptions, ResolveSession, SchemaSource, namespace_path},
  schema_graph::{SchemaDocument, SchemaGraph},
  schema_id::SchemaId,
};

/// Canonical identifier of a schema passed in as a string.
const IN_MEMORY_ROOT: &str = "memory:///";

/// Rendered source for one schema document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
  pub id: SchemaId,
  /// Relative to the output directory.
  pub path: PathBuf,
  pub namespace: String,
  pub type_name: String,
  pub code: String,
}

#[derive(Debug)]
pub struct GeneratedOutput {
  pub files: Vec<GeneratedFile>,
  pub stats: GenerationStats,
}

/// Result of resolving a root document. On failure the graph keeps every
/// document that finished resolving first.
#[derive(Debug)]
pub struct Resolution {
  pub graph: SchemaGraph,
  pub stats: GenerationStats,
  pub failure: Option<GenerateError>,
}

#[derive(Debug, Clone)]
pub struct Orchestrator {
  dialect: Dialect,
  options: ResolveOptions,
}

impl Orchestrator {
  #[must_use]
  pub fn new(dialect: Dialect, options: ResolveOptions) -> Self {
    Self { dialect, options }
  }

  /// Resolves the graph reachable from `root` in a fresh session.
  pub fn resolve(&self, root: &Url, source: &dyn SchemaSource, dirs: &dyn NamespaceDirs) -> Resolution {
    let mut session = ResolveSession::new(source, dirs, self.options.clone());
    let failure = session.resolve(root).err();
    let (graph, stats) = session.into_parts();
    Resolution { graph, stats, failure }
  }

  /// Builds and renders every document of a fully resolved graph.
  pub fn emit(&self, graph: &SchemaGraph, stats: &mut GenerationStats) -> Result<Vec<GeneratedFile>, GenerateError> {
    let mut emission = Emission::new(self, graph);
    graph
      .documents()
      .filter_map(|document| emission.emit_document(document, stats).transpose())
      .collect()
  }

  /// Renders what a failed resolution left behind. Documents whose types
  /// depend on something that never resolved are skipped with a warning.
  pub fn emit_partial(&self, graph: &SchemaGraph, stats: &mut GenerationStats) -> Vec<GeneratedFile> {
    let mut emission = Emission::new(self, graph);
    let mut files = Vec::new();
    for document in graph.documents() {
      match emission.emit_document(document, stats) {
        Ok(Some(file)) => files.push(file),
        Ok(None) => {}
        Err(error) => stats.record_warning(GenerationWarning::DocumentSkipped {
          id: document.id.clone(),
          error: error.to_string(),
        }),
      }
    }
    files
  }

  pub fn generate(
    &self,
    root: &Url,
    source: &dyn SchemaSource,
    dirs: &dyn NamespaceDirs,
  ) -> Result<GeneratedOutput, GenerateError> {
    let Resolution {
      graph,
      mut stats,
      failure,
    } = self.resolve(root, source, dirs);
    if let Some(error) = failure {
      return Err(error);
    }

    let files = self.emit(&graph, &mut stats)?;
    Ok(GeneratedOutput { files, stats })
  }

  /// Generates from a single schema held in memory. Relative references
  /// cannot be followed, and the root type is `DefaultClassName` unless the
  /// schema has a title.
  pub fn generate_from_str(&self, schema: &str) -> Result<GeneratedOutput, GenerateError> {
    let root = Url::parse(IN_MEMORY_ROOT).map_err(|e| GenerateError::InvalidRoot {
      path: IN_MEMORY_ROOT.to_string(),
      reason: e.to_string(),
    })?;
    let source = MemorySource::new().with(&root, schema);
    self.generate(&root, &source, &NoDirectories)
  }
}

/// State shared by the documents of one emission pass.
struct Emission<'a> {
  orchestrator: &'a Orchestrator,
  emitter: Box<dyn Emitter>,
  builder: CodeModelBuilder<'a>,
  taken: BTreeSet<PathBuf>,
}

impl<'a> Emission<'a> {
  fn new(orchestrator: &'a Orchestrator, graph: &'a SchemaGraph) -> Self {
    Self {
      orchestrator,
      emitter: emitter_for(orchestrator.dialect),
      builder: CodeModelBuilder::new(graph),
      taken: BTreeSet::new(),
    }
  }

  /// Renders one document; `None` when its output path is already taken.
  fn emit_document(
    &mut self,
    document: &SchemaDocument,
    stats: &mut GenerationStats,
  ) -> Result<Option<GeneratedFile>, GenerateError> {
    let model = self.builder.build(document)?;

    let path = self.output_path(document);
    if !self.taken.insert(path.clone()) {
      stats.record_warning(GenerationWarning::OutputCollision {
        path: path.display().to_string(),
        id: document.id.clone(),
      });
      return Ok(None);
    }

    let code = self.emitter.render(&model)?;
    stats.record_model(&model);
    stats.record_file();
    Ok(Some(GeneratedFile {
      id: document.id.clone(),
      path,
      namespace: document.namespace.clone(),
      type_name: document.title.clone(),
      code,
    }))
  }

  fn output_path(&self, document: &SchemaDocument) -> PathBuf {
    let file_name = format!("{}.{}", document.title, self.emitter.extension());
    if self.orchestrator.options.create_dirs {
      namespace_path(&document.namespace).join(file_name)
    } else {
      PathBuf::from(file_name)
    }
  }
}
