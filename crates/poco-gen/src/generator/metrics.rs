use strum::Display;

use super::{ast::CodeModel, schema_id::SchemaId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub documents_resolved: usize,
  pub types_generated: usize,
  pub classes_generated: usize,
  pub enums_generated: usize,
  pub properties_generated: usize,
  pub files_generated: usize,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_document(&mut self) {
    self.documents_resolved += 1;
  }

  pub fn record_model(&mut self, model: &CodeModel) {
    for class in model.classes() {
      self.classes_generated += 1;
      self.types_generated += 1;
      self.properties_generated += class.properties.len();
    }
    for _ in model.enums() {
      self.enums_generated += 1;
      self.types_generated += 1;
    }
  }

  pub fn record_file(&mut self) {
    self.files_generated += 1;
  }

  pub fn record_warning(&mut self, warning: GenerationWarning) {
    self.warnings.push(warning);
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "Schema id '{id}' was declared twice; the first document is kept")]
  DuplicateSchemaId { id: SchemaId },
  #[strum(to_string = "Output '{path}' for '{id}' is already taken by another type")]
  OutputCollision { path: String, id: SchemaId },
  #[strum(to_string = "Document '{id}' was not emitted: {error}")]
  DocumentSkipped { id: SchemaId, error: String },
  #[strum(to_string = "Interface '{name}' in '{document}' is not generated here; referenced by name only")]
  SynthesizedInterface { name: String, document: SchemaId },
}

impl GenerationWarning {
  pub fn is_skipped_item(&self) -> bool {
    matches!(self, Self::OutputCollision { .. } | Self::DocumentSkipped { .. })
  }
}
