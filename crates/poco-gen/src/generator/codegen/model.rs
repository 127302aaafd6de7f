use super::{Dialect, Emitter};
use crate::generator::{ast::CodeModel, errors::GenerateError};

/// Pretty-printed JSON of the code model itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelEmitter;

impl Emitter for ModelEmitter {
  fn dialect(&self) -> Dialect {
    Dialect::Model
  }

  fn render(&self, model: &CodeModel) -> Result<String, GenerateError> {
    let mut text = serde_json::to_string_pretty(model).map_err(|e| GenerateError::Render {
      type_name: model.primary_name().unwrap_or(&model.namespace).to_string(),
      message: e.to_string(),
    })?;
    text.push('\n');
    Ok(text)
  }
}
