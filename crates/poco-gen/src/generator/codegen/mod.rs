//! Renders a [`CodeModel`] into source text for one output dialect.
//!
//! Emitters only read the model; adding a dialect means adding an
//! [`Emitter`] implementation and a [`Dialect`] variant.

mod csharp;
mod model;
mod php;
mod writer;

#[cfg(test)]
mod tests;

use clap::ValueEnum;
use strum::{Display, EnumIter};

pub use self::{csharp::CSharpEmitter, model::ModelEmitter, php::PhpEmitter};
use super::{ast::CodeModel, errors::GenerateError};

pub(crate) const GENERATED_BANNER: &str =
  "Generated by poco-gen. Changes to this file will be lost when it is regenerated.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Dialect {
  #[default]
  #[value(name = "csharp")]
  CSharp,
  Php,
  Model,
}

impl Dialect {
  #[must_use]
  pub const fn extension(self) -> &'static str {
    match self {
      Self::CSharp => "cs",
      Self::Php => "php",
      Self::Model => "json",
    }
  }
}

/// Pure, deterministic rendering of one code model.
pub trait Emitter {
  fn dialect(&self) -> Dialect;

  /// File extension without the leading dot.
  fn extension(&self) -> &'static str {
    self.dialect().extension()
  }

  fn render(&self, model: &CodeModel) -> Result<String, GenerateError>;
}

#[must_use]
pub fn emitter_for(dialect: Dialect) -> Box<dyn Emitter> {
  match dialect {
    Dialect::CSharp => Box::new(CSharpEmitter),
    Dialect::Php => Box::new(PhpEmitter),
    Dialect::Model => Box::new(ModelEmitter),
  }
}
