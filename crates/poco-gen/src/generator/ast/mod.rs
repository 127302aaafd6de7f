//! Dialect-agnostic model of the declarations generated for one schema document.
//!
//! The model is plain data: built once by the converter, then read by every
//! emitter. It serializes as tagged JSON so it can be inspected or diffed.

mod constraints;
mod defaults;
mod types;

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;

pub use constraints::Constraint;
pub use defaults::DefaultValue;
use serde::{Deserialize, Serialize};
pub use types::{NamedType, Primitive, TypeRef};

use crate::generator::naming::identifiers::sanitize_identifier;

/// Property of a generated class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bon::Builder)]
pub struct PropertyDef {
  /// Sanitized property name.
  pub name: String,
  pub type_ref: TypeRef,
  /// Description comment with escape sequences already unescaped.
  pub docs: Option<String>,
  pub default: Option<DefaultValue>,
  #[builder(default)]
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub constraints: Vec<Constraint>,
}

/// One constructor assignment for a defaulted property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Initializer {
  pub property: String,
  pub type_ref: TypeRef,
  pub value: DefaultValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bon::Builder)]
pub struct ClassDef {
  pub name: String,
  pub namespace: String,
  pub docs: Option<String>,
  /// Concrete base type from `extends`; at most one.
  pub base: Option<NamedType>,
  /// Marker interfaces, after the base in declaration order.
  #[builder(default)]
  pub interfaces: Vec<NamedType>,
  #[builder(default)]
  pub properties: Vec<PropertyDef>,
  /// Present only when at least one property declares a default.
  pub initializers: Option<Vec<Initializer>>,
}

impl ClassDef {
  /// Base type followed by the marker interfaces.
  pub fn bases(&self) -> impl Iterator<Item = &NamedType> {
    self.base.iter().chain(&self.interfaces)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDef {
  pub name: String,
  pub docs: Option<String>,
  /// Sanitized member identifiers in declaration order.
  pub members: Vec<String>,
}

impl EnumDef {
  /// Finds the member a default value names, ignoring case.
  #[must_use]
  pub fn member_matching(&self, text: &str) -> Option<&str> {
    let wanted = sanitize_identifier(text);
    self
      .members
      .iter()
      .find(|member| member.eq_ignore_ascii_case(text) || member.eq_ignore_ascii_case(&wanted))
      .map(String::as_str)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDef {
  Class(ClassDef),
  Enum(EnumDef),
}

/// Everything generated for one schema document: its enums, then its class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeModel {
  pub namespace: String,
  /// Namespaces of referenced types outside `namespace`, sorted.
  pub imports: BTreeSet<String>,
  pub types: Vec<TypeDef>,
}

impl CodeModel {
  pub fn classes(&self) -> impl Iterator<Item = &ClassDef> {
    self.types.iter().filter_map(|ty| match ty {
      TypeDef::Class(def) => Some(def),
      TypeDef::Enum(_) => None,
    })
  }

  pub fn enums(&self) -> impl Iterator<Item = &EnumDef> {
    self.types.iter().filter_map(|ty| match ty {
      TypeDef::Enum(def) => Some(def),
      TypeDef::Class(_) => None,
    })
  }

  #[must_use]
  pub fn find_enum(&self, name: &str) -> Option<&EnumDef> {
    self.enums().find(|def| def.name == name)
  }

  /// Name of the document's class; the last class in the model.
  #[must_use]
  pub fn primary_name(&self) -> Option<&str> {
    self.classes().last().map(|def| def.name.as_str())
  }
}
