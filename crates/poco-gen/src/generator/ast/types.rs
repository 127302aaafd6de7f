use serde::{Deserialize, Serialize};
use strum::Display;

/// Scalar types every dialect knows how to spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Primitive {
  Boolean,
  Int32,
  Int64,
  Float,
  Double,
  String,
  /// Untyped value; used when a schema gives no usable type.
  Object,
}

/// A generated class or enum, addressed by namespace and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NamedType {
  pub namespace: String,
  pub name: String,
}

impl NamedType {
  pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      namespace: namespace.into(),
      name: name.into(),
    }
  }

  /// `Namespace.Name`, or just the name for the root namespace.
  #[must_use]
  pub fn qualified(&self) -> String {
    if self.namespace.is_empty() {
      self.name.clone()
    } else {
      format!("{}.{}", self.namespace, self.name)
    }
  }
}

/// Target type of a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum TypeRef {
  Primitive(Primitive),
  /// Always a list wrapper; nested lists are never flattened.
  List(Box<TypeRef>),
  Named(NamedType),
}

impl TypeRef {
  #[must_use]
  pub fn list_of(inner: TypeRef) -> Self {
    Self::List(Box::new(inner))
  }

  #[must_use]
  pub fn named(namespace: impl Into<String>, name: impl Into<String>) -> Self {
    Self::Named(NamedType::new(namespace, name))
  }

  #[must_use]
  pub fn is_list(&self) -> bool {
    matches!(self, Self::List(_))
  }

  /// The nominal type reached through any number of list wrappers.
  #[must_use]
  pub fn named_type(&self) -> Option<&NamedType> {
    match self {
      Self::Primitive(_) => None,
      Self::List(inner) => inner.named_type(),
      Self::Named(named) => Some(named),
    }
  }

  #[must_use]
  pub fn as_primitive(&self) -> Option<Primitive> {
    match self {
      Self::Primitive(primitive) => Some(*primitive),
      _ => None,
    }
  }
}

impl From<Primitive> for TypeRef {
  fn from(primitive: Primitive) -> Self {
    TypeRef::Primitive(primitive)
  }
}
