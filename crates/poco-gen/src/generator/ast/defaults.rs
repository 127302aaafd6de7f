use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::generator::schema::literal_text;

/// Literal default text that requests a default-constructed instance.
pub(crate) const EMPTY_OBJECT_MARKER: &str = "{}";

/// How a property's schema default is assigned in a generated constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DefaultValue {
  /// Raw default text; emitters match it case-insensitively against member names.
  EnumMember(String),
  Integer(i64),
  Float(f64),
  Boolean(bool),
  DefaultConstruct,
  RawLiteral(String),
}

impl DefaultValue {
  /// Classifies a schema default.
  ///
  /// Precedence: enum member (when the property is an enum), integer, finite
  /// float, boolean, the `{}` marker, and finally the raw text.
  #[must_use]
  pub fn resolve(value: &Value, is_enum: bool) -> Self {
    let text = literal_text(value);
    if is_enum {
      return Self::EnumMember(text);
    }

    let trimmed = text.trim();
    if let Ok(integer) = trimmed.parse::<i64>() {
      return Self::Integer(integer);
    }
    if let Ok(float) = trimmed.parse::<f64>()
      && float.is_finite()
    {
      return Self::Float(float);
    }
    if trimmed.eq_ignore_ascii_case("true") {
      return Self::Boolean(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
      return Self::Boolean(false);
    }
    if text == EMPTY_OBJECT_MARKER {
      return Self::DefaultConstruct;
    }
    Self::RawLiteral(text)
  }
}
