use serde::{Deserialize, Serialize};

use crate::generator::schema::SchemaNode;

/// Validation rule a property carries from its schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
  Required,
  /// `minLength` for strings, `minItems` for arrays.
  MinLength {
    value: u64,
  },
  MaxLength {
    value: u64,
  },
  Range {
    minimum: Option<f64>,
    maximum: Option<f64>,
  },
  Pattern {
    regex: String,
  },
}

impl Constraint {
  /// Constraints declared by a property schema, in a fixed order.
  #[must_use]
  pub fn collect(node: &SchemaNode, required: bool) -> Vec<Self> {
    let range = (node.minimum.is_some() || node.maximum.is_some()).then_some(Self::Range {
      minimum: node.minimum,
      maximum: node.maximum,
    });

    [
      required.then_some(Self::Required),
      node.min_length.or(node.min_items).map(|value| Self::MinLength { value }),
      node.max_length.or(node.max_items).map(|value| Self::MaxLength { value }),
      range,
      node.pattern.clone().map(|regex| Self::Pattern { regex }),
    ]
    .into_iter()
    .flatten()
    .collect()
  }
}
