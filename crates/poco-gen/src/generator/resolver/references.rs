//! Reference edit pass over a parsed-but-untyped schema tree.

use std::collections::BTreeSet;

use indexmap::IndexSet;
use serde_json::Value;
use url::Url;

use crate::generator::{
  errors::GenerateError,
  schema_id::{SchemaId, resolve_file_reference},
};

/// Identifier every document declares for itself.
pub(crate) const SELF_ID: &str = "#";

const ID_KEY: &str = "id";
const REF_KEY: &str = "$ref";
const EXTENDS_KEY: &str = "extends";

/// Every string found under an `id` key anywhere in the document, plus `#`.
pub(crate) fn collect_local_ids(value: &Value) -> BTreeSet<String> {
  let mut ids = BTreeSet::from([SELF_ID.to_string()]);
  collect_into(value, &mut ids);
  ids
}

fn collect_into(value: &Value, ids: &mut BTreeSet<String>) {
  match value {
    Value::Object(map) => {
      for (key, child) in map {
        if key == ID_KEY
          && let Value::String(id) = child
        {
          ids.insert(id.clone());
        }
        collect_into(child, ids);
      }
    }
    Value::Array(items) => items.iter().for_each(|item| collect_into(item, ids)),
    _ => {}
  }
}

/// Rewrites every `$ref` and string-valued `extends` in place.
///
/// Local ids stay as written. Pointers collapse to their last segment, which
/// must be a local id. Anything else becomes an absolute URL resolved against
/// `base`. Returns the external URLs in first-seen order.
pub(crate) fn rewrite_references(
  value: &mut Value,
  base: &Url,
  ids: &BTreeSet<String>,
  document: &SchemaId,
) -> Result<Vec<Url>, GenerateError> {
  let mut rewriter = Rewriter {
    base,
    ids,
    document,
    external: IndexSet::new(),
  };
  rewriter.walk(value)?;
  Ok(rewriter.external.into_iter().collect())
}

struct Rewriter<'a> {
  base: &'a Url,
  ids: &'a BTreeSet<String>,
  document: &'a SchemaId,
  external: IndexSet<Url>,
}

impl Rewriter<'_> {
  fn walk(&mut self, value: &mut Value) -> Result<(), GenerateError> {
    match value {
      Value::Object(map) => {
        for (key, child) in map.iter_mut() {
          match child {
            Value::String(reference) if key == REF_KEY || key == EXTENDS_KEY => {
              *reference = self.rewrite(reference)?;
            }
            _ => self.walk(child)?,
          }
        }
      }
      Value::Array(items) => {
        for item in items {
          self.walk(item)?;
        }
      }
      _ => {}
    }
    Ok(())
  }

  fn rewrite(&mut self, reference: &str) -> Result<String, GenerateError> {
    if self.ids.contains(reference) {
      return Ok(reference.to_string());
    }

    if reference.starts_with('#') {
      let segment = reference.rsplit('/').next().unwrap_or_default();
      if self.ids.contains(segment) {
        return Ok(segment.to_string());
      }
      return Err(GenerateError::UnresolvedReference {
        id: self.document.clone(),
        pointer: reference.to_string(),
        segment: segment.to_string(),
      });
    }

    let url = resolve_file_reference(self.base, reference).map_err(|e| {
      GenerateError::schema_parse(self.document, reference, format!("invalid reference: {e}"))
    })?;
    let rewritten = url.as_str().to_string();
    self.external.insert(url);
    Ok(rewritten)
  }
}
