use std::{
  fmt::{Display, Formatter},
  path::Path,
};

use serde::{Deserialize, Serialize};
use url::Url;

use super::errors::GenerateError;

/// Suffix appended to file references that omit it.
pub(crate) const SCHEMA_FILE_SUFFIX: &str = ".json";

/// Canonical identifier of a schema document.
///
/// File documents are identified by their absolute URL; anonymous nested
/// object shapes extend their parent identifier with `/<property>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaId(String);

impl SchemaId {
  /// Identifier named by a reference that the edit pass already made absolute.
  #[must_use]
  pub(crate) fn from_reference(reference: &str) -> Self {
    Self(reference.to_string())
  }

  #[must_use]
  pub fn nested(&self, property: &str) -> Self {
    Self(format!("{}/{property}", self.0))
  }

  #[must_use]
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<&Url> for SchemaId {
  fn from(url: &Url) -> Self {
    Self(url.as_str().to_string())
  }
}

impl Display for SchemaId {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    self.0.fmt(f)
  }
}

/// Turns a command-line path into an absolute `file://` URL with dot segments removed.
pub fn root_url(path: &Path) -> Result<Url, GenerateError> {
  let invalid = |reason: &str| GenerateError::InvalidRoot {
    path: path.display().to_string(),
    reason: reason.to_string(),
  };

  let absolute = if path.is_absolute() {
    path.to_path_buf()
  } else {
    std::env::current_dir()
      .map_err(|e| invalid(&e.to_string()))?
      .join(path)
  };

  let url = Url::from_file_path(&absolute).map_err(|()| invalid("not representable as a file URL"))?;
  // Re-parsing collapses `.` and `..` segments left over from the joined path.
  Url::parse(url.as_str()).map_err(|e| invalid(&e.to_string()))
}

/// Resolves a relative or absolute file reference against the referencing document.
pub(crate) fn resolve_file_reference(base: &Url, reference: &str) -> Result<Url, url::ParseError> {
  if reference.ends_with(SCHEMA_FILE_SUFFIX) {
    base.join(reference)
  } else {
    base.join(&format!("{reference}{SCHEMA_FILE_SUFFIX}"))
  }
}

/// File stem of the last path segment, used as a fallback type name.
pub(crate) fn file_stem(url: &Url) -> Option<&str> {
  let segment = url.path_segments()?.next_back()?;
  Some(segment.strip_suffix(SCHEMA_FILE_SUFFIX).unwrap_or(segment))
}
