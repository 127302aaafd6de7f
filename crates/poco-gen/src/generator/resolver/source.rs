use std::{collections::BTreeMap, path::PathBuf};

use anyhow::Context;
use fmmap::{MmapFile, MmapFileExt};
use url::Url;

/// Loads the raw text of a schema document addressed by its canonical URL.
pub trait SchemaSource {
  fn load(&self, url: &Url) -> anyhow::Result<String>;
}

/// Reads `file://` URLs from disk through a memory map.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl SchemaSource for FileSource {
  fn load(&self, url: &Url) -> anyhow::Result<String> {
    let path = url
      .to_file_path()
      .map_err(|()| anyhow::anyhow!("'{url}' does not name a local file"))?;

    let metadata = std::fs::metadata(&path).with_context(|| format!("cannot open {}", path.display()))?;
    if metadata.len() == 0 {
      anyhow::bail!("{} is empty", path.display());
    }

    let file = MmapFile::open(&path).with_context(|| format!("cannot map {}", path.display()))?;
    let text = std::str::from_utf8(file.as_slice()).with_context(|| format!("{} is not UTF-8", path.display()))?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string())
  }
}

/// Serves documents from memory, keyed by canonical URL.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
  documents: BTreeMap<String, String>,
}

impl MemorySource {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, url: &Url, text: impl Into<String>) {
    self.documents.insert(url.as_str().to_string(), text.into());
  }

  #[must_use]
  pub fn with(mut self, url: &Url, text: impl Into<String>) -> Self {
    self.insert(url, text);
    self
  }
}

impl SchemaSource for MemorySource {
  fn load(&self, url: &Url) -> anyhow::Result<String> {
    self
      .documents
      .get(url.as_str())
      .cloned()
      .ok_or_else(|| anyhow::anyhow!("no document registered for '{url}'"))
  }
}

/// Creates the directory tree mirroring an override namespace.
pub trait NamespaceDirs {
  fn materialize(&self, namespace: &str) -> anyhow::Result<()>;
}

/// Creates `base/<segment>/<segment>` for each dotted namespace.
#[derive(Debug, Clone)]
pub struct NamespaceDirectories {
  base: PathBuf,
}

impl NamespaceDirectories {
  pub fn new(base: impl Into<PathBuf>) -> Self {
    Self { base: base.into() }
  }
}

impl NamespaceDirs for NamespaceDirectories {
  fn materialize(&self, namespace: &str) -> anyhow::Result<()> {
    let dir = self.base.join(namespace_path(namespace));
    std::fs::create_dir_all(&dir).with_context(|| format!("cannot create {}", dir.display()))
  }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoDirectories;

impl NamespaceDirs for NoDirectories {
  fn materialize(&self, _namespace: &str) -> anyhow::Result<()> {
    Ok(())
  }
}

/// Relative directory for a dotted namespace: `Acme.Models` becomes `Acme/Models`.
#[must_use]
pub fn namespace_path(namespace: &str) -> PathBuf {
  namespace.split('.').filter(|segment| !segment.is_empty()).collect()
}
