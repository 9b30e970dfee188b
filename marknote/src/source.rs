//! Where documents come from.
use std::{
  collections::HashMap,
  fs,
  io,
  path::{Component, Path, PathBuf},
};

use log::trace;

use crate::error::MarknoteError;

/// A store of Markdown documents addressed by route path (`/guide/intro.md`).
pub trait DocumentSource: Send + Sync {
  /// Read a document. A missing document is `Ok(None)`, not an error.
  ///
  /// # Errors
  ///
  /// Returns an error if the path is not acceptable to the source or the
  /// document exists but cannot be read.
  fn read(&self, path: &str) -> Result<Option<String>, MarknoteError>;
}

/// Documents stored as files below a root directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
  root: PathBuf,
}

impl DirectorySource {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  #[must_use]
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Map a route path onto a file below the root.
  ///
  /// # Errors
  ///
  /// Returns [`MarknoteError::PathEscape`] for empty paths and for paths with
  /// `..` or other non-normal components.
  pub fn resolve(&self, path: &str) -> Result<PathBuf, MarknoteError> {
    let relative = Path::new(path.trim_start_matches('/'));
    let mut resolved = self.root.clone();
    let mut depth = 0usize;

    for component in relative.components() {
      match component {
        Component::Normal(part) => {
          resolved.push(part);
          depth += 1;
        },
        Component::CurDir => {},
        Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
          return Err(MarknoteError::PathEscape(relative.to_path_buf()));
        },
      }
    }

    if depth == 0 {
      return Err(MarknoteError::PathEscape(relative.to_path_buf()));
    }
    Ok(resolved)
  }
}

impl DocumentSource for DirectorySource {
  fn read(&self, path: &str) -> Result<Option<String>, MarknoteError> {
    let file = self.resolve(path)?;
    trace!("Reading {}", file.display());
    match fs::read_to_string(&file) {
      Ok(content) => Ok(Some(content)),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }
}

/// In-memory documents keyed by path without the leading `/`.
impl DocumentSource for HashMap<String, String> {
  fn read(&self, path: &str) -> Result<Option<String>, MarknoteError> {
    Ok(self.get(path.trim_start_matches('/')).cloned())
  }
}
