use std::{io, path::PathBuf};

use thiserror::Error;

/// Top-level error type for the marknote crate.
#[derive(Debug, Error)]
pub enum MarknoteError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Template error: {0}")]
  Template(String),

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("Serde error: {0}")]
  Serde(#[from] serde_json::Error),

  #[error("Path escapes the document root: {}", .0.display())]
  PathEscape(PathBuf),
}

impl From<tera::Error> for MarknoteError {
  fn from(e: tera::Error) -> Self {
    Self::Template(e.to_string())
  }
}
