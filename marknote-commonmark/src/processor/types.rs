//! Type definitions for the Markdown processor.
//!
//! Contains the configuration options (`MarkdownOptions`), their builder and
//! the main processor struct (`MarkdownProcessor`).
//!
//! # Examples
//!
//! ```
//! use marknote_commonmark::{MarkdownOptions, MarkdownProcessor};
//!
//! let options = MarkdownOptions {
//!   gfm: true,
//!   ..Default::default()
//! };
//!
//! let processor = MarkdownProcessor::new(options);
//! ```
use std::sync::Arc;

use super::rules::RenderRule;

/// Content returned when a document is missing or cannot be rendered.
pub const DEFAULT_FALLBACK: &str = "not found or render markdown failed";

/// Options for configuring the Markdown processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownOptions {
  /// Enable GitHub Flavored Markdown (GFM) extensions.
  pub gfm: bool,

  /// Shallowest heading depth collected into the outline.
  pub outline_min_depth: u8,

  /// Deepest heading depth collected into the outline.
  pub outline_max_depth: u8,

  /// HTML returned in place of an empty or unrenderable document.
  pub fallback_html: String,
}

impl Default for MarkdownOptions {
  fn default() -> Self {
    Self {
      gfm:               cfg!(feature = "gfm"),
      outline_min_depth: 2,
      outline_max_depth: 3,
      fallback_html:     DEFAULT_FALLBACK.to_string(),
    }
  }
}

/// Main Markdown processor.
///
/// Immutable once built and cheap to clone; rules are shared through `Arc`.
/// A processor can serve any number of concurrent renders since every render
/// keeps its state on its own stack.
#[derive(Clone)]
pub struct MarkdownProcessor {
  pub(crate) options: MarkdownOptions,
  pub(crate) rules:   Vec<Arc<dyn RenderRule>>,
}

impl std::fmt::Debug for MarkdownProcessor {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("MarkdownProcessor")
      .field("options", &self.options)
      .field("rules", &self.rules.len())
      .finish()
  }
}

/// Builder for constructing `MarkdownOptions` with method chaining.
#[derive(Debug, Clone)]
pub struct MarkdownOptionsBuilder {
  options: MarkdownOptions,
}

impl MarkdownOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self {
      options: MarkdownOptions::default(),
    }
  }

  /// Enable or disable GitHub Flavored Markdown.
  #[must_use]
  pub const fn gfm(mut self, enabled: bool) -> Self {
    self.options.gfm = enabled;
    self
  }

  /// Set the range of heading depths collected into the outline.
  #[must_use]
  pub const fn outline_depths(mut self, min: u8, max: u8) -> Self {
    self.options.outline_min_depth = min;
    self.options.outline_max_depth = max;
    self
  }

  /// Set the fallback HTML for empty or failed renders.
  #[must_use]
  pub fn fallback_html<S: Into<String>>(mut self, html: S) -> Self {
    self.options.fallback_html = html.into();
    self
  }

  /// Build the final `MarkdownOptions`.
  #[must_use]
  pub fn build(self) -> MarkdownOptions {
    self.options
  }
}

impl Default for MarkdownOptionsBuilder {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_builder_overrides() {
    let options = MarkdownOptionsBuilder::new()
      .gfm(false)
      .outline_depths(1, 4)
      .fallback_html("")
      .build();

    assert!(!options.gfm);
    assert_eq!(options.outline_min_depth, 1);
    assert_eq!(options.outline_max_depth, 4);
    assert!(options.fallback_html.is_empty());
  }

  #[test]
  fn test_default_outline_depths() {
    let options = MarkdownOptions::default();
    assert_eq!((options.outline_min_depth, options.outline_max_depth), (2, 3));
    assert_eq!(options.fallback_html, DEFAULT_FALLBACK);
  }
}
