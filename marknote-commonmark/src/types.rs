//! Types for marknote-commonmark public API and internal use.
use serde::{Deserialize, Serialize};

/// A section heading detected in a Markdown document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Heading {
  /// Heading level (1-6).
  pub depth:    u8,
  /// Heading text (inline content, no markdown formatting).
  pub text:     String,
  /// Anchor ID derived from `text`, see [`crate::utils::anchor::make_id`].
  pub id:       String,
  /// Nested headings. Always empty in the flat sequence returned by a render,
  /// populated by [`crate::toc::build_tree`].
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub children: Vec<Self>,
}

impl Heading {
  /// Create a childless heading, deriving its ID from the text.
  #[must_use]
  pub fn new(depth: u8, text: impl Into<String>) -> Self {
    let text = text.into();
    let id = crate::utils::anchor::make_id(text.as_str());
    Self {
      depth,
      text,
      id,
      children: Vec::new(),
    }
  }
}

/// Result of rendering one Markdown document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderResult {
  /// Sanitized HTML, safe for direct insertion into a page.
  pub html: String,

  /// Flat, document-ordered headings collected for the outline.
  pub headings: Vec<Heading>,

  /// Whether the document contains a `[TOC]` placeholder.
  #[serde(skip)]
  pub toc_placeholder: bool,
}

impl RenderResult {
  /// A result carrying only fallback content and no headings.
  #[must_use]
  pub fn fallback(html: impl Into<String>) -> Self {
    Self {
      html:            html.into(),
      headings:        Vec::new(),
      toc_placeholder: false,
    }
  }
}
