//! Markdown processing.
//!
//! - [`core`]: the processor and its rendering pipeline
//! - [`rules`]: per-node rules, the outline and the decorations they produce
//! - [`process`]: rendering with panic recovery
//! - [`types`]: options, their builder and the processor struct
pub mod core;
pub mod process;
pub mod rules;
pub mod types;

pub use process::process_with_recovery;
pub use rules::{
  Decoration,
  HeadingRule,
  NodeKind,
  Outline,
  RenderContext,
  RenderRule,
  TOC_MARKER,
  TocMarkerRule,
};
pub use types::{
  DEFAULT_FALLBACK,
  MarkdownOptions,
  MarkdownOptionsBuilder,
  MarkdownProcessor,
};
