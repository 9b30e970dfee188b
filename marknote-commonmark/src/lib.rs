//! # marknote-commonmark
//!
//! Markdown rendering for marknote sites: `CommonMark` (optionally GFM) to
//! sanitized HTML, with deterministic heading anchors, a heading outline and
//! a table of contents.
//!
//! ## Quick Start
//!
//! ```rust
//! use marknote_commonmark::{MarkdownOptions, MarkdownProcessor, toc};
//!
//! let processor = MarkdownProcessor::new(MarkdownOptions::default());
//! let result = processor.render("# Guide\n\n[TOC]\n\n## Intro\n\n### Details\n");
//!
//! assert!(result.html.contains(r#"<h2 id="hash-70809164">Intro</h2>"#));
//! assert_eq!(result.headings.len(), 2);
//!
//! let tree = toc::build_tree(result.headings);
//! assert_eq!(tree[0].children.len(), 1);
//! let html = toc::render_toc(&tree, &toc::TocOptions::default());
//! assert!(html.contains(r#"data-header-id="hash-70809164""#));
//! ```
//!
//! ## Features
//!
//! - **Hashed anchors**: every heading gets `id="hash-<n>"`, where `n` is a
//!   32-bit string hash of its text, so IDs are stable across renders
//! - **Outline** of headings at depths 2 and 3 (configurable)
//! - **`[TOC]` placeholder**: a paragraph consisting of exactly `[TOC]` becomes
//!   an empty `<p id="toc" class="toc">` for the page to fill in
//! - **Sanitization** of the final HTML with an allow-list
//! - **Fallback content** for empty or unrenderable documents
//! - **Sidebar link rewriting** into hash routes
pub mod error;
pub mod processor;
pub mod sanitize;
pub mod sidebar;
pub mod toc;
mod types;
pub mod utils;

pub use crate::{
  error::{PipelineResult, RenderError},
  processor::{
    Decoration,
    MarkdownOptions,
    MarkdownOptionsBuilder,
    MarkdownProcessor,
    NodeKind,
    RenderRule,
    process_with_recovery,
  },
  sidebar::{SidebarLinks, rewrite_links},
  toc::{TocOptions, build_tree, render_toc, toc_html},
  types::{Heading, RenderResult},
  utils::{anchor::make_id, collect_markdown_files},
};
