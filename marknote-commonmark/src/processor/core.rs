//! Core implementation of the Markdown processor.
//!
//! Rendering is a single pass over one comrak AST:
//!
//! 1. rules inspect block nodes, fill the per-call [`Outline`] and record
//!    [`Decoration`]s keyed by source position and element name,
//! 2. comrak renders HTML with `data-sourcepos` attributes,
//! 3. a DOM pass applies the decorations and drops the source positions,
//! 4. the result is sanitized.
use std::{collections::HashMap, sync::Arc};

use comrak::{Arena, nodes::AstNode, options::Options, parse_document};
use kuchikikiki::NodeRef;
use log::{debug, trace, warn};
use tendril::TendrilSink;

use super::{
  rules::{
    Decoration,
    HeadingRule,
    NodeKind,
    Outline,
    RenderContext,
    RenderRule,
    TocMarkerRule,
    element_tag,
  },
  types::{MarkdownOptions, MarkdownProcessor},
};
use crate::{error::PipelineResult, sanitize, types::RenderResult};

const SOURCEPOS_ATTR: &str = "data-sourcepos";

/// Decorations keyed by `(data-sourcepos, element local name)`.
type Decorations = HashMap<(String, String), Decoration>;

impl MarkdownProcessor {
  /// Create a new `MarkdownProcessor` with the built-in heading and `[TOC]`
  /// rules.
  #[must_use]
  pub fn new(options: MarkdownOptions) -> Self {
    Self {
      options,
      rules: vec![Arc::new(HeadingRule), Arc::new(TocMarkerRule)],
    }
  }

  /// Register an additional rule. Rules added later are consulted before the
  /// existing ones, so they can override the built-in behaviour for their
  /// node kind.
  #[must_use]
  pub fn with_rule<R: RenderRule + 'static>(mut self, rule: R) -> Self {
    self.rules.insert(0, Arc::new(rule));
    self
  }

  /// Access processor options.
  #[must_use]
  pub const fn options(&self) -> &MarkdownOptions {
    &self.options
  }

  /// Render Markdown to sanitized HTML and collect the heading outline.
  ///
  /// Empty input is treated as "no content" and yields the configured
  /// fallback HTML with no headings, as does any pipeline error.
  #[must_use]
  pub fn render(&self, markdown: &str) -> RenderResult {
    self.render_or(markdown, &self.options.fallback_html)
  }

  /// Like [`Self::render`], with an explicit fallback.
  #[must_use]
  pub fn render_or(&self, markdown: &str, fallback: &str) -> RenderResult {
    if markdown.is_empty() {
      debug!("Empty document, using fallback content");
      return RenderResult::fallback(fallback);
    }

    match self.try_render(markdown) {
      Ok(result) => result,
      Err(e) => {
        warn!("Failed to render markdown, using fallback content: {e}");
        RenderResult::fallback(fallback)
      },
    }
  }

  /// Run the rendering pipeline without any fallback handling.
  ///
  /// # Errors
  ///
  /// Returns an error if comrak fails to format the document or the
  /// decorated DOM cannot be serialized.
  pub fn try_render(&self, markdown: &str) -> PipelineResult<RenderResult> {
    let (html, ctx) = self.convert_to_html(markdown)?;
    let headings = ctx.outline.into_headings();
    trace!("Collected {} outline headings", headings.len());

    Ok(RenderResult {
      html: sanitize::sanitize(&html),
      headings,
      toc_placeholder: ctx.toc_placeholder,
    })
  }

  /// Convert markdown to decorated, unsanitized HTML.
  fn convert_to_html<'s>(
    &self,
    content: &'s str,
  ) -> PipelineResult<(String, RenderContext<'s>)> {
    let arena = Arena::new();
    let options = self.comrak_options();
    let root = parse_document(&arena, content, &options);

    let mut ctx = RenderContext::new(
      content,
      Outline::new(
        self.options.outline_min_depth..=self.options.outline_max_depth,
      ),
    );
    let decorations = self.apply_rules(root, &mut ctx);

    let mut html_output = String::new();
    comrak::format_html(root, &options, &mut html_output)?;

    let html = decorate_html(&html_output, &decorations)?;
    Ok((html, ctx))
  }

  /// Walk the AST in document order and let the rules claim block nodes.
  fn apply_rules<'a>(
    &self,
    root: &'a AstNode<'a>,
    ctx: &mut RenderContext<'_>,
  ) -> Decorations {
    let mut decorations = Decorations::new();

    for node in root.descendants() {
      let (kind, tag, sourcepos) = {
        let data = node.data.borrow();
        let Some(kind) = NodeKind::of(&data.value) else {
          continue;
        };
        (kind, element_tag(&data.value), data.sourcepos.to_string())
      };

      let decoration = self
        .rules
        .iter()
        .filter(|rule| rule.kind() == kind)
        .find_map(|rule| rule.apply(node, ctx));

      if let (Some(decoration), Some(tag)) = (decoration, tag) {
        decorations.insert((sourcepos, tag), decoration);
      }
    }

    decorations
  }

  /// Build comrak options from `MarkdownOptions`.
  fn comrak_options(&self) -> Options<'_> {
    let mut options = Options::default();
    if self.options.gfm {
      options.extension.table = true;
      options.extension.footnotes = true;
      options.extension.strikethrough = true;
      options.extension.tasklist = true;
      options.extension.autolink = true;
    }
    // Raw HTML is kept here and cleaned by the sanitizer afterwards
    options.render.r#unsafe = true;
    options.render.sourcepos = true;
    options
  }
}

/// Apply decorations to the elements comrak rendered and strip source
/// positions from every element.
fn decorate_html(
  html: &str,
  decorations: &Decorations,
) -> PipelineResult<String> {
  let document = kuchikikiki::parse_html().one(html);

  let mut targets = Vec::new();
  for node in document.inclusive_descendants() {
    let Some(element) = node.as_element() else {
      continue;
    };
    let Some(sourcepos) =
      element.attributes.borrow_mut().remove(SOURCEPOS_ATTR)
    else {
      continue;
    };
    let key = (sourcepos.value, element.name.local.to_string());
    if let Some(decoration) = decorations.get(&key) {
      targets.push((node.clone(), decoration));
    }
  }

  for (node, decoration) in targets {
    apply_decoration(&node, decoration);
  }

  serialize_body(&document)
}

fn apply_decoration(node: &NodeRef, decoration: &Decoration) {
  if decoration.clear_content {
    let children: Vec<NodeRef> = node.children().collect();
    for child in children {
      child.detach();
    }
  }

  if let Some(element) = node.as_element() {
    let mut attributes = element.attributes.borrow_mut();
    for (name, value) in &decoration.attributes {
      attributes.insert(name.as_str(), value.clone());
    }
  }
}

/// Serialize the children of `<body>`, i.e. the fragment we parsed.
fn serialize_body(document: &NodeRef) -> PipelineResult<String> {
  let mut out = Vec::new();
  if let Ok(body) = document.select_first("body") {
    for child in body.as_node().children() {
      child.serialize(&mut out)?;
    }
  }
  Ok(String::from_utf8(out)?)
}
