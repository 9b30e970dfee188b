//! Rendering rules layered over comrak's default HTML output.
//!
//! Rules are consulted per AST node, keyed by [`NodeKind`]. A rule that
//! returns a [`Decoration`] claims the node; the processor later applies the
//! decoration to the HTML element comrak emitted for it. Nodes no rule claims
//! are rendered exactly as comrak renders them.
use std::ops::RangeInclusive;

use comrak::nodes::{AstNode, NodeHeading, NodeValue};

use crate::{
  types::Heading,
  utils::{
    anchor::make_id,
    extract_inline_text,
    plain_text_content,
    source_text,
  },
};

/// Paragraph text that marks where the table of contents goes.
pub const TOC_MARKER: &str = "[TOC]";

/// Element ID of the table of contents placeholder.
pub const TOC_PLACEHOLDER_ID: &str = "toc";

/// Class of the table of contents placeholder.
pub const TOC_PLACEHOLDER_CLASS: &str = "toc";

/// Block node kinds that rules can be registered for.
///
/// Only block nodes are addressable because comrak tags the elements it
/// emits for them with their source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
  Heading,
  Paragraph,
  BlockQuote,
  CodeBlock,
  List,
  Item,
  Table,
  ThematicBreak,
}

impl NodeKind {
  /// Kind of an AST node value, or `None` for nodes rules cannot address.
  #[must_use]
  pub const fn of(value: &NodeValue) -> Option<Self> {
    match value {
      NodeValue::Heading(_) => Some(Self::Heading),
      NodeValue::Paragraph => Some(Self::Paragraph),
      NodeValue::BlockQuote => Some(Self::BlockQuote),
      NodeValue::CodeBlock(_) => Some(Self::CodeBlock),
      NodeValue::List(_) => Some(Self::List),
      NodeValue::Item(_) => Some(Self::Item),
      NodeValue::Table(_) => Some(Self::Table),
      NodeValue::ThematicBreak => Some(Self::ThematicBreak),
      _ => None,
    }
  }
}

/// Local name of the element comrak emits for a block node.
pub(crate) fn element_tag(value: &NodeValue) -> Option<String> {
  let tag = match value {
    NodeValue::Heading(NodeHeading { level, .. }) => return Some(format!("h{level}")),
    NodeValue::Paragraph => "p",
    NodeValue::BlockQuote => "blockquote",
    NodeValue::CodeBlock(_) => "pre",
    NodeValue::List(list) => {
      match list.list_type {
        comrak::nodes::ListType::Bullet => "ul",
        comrak::nodes::ListType::Ordered => "ol",
      }
    },
    NodeValue::Item(_) => "li",
    NodeValue::Table(_) => "table",
    NodeValue::ThematicBreak => "hr",
    _ => return None,
  };
  Some(tag.to_string())
}

/// Changes applied to the element rendered for a claimed node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoration {
  /// Attributes set on the element, replacing existing values.
  pub attributes:    Vec<(String, String)>,
  /// Drop the element's rendered content, leaving it empty.
  pub clear_content: bool,
}

impl Decoration {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn attribute(
    mut self,
    name: impl Into<String>,
    value: impl Into<String>,
  ) -> Self {
    self.attributes.push((name.into(), value.into()));
    self
  }

  #[must_use]
  pub const fn clear_content(mut self) -> Self {
    self.clear_content = true;
    self
  }
}

/// Heading accumulator for a single render.
///
/// Each render owns a fresh outline, so nothing collected for one document
/// can leak into another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outline {
  depths:   RangeInclusive<u8>,
  headings: Vec<Heading>,
}

impl Outline {
  /// Create an empty outline collecting headings with depths in `depths`.
  #[must_use]
  pub const fn new(depths: RangeInclusive<u8>) -> Self {
    Self {
      depths,
      headings: Vec::new(),
    }
  }

  /// Record a heading if its depth is part of the outline.
  ///
  /// Returns whether the heading was kept.
  pub fn record(&mut self, heading: Heading) -> bool {
    if self.depths.contains(&heading.depth) {
      self.headings.push(heading);
      true
    } else {
      false
    }
  }

  #[must_use]
  pub fn headings(&self) -> &[Heading] {
    &self.headings
  }

  #[must_use]
  pub fn into_headings(self) -> Vec<Heading> {
    self.headings
  }
}

/// Per-render state handed to every rule.
#[derive(Debug)]
pub struct RenderContext<'s> {
  /// Markdown source of the document being rendered.
  pub source:          &'s str,
  pub outline:         Outline,
  /// Set once a rule has emitted the table of contents placeholder.
  pub toc_placeholder: bool,
}

impl<'s> RenderContext<'s> {
  #[must_use]
  pub const fn new(source: &'s str, outline: Outline) -> Self {
    Self {
      source,
      outline,
      toc_placeholder: false,
    }
  }
}

/// A rendering rule for one kind of block node.
pub trait RenderRule: Send + Sync {
  /// Kind of node the rule is consulted for.
  fn kind(&self) -> NodeKind;

  /// Inspect `node` and claim it by returning a decoration. Returning `None`
  /// passes the node on to the next rule, and finally to comrak's default.
  fn apply<'a>(
    &self,
    node: &'a AstNode<'a>,
    ctx: &mut RenderContext<'_>,
  ) -> Option<Decoration>;
}

/// Gives every heading a hashed `id` and collects it into the outline.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingRule;

impl RenderRule for HeadingRule {
  fn kind(&self) -> NodeKind {
    NodeKind::Heading
  }

  fn apply<'a>(
    &self,
    node: &'a AstNode<'a>,
    ctx: &mut RenderContext<'_>,
  ) -> Option<Decoration> {
    let depth = match &node.data.borrow().value {
      NodeValue::Heading(NodeHeading { level, .. }) => *level,
      _ => return None,
    };
    let text = extract_inline_text(node);
    let id = make_id(text.as_str());

    ctx.outline.record(Heading {
      depth,
      text,
      id: id.clone(),
      children: Vec::new(),
    });

    Some(Decoration::new().attribute("id", id))
  }
}

/// Turns a paragraph written as exactly `[TOC]` into the empty TOC
/// placeholder element. The paragraph's source is compared, so an escaped
/// `\[TOC\]` stays a literal paragraph.
#[derive(Debug, Clone, Copy, Default)]
pub struct TocMarkerRule;

impl RenderRule for TocMarkerRule {
  fn kind(&self) -> NodeKind {
    NodeKind::Paragraph
  }

  fn apply<'a>(
    &self,
    node: &'a AstNode<'a>,
    ctx: &mut RenderContext<'_>,
  ) -> Option<Decoration> {
    if plain_text_content(node)? != TOC_MARKER {
      return None;
    }
    let sourcepos = node.data.borrow().sourcepos;
    if source_text(ctx.source, sourcepos)?.trim() != TOC_MARKER {
      return None;
    }

    ctx.toc_placeholder = true;
    Some(
      Decoration::new()
        .attribute("id", TOC_PLACEHOLDER_ID)
        .attribute("class", TOC_PLACEHOLDER_CLASS)
        .clear_content(),
    )
  }
}
