//! Table of contents: folding the flat outline into a tree and rendering it.
//!
//! # Examples
//!
//! ```
//! use marknote_commonmark::{Heading, toc};
//!
//! let flat = vec![
//!   Heading::new(2, "Install"),
//!   Heading::new(3, "From source"),
//!   Heading::new(2, "Usage"),
//! ];
//! let tree = toc::build_tree(flat);
//! assert_eq!(tree.len(), 2);
//! assert_eq!(tree[0].children.len(), 1);
//! ```
use std::fmt::Write;

use crate::types::Heading;

/// Depth of the virtual root every outline hangs from.
const ROOT_DEPTH: u8 = 0;

/// Default section label rendered above the list.
pub const DEFAULT_TOC_TITLE: &str = "Contents";

/// Options for [`render_toc`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocOptions {
  /// Label rendered as an `<h2>` before the list.
  pub title: String,
}

impl Default for TocOptions {
  fn default() -> Self {
    Self {
      title: DEFAULT_TOC_TITLE.to_string(),
    }
  }
}

/// Fold a flat, document-ordered heading sequence into a tree.
///
/// Walks the headings with an explicit index and a stack of open ancestors,
/// seeded with a virtual root of depth 0. While the top of the stack is not
/// shallower than the current heading it is popped, and the same heading is
/// compared again; otherwise the heading becomes the top's child and is
/// pushed. Depth gaps nest (2 followed by 4), shallower headings climb back
/// up. A heading of depth 0 can never nest under the root and is kept at the
/// root level without ever becoming an ancestor.
#[must_use]
pub fn build_tree(flat: Vec<Heading>) -> Vec<Heading> {
  let depths: Vec<u8> = flat.iter().map(|h| h.depth).collect();
  let mut children: Vec<Vec<usize>> = vec![Vec::new(); flat.len()];
  let mut roots = Vec::new();
  let mut stack: Vec<usize> = Vec::new();

  let mut i = 0;
  while i < depths.len() {
    let parent_depth = stack.last().map_or(ROOT_DEPTH, |&top| depths[top]);

    if parent_depth < depths[i] {
      match stack.last() {
        Some(&top) => children[top].push(i),
        None => roots.push(i),
      }
      stack.push(i);
      i += 1;
    } else if stack.pop().is_none() {
      // Only the virtual root is left and it cannot be popped
      roots.push(i);
      i += 1;
    }
  }

  let mut slots: Vec<Option<Heading>> = flat.into_iter().map(Some).collect();
  roots
    .into_iter()
    .filter_map(|index| assemble(index, &children, &mut slots))
    .collect()
}

/// Move heading `index` out of `slots`, attaching its subtree.
fn assemble(
  index: usize,
  children: &[Vec<usize>],
  slots: &mut [Option<Heading>],
) -> Option<Heading> {
  let mut heading = slots.get_mut(index)?.take()?;
  heading.children = children
    .get(index)
    .into_iter()
    .flatten()
    .filter_map(|&child| assemble(child, children, slots))
    .collect();
  Some(heading)
}

/// Render a heading tree as a nested list, prefixed with the section label.
///
/// Entries are not navigable links; each carries its anchor ID in
/// `data-header-id` and the page script scrolls to the matching heading.
#[must_use]
pub fn render_toc(tree: &[Heading], options: &TocOptions) -> String {
  let mut html = String::new();
  let _ = write!(
    html,
    "<h2>{}</h2>",
    html_escape::encode_text(&options.title)
  );
  render_list(tree, &mut html);
  html
}

/// Build the tree for a flat outline and render it.
#[must_use]
pub fn toc_html(flat: &[Heading], options: &TocOptions) -> String {
  render_toc(&build_tree(flat.to_vec()), options)
}

fn render_list(headings: &[Heading], html: &mut String) {
  html.push_str("<ul>");
  for (position, heading) in headings.iter().enumerate() {
    if position > 0 {
      html.push('\n');
    }
    let _ = write!(
      html,
      "<li><a class=\"toc-header level-{} clickable\" data-header-id=\"{}\" \
       href=\"javascript:void(0)\">{}</a>",
      heading.depth,
      html_escape::encode_double_quoted_attribute(&heading.id),
      html_escape::encode_text(&heading.text),
    );
    if !heading.children.is_empty() {
      render_list(&heading.children, html);
    }
    html.push_str("</li>");
  }
  html.push_str("</ul>");
}

#[cfg(test)]
mod tests {
  use super::*;

  fn flat(depths: &[u8]) -> Vec<Heading> {
    depths
      .iter()
      .enumerate()
      .map(|(i, &depth)| Heading::new(depth, format!("h{i}")))
      .collect()
  }

  /// Compact `depth(children...)` rendering of a tree for assertions.
  fn shape(tree: &[Heading]) -> String {
    tree
      .iter()
      .map(|h| {
        if h.children.is_empty() {
          h.depth.to_string()
        } else {
          format!("{}({})", h.depth, shape(&h.children))
        }
      })
      .collect::<Vec<_>>()
      .join(" ")
  }

  #[test]
  fn test_empty_outline() {
    assert!(build_tree(Vec::new()).is_empty());
  }

  #[test]
  fn test_mixed_depths() {
    let tree = build_tree(flat(&[1, 2, 3, 3, 2, 3, 1]));
    assert_eq!(shape(&tree), "1(2(3 3) 2(3)) 1");
  }

  #[test]
  fn test_first_group_nests_rest_are_siblings() {
    let tree = build_tree(flat(&[2, 3, 3, 3, 2, 2, 2]));
    assert_eq!(shape(&tree), "2(3 3 3) 2 2 2");
    assert_eq!(tree[0].children.len(), 3);
  }

  #[test]
  fn test_depth_gap_nests() {
    let tree = build_tree(flat(&[2, 4, 3]));
    assert_eq!(shape(&tree), "2(4 3)");
  }

  #[test]
  fn test_starting_deep_then_shallower() {
    let tree = build_tree(flat(&[3, 2, 3]));
    assert_eq!(shape(&tree), "3 2(3)");
  }

  #[test]
  fn test_depth_zero_never_nests() {
    let tree = build_tree(flat(&[0, 2, 0, 3]));
    assert_eq!(shape(&tree), "0 2 0 3");
  }

  #[test]
  fn test_preserves_document_order() {
    let tree = build_tree(flat(&[2, 3, 2]));
    assert_eq!(tree[0].text, "h0");
    assert_eq!(tree[0].children[0].text, "h1");
    assert_eq!(tree[1].text, "h2");
  }

  #[test]
  fn test_render_nested_list() {
    let tree = build_tree(vec![
      Heading::new(2, "Intro"),
      Heading::new(3, "Details"),
      Heading::new(2, "Usage"),
    ]);
    let html = render_toc(&tree, &TocOptions::default());

    let intro = Heading::new(2, "Intro");
    let details = Heading::new(3, "Details");
    let usage = Heading::new(2, "Usage");
    let expected = format!(
      "<h2>Contents</h2><ul><li><a class=\"toc-header level-2 clickable\" \
       data-header-id=\"{}\" href=\"javascript:void(0)\">Intro</a><ul><li><a \
       class=\"toc-header level-3 clickable\" data-header-id=\"{}\" \
       href=\"javascript:void(0)\">Details</a></li></ul></li>\n<li><a \
       class=\"toc-header level-2 clickable\" data-header-id=\"{}\" \
       href=\"javascript:void(0)\">Usage</a></li></ul>",
      intro.id, details.id, usage.id
    );
    assert_eq!(html, expected);
  }

  #[test]
  fn test_render_escapes_text_and_title() {
    let options = TocOptions {
      title: "A & B".to_string(),
    };
    let html = render_toc(&[Heading::new(2, "<script>x</script>")], &options);
    assert!(html.starts_with("<h2>A &amp; B</h2>"));
    assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
    assert!(!html.contains("<script>"));
  }

  #[test]
  fn test_toc_html_from_flat() {
    let html = toc_html(
      &[Heading::new(2, "Intro"), Heading::new(3, "Intro")],
      &TocOptions::default(),
    );
    let id = Heading::new(2, "Intro").id;
    assert_eq!(html.matches(&format!("data-header-id=\"{id}\"")).count(), 2);
  }
}
