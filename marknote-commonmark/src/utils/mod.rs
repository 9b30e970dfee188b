pub mod anchor;

use std::path::{Path, PathBuf};

use comrak::nodes::{AstNode, NodeValue, Sourcepos};
use log::trace;
use walkdir::WalkDir;

/// Extract all inline text from a heading (or any inline container) node.
///
/// Emphasis, links and similar wrappers contribute their text, code spans
/// contribute their literal, raw inline HTML and images contribute nothing.
/// Line breaks collapse to a single space. Surrounding whitespace, such as
/// the space left behind by a leading image, is trimmed.
#[must_use]
pub fn extract_inline_text<'a>(node: &'a AstNode<'a>) -> String {
  let mut text = String::new();
  collect_inline_text(node, &mut text);
  text.trim().to_string()
}

fn collect_inline_text<'a>(node: &'a AstNode<'a>, text: &mut String) {
  for child in node.children() {
    match &child.data.borrow().value {
      NodeValue::Text(t) => text.push_str(t),
      NodeValue::Code(t) => text.push_str(&t.literal),
      NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
      NodeValue::Link(..)
      | NodeValue::Emph
      | NodeValue::Strong
      | NodeValue::Strikethrough
      | NodeValue::Superscript
      | NodeValue::Subscript => collect_inline_text(child, text),
      NodeValue::HtmlInline(_) | NodeValue::Image(..) => {},
      _ => {},
    }
  }
}

/// Concatenated literal text of a node, but only if every child is plain
/// text. Returns `None` as soon as any other inline node is present.
#[must_use]
pub fn plain_text_content<'a>(node: &'a AstNode<'a>) -> Option<String> {
  let mut text = String::new();
  for child in node.children() {
    match &child.data.borrow().value {
      NodeValue::Text(t) => text.push_str(t),
      _ => return None,
    }
  }
  Some(text)
}

/// Source text covered by `pos`: the lines it spans, starting at its start
/// column. Returns `None` if the position lies outside `source`.
#[must_use]
pub fn source_text(source: &str, pos: Sourcepos) -> Option<String> {
  let first = pos.start.line.checked_sub(1)?;
  let count = pos.end.line.checked_sub(first)?;
  let mut lines = source.lines().skip(first).take(count);

  let start = pos.start.column.checked_sub(1)?;
  let mut text = lines.next()?.get(start..)?.to_string();
  for line in lines {
    text.push('\n');
    text.push_str(line);
  }
  Some(text)
}

/// Return true if the path looks like a Markdown document.
#[must_use]
pub fn is_markdown_path(path: &Path) -> bool {
  path
    .extension()
    .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

/// Collect all markdown files below `input_dir`, sorted for deterministic
/// output.
pub fn collect_markdown_files(input_dir: &Path) -> Vec<PathBuf> {
  let mut files: Vec<PathBuf> = WalkDir::new(input_dir)
    .follow_links(true)
    .into_iter()
    .filter_map(Result::ok)
    .map(walkdir::DirEntry::into_path)
    .filter(|path| path.is_file() && is_markdown_path(path))
    .collect();
  files.sort();

  trace!("Found {} markdown files to process", files.len());
  files
}
