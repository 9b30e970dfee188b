//! HTML sanitization for rendered documents.
//!
//! Rendered Markdown may carry arbitrary inline HTML from the author. Before
//! it reaches a page it goes through an `ammonia` allow-list that keeps the
//! structure the renderer produces (heading IDs, the TOC placeholder, code
//! block language classes, task list checkboxes) and drops everything that
//! can execute: scripts, styles, event handler attributes and `javascript:`
//! URLs. Removal is silent.

/// Tags allowed on top of ammonia's defaults.
const EXTRA_TAGS: &[&str] = &["input", "section"];

/// Attributes allowed on every element.
const GENERIC_ATTRIBUTES: &[&str] = &["id", "class"];

/// Attributes allowed on task list checkboxes.
const INPUT_ATTRIBUTES: &[&str] = &["type", "checked", "disabled"];

/// The allow-list used by [`sanitize`], for callers that want to extend it.
#[must_use]
pub fn sanitizer() -> ammonia::Builder<'static> {
  let mut builder = ammonia::Builder::default();
  builder
    .add_tags(EXTRA_TAGS)
    .add_generic_attributes(GENERIC_ATTRIBUTES)
    .add_tag_attributes("a", &["title"])
    .add_tag_attributes("input", INPUT_ATTRIBUTES);
  builder
}

/// Remove unsafe markup from rendered HTML.
#[must_use]
pub fn sanitize(html: &str) -> String {
  sanitizer().clean(html).to_string()
}
