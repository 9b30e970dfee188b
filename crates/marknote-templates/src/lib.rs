use std::collections::HashMap;

/// Single-page shell, rendered with tera.
pub const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

pub const DEFAULT_CSS: &str = include_str!("../templates/default.css");
pub const MAIN_JS: &str = include_str!("../templates/main.js");

/// Files that are copied verbatim into `assets/`.
pub const ASSETS: &[(&str, &str)] =
  &[("default.css", DEFAULT_CSS), ("main.js", MAIN_JS)];

#[must_use]
pub fn all_templates() -> HashMap<&'static str, &'static str> {
  let mut templates = HashMap::new();
  templates.insert("index.html", INDEX_TEMPLATE);
  templates.insert("default.css", DEFAULT_CSS);
  templates.insert("main.js", MAIN_JS);
  templates
}
