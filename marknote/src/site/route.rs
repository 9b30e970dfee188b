//! Hash routes: `#/guide/intro.md?sidebar=/guide/SIDEBAR.md`.
use marknote_commonmark::sidebar::SIDEBAR_PARAM;
use serde::Serialize;
use url::form_urlencoded;

use crate::config::route_path;

/// A page and the sidebar to show next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
  pub page:    String,
  pub sidebar: String,
}

impl Route {
  /// Parse a location hash. The leading `#` is optional. An empty path
  /// selects `index_page`, a missing `sidebar` query parameter selects
  /// `default_sidebar`. Both come back as route paths with a leading `/`.
  #[must_use]
  pub fn parse(hash: &str, index_page: &str, default_sidebar: &str) -> Self {
    let hash = hash.strip_prefix('#').unwrap_or(hash);
    let (path, query) = hash.split_once('?').unwrap_or((hash, ""));

    let page = if path.trim_start_matches('/').is_empty() {
      route_path(index_page)
    } else {
      route_path(path)
    };

    let sidebar = form_urlencoded::parse(query.as_bytes())
      .find(|(key, _)| key == SIDEBAR_PARAM)
      .map(|(_, value)| value.into_owned())
      .filter(|value| !value.is_empty())
      .map_or_else(|| route_path(default_sidebar), |value| route_path(&value));

    Self { page, sidebar }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(hash: &str) -> Route {
    Route::parse(hash, "README.md", "SIDEBAR.md")
  }

  #[test]
  fn test_empty_hash_uses_defaults() {
    for hash in ["", "#", "#/", "#?"] {
      assert_eq!(parse(hash), Route {
        page:    "/README.md".to_string(),
        sidebar: "/SIDEBAR.md".to_string(),
      });
    }
  }

  #[test]
  fn test_page_and_sidebar() {
    assert_eq!(parse("#/guide/intro.md?sidebar=%2Fguide%2FSIDEBAR.md"), Route {
      page:    "/guide/intro.md".to_string(),
      sidebar: "/guide/SIDEBAR.md".to_string(),
    });
  }

  #[test]
  fn test_other_query_params_ignored() {
    let route = parse("guide.md?x=1&sidebar=NAV.md");
    assert_eq!(route.page, "/guide.md");
    assert_eq!(route.sidebar, "/NAV.md");
  }
}
