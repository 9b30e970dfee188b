//! Sidebar link rewriting.
//!
//! The sidebar is an ordinary rendered document whose links point at other
//! documents. In the single-page shell those links have to become hash routes
//! (`{base_path}#/{path}?sidebar={sidebar}`) so navigation keeps the current
//! sidebar, while links to other hosts open in a new tab.
use log::trace;
use markup5ever::local_name;
use tendril::TendrilSink;
use url::Url;

use crate::error::PipelineResult;

/// Origin relative links are resolved against. Only its path is ever used.
const LOCAL_ORIGIN: &str = "http://marknote.invalid/";

/// Query parameter carrying the sidebar document in a hash route.
pub const SIDEBAR_PARAM: &str = "sidebar";

/// How sidebar links are rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarLinks {
  /// Sidebar document added to internal links that don't name one.
  pub sidebar:   String,
  /// Path the single-page shell is served from.
  pub base_path: String,
  /// Host of the deployed site; absolute links to it count as internal.
  pub site_host: Option<String>,
}

impl Default for SidebarLinks {
  fn default() -> Self {
    Self {
      sidebar:   "/SIDEBAR.md".to_string(),
      base_path: "/".to_string(),
      site_host: None,
    }
  }
}

/// What to do with one link.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LinkTarget {
  /// Leave the link alone.
  Keep,
  /// Open in a new tab.
  External,
  /// Replace `href` with a hash route.
  Route(String),
}

impl SidebarLinks {
  fn classify(&self, href: &str) -> LinkTarget {
    if href.is_empty() || href.starts_with('#') {
      return LinkTarget::Keep;
    }

    let url = match Url::parse(href) {
      Ok(url) => {
        let same_host = matches!(
          (url.host_str(), self.site_host.as_deref()),
          (Some(host), Some(site)) if host.eq_ignore_ascii_case(site)
        );
        if !same_host {
          return LinkTarget::External;
        }
        url
      },
      Err(url::ParseError::RelativeUrlWithoutBase) => {
        match Url::parse(LOCAL_ORIGIN).and_then(|base| base.join(href)) {
          Ok(url) => url,
          Err(_) => return LinkTarget::Keep,
        }
      },
      Err(_) => return LinkTarget::Keep,
    };

    LinkTarget::Route(self.route_for(url))
  }

  fn route_for(&self, mut url: Url) -> String {
    let has_sidebar = url.query_pairs().any(|(key, _)| key == SIDEBAR_PARAM);
    if !has_sidebar {
      url.query_pairs_mut().append_pair(SIDEBAR_PARAM, &self.sidebar);
    }
    format!(
      "{}#{}?{}",
      self.base_path,
      url.path(),
      url.query().unwrap_or_default()
    )
  }

  /// Rewrite every link in a rendered sidebar fragment.
  ///
  /// # Errors
  ///
  /// Returns an error if the rewritten fragment cannot be serialized.
  pub fn rewrite(&self, html: &str) -> PipelineResult<String> {
    let document = kuchikikiki::parse_html().one(html);

    if let Ok(links) = document.select("a[href]") {
      for link in links {
        let mut attributes = link.attributes.borrow_mut();
        let href = attributes
          .get(local_name!("href"))
          .map(ToString::to_string)
          .unwrap_or_default();

        match self.classify(&href) {
          LinkTarget::Keep => {},
          LinkTarget::External => {
            attributes.insert(local_name!("target"), "_blank".to_string());
          },
          LinkTarget::Route(route) => {
            trace!("Sidebar link {href} -> {route}");
            attributes.insert(local_name!("href"), route);
          },
        }
      }
    }

    let mut out = Vec::new();
    if let Ok(body) = document.select_first("body") {
      for child in body.as_node().children() {
        child.serialize(&mut out)?;
      }
    }
    Ok(String::from_utf8(out)?)
  }
}

/// Rewrite sidebar links with the given options.
///
/// # Errors
///
/// Returns an error if the rewritten fragment cannot be serialized.
pub fn rewrite_links(html: &str, links: &SidebarLinks) -> PipelineResult<String> {
  links.rewrite(html)
}

#[cfg(test)]
mod tests {
  use kuchikikiki::NodeRef;

  use super::*;

  fn first_link(html: &str) -> Option<NodeRef> {
    let document = kuchikikiki::parse_html().one(html);
    document
      .select_first("a")
      .ok()
      .map(|link| link.as_node().clone())
  }

  fn attr(node: &NodeRef, name: &str) -> Option<String> {
    node
      .as_element()
      .and_then(|e| e.attributes.borrow().get(name).map(ToString::to_string))
  }

  fn rewritten(href: &str, links: &SidebarLinks) -> NodeRef {
    let html = rewrite_links(&format!(r#"<p><a href="{href}">x</a></p>"#), links)
      .expect("rewrite should succeed");
    first_link(&html).expect("link should survive")
  }

  #[test]
  fn test_relative_link_becomes_route() {
    let link = rewritten("guide/install.md", &SidebarLinks::default());
    assert_eq!(
      attr(&link, "href").as_deref(),
      Some("/#/guide/install.md?sidebar=%2FSIDEBAR.md")
    );
    assert_eq!(attr(&link, "target"), None);
  }

  #[test]
  fn test_existing_sidebar_param_is_kept() {
    let link =
      rewritten("/api.md?sidebar=/API_SIDEBAR.md", &SidebarLinks::default());
    assert_eq!(
      attr(&link, "href").as_deref(),
      Some("/#/api.md?sidebar=/API_SIDEBAR.md")
    );
  }

  #[test]
  fn test_base_path_prefix() {
    let links = SidebarLinks {
      base_path: "/docs/".to_string(),
      ..SidebarLinks::default()
    };
    let link = rewritten("/a.md", &links);
    assert_eq!(
      attr(&link, "href").as_deref(),
      Some("/docs/#/a.md?sidebar=%2FSIDEBAR.md")
    );
  }

  #[test]
  fn test_external_link_opens_new_tab() {
    let link = rewritten("https://example.com/page", &SidebarLinks::default());
    assert_eq!(
      attr(&link, "href").as_deref(),
      Some("https://example.com/page")
    );
    assert_eq!(attr(&link, "target").as_deref(), Some("_blank"));
  }

  #[test]
  fn test_same_host_absolute_link_is_internal() {
    let links = SidebarLinks {
      site_host: Some("notes.example.com".to_string()),
      ..SidebarLinks::default()
    };
    let link = rewritten("https://notes.example.com/b.md", &links);
    assert_eq!(
      attr(&link, "href").as_deref(),
      Some("/#/b.md?sidebar=%2FSIDEBAR.md")
    );
  }

  #[test]
  fn test_fragment_links_untouched() {
    let link = rewritten("#top", &SidebarLinks::default());
    assert_eq!(attr(&link, "href").as_deref(), Some("#top"));
  }
}
