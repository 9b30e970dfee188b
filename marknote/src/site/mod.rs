//! Site assembly: pages, sidebars and the page shell.
pub mod build;
pub mod route;
pub mod shell;

use log::{debug, warn};
use marknote_commonmark::{
  MarkdownProcessor,
  RenderResult,
  SidebarLinks,
  TocOptions,
  process_with_recovery,
  toc_html,
};
use serde::{Deserialize, Serialize};

use crate::{config::Config, source::DocumentSource};

/// A rendered page as the shell script consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
  /// Sanitized document HTML.
  pub html:     String,
  /// Flat outline of the document.
  pub headings: Vec<marknote_commonmark::Heading>,
  /// Table of contents for the placeholder, present only when the document
  /// has both a placeholder and outline headings.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub toc:      Option<String>,
}

/// A rendered sidebar with its links already turned into routes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sidebar {
  pub html: String,
}

/// Everything needed to turn documents into pages. Cheap to share across
/// threads; every render is independent.
#[derive(Debug, Clone)]
pub struct Site {
  processor: MarkdownProcessor,
  toc:       TocOptions,
  links:     SidebarLinks,
  fallback:  String,
}

impl Site {
  #[must_use]
  pub fn new(config: &Config) -> Self {
    Self {
      processor: MarkdownProcessor::new(config.markdown_options()),
      toc:       config.toc_options(),
      links:     config.sidebar_links(),
      fallback:  config.fallback_message.clone(),
    }
  }

  /// Load and render one document.
  ///
  /// A missing document, one the source refuses, an empty one and one that
  /// fails to render all yield `fallback` with no headings.
  pub fn render_post(
    &self,
    source: &dyn DocumentSource,
    path: &str,
    fallback: &str,
  ) -> RenderResult {
    match source.read(path) {
      Ok(Some(markdown)) => {
        process_with_recovery(&self.processor, &markdown, fallback)
      },
      Ok(None) => {
        debug!("Document not found: {path}");
        RenderResult::fallback(fallback)
      },
      Err(e) => {
        warn!("Failed to load {path}: {e}");
        RenderResult::fallback(fallback)
      },
    }
  }

  /// Render a page, with its table of contents when it asks for one.
  pub fn page(&self, source: &dyn DocumentSource, path: &str) -> Page {
    let result = self.render_post(source, path, &self.fallback);

    let toc = (result.toc_placeholder && !result.headings.is_empty())
      .then(|| toc_html(&result.headings, &self.toc));

    Page {
      html: result.html,
      headings: result.headings,
      toc,
    }
  }

  /// Render a sidebar document. Sidebars fall back to nothing rather than to
  /// the page fallback message.
  pub fn sidebar(&self, source: &dyn DocumentSource, path: &str) -> Sidebar {
    let result = self.render_post(source, path, "");
    match self.links.rewrite(&result.html) {
      Ok(html) => Sidebar { html },
      Err(e) => {
        warn!("Failed to rewrite sidebar links in {path}: {e}");
        Sidebar::default()
      },
    }
  }
}
