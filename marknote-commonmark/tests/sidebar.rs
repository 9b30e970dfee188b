#![allow(clippy::expect_used, clippy::panic, reason = "Fine in tests")]
use marknote_commonmark::{
  MarkdownOptions,
  MarkdownProcessor,
  SidebarLinks,
  rewrite_links,
};

fn render_sidebar(markdown: &str, links: &SidebarLinks) -> String {
  let processor = MarkdownProcessor::new(MarkdownOptions::default());
  let html = processor.render_or(markdown, "").html;
  rewrite_links(&html, links).expect("sidebar should rewrite")
}

#[test]
fn test_sidebar_navigation() {
  let html = render_sidebar(
    "- [Home](README.md)\n- [Guide](/guide/intro.md)\n- \
     [Source](https://github.com/example/repo)\n",
    &SidebarLinks::default(),
  );

  assert!(html.contains(r#"href="/#/README.md?sidebar=%2FSIDEBAR.md""#));
  assert!(html.contains(r#"href="/#/guide/intro.md?sidebar=%2FSIDEBAR.md""#));
  assert!(html.contains(r#"href="https://github.com/example/repo""#));
  assert_eq!(html.matches(r#"target="_blank""#).count(), 1);
}

#[test]
fn test_sidebar_custom_file_and_base() {
  let links = SidebarLinks {
    sidebar:   "/api/SIDEBAR.md".to_string(),
    base_path: "/notes/".to_string(),
    site_host: None,
  };
  let html = render_sidebar("[Types](/api/types.md)\n", &links);
  assert!(
    html.contains(r#"href="/notes/#/api/types.md?sidebar=%2Fapi%2FSIDEBAR.md""#),
    "{html}"
  );
}

#[test]
fn test_empty_sidebar_renders_nothing() {
  assert!(render_sidebar("", &SidebarLinks::default()).is_empty());
}
