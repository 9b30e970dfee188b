use html_escape::encode_double_quoted_attribute as escape;
use marknote_templates::INDEX_TEMPLATE;
use tera::{Context, Tera};

use crate::{config::Config, error::MarknoteError};

/// Render the single-page shell for a site.
///
/// # Errors
///
/// Returns an error if the embedded template fails to parse or render.
pub fn render_shell(config: &Config) -> Result<String, MarknoteError> {
  // Values are escaped here; tera's own escaping would also encode `/`
  let mut tera = Tera::default();
  tera.autoescape_on(Vec::new());
  tera.add_raw_template("index.html", INDEX_TEMPLATE)?;

  let mut context = Context::new();
  context.insert("site_name", &escape(&config.site_name));
  context.insert("base_path", &escape(&config.base_path));
  context.insert("index_page", &escape(&config.index_page));
  context.insert("sidebar", &escape(&config.sidebar));
  context.insert("fallback_message", &escape(&config.fallback_message));

  Ok(tera.render("index.html", &context)?)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_shell_carries_settings() {
    let config = Config {
      site_name: "Field Notes".to_string(),
      base_path: "/notes/".to_string(),
      index_page: "HOME.md".to_string(),
      ..Config::default()
    };
    let html = render_shell(&config).expect("shell should render");

    assert!(html.contains("<title>Field Notes</title>"));
    assert!(html.contains(r#"href="/notes/assets/default.css""#));
    assert!(html.contains(r#"data-index-page="HOME.md""#));
    assert!(html.contains(r#"data-sidebar="SIDEBAR.md""#));
  }

  #[test]
  fn test_shell_escapes_site_name() {
    let config = Config {
      site_name: "<script>x</script>".to_string(),
      ..Config::default()
    };
    let html = render_shell(&config).expect("shell should render");
    assert!(!html.contains("<script>x</script>"));
  }
}
