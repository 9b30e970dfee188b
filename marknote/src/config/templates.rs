use crate::error::MarknoteError;

/// Default configuration in TOML, commented so a fresh `marknote init`
/// explains itself.
pub const DEFAULT_TOML_TEMPLATE: &str = r#"# marknote configuration

# Directory containing the markdown notes
input_dir = "."

# Output directory for `marknote build`
output_dir = "build"

# Name shown in the page title and header
site_name = "marknote"

# Public URL of the site. Absolute sidebar links to this host stay in the
# site; links to any other host open in a new tab.
# site_url = "https://notes.example.com"

# Path the site is served from; must start and end with "/"
base_path = "/"

# Document shown when the route names no page
index_page = "README.md"

# Sidebar document used when the route names no sidebar
sidebar = "SIDEBAR.md"

# Label rendered above the table of contents
toc_title = "Contents"

# Shown in place of a document that is missing or cannot be rendered
fallback_message = "not found or render markdown failed"

# GitHub Flavored Markdown extensions (tables, task lists, strikethrough)
gfm = true

# Heading depths collected into the table of contents
outline_min_depth = 2
outline_max_depth = 3

# Number of threads to use for `marknote build` (defaults to number of CPU cores)
# jobs = 4

# Address `marknote serve` listens on
bind = "127.0.0.1:3000"
"#;

/// Default configuration in JSON. JSON has no comments, see the TOML
/// template for field descriptions.
pub const DEFAULT_JSON_TEMPLATE: &str = r#"{
  "input_dir": ".",
  "output_dir": "build",
  "site_name": "marknote",
  "base_path": "/",
  "index_page": "README.md",
  "sidebar": "SIDEBAR.md",
  "toc_title": "Contents",
  "fallback_message": "not found or render markdown failed",
  "gfm": true,
  "outline_min_depth": 2,
  "outline_max_depth": 3,
  "bind": "127.0.0.1:3000"
}
"#;

/// Default configuration file content for `format`.
///
/// # Errors
///
/// Returns an error if the format is neither `toml` nor `json`.
pub fn get_template(format: &str) -> Result<&'static str, MarknoteError> {
  match format.to_lowercase().as_str() {
    "toml" => Ok(DEFAULT_TOML_TEMPLATE),
    "json" => Ok(DEFAULT_JSON_TEMPLATE),
    other => {
      Err(MarknoteError::Config(format!(
        "Unsupported config format: {other}"
      )))
    },
  }
}
