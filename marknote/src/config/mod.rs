pub mod templates;

use std::{
  fs,
  path::{Path, PathBuf},
};

use color_eyre::eyre::{Result, WrapErr, bail, eyre};
use marknote_commonmark::{
  MarkdownOptions,
  MarkdownOptionsBuilder,
  SidebarLinks,
  TocOptions,
  processor::DEFAULT_FALLBACK,
  toc::DEFAULT_TOC_TITLE,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cli::{Cli, Commands};

/// File names looked up in the working directory when no `--config-file` is
/// given, in order.
const CONFIG_FILENAMES: &[&str] =
  &["marknote.toml", ".marknote.toml", "marknote.json", ".marknote.json"];

fn default_input_dir() -> PathBuf {
  PathBuf::from(".")
}

fn default_output_dir() -> PathBuf {
  PathBuf::from("build")
}

fn default_site_name() -> String {
  "marknote".to_string()
}

fn default_base_path() -> String {
  "/".to_string()
}

fn default_index_page() -> String {
  "README.md".to_string()
}

fn default_sidebar() -> String {
  "SIDEBAR.md".to_string()
}

fn default_toc_title() -> String {
  DEFAULT_TOC_TITLE.to_string()
}

fn default_fallback_message() -> String {
  DEFAULT_FALLBACK.to_string()
}

const fn default_true() -> bool {
  true
}

const fn default_outline_min_depth() -> u8 {
  2
}

const fn default_outline_max_depth() -> u8 {
  3
}

fn default_bind() -> String {
  "127.0.0.1:3000".to_string()
}

/// Configuration options for marknote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
  /// Directory containing the markdown notes
  #[serde(default = "default_input_dir")]
  pub input_dir: PathBuf,

  /// Output directory for generated sites
  #[serde(default = "default_output_dir")]
  pub output_dir: PathBuf,

  /// Name shown in the page title and header
  #[serde(default = "default_site_name")]
  pub site_name: String,

  /// Public URL of the site, used to tell internal from external links
  #[serde(default)]
  pub site_url: Option<String>,

  /// Path the site is served from
  #[serde(default = "default_base_path")]
  pub base_path: String,

  /// Document shown when a route names no page
  #[serde(default = "default_index_page")]
  pub index_page: String,

  /// Sidebar document used when a route names no sidebar
  #[serde(default = "default_sidebar")]
  pub sidebar: String,

  /// Label rendered above tables of contents
  #[serde(default = "default_toc_title")]
  pub toc_title: String,

  /// Content shown for missing or unrenderable documents
  #[serde(default = "default_fallback_message")]
  pub fallback_message: String,

  /// Whether to enable GitHub Flavored Markdown
  #[serde(default = "default_true")]
  pub gfm: bool,

  /// Shallowest heading depth in tables of contents
  #[serde(default = "default_outline_min_depth")]
  pub outline_min_depth: u8,

  /// Deepest heading depth in tables of contents
  #[serde(default = "default_outline_max_depth")]
  pub outline_max_depth: u8,

  /// Number of threads to use for parallel processing
  #[serde(default)]
  pub jobs: Option<usize>,

  /// Address the development server listens on
  #[serde(default = "default_bind")]
  pub bind: String,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      input_dir:         default_input_dir(),
      output_dir:        default_output_dir(),
      site_name:         default_site_name(),
      site_url:          None,
      base_path:         default_base_path(),
      index_page:        default_index_page(),
      sidebar:           default_sidebar(),
      toc_title:         default_toc_title(),
      fallback_message:  default_fallback_message(),
      gfm:               true,
      outline_min_depth: default_outline_min_depth(),
      outline_max_depth: default_outline_max_depth(),
      jobs:              None,
      bind:              default_bind(),
    }
  }
}

/// Recursively merge `overlay` into `base`; objects merge key by key, any
/// other value replaces.
fn merge_values(base: &mut Value, overlay: Value) {
  match (base, overlay) {
    (Value::Object(base), Value::Object(overlay)) => {
      for (key, value) in overlay {
        match base.get_mut(&key) {
          Some(existing) => merge_values(existing, value),
          None => {
            base.insert(key, value);
          },
        }
      }
    },
    (base, overlay) => *base = overlay,
  }
}

/// Parse a `KEY=VALUE` override. The value is read as a TOML value when
/// possible (`gfm=false`, `jobs=4`) and as a plain string otherwise.
fn parse_override(raw: &str) -> Result<(String, Value)> {
  let (key, value) = raw
    .split_once('=')
    .ok_or_else(|| eyre!("Invalid override '{raw}', expected KEY=VALUE"))?;
  let key = key.trim();
  if key.is_empty() {
    bail!("Invalid override '{raw}', key is empty");
  }

  let value = value.trim();
  let parsed = toml::from_str::<toml::Table>(&format!("v = {value}"))
    .ok()
    .and_then(|mut table| table.remove("v"))
    .and_then(|v| serde_json::to_value(v).ok())
    .unwrap_or_else(|| Value::String(value.to_string()));

  Ok((key.to_string(), parsed))
}

impl Config {
  /// Read a configuration file as a generic value.
  /// Only TOML and JSON are supported.
  fn read_value(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).wrap_err_with(|| {
      format!("Failed to read config file: {}", path.display())
    })?;

    let ext = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase)
      .ok_or_else(|| {
        eyre!("Config file has no extension: {}", path.display())
      })?;

    match ext.as_str() {
      "json" => {
        serde_json::from_str(&content).wrap_err_with(|| {
          format!("Failed to parse JSON config from {}", path.display())
        })
      },
      "toml" => {
        toml::from_str(&content).wrap_err_with(|| {
          format!("Failed to parse TOML config from {}", path.display())
        })
      },
      _ => {
        Err(eyre!(
          "Unsupported config file format: {}",
          path.display()
        ))
      },
    }
  }

  /// Create a new configuration from a file
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let value = Self::read_value(path)?;
    serde_json::from_value(value).wrap_err_with(|| {
      format!("Invalid configuration in {}", path.display())
    })
  }

  /// Load config from files and CLI arguments
  pub fn load(cli: &Cli) -> Result<Self> {
    Self::load_with(cli, Self::find_config_file())
  }

  /// Like [`Self::load`], with the discovered config file given explicitly.
  /// The discovered file is only used when no `--config-file` was passed.
  pub fn load_with(cli: &Cli, discovered: Option<PathBuf>) -> Result<Self> {
    let mut merged = Value::Object(serde_json::Map::new());

    if cli.config_files.is_empty() {
      if let Some(path) = discovered {
        log::info!("Using discovered config file: {}", path.display());
        merge_values(&mut merged, Self::read_value(&path)?);
      }
    } else {
      for path in &cli.config_files {
        let value = Self::read_value(path).wrap_err_with(|| {
          format!("Failed to load config from {}", path.display())
        })?;
        merge_values(&mut merged, value);
      }
    }

    for raw in &cli.config_overrides {
      let (key, value) = parse_override(raw)?;
      log::debug!("Config override: {key} = {value}");
      let mut overlay = serde_json::Map::new();
      overlay.insert(key, value);
      merge_values(&mut merged, Value::Object(overlay));
    }

    let mut config: Self =
      serde_json::from_value(merged).wrap_err("Invalid configuration")?;
    config.merge_with_cli(cli);
    config.validate()?;
    Ok(config)
  }

  /// Merge CLI arguments into this config, prioritizing CLI values when
  /// present
  pub fn merge_with_cli(&mut self, cli: &Cli) {
    match &cli.command {
      Commands::Build {
        input_dir,
        output_dir,
        jobs,
        site_name,
      } => {
        if let Some(input_dir) = input_dir {
          self.input_dir.clone_from(input_dir);
        }
        if let Some(output_dir) = output_dir {
          self.output_dir.clone_from(output_dir);
        }
        self.jobs = jobs.or(self.jobs);
        if let Some(site_name) = site_name {
          self.site_name.clone_from(site_name);
        }
      },
      Commands::Render { input_dir, .. } => {
        if let Some(input_dir) = input_dir {
          self.input_dir.clone_from(input_dir);
        }
      },
      Commands::Serve { input_dir, bind } => {
        if let Some(input_dir) = input_dir {
          self.input_dir.clone_from(input_dir);
        }
        if let Some(bind) = bind {
          self.bind.clone_from(bind);
        }
      },
      Commands::Init { .. } => {},
    }
  }

  /// Search for config files in the working directory
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    CONFIG_FILENAMES
      .iter()
      .map(|filename| current_dir.join(filename))
      .find(|path| path.is_file())
  }

  /// Validate the configuration, reporting every problem at once
  pub fn validate(&self) -> Result<()> {
    let mut errors = Vec::new();

    if !self.input_dir.is_dir() {
      errors.push(format!(
        "Input directory does not exist: {}",
        self.input_dir.display()
      ));
    }

    if !(self.base_path.starts_with('/') && self.base_path.ends_with('/')) {
      errors.push(format!(
        "Base path must start and end with '/': {}",
        self.base_path
      ));
    }

    if !(1..=6).contains(&self.outline_min_depth)
      || !(1..=6).contains(&self.outline_max_depth)
      || self.outline_min_depth > self.outline_max_depth
    {
      errors.push(format!(
        "Invalid outline depths {}..={}, expected 1 <= min <= max <= 6",
        self.outline_min_depth, self.outline_max_depth
      ));
    }

    if self.index_page.trim().is_empty() {
      errors.push("Index page must not be empty".to_string());
    }

    if self.sidebar.trim().is_empty() {
      errors.push("Sidebar must not be empty".to_string());
    }

    if let Some(site_url) = &self.site_url {
      match url::Url::parse(site_url) {
        Ok(url) if url.host_str().is_some() => {},
        Ok(_) => errors.push(format!("Site URL has no host: {site_url}")),
        Err(e) => errors.push(format!("Invalid site URL {site_url}: {e}")),
      }
    }

    if self.jobs == Some(0) {
      errors.push("Number of jobs must be at least 1".to_string());
    }

    if !errors.is_empty() {
      return Err(eyre!(
        "Configuration validation errors:\n{}",
        errors.join("\n")
      ));
    }

    Ok(())
  }

  /// Renderer options derived from this configuration
  #[must_use]
  pub fn markdown_options(&self) -> MarkdownOptions {
    MarkdownOptionsBuilder::new()
      .gfm(self.gfm)
      .outline_depths(self.outline_min_depth, self.outline_max_depth)
      .fallback_html(self.fallback_message.clone())
      .build()
  }

  #[must_use]
  pub fn toc_options(&self) -> TocOptions {
    TocOptions {
      title: self.toc_title.clone(),
    }
  }

  /// Host of `site_url`, if one is configured
  #[must_use]
  pub fn site_host(&self) -> Option<String> {
    let url = url::Url::parse(self.site_url.as_deref()?).ok()?;
    url.host_str().map(ToString::to_string)
  }

  /// Link rewriting options for rendered sidebars
  #[must_use]
  pub fn sidebar_links(&self) -> SidebarLinks {
    SidebarLinks {
      sidebar:   route_path(&self.sidebar),
      base_path: self.base_path.clone(),
      site_host: self.site_host(),
    }
  }

  /// Generate a default configuration file with commented explanations
  pub fn generate_default_config(format: &str, path: &Path) -> Result<()> {
    let config_content = templates::get_template(format)?;

    fs::write(path, config_content).wrap_err_with(|| {
      format!("Failed to write default config to {}", path.display())
    })?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }
}

/// Document path as it appears in a route: always with a leading `/`.
#[must_use]
pub fn route_path(path: &str) -> String {
  format!("/{}", path.trim_start_matches('/'))
}
