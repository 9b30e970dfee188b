//! Static site generation.
//!
//! Output layout:
//!
//! - `index.html`: the page shell
//! - `assets/`: stylesheet and page script
//! - `pages/<path>.json`: a [`Page`](super::Page) for every Markdown file
//! - `sidebars/<path>.json`: a [`Sidebar`](super::Sidebar) for every file
//!   named like the configured sidebar
//! - every other file of the input directory, copied as is
use std::{
  fs,
  path::{Path, PathBuf},
};

use color_eyre::eyre::{Context, Result};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use log::{debug, info};
use marknote_commonmark::{collect_markdown_files, utils::is_markdown_path};
use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

use super::{Site, shell::render_shell};
use crate::{config::Config, error::MarknoteError, source::DirectorySource};

/// What a build produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
  pub pages:    usize,
  pub sidebars: usize,
  pub copied:   usize,
}

/// Route path of a file below the input directory, with `/` separators.
fn route_of(input_dir: &Path, file: &Path) -> Option<String> {
  let relative = file.strip_prefix(input_dir).ok()?;
  let parts: Vec<String> = relative
    .components()
    .map(|c| c.as_os_str().to_string_lossy().into_owned())
    .collect();
  Some(format!("/{}", parts.join("/")))
}

fn is_sidebar(config: &Config, file: &Path) -> bool {
  let sidebar_name = Path::new(&config.sidebar).file_name();
  sidebar_name.is_some() && file.file_name() == sidebar_name
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), MarknoteError> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(path, serde_json::to_vec(value)?)?;
  Ok(())
}

/// JSON output path for a route below `dir`: `/a/b.md` -> `dir/a/b.md.json`.
fn json_path(dir: &Path, route: &str) -> PathBuf {
  dir.join(format!("{}.json", route.trim_start_matches('/')))
}

/// Build the site described by `config` into `config.output_dir`.
pub fn build_site(config: &Config) -> Result<BuildSummary> {
  let output_dir = &config.output_dir;
  fs::create_dir_all(output_dir).wrap_err_with(|| {
    format!("Failed to create output directory {}", output_dir.display())
  })?;
  info!("Output directory: {}", output_dir.display());

  fs::write(output_dir.join("index.html"), render_shell(config)?)
    .wrap_err("Failed to write index.html")?;

  let assets_dir = output_dir.join("assets");
  fs::create_dir_all(&assets_dir)?;
  for (name, content) in marknote_templates::ASSETS {
    fs::write(assets_dir.join(name), content)
      .wrap_err_with(|| format!("Failed to write asset {name}"))?;
  }

  let files = collect_markdown_files(&config.input_dir);
  info!("Found {} markdown files", files.len());

  let site = Site::new(config);
  let source = DirectorySource::new(&config.input_dir);
  let pages_dir = output_dir.join("pages");
  let sidebars_dir = output_dir.join("sidebars");

  let progress = ProgressBar::new(files.len() as u64).with_style(
    ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
      .unwrap_or_else(|_| ProgressStyle::default_bar()),
  );

  let sidebars = files
    .par_iter()
    .progress_with(progress.clone())
    .map(|file| -> Result<usize> {
      let Some(route) = route_of(&config.input_dir, file) else {
        return Ok(0);
      };
      debug!("Rendering {route}");

      let page = site.page(&source, &route);
      write_json(&json_path(&pages_dir, &route), &page)
        .wrap_err_with(|| format!("Failed to write page for {route}"))?;

      if is_sidebar(config, file) {
        let sidebar = site.sidebar(&source, &route);
        write_json(&json_path(&sidebars_dir, &route), &sidebar)
          .wrap_err_with(|| format!("Failed to write sidebar for {route}"))?;
        return Ok(1);
      }
      Ok(0)
    })
    .try_reduce(|| 0, |a, b| Ok(a + b))?;
  progress.finish_and_clear();

  let copied = copy_static_files(config)?;

  Ok(BuildSummary {
    pages: files.len(),
    sidebars,
    copied,
  })
}

/// Copy everything that is not Markdown (images, attachments) so relative
/// links in documents keep working. The output directory is skipped when it
/// lives inside the input directory.
fn copy_static_files(config: &Config) -> Result<usize> {
  let output_dir = config
    .output_dir
    .canonicalize()
    .unwrap_or_else(|_| config.output_dir.clone());
  let mut copied = 0;

  let entries = WalkDir::new(&config.input_dir)
    .into_iter()
    .filter_entry(|entry| {
      let hidden = entry.depth() > 0
        && entry.file_name().to_string_lossy().starts_with('.');
      let is_output = entry
        .path()
        .canonicalize()
        .is_ok_and(|path| path == output_dir);
      !hidden && !is_output
    })
    .filter_map(Result::ok);

  for entry in entries {
    let path = entry.path();
    if !entry.file_type().is_file() || is_markdown_path(path) {
      continue;
    }
    let Ok(relative) = path.strip_prefix(&config.input_dir) else {
      continue;
    };
    let target = config.output_dir.join(relative);
    if let Some(parent) = target.parent() {
      fs::create_dir_all(parent)?;
    }
    fs::copy(path, &target)
      .wrap_err_with(|| format!("Failed to copy {}", path.display()))?;
    copied += 1;
  }

  Ok(copied)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_route_of() {
    assert_eq!(
      route_of(Path::new("notes"), Path::new("notes/guide/a.md")).as_deref(),
      Some("/guide/a.md")
    );
    assert_eq!(route_of(Path::new("notes"), Path::new("other/a.md")), None);
  }

  #[test]
  fn test_json_path() {
    assert_eq!(
      json_path(Path::new("out/pages"), "/guide/a.md"),
      PathBuf::from("out/pages/guide/a.md.json")
    );
  }

  #[test]
  fn test_is_sidebar_matches_file_name() {
    let config = Config::default();
    assert!(is_sidebar(&config, Path::new("notes/SIDEBAR.md")));
    assert!(is_sidebar(&config, Path::new("notes/api/SIDEBAR.md")));
    assert!(!is_sidebar(&config, Path::new("notes/README.md")));
  }
}
