#![allow(
  clippy::expect_used,
  clippy::panic,
  clippy::unwrap_used,
  reason = "Fine in tests"
)]

use std::fs;

use clap::Parser;
use marknote::{cli::Cli, config::Config};
use tempfile::TempDir;

fn cli(args: &[&str]) -> Cli {
  Cli::try_parse_from(std::iter::once("marknote").chain(args.iter().copied()))
    .expect("arguments should parse")
}

#[test]
fn test_generate_and_load_default_configs() {
  let dir = TempDir::new().expect("Failed to create temp dir");

  for format in ["toml", "json"] {
    let path = dir.path().join(format!("marknote.{format}"));
    Config::generate_default_config(format, &path)
      .expect("default config should be written");
    let config = Config::from_file(&path).expect("default config should load");
    assert_eq!(config, Config::default());
  }

  assert!(
    Config::generate_default_config("yaml", &dir.path().join("x.yaml"))
      .is_err()
  );
}

#[test]
fn test_later_config_files_override_earlier() {
  let dir = TempDir::new().expect("Failed to create temp dir");
  let base = dir.path().join("base.toml");
  let local = dir.path().join("local.json");
  fs::write(
    &base,
    format!(
      "input_dir = {:?}\nsite_name = \"Base\"\ntoc_title = \"On this page\"\n",
      dir.path().display().to_string()
    ),
  )
  .unwrap();
  fs::write(&local, r#"{ "site_name": "Local", "gfm": false }"#).unwrap();

  let cli = cli(&[
    "-c",
    base.to_str().unwrap(),
    "-c",
    local.to_str().unwrap(),
    "render",
    "README.md",
  ]);
  let config = Config::load_with(&cli, None).expect("config should load");

  assert_eq!(config.site_name, "Local");
  assert_eq!(config.toc_title, "On this page");
  assert!(!config.gfm);
  assert_eq!(config.input_dir, dir.path());
}

#[test]
fn test_discovered_file_used_without_explicit_files() {
  let dir = TempDir::new().expect("Failed to create temp dir");
  let discovered = dir.path().join("marknote.toml");
  fs::write(&discovered, "site_name = \"Discovered\"\n").unwrap();

  let cli = cli(&["build"]);
  let config =
    Config::load_with(&cli, Some(discovered)).expect("config should load");
  assert_eq!(config.site_name, "Discovered");
}

#[test]
fn test_invalid_config_is_rejected() {
  let dir = TempDir::new().expect("Failed to create temp dir");
  let path = dir.path().join("bad.toml");
  fs::write(&path, "outline_min_depth = 5\noutline_max_depth = 2\n").unwrap();

  let cli = cli(&["-c", path.to_str().unwrap(), "build"]);
  assert!(Config::load_with(&cli, None).is_err());
}

#[test]
fn test_unknown_extension_is_rejected() {
  let dir = TempDir::new().expect("Failed to create temp dir");
  let path = dir.path().join("marknote.yaml");
  fs::write(&path, "site_name: x\n").unwrap();
  assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_config_errors_carry_context_into_eyre()
-> color_eyre::eyre::Result<()> {
  use color_eyre::eyre::WrapErr;

  let dir = TempDir::new().wrap_err("Failed to create temp dir")?;
  let path = dir.path().join("marknote.toml");
  Config::generate_default_config("toml", &path)
    .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
  let config = Config::from_file(&path)?;
  assert_eq!(config, Config::default());

  let missing = dir.path().join("missing.toml");
  let cli = cli(&["-c", missing.to_str().unwrap(), "build"]);
  let err = Config::load_with(&cli, None)
    .wrap_err("Failed to load configuration")
    .expect_err("missing config file should fail");
  let chain: Vec<String> = err.chain().map(ToString::to_string).collect();
  assert_eq!(chain[0], "Failed to load configuration");
  assert!(chain.iter().any(|m| m.contains("missing.toml")));
  Ok(())
}
