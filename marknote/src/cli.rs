use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for marknote
#[derive(Parser, Debug)]
#[command(author, version, about = "marknote: Markdown notes as a site")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times). Later files override earlier ones.
  #[arg(short = 'c', long = "config-file", global = true, action = clap::ArgAction::Append)]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", global = true, action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,
}

/// All supported subcommands for the marknote CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Write a default configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "marknote.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Render a single document to standard output.
  Render {
    /// Document path relative to the input directory, or a hash route such
    /// as `#/guide.md?sidebar=/GUIDE.md`.
    target: String,

    /// Directory containing the markdown files.
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Output format.
    #[arg(short = 'F', long, default_value = "html", value_parser = ["html", "json"])]
    format: String,

    /// Sidebar document rendered alongside the page in JSON output,
    /// overriding the route and the configured default.
    #[arg(long)]
    sidebar: Option<String>,
  },

  /// Build a static site from a directory of markdown files.
  Build {
    /// Path to the directory containing markdown files.
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Output directory for the generated site.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Number of threads to use for parallel processing.
    #[arg(short = 'p', long = "jobs")]
    jobs: Option<usize>,

    /// Site name shown in the page title and header.
    #[arg(long)]
    site_name: Option<String>,
  },

  /// Serve a directory of markdown files, rendering pages on request.
  ///
  /// Requires the `serve` feature.
  Serve {
    /// Path to the directory containing markdown files.
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Address to listen on.
    #[arg(short, long)]
    bind: Option<String>,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_cli_definition() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_parse_build() {
    let cli = Cli::try_parse_from([
      "marknote", "-v", "build", "-i", "notes", "-p", "4", "--site-name", "Notes",
    ])
    .expect("arguments should parse");

    assert!(cli.verbose);
    assert!(matches!(
      cli.command,
      Commands::Build {
        ref input_dir,
        jobs: Some(4),
        ref site_name,
        output_dir: None,
      } if input_dir.as_deref() == Some(std::path::Path::new("notes"))
        && site_name.as_deref() == Some("Notes")
    ));
  }

  #[test]
  fn test_render_rejects_unknown_format() {
    assert!(
      Cli::try_parse_from(["marknote", "render", "a.md", "-F", "pdf"]).is_err()
    );
  }
}
