use std::{
  fs,
  path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate_to};
use clap_mangen::Man;

const BIN_NAME: &str = "marknote";

#[derive(Parser)]
#[command(author, version, about)]
struct Xtask {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Generate shell completions and the manpage for packaging
  Dist {
    /// Output directory for generated files.
    #[arg(short, long, default_value = "dist")]
    output_dir: PathBuf,

    /// Shells to generate completions for (defaults to all supported).
    #[arg(short, long, value_enum, action = clap::ArgAction::Append)]
    shell: Vec<Shell>,

    /// Skip the manpage.
    #[arg(long)]
    no_manpage: bool,
  },

  /// Write the embedded shell template, script and stylesheet to a
  /// directory, for inspection or customization.
  Templates {
    /// Output directory for the template files.
    #[arg(short, long, default_value = "templates")]
    output_dir: PathBuf,

    /// Overwrite existing files.
    #[arg(long)]
    force: bool,
  },
}

fn main() -> Result<()> {
  match Xtask::parse().command {
    Commands::Dist {
      output_dir,
      shell,
      no_manpage,
    } => {
      let shells = if shell.is_empty() {
        vec![Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell]
      } else {
        shell
      };
      generate_completions(&output_dir, &shells)?;
      if !no_manpage {
        generate_manpage(&output_dir)?;
      }
    },
    Commands::Templates { output_dir, force } => {
      export_templates(&output_dir, force)?;
    },
  }

  Ok(())
}

fn generate_completions(output_dir: &Path, shells: &[Shell]) -> Result<()> {
  let completions_dir = output_dir.join("completions");
  fs::create_dir_all(&completions_dir)?;
  let mut cmd = marknote::cli::Cli::command();
  for &shell in shells {
    let path = generate_to(shell, &mut cmd, BIN_NAME, &completions_dir)
      .with_context(|| format!("Failed to generate {shell} completions"))?;
    println!("Wrote {}", path.display());
  }
  Ok(())
}

fn generate_manpage(output_dir: &Path) -> Result<()> {
  let man_dir = output_dir.join("man");
  fs::create_dir_all(&man_dir)?;
  let file_path = man_dir.join(format!("{BIN_NAME}.1"));
  let mut file = fs::File::create(&file_path).with_context(|| {
    format!("Failed to create manpage file at {}", file_path.display())
  })?;
  Man::new(marknote::cli::Cli::command())
    .render(&mut file)
    .context("Failed to render manpage")?;
  println!("Wrote {}", file_path.display());
  Ok(())
}

fn export_templates(output_dir: &Path, force: bool) -> Result<()> {
  fs::create_dir_all(output_dir).with_context(|| {
    format!("Failed to create template directory: {}", output_dir.display())
  })?;

  let mut templates: Vec<_> =
    marknote_templates::all_templates().into_iter().collect();
  templates.sort_unstable();

  for (name, content) in templates {
    let path = output_dir.join(name);
    if path.exists() && !force {
      println!("Skipping existing {} (use --force)", path.display());
      continue;
    }
    fs::write(&path, content)
      .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
  }
  Ok(())
}
