use std::{fs, io::Write};

use color_eyre::eyre::{Context, Result, bail};
use log::{LevelFilter, info};
use marknote::{
  cli::{Cli, Commands},
  config::{Config, route_path},
  site::{Page, Sidebar, Site, build::build_site, route::Route},
  source::DirectorySource,
};
use serde::Serialize;

/// JSON output of `marknote render`.
#[derive(Serialize)]
struct RenderOutput {
  route:   Route,
  page:    Page,
  sidebar: Sidebar,
}

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .parse_default_env()
    .init();

  if let Commands::Init {
    output,
    format,
    force,
  } = &cli.command
  {
    if output.exists() && !force {
      bail!(
        "Configuration file already exists: {}. Use --force to overwrite.",
        output.display()
      );
    }

    if let Some(parent) = output.parent() {
      if !parent.as_os_str().is_empty() && !parent.exists() {
        fs::create_dir_all(parent).wrap_err_with(|| {
          format!("Failed to create directory: {}", parent.display())
        })?;
        info!("Created directory: {}", parent.display());
      }
    }

    Config::generate_default_config(format, output).wrap_err_with(|| {
      format!(
        "Failed to generate configuration file: {}",
        output.display()
      )
    })?;
    return Ok(());
  }

  let config = Config::load(&cli)?;

  match &cli.command {
    Commands::Render {
      target,
      format,
      sidebar,
      ..
    } => render(&config, target, format, sidebar.as_deref()),
    Commands::Build { .. } => build(&config),
    Commands::Serve { .. } => serve(&config),
    Commands::Init { .. } => Ok(()),
  }
}

fn render(
  config: &Config,
  target: &str,
  format: &str,
  sidebar: Option<&str>,
) -> Result<()> {
  let mut route = Route::parse(target, &config.index_page, &config.sidebar);
  if let Some(sidebar) = sidebar {
    route.sidebar = route_path(sidebar);
  }
  let site = Site::new(config);
  let source = DirectorySource::new(&config.input_dir);
  let page = site.page(&source, &route.page);

  let mut stdout = std::io::stdout().lock();
  if format == "json" {
    let sidebar = site.sidebar(&source, &route.sidebar);
    let output = RenderOutput {
      route,
      page,
      sidebar,
    };
    serde_json::to_writer_pretty(&mut stdout, &output)?;
    writeln!(stdout)?;
  } else {
    writeln!(stdout, "{}", page.html)?;
  }
  Ok(())
}

fn build(config: &Config) -> Result<()> {
  info!("Building site from {}", config.input_dir.display());

  let thread_count = config.jobs.unwrap_or_else(num_cpus::get);
  rayon::ThreadPoolBuilder::new()
    .num_threads(thread_count)
    .build_global()?;

  let summary = build_site(config)?;
  info!(
    "Built {} pages and {} sidebars, copied {} files into {}",
    summary.pages,
    summary.sidebars,
    summary.copied,
    config.output_dir.display()
  );
  Ok(())
}

#[cfg(feature = "serve")]
fn serve(config: &Config) -> Result<()> {
  marknote::server::serve(config)
}

#[cfg(not(feature = "serve"))]
fn serve(_config: &Config) -> Result<()> {
  bail!("marknote was built without the `serve` feature")
}
