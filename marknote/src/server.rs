//! Development server: serves the shell and renders pages on request.
use std::{net::SocketAddr, sync::Arc};

use axum::{
  Json,
  Router,
  extract::{Path, State},
  http::{StatusCode, header},
  response::{Html, IntoResponse, Response},
  routing::get,
};
use color_eyre::eyre::{Context, Result};
use log::{error, info};
use tower_http::services::ServeDir;

use crate::{
  config::Config,
  error::MarknoteError,
  site::{Site, shell::render_shell},
  source::DirectorySource,
};

struct AppState {
  site:   Site,
  source: DirectorySource,
  shell:  String,
}

/// Content type and body of an embedded asset.
fn asset_content(name: &str) -> Option<(&'static str, &'static str)> {
  let (_, content) = marknote_templates::ASSETS
    .iter()
    .find(|(asset, _)| *asset == name)?;
  let content_type = match name.rsplit_once('.').map(|(_, ext)| ext) {
    Some("css") => "text/css; charset=utf-8",
    Some("js") => "text/javascript; charset=utf-8",
    _ => "application/octet-stream",
  };
  Some((content_type, content))
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
  Html(state.shell.clone())
}

async fn asset(Path(name): Path<String>) -> Response {
  asset_content(&name).map_or_else(
    || StatusCode::NOT_FOUND.into_response(),
    |(content_type, content)| {
      ([(header::CONTENT_TYPE, content_type)], content).into_response()
    },
  )
}

async fn page(
  State(state): State<Arc<AppState>>,
  Path(path): Path<String>,
) -> Response {
  let Some(route) = path.strip_suffix(".json").map(ToString::to_string) else {
    return StatusCode::NOT_FOUND.into_response();
  };
  match tokio::task::spawn_blocking(move || {
    state.site.page(&state.source, &route)
  })
  .await
  {
    Ok(page) => Json(page).into_response(),
    Err(e) => {
      error!("Page render task failed: {e}");
      StatusCode::INTERNAL_SERVER_ERROR.into_response()
    },
  }
}

async fn sidebar(
  State(state): State<Arc<AppState>>,
  Path(path): Path<String>,
) -> Response {
  let Some(route) = path.strip_suffix(".json").map(ToString::to_string) else {
    return StatusCode::NOT_FOUND.into_response();
  };
  match tokio::task::spawn_blocking(move || {
    state.site.sidebar(&state.source, &route)
  })
  .await
  {
    Ok(sidebar) => Json(sidebar).into_response(),
    Err(e) => {
      error!("Sidebar render task failed: {e}");
      StatusCode::INTERNAL_SERVER_ERROR.into_response()
    },
  }
}

/// Build the application router, mounted at the configured base path. Any
/// path that is not a page, sidebar or asset is served from the input
/// directory.
///
/// # Errors
///
/// Returns an error if the page shell fails to render.
pub fn router(config: &Config) -> Result<Router, MarknoteError> {
  let state = Arc::new(AppState {
    site:   Site::new(config),
    source: DirectorySource::new(&config.input_dir),
    shell:  render_shell(config)?,
  });

  let app = Router::new()
    .route("/", get(index))
    .route("/index.html", get(index))
    .route("/assets/{name}", get(asset))
    .route("/pages/{*path}", get(page))
    .route("/sidebars/{*path}", get(sidebar))
    .fallback_service(ServeDir::new(&config.input_dir))
    .with_state(state);

  let base = config.base_path.trim_end_matches('/');
  Ok(if base.is_empty() {
    app
  } else {
    Router::new().nest(base, app)
  })
}

/// Serve the site until the process is stopped.
pub fn serve(config: &Config) -> Result<()> {
  let addr: SocketAddr = config
    .bind
    .parse()
    .wrap_err_with(|| format!("Invalid bind address: {}", config.bind))?;
  let app = router(config)?;

  let runtime = tokio::runtime::Builder::new_multi_thread()
    .worker_threads(config.jobs.unwrap_or_else(num_cpus::get))
    .enable_all()
    .build()
    .wrap_err("Failed to start async runtime")?;

  runtime.block_on(async move {
    let listener = tokio::net::TcpListener::bind(addr)
      .await
      .wrap_err_with(|| format!("Failed to bind {addr}"))?;
    info!(
      "Serving {} at http://{addr}{}",
      config.input_dir.display(),
      config.base_path
    );
    axum::serve(listener, app).await.wrap_err("Server error")?;
    Ok(())
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_asset_content_types() {
    let (css_type, css) = asset_content("default.css").expect("css asset");
    assert!(css_type.starts_with("text/css"));
    assert_eq!(css, marknote_templates::DEFAULT_CSS);

    let (js_type, _) = asset_content("main.js").expect("js asset");
    assert!(js_type.starts_with("text/javascript"));

    assert!(asset_content("missing.txt").is_none());
  }

  #[test]
  fn test_router_builds_with_base_path() {
    let config = Config {
      base_path: "/notes/".to_string(),
      ..Config::default()
    };
    assert!(router(&config).is_ok());
    assert!(router(&Config::default()).is_ok());
  }
}
