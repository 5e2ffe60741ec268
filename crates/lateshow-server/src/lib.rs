//! HTTP wiring for the Late Show API.
//!
//! Combines the JSON routes from `lateshow-api` with a root index page and a
//! request-tracing layer, and defines the server's runtime configuration.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{Router, response::Html, routing::get};
use lateshow_core::store::ShowStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5555;
pub const DEFAULT_STORE_PATH: &str = "lateshow.db";

/// Runtime server configuration, deserialised from `config.toml` and
/// `LATESHOW_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl ServerConfig {
  /// Load configuration from an optional TOML file, then the environment.
  /// Missing keys fall back to the `DEFAULT_*` constants.
  pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", DEFAULT_HOST)?
      .set_default("port", i64::from(DEFAULT_PORT))?
      .set_default("store_path", DEFAULT_STORE_PATH)?
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("LATESHOW"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

async fn index() -> Html<&'static str> { Html("<h1>Late Show API</h1>") }

/// Build the full application router for `store`.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: ShowStore + 'static,
{
  Router::new()
    .route("/", get(index))
    .merge(lateshow_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}
