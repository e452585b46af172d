//! studygen · Study Content Generation Backend
//!
//! - Axum HTTP API: multiple-choice questions + study points from a topic
//! - Optional OpenAI integration (via environment variables)
//! - Deterministic mock responses when no API key is configured
//!
//! Important env variables:
//!   PORT            : u16 (default 3000)
//!   OPENAI_API_KEY  : enables OpenAI integration if present
//!   OPENAI_BASE_URL : default "https://api.openai.com/v1"
//!   OPENAI_MODEL    : default "gpt-3.5-turbo"
//!   GEN_CONFIG_PATH : path to TOML config (prompt template overrides)
//!   LOG_LEVEL       : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT      : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod config;
mod prompt;
mod interpret;
mod mock;
mod state;
mod protocol;
mod logic;
mod openai;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::config::Settings;
use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Read configuration once; credential presence decides mock vs. real path
  // for the whole process lifetime.
  let settings = Settings::from_env();
  let state = Arc::new(AppState::new(&settings));

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
  let listener = TcpListener::bind(addr).await?;
  info!(target: "studygen_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
