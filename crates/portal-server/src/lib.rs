//! HTTP surface for the admission portal.
//!
//! Exposes an axum [`Router`] backed by any [`RegistrationStore`]. Rendering of
//! HTML pages is left to the front end; this crate speaks JSON.

pub mod auth;
pub mod error;
pub mod handlers;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use portal_core::{
  credential::Argon2Hasher, error::HashError, store::RegistrationStore,
  workflow::RegistrationWorkflow,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `portal.toml` and
/// `PORTAL_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:               String,
  #[serde(default = "default_port")]
  pub port:               u16,
  #[serde(default = "default_store_path")]
  pub store_path:         PathBuf,
  #[serde(default = "default_memory_kib")]
  pub argon2_memory_kib:  u32,
  #[serde(default = "default_iterations")]
  pub argon2_iterations:  u32,
  #[serde(default = "default_parallelism")]
  pub argon2_parallelism: u32,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }
fn default_store_path() -> PathBuf { PathBuf::from("portal.sqlite3") }
// Match the argon2 crate's recommended defaults.
fn default_memory_kib() -> u32 { 19 * 1024 }
fn default_iterations() -> u32 { 2 }
fn default_parallelism() -> u32 { 1 }

impl ServerConfig {
  pub fn hasher(&self) -> Result<Argon2Hasher, HashError> {
    Argon2Hasher::with_cost(
      self.argon2_memory_kib,
      self.argon2_iterations,
      self.argon2_parallelism,
    )
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: RegistrationStore> {
  pub registration: Arc<RegistrationWorkflow<S, Argon2Hasher>>,
  pub config:       Arc<ServerConfig>,
}

impl<S: RegistrationStore> AppState<S> {
  pub fn new(store: Arc<S>, hasher: Argon2Hasher, config: ServerConfig) -> Self {
    Self {
      registration: Arc::new(RegistrationWorkflow::new(store, hasher)),
      config:       Arc::new(config),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the portal's axum [`Router`].
pub fn router<S>(state: AppState<S>) -> Router
where
  S: RegistrationStore + Clone + 'static,
{
  Router::new()
    .route("/health", get(handlers::health))
    .route("/api/register", post(handlers::register::handler::<S>))
    .route("/api/me", get(handlers::me::handler::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
