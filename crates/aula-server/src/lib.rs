//! JSON API layer for the Aula classroom-reservation service.
//!
//! Exposes an axum [`Router`] backed by any
//! [`aula_core::store::ReservationStore`]. The transport boundary is kept
//! byte-compatible with the system it replaces: a single `/api` route
//! dispatched on the `endpoint` query parameter, every response HTTP 200
//! with an in-body `{status, message?, data?}` envelope.

pub mod envelope;
pub mod error;
pub mod handlers;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use aula_core::store::ReservationStore;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `AULA_`-prefixed environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: ReservationStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the reservation API.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: ReservationStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route(
      "/api",
      get(handlers::dispatch_get::<S>)
        .post(handlers::dispatch_post::<S>)
        .put(handlers::dispatch_put::<S>)
        .delete(handlers::dispatch_delete::<S>),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
