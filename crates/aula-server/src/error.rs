//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Errors are per-request and never fatal; each one renders as an HTTP 200
//! with an error envelope, matching the transport boundary this API
//! reproduces.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

use aula_core::engine::ConflictDetails;

use crate::envelope;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// A required field is missing or unparseable.
  #[error("{0}")]
  Validation(String),

  #[error("{0}")]
  NotFound(String),

  /// The candidate overlaps an existing booking; carries the diagnostic
  /// payload (conflicting interval, next free slot, alternative rooms).
  #[error("Scheduling conflict detected")]
  Conflict(Box<ConflictDetails>),

  #[error("Database error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store<E: std::error::Error + Send + Sync + 'static>(e: E) -> Self {
    Self::Store(Box::new(e))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let body = match &self {
      ApiError::Conflict(details) => {
        envelope::error_conflict(&self.to_string(), details)
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store operation failed");
        envelope::error_message(&self.to_string())
      }
      _ => envelope::error_message(&self.to_string()),
    };
    (StatusCode::OK, body).into_response()
  }
}
