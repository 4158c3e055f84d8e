//! `endpoint=rooms` — the room catalogue.

use axum::Json;
use serde_json::Value;

use aula_core::store::ReservationStore;

use crate::{AppState, envelope, error::ApiError};

/// `GET /api?endpoint=rooms` → `{status, data: [Room]}`.
pub async fn list<S>(state: &AppState<S>) -> Result<Json<Value>, ApiError>
where
  S: ReservationStore,
{
  let rooms = state.store.list_rooms().await.map_err(ApiError::store)?;
  Ok(envelope::success_data(rooms))
}
