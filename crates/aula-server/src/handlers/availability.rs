//! `endpoint=availability` — advisory free-gap search.
//!
//! The original computed these gaps in the browser from a full reservation
//! dump; serving them from the canonical engine keeps a single
//! implementation of the search. Advisory only — booking still goes
//! through the conflict check.

use axum::Json;
use serde_json::Value;

use aula_core::{
  engine::{self, BusinessHours},
  store::ReservationStore,
};

use crate::{AppState, envelope, error::ApiError, handlers::ApiParams};

const DEFAULT_DURATION_MINUTES: u32 = 60;

/// `GET /api?endpoint=availability&roomId=R&date=D[&duration=M]` →
/// `{status, data: [FreeSlot]}` within business hours (07:30–22:00).
pub async fn slots<S>(
  state: &AppState<S>,
  params: &ApiParams,
) -> Result<Json<Value>, ApiError>
where
  S: ReservationStore,
{
  let (Some(room_id), Some(date)) = (params.room_id.as_deref(), params.date)
  else {
    return Err(ApiError::Validation("Missing required fields".to_string()));
  };
  let duration = params.duration.unwrap_or(DEFAULT_DURATION_MINUTES);

  let mut reservations = state
    .store
    .list_reservations_on(date)
    .await
    .map_err(ApiError::store)?;
  reservations.retain(|r| r.room_id == room_id);

  let slots = engine::free_slots(&reservations, duration, &BusinessHours::default());
  Ok(envelope::success_data(slots))
}
