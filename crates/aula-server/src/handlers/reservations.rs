//! `endpoint=reservations` — reservation CRUD with the conflict gate.
//!
//! Creation runs the availability engine first and only persists on a
//! clear verdict. The check and the insert are two separate store calls;
//! a second writer can slip between them (see DESIGN.md).

use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use aula_core::{
  engine::{self, Candidate, Verdict},
  reservation::{NewReservation, RecurrencePattern, ReservationPatch},
  store::ReservationStore,
  time::TimeOfDay,
};

use crate::{AppState, envelope, error::ApiError};

// ─── List / get one ──────────────────────────────────────────────────────────

/// `GET /api?endpoint=reservations` → `{status, data: [Reservation]}`.
pub async fn list<S>(state: &AppState<S>) -> Result<Json<Value>, ApiError>
where
  S: ReservationStore,
{
  let reservations = state
    .store
    .list_reservations()
    .await
    .map_err(ApiError::store)?;
  Ok(envelope::success_data(reservations))
}

/// `GET /api?endpoint=reservations&id=N` — single reservation with the room
/// display name joined in as `roomName`.
pub async fn get_one<S>(state: &AppState<S>, id: i64) -> Result<Json<Value>, ApiError>
where
  S: ReservationStore,
{
  let reservation = state
    .store
    .get_reservation(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound("Reservation not found".to_string()))?;

  let room = state
    .store
    .get_room(&reservation.room_id)
    .await
    .map_err(ApiError::store)?;

  let mut value = serde_json::to_value(&reservation).map_err(ApiError::store)?;
  if let (Some(obj), Some(room)) = (value.as_object_mut(), room) {
    obj.insert("roomName".to_string(), Value::String(room.name));
  }

  Ok(envelope::success_data(value))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /api?endpoint=reservations`.
///
/// Everything is optional at the serde level so that missing required
/// fields surface as the boundary's `"Missing required fields"` message
/// rather than a deserialization failure. Times arrive as raw strings and
/// are normalized here.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
  pub room_id:            Option<String>,
  pub date:               Option<NaiveDate>,
  pub start_time:         Option<String>,
  pub end_time:           Option<String>,
  pub purpose:            Option<String>,
  pub is_recurring:       Option<bool>,
  pub recurrence_pattern: Option<RecurrencePattern>,
  /// Run the conflict check only; never persist.
  #[serde(rename = "_checkOnly")]
  pub check_only:         Option<bool>,
  /// Skip this reservation id during the check, so an edit never
  /// conflicts with the row being edited.
  pub exclude_id:         Option<i64>,
}

/// `POST /api?endpoint=reservations` — conflict check, then (unless
/// `_checkOnly`) insert.
pub async fn create<S>(
  state: &AppState<S>,
  body: CreateBody,
) -> Result<Json<Value>, ApiError>
where
  S: ReservationStore,
{
  let (Some(room_id), Some(date), Some(start_raw), Some(end_raw)) =
    (body.room_id, body.date, body.start_time, body.end_time)
  else {
    return Err(ApiError::Validation("Missing required fields".to_string()));
  };

  let start_time = TimeOfDay::parse(&start_raw)
    .map_err(|e| ApiError::Validation(e.to_string()))?;
  let end_time = TimeOfDay::parse_end(&end_raw)
    .map_err(|e| ApiError::Validation(e.to_string()))?;

  let candidate = Candidate { room_id: room_id.clone(), date, start_time, end_time };

  // Snapshot everything booked that day, across all rooms: the engine
  // needs the other rooms to compute alternatives.
  let existing = state
    .store
    .list_reservations_on(date)
    .await
    .map_err(ApiError::store)?;
  let rooms = state.store.list_rooms().await.map_err(ApiError::store)?;

  if let Verdict::Conflict(details) =
    engine::check_conflict(&candidate, &existing, &rooms, body.exclude_id)
  {
    return Err(ApiError::Conflict(Box::new(details)));
  }

  if body.check_only.unwrap_or(false) {
    return Ok(envelope::success_message("No conflicts found"));
  }

  let Some(purpose) = body.purpose else {
    return Err(ApiError::Validation("Missing purpose field".to_string()));
  };

  let is_recurring = body.is_recurring.unwrap_or(false);
  let recurrence_pattern =
    if is_recurring { body.recurrence_pattern } else { None };

  let id = state
    .store
    .insert_reservation(NewReservation {
      room_id,
      date,
      start_time,
      end_time,
      purpose,
      is_recurring,
      recurrence_pattern,
    })
    .await
    .map_err(ApiError::store)?;

  tracing::info!(id, "reservation created");
  Ok(envelope::success_created("Reservation created", id))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// `PUT /api?endpoint=reservations&id=N` — partial update; only provided
/// fields change. No conflict check here: callers run a `_checkOnly` POST
/// with `excludeId` first, matching the original flow.
pub async fn update<S>(
  state: &AppState<S>,
  id: i64,
  patch: ReservationPatch,
) -> Result<Json<Value>, ApiError>
where
  S: ReservationStore,
{
  let exists = state
    .store
    .get_reservation(id)
    .await
    .map_err(ApiError::store)?
    .is_some();
  if !exists {
    return Err(ApiError::NotFound("Reservation not found".to_string()));
  }

  if patch.is_empty() {
    return Err(ApiError::Validation("No fields to update".to_string()));
  }

  state
    .store
    .update_reservation(id, patch)
    .await
    .map_err(ApiError::store)?;

  Ok(envelope::success_message("Reservation updated"))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /api?endpoint=reservations&id=N` — idempotent; deleting an
/// absent id still reports success, like the original.
pub async fn delete<S>(state: &AppState<S>, id: i64) -> Result<Json<Value>, ApiError>
where
  S: ReservationStore,
{
  let removed = state
    .store
    .delete_reservation(id)
    .await
    .map_err(ApiError::store)?;
  if removed {
    tracing::info!(id, "reservation deleted");
  }
  Ok(envelope::success_message("Reservation deleted"))
}
