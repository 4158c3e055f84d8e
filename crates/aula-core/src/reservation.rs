//! Reservation — one booked interval of one room on one calendar date.
//!
//! Wire and storage field names are camelCase (`roomId`, `startTime`, ...).
//! End times pass through the midnight rule on the way in, so a stored or
//! deserialized `Reservation` always carries a canonical interval with
//! `start_time < end_time` for well-formed input.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time::{self, TimeOfDay};

// ─── Recurrence ──────────────────────────────────────────────────────────────

/// The step unit of a recurrence pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceUnit {
  Day,
  Week,
  Month,
}

/// Short weekday tags as they appear in `daysOfWeek`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekdayTag {
  Mon,
  Tue,
  Wed,
  Thu,
  Fri,
  Sat,
  Sun,
}

/// Descriptive recurrence metadata attached to a reservation.
///
/// Stored and served verbatim; occurrences are **never** expanded into
/// additional reservation rows. The engine only ever sees the single row
/// the pattern hangs off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrencePattern {
  pub frequency:    u32,
  pub unit:         RecurrenceUnit,
  pub end_date:     NaiveDate,
  pub days_of_week: Vec<WeekdayTag>,
}

// ─── Reservation ─────────────────────────────────────────────────────────────

/// A persisted reservation. `id` is store-assigned and monotonically
/// increasing; `room_id` must reference an existing [`Room`](crate::room::Room).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
  pub id:                 i64,
  pub room_id:            String,
  pub date:               NaiveDate,
  pub start_time:         TimeOfDay,
  #[serde(deserialize_with = "time::deserialize_end")]
  pub end_time:           TimeOfDay,
  pub purpose:            String,
  pub is_recurring:       bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub recurrence_pattern: Option<RecurrencePattern>,
}

// ─── Write inputs ────────────────────────────────────────────────────────────

/// Input to [`ReservationStore::insert_reservation`](crate::store::ReservationStore::insert_reservation).
/// The id is always assigned by the store.
#[derive(Debug, Clone)]
pub struct NewReservation {
  pub room_id:            String,
  pub date:               NaiveDate,
  pub start_time:         TimeOfDay,
  pub end_time:           TimeOfDay,
  pub purpose:            String,
  pub is_recurring:       bool,
  pub recurrence_pattern: Option<RecurrencePattern>,
}

/// Partial update: only fields that are `Some` are written.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationPatch {
  pub room_id:            Option<String>,
  pub date:               Option<NaiveDate>,
  pub start_time:         Option<TimeOfDay>,
  #[serde(default, deserialize_with = "time::deserialize_end_opt")]
  pub end_time:           Option<TimeOfDay>,
  pub purpose:            Option<String>,
  pub is_recurring:       Option<bool>,
  pub recurrence_pattern: Option<RecurrencePattern>,
}

impl ReservationPatch {
  pub fn is_empty(&self) -> bool {
    self.room_id.is_none()
      && self.date.is_none()
      && self.start_time.is_none()
      && self.end_time.is_none()
      && self.purpose.is_none()
      && self.is_recurring.is_none()
      && self.recurrence_pattern.is_none()
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
