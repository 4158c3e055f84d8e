//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD`, times as canonical `HH:MM:SS` (end
//! times already remapped to `24:00:00` where applicable). Features and
//! recurrence patterns are stored as compact JSON.

use aula_core::{
  reservation::{RecurrencePattern, Reservation},
  room::{Room, RoomKind},
  time::TimeOfDay,
};
use chrono::NaiveDate;

use crate::{Error, Result};

// ─── Date ────────────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Time ────────────────────────────────────────────────────────────────────

pub fn encode_time(t: TimeOfDay) -> String { t.to_string() }

pub fn decode_start_time(s: &str) -> Result<TimeOfDay> {
  Ok(TimeOfDay::parse(s)?)
}

/// Stored end times should already be canonical, but rows written by older
/// tooling may still carry `00:00:00`; the midnight rule is re-applied on
/// the way out so the engine never sees a denormalized interval.
pub fn decode_end_time(s: &str) -> Result<TimeOfDay> {
  Ok(TimeOfDay::parse_end(s)?)
}

// ─── Features / recurrence ───────────────────────────────────────────────────

pub fn decode_features(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

pub fn encode_recurrence(p: &RecurrencePattern) -> Result<String> {
  Ok(serde_json::to_string(p)?)
}

pub fn decode_recurrence(s: &str) -> Result<RecurrencePattern> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `rooms` row.
pub struct RawRoom {
  pub id:       String,
  pub name:     String,
  pub capacity: i64,
  pub kind:     String,
  pub features: String,
  pub image:    String,
}

impl RawRoom {
  pub fn into_room(self) -> Result<Room> {
    Ok(Room {
      id:       self.id,
      name:     self.name,
      capacity: u32::try_from(self.capacity)
        .map_err(|_| Error::Capacity(self.capacity))?,
      kind:     RoomKind::parse(&self.kind).map_err(Error::Core)?,
      features: decode_features(&self.features)?,
      image:    self.image,
    })
  }
}

/// Raw strings read directly from a `reservations` row.
pub struct RawReservation {
  pub id:                 i64,
  pub room_id:            String,
  pub date:               String,
  pub start_time:         String,
  pub end_time:           String,
  pub purpose:            String,
  pub is_recurring:       bool,
  pub recurrence_pattern: Option<String>,
}

impl RawReservation {
  pub fn into_reservation(self) -> Result<Reservation> {
    let recurrence_pattern = self
      .recurrence_pattern
      .as_deref()
      .map(decode_recurrence)
      .transpose()?;

    Ok(Reservation {
      id:           self.id,
      room_id:      self.room_id,
      date:         decode_date(&self.date)?,
      start_time:   decode_start_time(&self.start_time)?,
      end_time:     decode_end_time(&self.end_time)?,
      purpose:      self.purpose,
      is_recurring: self.is_recurring,
      recurrence_pattern,
    })
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn raw_room(capacity: i64) -> RawRoom {
    RawRoom {
      id:       "101".into(),
      name:     "Room 101".into(),
      capacity,
      kind:     "lecture".into(),
      features: r#"["projector"]"#.into(),
      image:    String::new(),
    }
  }

  #[test]
  fn room_capacity_decodes_within_range() {
    let room = raw_room(45).into_room().unwrap();
    assert_eq!(room.capacity, 45);
  }

  #[test]
  fn negative_room_capacity_is_a_decode_error() {
    assert!(matches!(
      raw_room(-5).into_room(),
      Err(Error::Capacity(-5)),
    ));
  }

  #[test]
  fn oversized_room_capacity_is_a_decode_error() {
    assert!(raw_room(i64::from(u32::MAX) + 1).into_room().is_err());
  }
}
