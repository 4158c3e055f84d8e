//! [`SqliteStore`] — the SQLite implementation of [`ReservationStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use aula_core::{
  reservation::{NewReservation, Reservation, ReservationPatch},
  room::Room,
  store::ReservationStore,
};
use chrono::NaiveDate;

use crate::{
  Error, Result,
  encode::{RawReservation, RawRoom, encode_date, encode_recurrence, encode_time},
  schema::SCHEMA,
};

const RESERVATION_COLUMNS: &str =
  "id, room_id, date, start_time, end_time, purpose, is_recurring, recurrence_pattern";

/// Rooms inserted when the `rooms` table is empty. The room set is
/// effectively static reference data; everything else arrives through
/// booking requests.
const DEFAULT_ROOMS: &[(&str, &str, i64, &str, &str)] = &[
  ("101", "Room 101", 45, "lecture", r#"["projector","whiteboard"]"#),
  ("102", "Room 102", 35, "lecture", r#"["projector","whiteboard","computers"]"#),
  ("203", "Lab 203", 30, "lab", r#"["projector","computers","equipment"]"#),
  ("305", "Room 305", 70, "exam", r#"["projector","whiteboard"]"#),
];

// ─── Store ───────────────────────────────────────────────────────────────────

/// An Aula reservation store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All
/// statements funnel through one connection thread, so individual
/// statements are serialized; check-then-insert across two calls is not.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path`, run schema initialisation, and
  /// seed the default rooms if the table is empty.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;

        let room_count: i64 =
          conn.query_row("SELECT COUNT(*) FROM rooms", [], |r| r.get(0))?;
        if room_count == 0 {
          for (id, name, capacity, kind, features) in DEFAULT_ROOMS {
            conn.execute(
              "INSERT INTO rooms (id, name, capacity, kind, features, image)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
              rusqlite::params![
                id,
                name,
                capacity,
                kind,
                features,
                format!("https://via.placeholder.com/300x150?text={}", name.replace(' ', "+")),
              ],
            )?;
          }
        }
        Ok(())
      })
      .await?;
    Ok(())
  }
}

fn read_reservation_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawReservation> {
  Ok(RawReservation {
    id:                 row.get(0)?,
    room_id:            row.get(1)?,
    date:               row.get(2)?,
    start_time:         row.get(3)?,
    end_time:           row.get(4)?,
    purpose:            row.get(5)?,
    is_recurring:       row.get(6)?,
    recurrence_pattern: row.get(7)?,
  })
}

fn read_room_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRoom> {
  Ok(RawRoom {
    id:       row.get(0)?,
    name:     row.get(1)?,
    capacity: row.get(2)?,
    kind:     row.get(3)?,
    features: row.get(4)?,
    image:    row.get(5)?,
  })
}

// ─── ReservationStore impl ───────────────────────────────────────────────────

impl ReservationStore for SqliteStore {
  type Error = Error;

  // ── Rooms ─────────────────────────────────────────────────────────────────

  async fn list_rooms(&self) -> Result<Vec<Room>> {
    let raws: Vec<RawRoom> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name, capacity, kind, features, image FROM rooms ORDER BY id",
        )?;
        let rows = stmt
          .query_map([], read_room_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRoom::into_room).collect()
  }

  async fn get_room(&self, id: &str) -> Result<Option<Room>> {
    let id = id.to_owned();

    let raw: Option<RawRoom> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, capacity, kind, features, image FROM rooms WHERE id = ?1",
              rusqlite::params![id],
              read_room_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawRoom::into_room).transpose()
  }

  // ── Reservations — reads ──────────────────────────────────────────────────

  async fn list_reservations(&self) -> Result<Vec<Reservation>> {
    let raws: Vec<RawReservation> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {RESERVATION_COLUMNS} FROM reservations ORDER BY id"
        ))?;
        let rows = stmt
          .query_map([], read_reservation_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawReservation::into_reservation).collect()
  }

  async fn list_reservations_on(&self, date: NaiveDate) -> Result<Vec<Reservation>> {
    let date_str = encode_date(date);

    let raws: Vec<RawReservation> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE date = ?1 ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![date_str], read_reservation_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawReservation::into_reservation).collect()
  }

  async fn get_reservation(&self, id: i64) -> Result<Option<Reservation>> {
    let raw: Option<RawReservation> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?1"),
              rusqlite::params![id],
              read_reservation_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawReservation::into_reservation).transpose()
  }

  // ── Reservations — writes ─────────────────────────────────────────────────

  async fn insert_reservation(&self, input: NewReservation) -> Result<i64> {
    let room_id    = input.room_id;
    let date_str   = encode_date(input.date);
    let start_str  = encode_time(input.start_time);
    let end_str    = encode_time(input.end_time);
    let purpose    = input.purpose;
    let recurring  = input.is_recurring;
    let recurrence = input
      .recurrence_pattern
      .as_ref()
      .map(encode_recurrence)
      .transpose()?;

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO reservations
             (room_id, date, start_time, end_time, purpose, is_recurring, recurrence_pattern)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            room_id, date_str, start_str, end_str, purpose, recurring, recurrence,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(id)
  }

  async fn update_reservation(&self, id: i64, patch: ReservationPatch) -> Result<bool> {
    use rusqlite::types::Value;

    // Build the SET clause from the fields actually present.
    let mut sets: Vec<&'static str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(room_id) = patch.room_id {
      sets.push("room_id");
      values.push(Value::Text(room_id));
    }
    if let Some(date) = patch.date {
      sets.push("date");
      values.push(Value::Text(encode_date(date)));
    }
    if let Some(start) = patch.start_time {
      sets.push("start_time");
      values.push(Value::Text(encode_time(start)));
    }
    if let Some(end) = patch.end_time {
      sets.push("end_time");
      values.push(Value::Text(encode_time(end)));
    }
    if let Some(purpose) = patch.purpose {
      sets.push("purpose");
      values.push(Value::Text(purpose));
    }
    if let Some(recurring) = patch.is_recurring {
      sets.push("is_recurring");
      values.push(Value::Integer(recurring as i64));
    }
    if let Some(pattern) = patch.recurrence_pattern {
      sets.push("recurrence_pattern");
      values.push(Value::Text(encode_recurrence(&pattern)?));
    }

    if sets.is_empty() {
      // Nothing to write; report whether the row exists at all.
      return Ok(self.get_reservation(id).await?.is_some());
    }

    let assignments = sets
      .iter()
      .enumerate()
      .map(|(i, col)| format!("{col} = ?{}", i + 1))
      .collect::<Vec<_>>()
      .join(", ");
    let sql = format!(
      "UPDATE reservations SET {assignments} WHERE id = ?{}",
      sets.len() + 1
    );
    values.push(Value::Integer(id));

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(&sql, rusqlite::params_from_iter(values))?)
      })
      .await?;

    Ok(affected > 0)
  }

  async fn delete_reservation(&self, id: i64) -> Result<bool> {
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM reservations WHERE id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;

    Ok(affected > 0)
  }
}
