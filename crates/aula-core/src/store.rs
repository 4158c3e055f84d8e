//! The `ReservationStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `aula-store-sqlite`).
//! Higher layers (`aula-server`) depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use chrono::NaiveDate;

use crate::{
  reservation::{NewReservation, Reservation, ReservationPatch},
  room::Room,
};

/// Abstraction over a reservation store backend.
///
/// Rooms are read-mostly reference data; reservations are created, patched
/// in place, and deleted. There is no soft delete and no history.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ReservationStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Rooms ─────────────────────────────────────────────────────────────

  /// List every room.
  fn list_rooms(
    &self,
  ) -> impl Future<Output = Result<Vec<Room>, Self::Error>> + Send + '_;

  /// Retrieve a room by its short id. Returns `None` if not found.
  fn get_room<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Room>, Self::Error>> + Send + 'a;

  // ── Reservations — reads ──────────────────────────────────────────────

  /// List every reservation.
  fn list_reservations(
    &self,
  ) -> impl Future<Output = Result<Vec<Reservation>, Self::Error>> + Send + '_;

  /// All reservations on one calendar date, across every room. This is the
  /// snapshot the availability engine consumes.
  fn list_reservations_on(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Vec<Reservation>, Self::Error>> + Send + '_;

  /// Retrieve a reservation by id. Returns `None` if not found.
  fn get_reservation(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Reservation>, Self::Error>> + Send + '_;

  // ── Reservations — writes ─────────────────────────────────────────────

  /// Persist a new reservation and return the store-assigned id.
  ///
  /// Fails with a backend error when `room_id` references no existing room
  /// (foreign-key constraint).
  fn insert_reservation(
    &self,
    input: NewReservation,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// Apply a partial update; only fields present in `patch` change.
  /// Returns `false` when no reservation has this id.
  fn update_reservation(
    &self,
    id: i64,
    patch: ReservationPatch,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Delete a reservation. Returns `false` when no row was removed.
  fn delete_reservation(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
