//! The availability engine.
//!
//! Pure functions over an in-memory snapshot of reservations: interval
//! overlap, conflict checking with diagnostic alternatives, and the
//! advisory free-gap search. The engine never persists anything; callers
//! apply its verdict to the store strictly after a [`Verdict::Clear`].
//!
//! Deterministic given the same snapshot. Nothing here serializes
//! concurrent check-then-create callers; that window is the caller's
//! problem (and a documented one).

use serde::Serialize;

use crate::{reservation::Reservation, room::Room, time::TimeOfDay};

// ─── Overlap predicate ───────────────────────────────────────────────────────

/// Do two normalized intervals on the same date intersect?
///
/// Four cases, OR-ed: A contains B, B contains A, A starts inside B,
/// A ends inside B. Touching boundaries (`a_end == b_start` or
/// `b_end == a_start`) do not overlap, so back-to-back bookings are legal.
///
/// Only meaningful for reservations sharing a room and date; callers
/// filter to that subset first.
pub fn overlaps(
  a_start: TimeOfDay,
  a_end: TimeOfDay,
  b_start: TimeOfDay,
  b_end: TimeOfDay,
) -> bool {
  (a_start <= b_start && a_end >= b_end)
    || (a_start >= b_start && a_end <= b_end)
    || (a_start >= b_start && a_start < b_end)
    || (a_end > b_start && a_end <= b_end)
}

// ─── Conflict check ──────────────────────────────────────────────────────────

/// A candidate reservation to test against the current snapshot.
/// Times must already be normalized (see [`crate::time`]).
#[derive(Debug, Clone)]
pub struct Candidate {
  pub room_id:    String,
  pub date:       chrono::NaiveDate,
  pub start_time: TimeOfDay,
  pub end_time:   TimeOfDay,
}

/// The interval the candidate collided with, as reported to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct ExistingReservation {
  pub room_name:  String,
  pub start_time: TimeOfDay,
  pub end_time:   TimeOfDay,
  pub purpose:    String,
}

/// A room that is free for the candidate's interval.
#[derive(Debug, Clone, Serialize)]
pub struct AlternativeRoom {
  pub id:       String,
  pub name:     String,
  pub capacity: u32,
}

/// Diagnostic payload attached to a conflict verdict.
#[derive(Debug, Clone, Serialize)]
pub struct ConflictDetails {
  /// The first overlapping reservation, in snapshot order.
  #[serde(rename = "existing_reservation")]
  pub existing:            ExistingReservation,
  /// Earliest slot that opens at or after the requested end; `None` when
  /// nothing later is booked in this room that day.
  pub next_available_time: Option<TimeOfDay>,
  /// Every other room with no overlapping reservation on the same date.
  pub alternative_rooms:   Vec<AlternativeRoom>,
}

/// The engine's answer to "can this booking go ahead?".
#[derive(Debug, Clone)]
pub enum Verdict {
  Clear,
  Conflict(ConflictDetails),
}

impl Verdict {
  pub fn is_clear(&self) -> bool { matches!(self, Self::Clear) }
}

/// Test `candidate` against a snapshot of reservations.
///
/// `existing` may be any superset of the relevant rows (typically every
/// reservation on the candidate's date); the engine filters to the
/// candidate's room and date itself. `exclude_id` skips one reservation so
/// an edit never conflicts with the row being edited. `rooms` supplies
/// display names and the alternative-room universe.
pub fn check_conflict(
  candidate: &Candidate,
  existing: &[Reservation],
  rooms: &[Room],
  exclude_id: Option<i64>,
) -> Verdict {
  let same_slot = |r: &&Reservation| {
    r.room_id == candidate.room_id
      && r.date == candidate.date
      && Some(r.id) != exclude_id
  };

  let hit = existing.iter().filter(same_slot).find(|r| {
    overlaps(candidate.start_time, candidate.end_time, r.start_time, r.end_time)
  });

  let Some(hit) = hit else {
    return Verdict::Clear;
  };

  let room_name = rooms
    .iter()
    .find(|room| room.id == candidate.room_id)
    .map(|room| room.name.clone())
    .unwrap_or_else(|| candidate.room_id.clone());

  Verdict::Conflict(ConflictDetails {
    existing: ExistingReservation {
      room_name,
      start_time: hit.start_time,
      end_time: hit.end_time,
      purpose: hit.purpose.clone(),
    },
    next_available_time: next_available_time(candidate, existing),
    alternative_rooms: alternative_rooms(candidate, existing, rooms),
  })
}

/// Minimum end time among same-room/same-date reservations whose start is
/// at or after the candidate's end — the earliest slot that opens once the
/// requested interval would have finished.
fn next_available_time(
  candidate: &Candidate,
  existing: &[Reservation],
) -> Option<TimeOfDay> {
  existing
    .iter()
    .filter(|r| {
      r.room_id == candidate.room_id
        && r.date == candidate.date
        && r.start_time >= candidate.end_time
    })
    .map(|r| r.end_time)
    .min()
}

/// Every room other than the candidate's that has no reservation on the
/// same date overlapping the candidate interval. Rooms with nothing booked
/// that day qualify. No capacity or kind filtering.
fn alternative_rooms(
  candidate: &Candidate,
  existing: &[Reservation],
  rooms: &[Room],
) -> Vec<AlternativeRoom> {
  rooms
    .iter()
    .filter(|room| room.id != candidate.room_id)
    .filter(|room| {
      !existing.iter().any(|r| {
        r.room_id == room.id
          && r.date == candidate.date
          && overlaps(candidate.start_time, candidate.end_time, r.start_time, r.end_time)
      })
    })
    .map(|room| AlternativeRoom {
      id:       room.id.clone(),
      name:     room.name.clone(),
      capacity: room.capacity,
    })
    .collect()
}

// ─── Free-gap search ─────────────────────────────────────────────────────────

/// The window within which advisory free slots are reported.
#[derive(Debug, Clone, Copy)]
pub struct BusinessHours {
  pub open:  TimeOfDay,
  pub close: TimeOfDay,
}

impl Default for BusinessHours {
  fn default() -> Self {
    Self {
      open:  TimeOfDay::from_hm(7, 30),
      close: TimeOfDay::from_hm(22, 0),
    }
  }
}

/// A gap long enough to host the requested duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeSlot {
  pub start_time: TimeOfDay,
  pub end_time:   TimeOfDay,
}

/// Free gaps of at least `duration_minutes` within `hours`, given one
/// room's reservations for one date.
///
/// Reports the gap before the first reservation, each gap between
/// consecutive reservations, and the gap after the last one. With nothing
/// booked, the whole window is a single candidate slot. Advisory only —
/// authoritative decisions always go through [`check_conflict`].
pub fn free_slots(
  reservations: &[Reservation],
  duration_minutes: u32,
  hours: &BusinessHours,
) -> Vec<FreeSlot> {
  let mut booked: Vec<&Reservation> = reservations.iter().collect();
  booked.sort_by_key(|r| r.start_time);

  if booked.is_empty() {
    return vec![FreeSlot { start_time: hours.open, end_time: hours.close }];
  }

  let mut slots = Vec::new();

  let first = booked[0];
  if hours.open.minutes_until(first.start_time) >= duration_minutes {
    slots.push(FreeSlot { start_time: hours.open, end_time: first.start_time });
  }

  for pair in booked.windows(2) {
    let (prev, next) = (pair[0], pair[1]);
    if prev.end_time.minutes_until(next.start_time) >= duration_minutes {
      slots.push(FreeSlot {
        start_time: prev.end_time,
        end_time:   next.start_time,
      });
    }
  }

  let last = booked[booked.len() - 1];
  if last.end_time.minutes_until(hours.close) >= duration_minutes {
    slots.push(FreeSlot { start_time: last.end_time, end_time: hours.close });
  }

  slots
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::room::RoomKind;

  fn t(s: &str) -> TimeOfDay { TimeOfDay::parse(s).unwrap() }

  fn date() -> NaiveDate { NaiveDate::from_ymd_opt(2025, 3, 26).unwrap() }

  fn room(id: &str, name: &str, capacity: u32) -> Room {
    Room {
      id: id.into(),
      name: name.into(),
      capacity,
      kind: RoomKind::Lecture,
      features: vec!["projector".into()],
      image: String::new(),
    }
  }

  fn reservation(id: i64, room_id: &str, start: &str, end: &str) -> Reservation {
    Reservation {
      id,
      room_id: room_id.into(),
      date: date(),
      start_time: t(start),
      end_time: TimeOfDay::parse_end(end).unwrap(),
      purpose: "Advanced Physics Lecture".into(),
      is_recurring: false,
      recurrence_pattern: None,
    }
  }

  fn candidate(room_id: &str, start: &str, end: &str) -> Candidate {
    Candidate {
      room_id: room_id.into(),
      date: date(),
      start_time: t(start),
      end_time: TimeOfDay::parse_end(end).unwrap(),
    }
  }

  // ── overlaps ──────────────────────────────────────────────────────────────

  #[test]
  fn containment_both_directions() {
    // A contains B
    assert!(overlaps(t("09:00"), t("13:00"), t("10:00"), t("12:00")));
    // B contains A
    assert!(overlaps(t("10:30"), t("11:00"), t("10:00"), t("12:00")));
    // identical intervals
    assert!(overlaps(t("10:00"), t("12:00"), t("10:00"), t("12:00")));
  }

  #[test]
  fn partial_overlaps() {
    // A starts inside B
    assert!(overlaps(t("11:00"), t("13:00"), t("10:00"), t("12:00")));
    // A ends inside B
    assert!(overlaps(t("09:00"), t("11:00"), t("10:00"), t("12:00")));
  }

  #[test]
  fn back_to_back_is_not_a_conflict() {
    assert!(!overlaps(t("10:00"), t("11:00"), t("11:00"), t("12:00")));
    assert!(!overlaps(t("11:00"), t("12:00"), t("10:00"), t("11:00")));
  }

  #[test]
  fn disjoint_intervals() {
    assert!(!overlaps(t("08:00"), t("09:00"), t("10:00"), t("12:00")));
    assert!(!overlaps(t("13:00"), t("14:00"), t("10:00"), t("12:00")));
  }

  #[test]
  fn overlap_is_symmetric() {
    // The four case labels are order-sensitive but the predicate as a whole
    // must behave like symmetric interval intersection.
    let points = ["08:00", "09:00", "10:00", "11:00", "12:00"];
    for (i, &a1) in points.iter().enumerate() {
      for &a2 in &points[i + 1..] {
        for (j, &b1) in points.iter().enumerate() {
          for &b2 in &points[j + 1..] {
            assert_eq!(
              overlaps(t(a1), t(a2), t(b1), t(b2)),
              overlaps(t(b1), t(b2), t(a1), t(a2)),
              "asymmetric for [{a1},{a2}) vs [{b1},{b2})"
            );
          }
        }
      }
    }
  }

  #[test]
  fn midnight_end_conflicts_with_late_evening() {
    // 22:00–00:00 normalizes to 22:00–24:00 and must collide with 23:00–24:00.
    let end = TimeOfDay::parse_end("00:00").unwrap();
    assert!(overlaps(t("23:00"), TimeOfDay::END_OF_DAY, t("22:00"), end));
  }

  // ── check_conflict ────────────────────────────────────────────────────────

  #[test]
  fn clear_when_nothing_booked() {
    let verdict = check_conflict(
      &candidate("101", "10:00", "12:00"),
      &[],
      &[room("101", "Room 101", 45)],
      None,
    );
    assert!(verdict.is_clear());
  }

  #[test]
  fn conflict_reports_first_matching_reservation() {
    let existing = vec![
      reservation(1, "101", "10:00", "12:00"),
      reservation(2, "101", "12:30", "13:30"),
    ];
    let rooms = vec![room("101", "Room 101", 45)];

    let Verdict::Conflict(details) =
      check_conflict(&candidate("101", "11:00", "13:00"), &existing, &rooms, None)
    else {
      panic!("expected a conflict");
    };

    assert_eq!(details.existing.room_name, "Room 101");
    assert_eq!(details.existing.start_time, t("10:00"));
    assert_eq!(details.existing.end_time, t("12:00"));
    assert_eq!(details.existing.purpose, "Advanced Physics Lecture");
  }

  #[test]
  fn other_room_and_other_date_do_not_conflict() {
    let mut elsewhere = reservation(1, "203", "10:00", "12:00");
    let mut other_day = reservation(2, "101", "10:00", "12:00");
    other_day.date = NaiveDate::from_ymd_opt(2025, 3, 27).unwrap();
    elsewhere.purpose = "Chemistry Lab".into();

    let verdict = check_conflict(
      &candidate("101", "10:00", "12:00"),
      &[elsewhere, other_day],
      &[room("101", "Room 101", 45), room("203", "Lab 203", 30)],
      None,
    );
    assert!(verdict.is_clear());
  }

  #[test]
  fn touching_boundary_is_clear() {
    let existing = vec![reservation(1, "101", "10:00", "12:00")];
    let verdict = check_conflict(
      &candidate("101", "12:00", "13:00"),
      &existing,
      &[room("101", "Room 101", 45)],
      None,
    );
    assert!(verdict.is_clear());
  }

  #[test]
  fn excluding_own_id_prevents_self_conflict() {
    // Editing reservation 5 with its own identical interval must pass.
    let existing = vec![reservation(5, "101", "10:00", "12:00")];
    let verdict = check_conflict(
      &candidate("101", "10:00", "12:00"),
      &existing,
      &[room("101", "Room 101", 45)],
      Some(5),
    );
    assert!(verdict.is_clear());
  }

  #[test]
  fn exclusion_only_skips_the_named_id() {
    let existing = vec![
      reservation(5, "101", "10:00", "12:00"),
      reservation(6, "101", "11:00", "13:00"),
    ];
    let verdict = check_conflict(
      &candidate("101", "10:00", "12:00"),
      &existing,
      &[room("101", "Room 101", 45)],
      Some(5),
    );
    assert!(!verdict.is_clear());
  }

  #[test]
  fn next_available_time_is_minimum_qualifying_end() {
    let existing = vec![
      reservation(1, "101", "10:00", "12:00"),
      reservation(2, "101", "14:00", "15:00"),
      reservation(3, "101", "13:00", "16:00"),
    ];
    let Verdict::Conflict(details) = check_conflict(
      &candidate("101", "11:00", "13:00"),
      &existing,
      &[room("101", "Room 101", 45)],
      None,
    ) else {
      panic!("expected a conflict");
    };

    // Both 13:00–16:00 and 14:00–15:00 start at or after 13:00; the minimum
    // end among them is 15:00.
    assert_eq!(details.next_available_time, Some(t("15:00")));
  }

  #[test]
  fn next_available_time_absent_when_nothing_later() {
    let existing = vec![reservation(1, "101", "10:00", "12:00")];
    let Verdict::Conflict(details) = check_conflict(
      &candidate("101", "11:00", "13:00"),
      &existing,
      &[room("101", "Room 101", 45)],
      None,
    ) else {
      panic!("expected a conflict");
    };
    assert_eq!(details.next_available_time, None);
  }

  #[test]
  fn alternative_rooms_exclude_candidate_and_busy_rooms() {
    let mut lab_booking = reservation(2, "203", "10:30", "11:30");
    lab_booking.purpose = "Chemistry Lab".into();
    let existing = vec![reservation(1, "101", "10:00", "12:00"), lab_booking];
    let rooms = vec![
      room("101", "Room 101", 45),
      room("203", "Lab 203", 30),
      room("305", "Room 305", 70),
    ];

    let Verdict::Conflict(details) =
      check_conflict(&candidate("101", "11:00", "13:00"), &existing, &rooms, None)
    else {
      panic!("expected a conflict");
    };

    let ids: Vec<&str> =
      details.alternative_rooms.iter().map(|r| r.id.as_str()).collect();
    // 101 is the candidate's own room, 203 is busy; 305 has nothing booked.
    assert_eq!(ids, vec!["305"]);
    assert_eq!(details.alternative_rooms[0].capacity, 70);
  }

  #[test]
  fn alternative_room_free_at_touching_boundary_qualifies() {
    let mut other = reservation(2, "203", "08:00", "11:00");
    other.purpose = "Chemistry Lab".into();
    let existing = vec![reservation(1, "101", "10:00", "12:00"), other];
    let rooms = vec![room("101", "Room 101", 45), room("203", "Lab 203", 30)];

    let Verdict::Conflict(details) =
      check_conflict(&candidate("101", "11:00", "13:00"), &existing, &rooms, None)
    else {
      panic!("expected a conflict");
    };
    assert_eq!(details.alternative_rooms.len(), 1);
    assert_eq!(details.alternative_rooms[0].id, "203");
  }

  #[test]
  fn end_to_end_room_a_scenario() {
    // Room A booked 10:00–12:00 on 2025-03-26; 11:00–13:00 conflicts with
    // no later booking, Room A absent from alternatives; 12:00–13:00 clear.
    let existing = vec![reservation(1, "101", "10:00", "12:00")];
    let rooms = vec![room("101", "Room 101", 45), room("305", "Room 305", 70)];

    let Verdict::Conflict(details) =
      check_conflict(&candidate("101", "11:00", "13:00"), &existing, &rooms, None)
    else {
      panic!("expected a conflict");
    };
    assert_eq!(details.next_available_time, None);
    assert!(details.alternative_rooms.iter().all(|r| r.id != "101"));

    assert!(
      check_conflict(&candidate("101", "12:00", "13:00"), &existing, &rooms, None)
        .is_clear()
    );
  }

  #[test]
  fn conflict_details_serialize_with_wire_keys() {
    let existing = vec![reservation(1, "101", "10:00", "12:00")];
    let rooms = vec![room("101", "Room 101", 45)];
    let Verdict::Conflict(details) =
      check_conflict(&candidate("101", "11:00", "13:00"), &existing, &rooms, None)
    else {
      panic!("expected a conflict");
    };

    let json = serde_json::to_value(&details).unwrap();
    assert_eq!(json["existing_reservation"]["room_name"], "Room 101");
    assert_eq!(json["existing_reservation"]["start_time"], "10:00:00");
    assert!(json["next_available_time"].is_null());
    assert!(json["alternative_rooms"].is_array());
  }

  // ── free_slots ────────────────────────────────────────────────────────────

  #[test]
  fn empty_day_is_one_whole_window_slot() {
    let slots = free_slots(&[], 60, &BusinessHours::default());
    assert_eq!(
      slots,
      vec![FreeSlot { start_time: t("07:30"), end_time: t("22:00") }]
    );
  }

  #[test]
  fn gaps_before_between_and_after() {
    let booked = vec![
      reservation(1, "101", "09:00", "10:00"),
      reservation(2, "101", "12:00", "14:00"),
    ];
    let slots = free_slots(&booked, 60, &BusinessHours::default());
    assert_eq!(
      slots,
      vec![
        FreeSlot { start_time: t("07:30"), end_time: t("09:00") },
        FreeSlot { start_time: t("10:00"), end_time: t("12:00") },
        FreeSlot { start_time: t("14:00"), end_time: t("22:00") },
      ]
    );
  }

  #[test]
  fn short_gaps_are_dropped() {
    let booked = vec![
      reservation(1, "101", "09:00", "10:00"),
      reservation(2, "101", "10:30", "14:00"),
    ];
    // The 30-minute gap at 10:00 cannot host a 60-minute booking.
    let slots = free_slots(&booked, 60, &BusinessHours::default());
    assert_eq!(
      slots,
      vec![
        FreeSlot { start_time: t("07:30"), end_time: t("09:00") },
        FreeSlot { start_time: t("14:00"), end_time: t("22:00") },
      ]
    );
  }

  #[test]
  fn unsorted_input_is_sorted_first() {
    let booked = vec![
      reservation(2, "101", "12:00", "14:00"),
      reservation(1, "101", "09:00", "10:00"),
    ];
    let slots = free_slots(&booked, 120, &BusinessHours::default());
    assert_eq!(
      slots,
      vec![
        FreeSlot { start_time: t("10:00"), end_time: t("12:00") },
        FreeSlot { start_time: t("14:00"), end_time: t("22:00") },
      ]
    );
  }

  #[test]
  fn exact_fit_gap_qualifies() {
    let booked = vec![
      reservation(1, "101", "07:30", "10:00"),
      reservation(2, "101", "11:00", "22:00"),
    ];
    let slots = free_slots(&booked, 60, &BusinessHours::default());
    assert_eq!(
      slots,
      vec![FreeSlot { start_time: t("10:00"), end_time: t("11:00") }]
    );
  }
}
