//! Room — read-mostly reference data.
//!
//! The room set is seeded once at schema bootstrap and treated as static;
//! expected scale is tens of rooms, so no caching layer sits in front of it.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// What a room is equipped to host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomKind {
  Lecture,
  Lab,
  Exam,
}

impl RoomKind {
  /// The string stored in the `kind` column.
  pub fn as_str(self) -> &'static str {
    match self {
      RoomKind::Lecture => "lecture",
      RoomKind::Lab => "lab",
      RoomKind::Exam => "exam",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "lecture" => Ok(RoomKind::Lecture),
      "lab" => Ok(RoomKind::Lab),
      "exam" => Ok(RoomKind::Exam),
      other => Err(Error::UnknownRoomKind(other.to_string())),
    }
  }
}

/// A bookable room.
///
/// `id` is a short, externally assigned identifier ("101", "203"). `image`
/// is an opaque display reference; nothing in the engine interprets it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
  pub id:       String,
  pub name:     String,
  pub capacity: u32,
  #[serde(rename = "type")]
  pub kind:     RoomKind,
  /// Unordered feature tags, e.g. "projector", "whiteboard", "computers".
  pub features: Vec<String>,
  pub image:    String,
}
