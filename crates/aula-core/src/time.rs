//! Time-of-day normalization.
//!
//! Reservation intervals are compared as plain times on a single calendar
//! date. A [`TimeOfDay`] is the number of seconds since midnight, with one
//! extra representable value: `86_400` renders as `24:00:00` and means
//! "end of day". An end time of `00:00` would otherwise sort before every
//! start time and the last slot of the day could never conflict.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::{Error, Result};

const SECS_PER_DAY: u32 = 86_400;

/// A canonical time of day, ordered numerically.
///
/// Construct via [`TimeOfDay::parse`] (start times) or
/// [`TimeOfDay::parse_end`] (end times, which applies the midnight rule).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u32);

impl TimeOfDay {
  /// 00:00:00 — start of day.
  pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
  /// 24:00:00 — end of day.
  pub const END_OF_DAY: TimeOfDay = TimeOfDay(SECS_PER_DAY);

  /// Parse `HH:MM` or `HH:MM:SS`; missing seconds are padded to `:00`.
  ///
  /// `24:00` and `24:00:00` are accepted so canonical end times survive a
  /// round trip through their string form.
  pub fn parse(s: &str) -> Result<Self> {
    let mut parts = s.split(':');
    let (h, m, sec) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
      (Some(h), Some(m), sec, None) => (h, m, sec.unwrap_or("00")),
      _ => return Err(Error::InvalidTime(s.to_string())),
    };

    let err = || Error::InvalidTime(s.to_string());
    let h: u32 = h.parse().map_err(|_| err())?;
    let m: u32 = m.parse().map_err(|_| err())?;
    let sec: u32 = sec.parse().map_err(|_| err())?;

    if m > 59 || sec > 59 {
      return Err(err());
    }
    let total = h * 3600 + m * 60 + sec;
    if total > SECS_PER_DAY {
      return Err(err());
    }
    Ok(TimeOfDay(total))
  }

  /// Parse an interval *end* time, remapping `00:00`/`00:00:00` to
  /// `24:00:00`. Start times never go through this path.
  pub fn parse_end(s: &str) -> Result<Self> {
    Ok(Self::parse(s)?.normalize_end())
  }

  /// Apply the midnight rule to an already-parsed end time.
  pub fn normalize_end(self) -> Self {
    if self == Self::MIDNIGHT { Self::END_OF_DAY } else { self }
  }

  pub fn from_hm(hours: u32, minutes: u32) -> Self {
    TimeOfDay((hours * 3600 + minutes * 60).min(SECS_PER_DAY))
  }

  /// Whole minutes from `self` to `later`; zero if `later` is earlier.
  pub fn minutes_until(self, later: TimeOfDay) -> u32 {
    later.0.saturating_sub(self.0) / 60
  }
}

impl fmt::Display for TimeOfDay {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let h = self.0 / 3600;
    let m = (self.0 % 3600) / 60;
    let s = self.0 % 60;
    write!(f, "{h:02}:{m:02}:{s:02}")
  }
}

// ─── Serde ───────────────────────────────────────────────────────────────────

impl Serialize for TimeOfDay {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for TimeOfDay {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let s = String::deserialize(deserializer)?;
    TimeOfDay::parse(&s).map_err(de::Error::custom)
  }
}

/// `deserialize_with` helper for end-time fields: parses and applies the
/// midnight rule in one step.
pub fn deserialize_end<'de, D: Deserializer<'de>>(
  deserializer: D,
) -> Result<TimeOfDay, D::Error> {
  let s = String::deserialize(deserializer)?;
  TimeOfDay::parse_end(&s).map_err(de::Error::custom)
}

/// Like [`deserialize_end`] but for `Option<TimeOfDay>` fields.
pub fn deserialize_end_opt<'de, D: Deserializer<'de>>(
  deserializer: D,
) -> Result<Option<TimeOfDay>, D::Error> {
  let s = Option::<String>::deserialize(deserializer)?;
  s.map(|s| TimeOfDay::parse_end(&s).map_err(de::Error::custom))
    .transpose()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
