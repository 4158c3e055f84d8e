//! Error types for `aula-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid time of day: {0:?}")]
  InvalidTime(String),

  #[error("unknown room kind: {0:?}")]
  UnknownRoomKind(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
