//! SQL schema for the Aula SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Read-mostly reference data, seeded once when empty.
CREATE TABLE IF NOT EXISTS rooms (
    id       TEXT PRIMARY KEY,     -- short external id, e.g. '101'
    name     TEXT NOT NULL,
    capacity INTEGER NOT NULL,
    kind     TEXT NOT NULL,        -- 'lecture' | 'lab' | 'exam'
    features TEXT NOT NULL DEFAULT '[]',  -- JSON array of tags
    image    TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS reservations (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    room_id            TEXT NOT NULL REFERENCES rooms(id),
    date               TEXT NOT NULL,   -- YYYY-MM-DD
    start_time         TEXT NOT NULL,   -- canonical HH:MM:SS
    end_time           TEXT NOT NULL,   -- canonical HH:MM:SS; 24:00:00 = end of day
    purpose            TEXT NOT NULL,
    is_recurring       INTEGER NOT NULL DEFAULT 0,
    recurrence_pattern TEXT             -- JSON or NULL
);

CREATE INDEX IF NOT EXISTS reservations_room_date_idx ON reservations(room_id, date);
CREATE INDEX IF NOT EXISTS reservations_time_idx      ON reservations(start_time, end_time);

PRAGMA user_version = 1;
";
