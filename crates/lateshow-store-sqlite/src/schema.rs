//! SQL schema for the Late Show SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Foreign keys are declared without `ON DELETE CASCADE`: parents are only
/// removed through the store's cascading delete, which clears the dependent
/// appearances first. With `foreign_keys = ON` any other path that would
/// orphan an appearance is refused by SQLite.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS episodes (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    date    TEXT    NOT NULL,
    number  INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS guests (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    occupation  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS appearances (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    rating      INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
    episode_id  INTEGER NOT NULL REFERENCES episodes(id),
    guest_id    INTEGER NOT NULL REFERENCES guests(id)
);

CREATE INDEX IF NOT EXISTS appearances_episode_idx ON appearances(episode_id);
CREATE INDEX IF NOT EXISTS appearances_guest_idx   ON appearances(guest_id);
CREATE INDEX IF NOT EXISTS episodes_date_number_idx ON episodes(date, number);
CREATE INDEX IF NOT EXISTS guests_name_idx          ON guests(name);

PRAGMA user_version = 1;
";
