//! Synchronous row-level helpers shared by [`crate::SqliteStore`] and the bulk
//! loader.
//!
//! Each helper takes a plain [`Connection`], so it runs unchanged against a
//! connection, a [`rusqlite::Transaction`], or a [`rusqlite::Savepoint`].

use lateshow_core::{
  show::{Appearance, AppearanceGraph, Episode, Guest},
  validate::{Rating, validate_rating},
};
use rusqlite::{Connection, OptionalExtension as _, Row, params, types::Type};

// ─── Row mapping ─────────────────────────────────────────────────────────────

pub const EPISODE_COLUMNS: &str = "e.id, e.date, e.number";
pub const GUEST_COLUMNS: &str = "g.id, g.name, g.occupation";
pub const APPEARANCE_COLUMNS: &str = "a.id, a.rating, a.episode_id, a.guest_id";

/// Map three columns starting at `at` onto an [`Episode`].
pub fn episode_at(row: &Row<'_>, at: usize) -> rusqlite::Result<Episode> {
  Ok(Episode {
    id:     row.get(at)?,
    date:   row.get(at + 1)?,
    number: row.get(at + 2)?,
  })
}

pub fn guest_at(row: &Row<'_>, at: usize) -> rusqlite::Result<Guest> {
  Ok(Guest {
    id:         row.get(at)?,
    name:       row.get(at + 1)?,
    occupation: row.get(at + 2)?,
  })
}

pub fn appearance_at(row: &Row<'_>, at: usize) -> rusqlite::Result<Appearance> {
  Ok(Appearance {
    id:         row.get(at)?,
    rating:     rating_at(row, at + 1)?,
    episode_id: row.get(at + 2)?,
    guest_id:   row.get(at + 3)?,
  })
}

/// A stored rating that fails validation is surfaced as a conversion error
/// rather than silently passed through.
fn rating_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Rating> {
  let raw: i64 = row.get(idx)?;
  validate_rating(raw).map_err(|e| {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e))
  })
}

// ─── Lookups ─────────────────────────────────────────────────────────────────

pub fn find_episode(conn: &Connection, id: i64) -> rusqlite::Result<Option<Episode>> {
  conn
    .query_row(
      &format!("SELECT {EPISODE_COLUMNS} FROM episodes e WHERE e.id = ?1"),
      params![id],
      |row| episode_at(row, 0),
    )
    .optional()
}

pub fn find_guest(conn: &Connection, id: i64) -> rusqlite::Result<Option<Guest>> {
  conn
    .query_row(
      &format!("SELECT {GUEST_COLUMNS} FROM guests g WHERE g.id = ?1"),
      params![id],
      |row| guest_at(row, 0),
    )
    .optional()
}

/// An appearance joined with both of its parents.
pub fn find_appearance(
  conn: &Connection,
  id: i64,
) -> rusqlite::Result<Option<AppearanceGraph>> {
  conn
    .query_row(
      &format!(
        "SELECT {APPEARANCE_COLUMNS}, {EPISODE_COLUMNS}, {GUEST_COLUMNS}
         FROM appearances a
         JOIN episodes e ON e.id = a.episode_id
         JOIN guests   g ON g.id = a.guest_id
         WHERE a.id = ?1"
      ),
      params![id],
      |row| {
        Ok(AppearanceGraph {
          appearance: appearance_at(row, 0)?,
          episode:    episode_at(row, 4)?,
          guest:      guest_at(row, 7)?,
        })
      },
    )
    .optional()
}

// ─── Inserts ─────────────────────────────────────────────────────────────────

pub fn insert_episode(
  conn: &Connection,
  date: &str,
  number: i64,
) -> rusqlite::Result<Episode> {
  conn.execute(
    "INSERT INTO episodes (date, number) VALUES (?1, ?2)",
    params![date, number],
  )?;
  Ok(Episode {
    id: conn.last_insert_rowid(),
    date: date.to_owned(),
    number,
  })
}

pub fn insert_guest(
  conn: &Connection,
  name: &str,
  occupation: &str,
) -> rusqlite::Result<Guest> {
  conn.execute(
    "INSERT INTO guests (name, occupation) VALUES (?1, ?2)",
    params![name, occupation],
  )?;
  Ok(Guest {
    id:         conn.last_insert_rowid(),
    name:       name.to_owned(),
    occupation: occupation.to_owned(),
  })
}

/// Callers must have resolved both parents; the rating type guarantees the
/// range check already ran.
pub fn insert_appearance(
  conn: &Connection,
  rating: Rating,
  episode_id: i64,
  guest_id: i64,
) -> rusqlite::Result<Appearance> {
  conn.execute(
    "INSERT INTO appearances (rating, episode_id, guest_id) VALUES (?1, ?2, ?3)",
    params![rating.get(), episode_id, guest_id],
  )?;
  Ok(Appearance {
    id: conn.last_insert_rowid(),
    rating,
    episode_id,
    guest_id,
  })
}

/// Find the episode with this `(date, number)` pair, creating it if absent.
pub fn upsert_episode(
  conn: &Connection,
  date: &str,
  number: i64,
) -> rusqlite::Result<Episode> {
  let existing = conn
    .query_row(
      &format!(
        "SELECT {EPISODE_COLUMNS} FROM episodes e
         WHERE e.date = ?1 AND e.number = ?2
         ORDER BY e.id LIMIT 1"
      ),
      params![date, number],
      |row| episode_at(row, 0),
    )
    .optional()?;
  match existing {
    Some(e) => Ok(e),
    None => insert_episode(conn, date, number),
  }
}

/// Find the guest with this name, creating it if absent. The occupation of
/// an existing guest is left untouched.
pub fn upsert_guest(
  conn: &Connection,
  name: &str,
  occupation: &str,
) -> rusqlite::Result<Guest> {
  let existing = conn
    .query_row(
      &format!(
        "SELECT {GUEST_COLUMNS} FROM guests g WHERE g.name = ?1 ORDER BY g.id LIMIT 1"
      ),
      params![name],
      |row| guest_at(row, 0),
    )
    .optional()?;
  match existing {
    Some(g) => Ok(g),
    None => insert_guest(conn, name, occupation),
  }
}

// ─── Cascading delete ────────────────────────────────────────────────────────

/// A row type that owns appearances.
#[derive(Debug, Clone, Copy)]
pub enum Parent {
  Episode,
  Guest,
}

impl Parent {
  fn table(self) -> &'static str {
    match self {
      Self::Episode => "episodes",
      Self::Guest => "guests",
    }
  }

  fn foreign_key(self) -> &'static str {
    match self {
      Self::Episode => "episode_id",
      Self::Guest => "guest_id",
    }
  }
}

/// Remove a parent row and all of its appearances in one transaction.
///
/// Returns the number of appearances removed, or `None` (with nothing
/// written) when the parent does not exist.
pub fn delete_cascading(
  conn: &mut Connection,
  parent: Parent,
  id: i64,
) -> rusqlite::Result<Option<usize>> {
  let tx = conn.transaction()?;

  let exists = tx
    .query_row(
      &format!("SELECT 1 FROM {} WHERE id = ?1", parent.table()),
      params![id],
      |_| Ok(()),
    )
    .optional()?
    .is_some();
  if !exists {
    return Ok(None);
  }

  let removed = tx.execute(
    &format!("DELETE FROM appearances WHERE {} = ?1", parent.foreign_key()),
    params![id],
  )?;
  tx.execute(
    &format!("DELETE FROM {} WHERE id = ?1", parent.table()),
    params![id],
  )?;

  tx.commit()?;
  Ok(Some(removed))
}
