//! [`SqliteStore`] — the SQLite implementation of [`ShowStore`].

use std::path::Path;

use lateshow_core::{
  error::Reference,
  show::{
    Appearance, AppearanceGraph, Episode, EpisodeGraph, Guest, GuestGraph,
    NewAppearance, NewEpisode, NewGuest,
  },
  store::ShowStore,
  validate::validate_rating,
};
use rusqlite::params;

use crate::{
  Result,
  rows::{
    self, APPEARANCE_COLUMNS, EPISODE_COLUMNS, GUEST_COLUMNS, Parent,
    appearance_at, episode_at, guest_at,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A show store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
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
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_parent(&self, parent: Parent, id: i64) -> Result<Option<usize>> {
    let removed = self
      .conn
      .call(move |conn| Ok(rows::delete_cascading(conn, parent, id)?))
      .await?;

    if let Some(n) = removed {
      tracing::debug!(?parent, id, appearances = n, "deleted with cascade");
    }
    Ok(removed)
  }
}

// ─── ShowStore impl ──────────────────────────────────────────────────────────

impl ShowStore for SqliteStore {
  type Error = crate::Error;

  // ── Episodes ──────────────────────────────────────────────────────────────

  async fn list_episodes(&self) -> Result<Vec<Episode>> {
    let episodes = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {EPISODE_COLUMNS} FROM episodes e ORDER BY e.id"
        ))?;
        let rows = stmt
          .query_map([], |row| episode_at(row, 0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(episodes)
  }

  async fn get_episode(&self, id: i64) -> Result<Option<Episode>> {
    Ok(
      self
        .conn
        .call(move |conn| Ok(rows::find_episode(conn, id)?))
        .await?,
    )
  }

  async fn episode_graph(&self, id: i64) -> Result<Option<EpisodeGraph>> {
    let graph = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let Some(episode) = rows::find_episode(&tx, id)? else {
          return Ok(None);
        };

        let mut stmt = tx.prepare(&format!(
          "SELECT {APPEARANCE_COLUMNS}, {GUEST_COLUMNS}
           FROM appearances a
           JOIN guests g ON g.id = a.guest_id
           WHERE a.episode_id = ?1
           ORDER BY a.id"
        ))?;
        let appearances = stmt
          .query_map(params![id], |row| {
            Ok((appearance_at(row, 0)?, guest_at(row, 4)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some(EpisodeGraph { episode, appearances }))
      })
      .await?;
    Ok(graph)
  }

  async fn create_episode(&self, input: NewEpisode) -> Result<Episode> {
    Ok(
      self
        .conn
        .call(move |conn| {
          Ok(rows::insert_episode(conn, &input.date, input.number)?)
        })
        .await?,
    )
  }

  async fn delete_episode(&self, id: i64) -> Result<Option<usize>> {
    self.delete_parent(Parent::Episode, id).await
  }

  // ── Guests ────────────────────────────────────────────────────────────────

  async fn list_guests(&self) -> Result<Vec<Guest>> {
    let guests = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {GUEST_COLUMNS} FROM guests g ORDER BY g.id"))?;
        let rows = stmt
          .query_map([], |row| guest_at(row, 0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(guests)
  }

  async fn get_guest(&self, id: i64) -> Result<Option<Guest>> {
    Ok(
      self
        .conn
        .call(move |conn| Ok(rows::find_guest(conn, id)?))
        .await?,
    )
  }

  async fn guest_graph(&self, id: i64) -> Result<Option<GuestGraph>> {
    let graph = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let Some(guest) = rows::find_guest(&tx, id)? else {
          return Ok(None);
        };

        let mut stmt = tx.prepare(&format!(
          "SELECT {APPEARANCE_COLUMNS}, {EPISODE_COLUMNS}
           FROM appearances a
           JOIN episodes e ON e.id = a.episode_id
           WHERE a.guest_id = ?1
           ORDER BY a.id"
        ))?;
        let appearances = stmt
          .query_map(params![id], |row| {
            Ok((appearance_at(row, 0)?, episode_at(row, 4)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some(GuestGraph { guest, appearances }))
      })
      .await?;
    Ok(graph)
  }

  async fn create_guest(&self, input: NewGuest) -> Result<Guest> {
    Ok(
      self
        .conn
        .call(move |conn| {
          Ok(rows::insert_guest(conn, &input.name, &input.occupation)?)
        })
        .await?,
    )
  }

  async fn delete_guest(&self, id: i64) -> Result<Option<usize>> {
    self.delete_parent(Parent::Guest, id).await
  }

  // ── Appearances ───────────────────────────────────────────────────────────

  async fn list_appearances(&self) -> Result<Vec<Appearance>> {
    let appearances = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {APPEARANCE_COLUMNS} FROM appearances a ORDER BY a.id"
        ))?;
        let rows = stmt
          .query_map([], |row| appearance_at(row, 0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(appearances)
  }

  async fn get_appearance(&self, id: i64) -> Result<Option<AppearanceGraph>> {
    Ok(
      self
        .conn
        .call(move |conn| Ok(rows::find_appearance(conn, id)?))
        .await?,
    )
  }

  async fn create_appearance(&self, input: NewAppearance) -> Result<AppearanceGraph> {
    // The closure reports domain failures in the inner `Result` so that the
    // transaction is dropped (and rolled back) before anything is written.
    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let episode = rows::find_episode(&tx, input.episode_id)?;
        let guest   = rows::find_guest(&tx, input.guest_id)?;

        let (episode, guest) = match (episode, guest) {
          (Some(e), Some(g)) => (e, g),
          (episode, guest) => {
            let mut missing = Vec::new();
            if episode.is_none() {
              missing.push(Reference::Episode(input.episode_id));
            }
            if guest.is_none() {
              missing.push(Reference::Guest(input.guest_id));
            }
            return Ok(Err(lateshow_core::Error::ReferenceNotFound(missing)));
          }
        };

        let rating = match validate_rating(input.rating) {
          Ok(r) => r,
          Err(e) => return Ok(Err(lateshow_core::Error::from(e))),
        };

        let appearance = rows::insert_appearance(&tx, rating, episode.id, guest.id)?;
        tx.commit()?;

        Ok(Ok(AppearanceGraph { appearance, episode, guest }))
      })
      .await?;

    let graph = outcome?;
    tracing::debug!(
      id = graph.appearance.id,
      episode_id = graph.episode.id,
      guest_id = graph.guest.id,
      "appearance created"
    );
    Ok(graph)
  }

  async fn update_appearance_rating(
    &self,
    id:     i64,
    rating: i64,
  ) -> Result<Option<AppearanceGraph>> {
    // Existence is checked before the rating, so an unknown id is reported as
    // absent whatever rating was sent. The update and the re-read share one
    // transaction.
    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if rows::find_appearance(&tx, id)?.is_none() {
          return Ok(Ok(None));
        }

        let rating = match validate_rating(rating) {
          Ok(r) => r,
          Err(e) => return Ok(Err(lateshow_core::Error::from(e))),
        };

        tx.execute(
          "UPDATE appearances SET rating = ?1 WHERE id = ?2",
          params![rating.get(), id],
        )?;
        let graph = rows::find_appearance(&tx, id)?;
        tx.commit()?;

        Ok(Ok(graph))
      })
      .await?;

    let graph = outcome?;
    if let Some(graph) = &graph {
      tracing::debug!(id, rating = graph.appearance.rating.get(), "appearance re-rated");
    }
    Ok(graph)
  }
}
