//! Bulk population of a store from pre-parsed source rows.
//!
//! The whole load is one transaction committed at the end. Each row runs
//! under its own savepoint, so a row that fails validation or a database
//! check is rolled back on its own and skipped; the rest still land.

use std::collections::HashSet;

use lateshow_core::validate::validate_rating;

use crate::{Result, SqliteStore, rows};

/// One source row, already split into fields by the caller.
#[derive(Debug, Clone)]
pub struct LoadRow {
  /// 1-based line in the source, for log messages.
  pub line:       u64,
  pub date:       String,
  pub number:     i64,
  pub guest_name: String,
  pub occupation: String,
  pub rating:     i64,
}

/// What a bulk load did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
  /// Distinct episodes referenced by loaded rows.
  pub episodes:    usize,
  /// Distinct guests referenced by loaded rows.
  pub guests:      usize,
  pub appearances: usize,
  pub skipped:     usize,
}

impl SqliteStore {
  /// Load `source`, upserting episodes by `(date, number)` and guests by name,
  /// and creating one appearance per row.
  ///
  /// With `clear` set, all existing appearances, episodes and guests are
  /// removed first, inside the same transaction.
  pub async fn bulk_load(&self, source: Vec<LoadRow>, clear: bool) -> Result<LoadReport> {
    let report = self
      .conn
      .call(move |conn| {
        let mut tx = conn.transaction()?;

        if clear {
          tx.execute_batch(
            "DELETE FROM appearances;
             DELETE FROM episodes;
             DELETE FROM guests;",
          )?;
          tracing::info!("cleared existing data");
        }

        let mut episodes = HashSet::new();
        let mut guests   = HashSet::new();
        let mut report   = LoadReport::default();

        for row in source {
          let rating = match validate_rating(row.rating) {
            Ok(r) => r,
            Err(e) => {
              tracing::warn!(line = row.line, error = %e, "skipping row");
              report.skipped += 1;
              continue;
            }
          };

          let sp = tx.savepoint()?;
          let loaded = rows::upsert_episode(&sp, &row.date, row.number).and_then(
            |episode| {
              let guest = rows::upsert_guest(&sp, &row.guest_name, &row.occupation)?;
              rows::insert_appearance(&sp, rating, episode.id, guest.id)
            },
          );

          match loaded {
            Ok(appearance) => {
              sp.commit()?;
              episodes.insert(appearance.episode_id);
              guests.insert(appearance.guest_id);
              report.appearances += 1;
            }
            Err(e) => {
              // Dropping the savepoint rolls the row back.
              tracing::warn!(line = row.line, error = %e, "skipping row");
              report.skipped += 1;
            }
          }
        }

        tx.commit()?;

        report.episodes = episodes.len();
        report.guests = guests.len();
        Ok(report)
      })
      .await?;

    tracing::info!(
      episodes = report.episodes,
      guests = report.guests,
      appearances = report.appearances,
      skipped = report.skipped,
      "bulk load complete"
    );
    Ok(report)
  }
}
