//! Integration tests for `SqliteStore` against an in-memory database.

use lateshow_core::{
  Error as CoreError,
  error::{RatingError, Reference},
  show::{Episode, Guest, NewAppearance, NewEpisode, NewGuest},
  store::{ShowStore, StoreError},
};

use crate::{Error, LoadRow, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn episode(s: &SqliteStore, number: i64) -> Episode {
  s.create_episode(NewEpisode { date: format!("1/{number}/99"), number })
    .await
    .unwrap()
}

async fn guest(s: &SqliteStore, name: &str) -> Guest {
  s.create_guest(NewGuest { name: name.into(), occupation: "comedian".into() })
    .await
    .unwrap()
}

fn appearance(rating: i64, episode_id: i64, guest_id: i64) -> NewAppearance {
  NewAppearance { rating, episode_id, guest_id }
}

// ─── Episodes & guests ───────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_episode() {
  let s = store().await;
  let e = episode(&s, 1).await;

  let fetched = s.get_episode(e.id).await.unwrap();
  assert_eq!(fetched, Some(e));
}

#[tokio::test]
async fn get_missing_episode_returns_none() {
  let s = store().await;
  assert!(s.get_episode(9999).await.unwrap().is_none());
  assert!(s.episode_graph(9999).await.unwrap().is_none());
}

#[tokio::test]
async fn list_episodes_is_ordered_and_stable() {
  let s = store().await;
  for n in [3, 1, 2] {
    episode(&s, n).await;
  }

  let first = s.list_episodes().await.unwrap();
  let second = s.list_episodes().await.unwrap();
  assert_eq!(first, second);
  let ids: Vec<_> = first.iter().map(|e| e.id).collect();
  let mut sorted = ids.clone();
  sorted.sort();
  assert_eq!(ids, sorted);
}

#[tokio::test]
async fn list_guests_returns_all() {
  let s = store().await;
  guest(&s, "Jay Leno").await;
  guest(&s, "Conan O'Brien").await;

  let guests = s.list_guests().await.unwrap();
  assert_eq!(guests.len(), 2);
  assert_eq!(guests[0].name, "Jay Leno");
}

// ─── Appearances ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_appearance_returns_both_parents() {
  let s = store().await;
  let e = episode(&s, 1).await;
  let g = guest(&s, "Jay Leno").await;

  let graph = s.create_appearance(appearance(3, e.id, g.id)).await.unwrap();
  assert_eq!(graph.appearance.rating.get(), 3);
  assert_eq!(graph.episode, e);
  assert_eq!(graph.guest, g);

  let fetched = s.get_appearance(graph.appearance.id).await.unwrap().unwrap();
  assert_eq!(fetched.appearance, graph.appearance);
}

#[tokio::test]
async fn create_appearance_with_invalid_rating_writes_nothing() {
  let s = store().await;
  let e = episode(&s, 1).await;
  let g = guest(&s, "Jay Leno").await;

  let err = s.create_appearance(appearance(6, e.id, g.id)).await.unwrap_err();
  assert!(matches!(
    err.domain(),
    Some(CoreError::InvalidRating(RatingError::OutOfRange(6)))
  ));
  assert!(s.list_appearances().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_appearance_reports_every_missing_reference() {
  let s = store().await;
  let e = episode(&s, 1).await;
  let g = guest(&s, "Jay Leno").await;

  let err = s.create_appearance(appearance(3, 9999, g.id)).await.unwrap_err();
  match err.domain() {
    Some(CoreError::ReferenceNotFound(missing)) => {
      assert_eq!(missing, &[Reference::Episode(9999)]);
    }
    other => panic!("unexpected: {other:?}"),
  }

  let err = s.create_appearance(appearance(3, 9998, 9999)).await.unwrap_err();
  match err.domain() {
    Some(CoreError::ReferenceNotFound(missing)) => {
      assert_eq!(missing, &[Reference::Episode(9998), Reference::Guest(9999)]);
    }
    other => panic!("unexpected: {other:?}"),
  }

  // Unresolved references win over an invalid rating.
  let err = s.create_appearance(appearance(0, e.id, 9999)).await.unwrap_err();
  assert!(matches!(err.domain(), Some(CoreError::ReferenceNotFound(_))));

  assert!(s.list_appearances().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_rating_is_validated() {
  let s = store().await;
  let e = episode(&s, 1).await;
  let g = guest(&s, "Jay Leno").await;
  let created = s.create_appearance(appearance(2, e.id, g.id)).await.unwrap();
  let id = created.appearance.id;

  let updated = s.update_appearance_rating(id, 5).await.unwrap().unwrap();
  assert_eq!(updated.appearance.rating.get(), 5);

  let err = s.update_appearance_rating(id, 0).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::InvalidRating(_))));

  let still = s.get_appearance(id).await.unwrap().unwrap();
  assert_eq!(still.appearance.rating.get(), 5);

  assert!(s.update_appearance_rating(9999, 3).await.unwrap().is_none());
}

#[tokio::test]
async fn update_rating_on_missing_appearance_is_absent_even_when_invalid() {
  let s = store().await;
  assert!(s.get_appearance(9999).await.unwrap().is_none());
  assert!(s.update_appearance_rating(9999, 0).await.unwrap().is_none());
  assert!(s.update_appearance_rating(9999, 42).await.unwrap().is_none());
}

#[tokio::test]
async fn schema_rejects_out_of_range_rating() {
  let s = store().await;
  let e = episode(&s, 1).await;
  let g = guest(&s, "Jay Leno").await;

  let result = s
    .conn
    .call(move |conn| {
      conn.execute(
        "INSERT INTO appearances (rating, episode_id, guest_id) VALUES (9, ?1, ?2)",
        rusqlite::params![e.id, g.id],
      )?;
      Ok(())
    })
    .await;
  assert!(result.is_err());
}

// ─── Graphs ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn episode_graph_joins_guests() {
  let s = store().await;
  let e = episode(&s, 1).await;
  let leno = guest(&s, "Jay Leno").await;
  let obrien = guest(&s, "Conan O'Brien").await;
  s.create_appearance(appearance(4, e.id, leno.id)).await.unwrap();
  s.create_appearance(appearance(2, e.id, obrien.id)).await.unwrap();

  let graph = s.episode_graph(e.id).await.unwrap().unwrap();
  assert_eq!(graph.episode, e);
  assert_eq!(graph.appearances.len(), 2);
  assert_eq!(graph.appearances[0].1, leno);
  assert_eq!(graph.appearances[1].1, obrien);
}

#[tokio::test]
async fn guest_graph_joins_episodes() {
  let s = store().await;
  let first = episode(&s, 1).await;
  let second = episode(&s, 2).await;
  let g = guest(&s, "Jay Leno").await;
  s.create_appearance(appearance(4, first.id, g.id)).await.unwrap();
  s.create_appearance(appearance(5, second.id, g.id)).await.unwrap();

  let graph = s.guest_graph(g.id).await.unwrap().unwrap();
  let episodes: Vec<_> = graph.appearances.iter().map(|(_, e)| e.id).collect();
  assert_eq!(episodes, vec![first.id, second.id]);
}

// ─── Cascades ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_episode_cascades_to_appearances() {
  let s = store().await;
  let doomed = episode(&s, 1).await;
  let kept = episode(&s, 2).await;
  let g = guest(&s, "Jay Leno").await;
  s.create_appearance(appearance(4, doomed.id, g.id)).await.unwrap();
  s.create_appearance(appearance(3, doomed.id, g.id)).await.unwrap();
  s.create_appearance(appearance(1, kept.id, g.id)).await.unwrap();

  let removed = s.delete_episode(doomed.id).await.unwrap();
  assert_eq!(removed, Some(2));

  assert!(s.get_episode(doomed.id).await.unwrap().is_none());
  let remaining = s.list_appearances().await.unwrap();
  assert_eq!(remaining.len(), 1);
  assert!(remaining.iter().all(|a| a.episode_id != doomed.id));
  assert!(s.get_guest(g.id).await.unwrap().is_some());
}

#[tokio::test]
async fn delete_guest_cascades_to_appearances() {
  let s = store().await;
  let e = episode(&s, 1).await;
  let g = guest(&s, "Jay Leno").await;
  s.create_appearance(appearance(4, e.id, g.id)).await.unwrap();

  assert_eq!(s.delete_guest(g.id).await.unwrap(), Some(1));
  assert!(s.list_appearances().await.unwrap().is_empty());
  assert!(s.get_episode(e.id).await.unwrap().is_some());
}

#[tokio::test]
async fn delete_missing_parent_returns_none() {
  let s = store().await;
  assert_eq!(s.delete_episode(9999).await.unwrap(), None);
  assert_eq!(s.delete_guest(9999).await.unwrap(), None);
}

#[tokio::test]
async fn raw_parent_delete_is_refused_while_referenced() {
  let s = store().await;
  let e = episode(&s, 1).await;
  let g = guest(&s, "Jay Leno").await;
  s.create_appearance(appearance(4, e.id, g.id)).await.unwrap();

  let result = s
    .conn
    .call(move |conn| {
      conn.execute("DELETE FROM episodes WHERE id = ?1", rusqlite::params![e.id])?;
      Ok(())
    })
    .await;
  assert!(result.is_err(), "foreign key should block orphaning");
  assert_eq!(s.list_appearances().await.unwrap().len(), 1);
}

// ─── Bulk load ───────────────────────────────────────────────────────────────

fn load_row(line: u64, date: &str, number: i64, name: &str, rating: i64) -> LoadRow {
  LoadRow {
    line,
    date: date.into(),
    number,
    guest_name: name.into(),
    occupation: "actor".into(),
    rating,
  }
}

#[tokio::test]
async fn bulk_load_upserts_and_skips_bad_rows() {
  let s = store().await;
  let rows = vec![
    load_row(2, "1/11/99", 1, "Michael J. Fox", 3),
    load_row(3, "1/12/99", 2, "Sandra Bernhard", 4),
    load_row(4, "1/13/99", 3, "Michael J. Fox", 7),
    load_row(5, "1/11/99", 1, "Tracey Ullman", 5),
  ];

  let report = s.bulk_load(rows, true).await.unwrap();
  assert_eq!(report.appearances, 3);
  assert_eq!(report.skipped, 1);
  assert_eq!(report.episodes, 2);
  assert_eq!(report.guests, 3);

  assert_eq!(s.list_episodes().await.unwrap().len(), 2);
  assert_eq!(s.list_guests().await.unwrap().len(), 3);
  assert_eq!(s.list_appearances().await.unwrap().len(), 3);
}

#[tokio::test]
async fn bulk_load_clear_replaces_existing_data() {
  let s = store().await;
  let e = episode(&s, 1).await;
  let g = guest(&s, "Jay Leno").await;
  s.create_appearance(appearance(4, e.id, g.id)).await.unwrap();

  s.bulk_load(vec![load_row(2, "1/11/99", 1, "Michael J. Fox", 3)], true)
    .await
    .unwrap();

  let guests = s.list_guests().await.unwrap();
  assert_eq!(guests.len(), 1);
  assert_eq!(guests[0].name, "Michael J. Fox");
}

#[tokio::test]
async fn bulk_load_without_clear_reuses_existing_guest() {
  let s = store().await;
  let g = guest(&s, "Jay Leno").await;

  s.bulk_load(vec![load_row(2, "1/11/99", 1, "Jay Leno", 3)], false)
    .await
    .unwrap();

  let guests = s.list_guests().await.unwrap();
  assert_eq!(guests, vec![g.clone()]);
  let appearances = s.list_appearances().await.unwrap();
  assert_eq!(appearances[0].guest_id, g.id);
}
