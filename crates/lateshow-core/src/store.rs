//! The `ShowStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `lateshow-store-sqlite`).
//! Higher layers (`lateshow-api`, `lateshow-seed`) depend on this abstraction,
//! not on any concrete backend.
//!
//! Absence is not an error: lookups and deletes of a missing id return
//! `None`. Every multi-row write runs in a single backend transaction and is
//! either fully applied or not applied at all.

use std::future::Future;

use crate::{
  Error,
  show::{
    Appearance, AppearanceGraph, Episode, EpisodeGraph, Guest, GuestGraph,
    NewAppearance, NewEpisode, NewGuest,
  },
};

/// Lets callers recover the domain failure behind a backend error.
///
/// Backend errors that are not domain failures (I/O, driver, decoding)
/// return `None` and are treated as unexpected.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn domain(&self) -> Option<&Error>;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a show store backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ShowStore: Send + Sync {
  type Error: StoreError;

  // ── Episodes ──────────────────────────────────────────────────────────

  /// All episodes, ordered by id.
  fn list_episodes(
    &self,
  ) -> impl Future<Output = Result<Vec<Episode>, Self::Error>> + Send + '_;

  fn get_episode(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Episode>, Self::Error>> + Send + '_;

  /// The episode plus each of its appearances joined with its guest.
  fn episode_graph(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<EpisodeGraph>, Self::Error>> + Send + '_;

  fn create_episode(
    &self,
    input: NewEpisode,
  ) -> impl Future<Output = Result<Episode, Self::Error>> + Send + '_;

  /// Delete an episode and every appearance referencing it, atomically.
  ///
  /// Returns the number of appearances removed alongside it, or `None` if
  /// the episode does not exist.
  fn delete_episode(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<usize>, Self::Error>> + Send + '_;

  // ── Guests ────────────────────────────────────────────────────────────

  /// All guests, ordered by id.
  fn list_guests(
    &self,
  ) -> impl Future<Output = Result<Vec<Guest>, Self::Error>> + Send + '_;

  fn get_guest(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Guest>, Self::Error>> + Send + '_;

  /// The guest plus each of its appearances joined with its episode.
  fn guest_graph(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<GuestGraph>, Self::Error>> + Send + '_;

  fn create_guest(
    &self,
    input: NewGuest,
  ) -> impl Future<Output = Result<Guest, Self::Error>> + Send + '_;

  /// Delete a guest and every appearance referencing it, atomically.
  fn delete_guest(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<usize>, Self::Error>> + Send + '_;

  // ── Appearances ───────────────────────────────────────────────────────

  /// All appearances, ordered by id.
  fn list_appearances(
    &self,
  ) -> impl Future<Output = Result<Vec<Appearance>, Self::Error>> + Send + '_;

  fn get_appearance(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<AppearanceGraph>, Self::Error>> + Send + '_;

  /// Resolve both references, validate the rating, then insert.
  ///
  /// Fails with [`Error::ReferenceNotFound`] listing every unresolved
  /// reference, or [`Error::InvalidRating`]; in either case nothing is
  /// written.
  fn create_appearance(
    &self,
    input: NewAppearance,
  ) -> impl Future<Output = Result<AppearanceGraph, Self::Error>> + Send + '_;

  /// Re-rate an existing appearance. The new rating is validated exactly as
  /// on creation. Returns `None` if the appearance does not exist.
  fn update_appearance_rating(
    &self,
    id: i64,
    rating: i64,
  ) -> impl Future<Output = Result<Option<AppearanceGraph>, Self::Error>> + Send + '_;
}
