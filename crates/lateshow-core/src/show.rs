//! Episodes, guests, and the rated appearances that link them.
//!
//! Episodes and guests each own their appearances: removing either parent
//! removes every appearance that references it. An appearance only points
//! back at its parents by id; it never owns them.

use serde::{Deserialize, Serialize};

use crate::validate::Rating;

// ─── Entity kinds ────────────────────────────────────────────────────────────

/// The three row types held by a show store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
  Episode,
  Guest,
  Appearance,
}

impl Entity {
  /// The message reported to API clients when a row of this kind is absent.
  pub fn not_found_message(&self) -> &'static str {
    match self {
      Self::Episode => "Episode not found",
      Self::Guest => "Guest not found",
      Self::Appearance => "Appearance not found",
    }
  }
}

// ─── Rows ────────────────────────────────────────────────────────────────────

/// A single broadcast of the show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
  /// Store-assigned primary key.
  pub id:     i64,
  /// Air date as it appears in the source data, e.g. `"1/11/99"`.
  pub date:   String,
  pub number: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
  pub id:         i64,
  pub name:       String,
  pub occupation: String,
}

/// A guest's rated appearance on an episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
  pub id:         i64,
  pub rating:     Rating,
  pub episode_id: i64,
  pub guest_id:   i64,
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Input to [`crate::store::ShowStore::create_episode`].
#[derive(Debug, Clone)]
pub struct NewEpisode {
  pub date:   String,
  pub number: i64,
}

/// Input to [`crate::store::ShowStore::create_guest`].
#[derive(Debug, Clone)]
pub struct NewGuest {
  pub name:       String,
  pub occupation: String,
}

/// Input to [`crate::store::ShowStore::create_appearance`].
///
/// The rating is carried unvalidated; the store validates it inside the
/// write transaction, after both references have been resolved.
#[derive(Debug, Clone, Copy)]
pub struct NewAppearance {
  pub rating:     i64,
  pub episode_id: i64,
  pub guest_id:   i64,
}

// ─── Graphs ──────────────────────────────────────────────────────────────────

/// An episode together with its appearances and the guest of each.
#[derive(Debug, Clone)]
pub struct EpisodeGraph {
  pub episode:     Episode,
  pub appearances: Vec<(Appearance, Guest)>,
}

/// A guest together with its appearances and the episode of each.
#[derive(Debug, Clone)]
pub struct GuestGraph {
  pub guest:       Guest,
  pub appearances: Vec<(Appearance, Episode)>,
}

/// An appearance with both of its parents resolved.
#[derive(Debug, Clone)]
pub struct AppearanceGraph {
  pub appearance: Appearance,
  pub episode:    Episode,
  pub guest:      Guest,
}
