//! Output shapes for episodes, guests, and appearances.
//!
//! The row graph is cyclic (episode ↔ appearance ↔ guest), so every view is
//! a fixed, non-recursive struct. Each entity has two profiles:
//!
//! - **summary**: own scalar fields only; used by list endpoints.
//! - **detail**: own fields plus one hop of relations. Related rows never
//!   carry a field that points back at the entity being described, and
//!   anything two hops away is summary-shaped.
//!
//! | View | Own fields | Related | Omitted |
//! |------|-----------|---------|---------|
//! | [`EpisodeDetail`] | id, date, number | appearances → guest summary | appearance.episode |
//! | [`GuestDetail`] | id, name, occupation | appearances → episode summary | appearance.guest |
//! | [`AppearanceDetail`] | id, rating, episode_id, guest_id | episode summary, guest summary | episode.appearances, guest.appearances |

use serde::{Deserialize, Serialize};

use crate::show::{
  Appearance, AppearanceGraph, Episode, EpisodeGraph, Guest, GuestGraph,
};

// ─── Summaries ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeSummary {
  pub id:     i64,
  pub date:   String,
  pub number: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestSummary {
  pub id:         i64,
  pub name:       String,
  pub occupation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppearanceSummary {
  pub id:         i64,
  pub rating:     i64,
  pub episode_id: i64,
  pub guest_id:   i64,
}

impl From<&Episode> for EpisodeSummary {
  fn from(e: &Episode) -> Self {
    Self { id: e.id, date: e.date.clone(), number: e.number }
  }
}

impl From<&Guest> for GuestSummary {
  fn from(g: &Guest) -> Self {
    Self {
      id:         g.id,
      name:       g.name.clone(),
      occupation: g.occupation.clone(),
    }
  }
}

impl From<&Appearance> for AppearanceSummary {
  fn from(a: &Appearance) -> Self {
    Self {
      id:         a.id,
      rating:     a.rating.get(),
      episode_id: a.episode_id,
      guest_id:   a.guest_id,
    }
  }
}

// ─── Episode detail ──────────────────────────────────────────────────────────

/// An appearance as seen from its episode: the guest is included, the
/// episode back-edge is not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeAppearance {
  #[serde(flatten)]
  pub appearance: AppearanceSummary,
  pub guest:      GuestSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeDetail {
  #[serde(flatten)]
  pub episode:     EpisodeSummary,
  pub appearances: Vec<EpisodeAppearance>,
}

pub fn episode_detail(graph: &EpisodeGraph) -> EpisodeDetail {
  EpisodeDetail {
    episode:     (&graph.episode).into(),
    appearances: graph
      .appearances
      .iter()
      .map(|(appearance, guest)| EpisodeAppearance {
        appearance: appearance.into(),
        guest:      guest.into(),
      })
      .collect(),
  }
}

// ─── Guest detail ────────────────────────────────────────────────────────────

/// An appearance as seen from its guest: the episode is included, the guest
/// back-edge is not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestAppearance {
  #[serde(flatten)]
  pub appearance: AppearanceSummary,
  pub episode:    EpisodeSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestDetail {
  #[serde(flatten)]
  pub guest:       GuestSummary,
  pub appearances: Vec<GuestAppearance>,
}

pub fn guest_detail(graph: &GuestGraph) -> GuestDetail {
  GuestDetail {
    guest:       (&graph.guest).into(),
    appearances: graph
      .appearances
      .iter()
      .map(|(appearance, episode)| GuestAppearance {
        appearance: appearance.into(),
        episode:    episode.into(),
      })
      .collect(),
  }
}

// ─── Appearance detail ───────────────────────────────────────────────────────

/// An appearance with both parents as summaries; neither parent lists its
/// appearances again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppearanceDetail {
  #[serde(flatten)]
  pub appearance: AppearanceSummary,
  pub episode:    EpisodeSummary,
  pub guest:      GuestSummary,
}

pub fn appearance_detail(graph: &AppearanceGraph) -> AppearanceDetail {
  AppearanceDetail {
    appearance: (&graph.appearance).into(),
    episode:    (&graph.episode).into(),
    guest:      (&graph.guest).into(),
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::validate::validate_rating;

  fn episode() -> Episode {
    Episode { id: 1, date: "1/11/99".into(), number: 1 }
  }

  fn guest() -> Guest {
    Guest {
      id:         7,
      name:       "Michael J. Fox".into(),
      occupation: "actor".into(),
    }
  }

  fn appearance() -> Appearance {
    Appearance {
      id:         3,
      rating:     validate_rating(4).unwrap(),
      episode_id: 1,
      guest_id:   7,
    }
  }

  #[test]
  fn episode_summary_has_only_scalars() {
    let v = serde_json::to_value(EpisodeSummary::from(&episode())).unwrap();
    assert_eq!(v, json!({ "id": 1, "date": "1/11/99", "number": 1 }));
  }

  #[test]
  fn episode_detail_nests_guest_without_back_edge() {
    let graph = EpisodeGraph {
      episode:     episode(),
      appearances: vec![(appearance(), guest())],
    };
    let v = serde_json::to_value(episode_detail(&graph)).unwrap();
    assert_eq!(
      v,
      json!({
        "id": 1,
        "date": "1/11/99",
        "number": 1,
        "appearances": [{
          "id": 3,
          "rating": 4,
          "episode_id": 1,
          "guest_id": 7,
          "guest": { "id": 7, "name": "Michael J. Fox", "occupation": "actor" },
        }],
      })
    );
    assert!(v["appearances"][0].get("episode").is_none());
    assert!(v["appearances"][0]["guest"].get("appearances").is_none());
  }

  #[test]
  fn guest_detail_nests_episode_without_back_edge() {
    let graph = GuestGraph {
      guest:       guest(),
      appearances: vec![(appearance(), episode())],
    };
    let v = serde_json::to_value(guest_detail(&graph)).unwrap();
    assert_eq!(v["appearances"][0]["episode"]["number"], 1);
    assert!(v["appearances"][0].get("guest").is_none());
    assert!(v["appearances"][0]["episode"].get("appearances").is_none());
  }

  #[test]
  fn appearance_detail_parents_do_not_list_appearances() {
    let graph = AppearanceGraph {
      appearance: appearance(),
      episode:    episode(),
      guest:      guest(),
    };
    let v = serde_json::to_value(appearance_detail(&graph)).unwrap();
    assert_eq!(v["rating"], 4);
    assert_eq!(v["episode"]["id"], 1);
    assert_eq!(v["guest"]["id"], 7);
    assert!(v["episode"].get("appearances").is_none());
    assert!(v["guest"].get("appearances").is_none());
  }
}
