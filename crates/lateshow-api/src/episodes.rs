//! Handlers for `/episodes` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/episodes` | Summary list, ordered by id |
//! | `GET`    | `/episodes/:id` | Detail view; appearances carry their guest |
//! | `DELETE` | `/episodes/:id` | 204; removes the episode's appearances too |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
};
use lateshow_core::{
  show::Entity,
  store::ShowStore,
  view::{EpisodeDetail, EpisodeSummary, episode_detail},
};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /episodes`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<EpisodeSummary>>, ApiError>
where
  S: ShowStore,
{
  let episodes = store.list_episodes().await.map_err(ApiError::from_read)?;
  Ok(Json(episodes.iter().map(EpisodeSummary::from).collect()))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /episodes/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<EpisodeDetail>, ApiError>
where
  S: ShowStore,
{
  let graph = store
    .episode_graph(id)
    .await
    .map_err(ApiError::from_read)?
    .ok_or(ApiError::NotFound(Entity::Episode))?;
  Ok(Json(episode_detail(&graph)))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /episodes/:id` — 204 with an empty body.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  S: ShowStore,
{
  let removed = store
    .delete_episode(id)
    .await
    .map_err(ApiError::from_read)?
    .ok_or(ApiError::NotFound(Entity::Episode))?;
  tracing::info!(id, appearances = removed, "episode deleted");
  Ok(StatusCode::NO_CONTENT)
}
