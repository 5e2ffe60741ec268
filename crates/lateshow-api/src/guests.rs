//! Handlers for `/guests` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/guests` | Summary list, ordered by id |
//! | `GET`  | `/guests/:id` | Detail view; appearances carry their episode |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use lateshow_core::{
  show::Entity,
  store::ShowStore,
  view::{GuestDetail, GuestSummary, guest_detail},
};

use crate::error::ApiError;

/// `GET /guests`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<GuestSummary>>, ApiError>
where
  S: ShowStore,
{
  let guests = store.list_guests().await.map_err(ApiError::from_read)?;
  Ok(Json(guests.iter().map(GuestSummary::from).collect()))
}

/// `GET /guests/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<GuestDetail>, ApiError>
where
  S: ShowStore,
{
  let graph = store
    .guest_graph(id)
    .await
    .map_err(ApiError::from_read)?
    .ok_or(ApiError::NotFound(Entity::Guest))?;
  Ok(Json(guest_detail(&graph)))
}
