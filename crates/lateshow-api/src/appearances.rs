//! Handlers for `/appearances` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `POST`  | `/appearances` | Body: [`CreateBody`]; 201 + appearance detail |
//! | `PATCH` | `/appearances/:id` | Body: [`RateBody`]; 200 + appearance detail |
//!
//! Failures use the `{"errors": [...]}` shape: 404 for unresolved or absent
//! references, 400 for an invalid rating or body, 500 for anything else.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use lateshow_core::{
  show::{Entity, NewAppearance},
  store::ShowStore,
  validate::rating_from_json,
  view::{AppearanceDetail, appearance_detail},
};
use serde::Deserialize;

use crate::error::ApiError;

/// Read the raw `rating` field; only JSON integers pass.
fn rating_field(value: &serde_json::Value) -> Result<i64, ApiError> {
  rating_from_json(value).map_err(|e| ApiError::Invalid(vec![e.to_string()]))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /appearances`.
///
/// `rating` is kept as a raw JSON value so a non-integer rating is reported
/// as a validation error rather than a body-shape error. An absent
/// `episode_id` or `guest_id` is treated as a reference that does not
/// resolve.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  #[serde(default)]
  pub rating:     serde_json::Value,
  pub episode_id: Option<i64>,
  pub guest_id:   Option<i64>,
}

/// Build the 404 for a create body lacking at least one id. Ids that were
/// given are still looked up so every unresolved reference is reported.
async fn unresolved<S: ShowStore>(
  store: &S,
  episode_id: Option<i64>,
  guest_id: Option<i64>,
) -> ApiError {
  let mut missing = Vec::new();

  let episode = match episode_id {
    Some(id) => store.get_episode(id).await.map(|e| e.is_some()),
    None => Ok(false),
  };
  match episode {
    Ok(true) => {}
    Ok(false) => missing.push(Entity::Episode.not_found_message().to_owned()),
    Err(e) => return ApiError::from_write(e),
  }

  let guest = match guest_id {
    Some(id) => store.get_guest(id).await.map(|g| g.is_some()),
    None => Ok(false),
  };
  match guest {
    Ok(true) => {}
    Ok(false) => missing.push(Entity::Guest.not_found_message().to_owned()),
    Err(e) => return ApiError::from_write(e),
  }

  ApiError::Missing(missing)
}

/// `POST /appearances` — returns 201 + the new appearance with both parents.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<CreateBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ShowStore,
{
  let Json(body) = body?;
  let (Some(episode_id), Some(guest_id)) = (body.episode_id, body.guest_id) else {
    return Err(unresolved(&*store, body.episode_id, body.guest_id).await);
  };
  let input = NewAppearance {
    rating: rating_field(&body.rating)?,
    episode_id,
    guest_id,
  };

  let graph = store
    .create_appearance(input)
    .await
    .map_err(ApiError::from_write)?;
  Ok((StatusCode::CREATED, Json(appearance_detail(&graph))))
}

// ─── Re-rate ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RateBody {
  #[serde(default)]
  pub rating: serde_json::Value,
}

/// `PATCH /appearances/:id` — body: `{"rating": 1..=5}`.
pub async fn rate<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  body: Result<Json<RateBody>, JsonRejection>,
) -> Result<Json<AppearanceDetail>, ApiError>
where
  S: ShowStore,
{
  let Json(body) = body?;
  let rating = rating_field(&body.rating)?;

  let graph = store
    .update_appearance_rating(id, rating)
    .await
    .map_err(ApiError::from_write)?
    .ok_or_else(|| {
      ApiError::Missing(vec![Entity::Appearance.not_found_message().to_owned()])
    })?;
  Ok(Json(appearance_detail(&graph)))
}
