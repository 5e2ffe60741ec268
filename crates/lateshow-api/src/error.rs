//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Read endpoints answer failures with `{"error": "..."}`; the appearance
//! write endpoints answer with `{"errors": ["...", ...]}`.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use lateshow_core::{Error as CoreError, show::Entity, store::StoreError};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The id in the path does not exist. 404 `{error}`.
  #[error("{}", .0.not_found_message())]
  NotFound(Entity),

  /// A write referenced rows that do not exist. 404 `{errors}`.
  #[error("{}", .0.join("; "))]
  Missing(Vec<String>),

  /// A write carried an invalid field or an unreadable body. 400 `{errors}`.
  #[error("{}", .0.join("; "))]
  Invalid(Vec<String>),

  /// A read failed inside the store. 500 `{error}`.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// A write failed inside the store and was rolled back. 500 `{errors}`.
  #[error("An unexpected error occurred: {0}")]
  WriteFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Wrap a store error raised while reading. Reads report absence through
  /// `Option`, so anything that reaches here is a backend failure.
  pub fn from_read<E: StoreError>(e: E) -> Self {
    tracing::error!(error = %e, "store read failed");
    Self::Store(Box::new(e))
  }

  /// Classify a store error raised while writing.
  pub fn from_write<E: StoreError>(e: E) -> Self {
    match e.domain() {
      Some(CoreError::InvalidRating(r)) => Self::Invalid(vec![r.to_string()]),
      Some(CoreError::ReferenceNotFound(refs)) => {
        Self::Missing(refs.iter().map(ToString::to_string).collect())
      }
      None => {
        tracing::error!(error = %e, "store write failed");
        Self::WriteFailed(Box::new(e))
      }
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    Self::Invalid(vec![rejection.body_text()])
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::NotFound(_) | ApiError::Missing(_) => StatusCode::NOT_FOUND,
      ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
      ApiError::Store(_) | ApiError::WriteFailed(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };
    let body = match self {
      ApiError::NotFound(entity) => json!({ "error": entity.not_found_message() }),
      ApiError::Store(e) => json!({ "error": e.to_string() }),
      ApiError::Missing(errors) | ApiError::Invalid(errors) => {
        json!({ "errors": errors })
      }
      e @ ApiError::WriteFailed(_) => json!({ "errors": [e.to_string()] }),
    };
    (status, Json(body)).into_response()
  }
}
