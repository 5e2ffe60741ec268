//! JSON REST API for the Late Show store.
//!
//! Exposes an axum [`Router`] backed by any [`lateshow_core::store::ShowStore`].
//! Transport concerns (listener, tracing layers) are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .merge(lateshow_api::api_router(store.clone()))
//! ```

pub mod appearances;
pub mod episodes;
pub mod error;
pub mod guests;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, patch, post},
};
use lateshow_core::store::ShowStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be merged into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ShowStore + 'static,
{
  Router::new()
    // Episodes
    .route("/episodes", get(episodes::list::<S>))
    .route(
      "/episodes/{id}",
      get(episodes::get_one::<S>).delete(episodes::delete_one::<S>),
    )
    // Guests
    .route("/guests", get(guests::list::<S>))
    .route("/guests/{id}", get(guests::get_one::<S>))
    // Appearances
    .route("/appearances", post(appearances::create::<S>))
    .route("/appearances/{id}", patch(appearances::rate::<S>))
    .with_state(store)
}
