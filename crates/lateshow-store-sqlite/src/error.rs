//! Error type for `lateshow-store-sqlite`.

use lateshow_core::{error::RatingError, store::StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] lateshow_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),
}

impl From<RatingError> for Error {
  fn from(e: RatingError) -> Self { Self::Core(e.into()) }
}

impl StoreError for Error {
  fn domain(&self) -> Option<&lateshow_core::Error> {
    match self {
      Self::Core(e) => Some(e),
      Self::Database(_) => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
