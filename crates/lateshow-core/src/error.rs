//! Error types for `lateshow-core`.

use std::fmt;

use thiserror::Error;

use crate::show::Entity;

/// Why a rating value was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RatingError {
  #[error("Rating must be an integer.")]
  NotInteger,

  #[error("Rating must be between 1 and 5, inclusive.")]
  OutOfRange(i64),
}

/// A foreign key that did not resolve when an appearance was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
  Episode(i64),
  Guest(i64),
}

impl Reference {
  pub fn entity(&self) -> Entity {
    match self {
      Self::Episode(_) => Entity::Episode,
      Self::Guest(_) => Entity::Guest,
    }
  }
}

impl fmt::Display for Reference {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.entity().not_found_message())
  }
}

/// Domain failures raised by a store write. Absence on reads is not an error;
/// stores return `Option` for that.
#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  InvalidRating(#[from] RatingError),

  /// Every reference that failed to resolve, in (episode, guest) order.
  #[error("unresolved references: {}", join_references(.0))]
  ReferenceNotFound(Vec<Reference>),
}

fn join_references(refs: &[Reference]) -> String {
  refs
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join(", ")
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn references_render_as_client_messages() {
    assert_eq!(Reference::Episode(7).to_string(), "Episode not found");
    assert_eq!(Reference::Guest(7).entity(), Entity::Guest);

    let err = Error::ReferenceNotFound(vec![Reference::Episode(1), Reference::Guest(2)]);
    assert_eq!(
      err.to_string(),
      "unresolved references: Episode not found, Guest not found"
    );
  }
}
