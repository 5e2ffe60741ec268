//! Field validation applied on every write path that can set a rating.

use serde::{Deserialize, Serialize};

use crate::error::RatingError;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// An appearance rating, guaranteed to lie in `1..=5`.
///
/// The only ways to obtain one are [`validate_rating`] and
/// [`rating_from_json`], so an out-of-range rating cannot reach the store.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
  pub fn get(self) -> i64 { i64::from(self.0) }
}

impl TryFrom<i64> for Rating {
  type Error = RatingError;

  fn try_from(value: i64) -> Result<Self, Self::Error> { validate_rating(value) }
}

impl From<Rating> for i64 {
  fn from(r: Rating) -> Self { r.get() }
}

/// Check that `value` is within `1..=5`.
pub fn validate_rating(value: i64) -> Result<Rating, RatingError> {
  if !(MIN_RATING..=MAX_RATING).contains(&value) {
    return Err(RatingError::OutOfRange(value));
  }
  // In range, so the narrowing cannot truncate.
  Ok(Rating(value as u8))
}

/// Validate a rating taken straight from a request body.
///
/// Anything that is not a JSON integer (floats, strings, `null`, a missing
/// field) is rejected with [`RatingError::NotInteger`].
pub fn rating_from_json(value: &serde_json::Value) -> Result<i64, RatingError> {
  value.as_i64().ok_or(RatingError::NotInteger)
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn accepts_bounds() {
    assert_eq!(validate_rating(1).unwrap().get(), 1);
    assert_eq!(validate_rating(5).unwrap().get(), 5);
  }

  #[test]
  fn rejects_out_of_range() {
    assert_eq!(validate_rating(0), Err(RatingError::OutOfRange(0)));
    assert_eq!(validate_rating(6), Err(RatingError::OutOfRange(6)));
    assert_eq!(validate_rating(-3), Err(RatingError::OutOfRange(-3)));
  }

  #[test]
  fn json_rating_must_be_integer() {
    assert_eq!(rating_from_json(&json!(4)), Ok(4));
    assert_eq!(rating_from_json(&json!(4.5)), Err(RatingError::NotInteger));
    assert_eq!(rating_from_json(&json!("4")), Err(RatingError::NotInteger));
    assert_eq!(rating_from_json(&json!(null)), Err(RatingError::NotInteger));
  }

  #[test]
  fn deserialising_out_of_range_rating_fails() {
    assert!(serde_json::from_value::<Rating>(json!(3)).is_ok());
    assert!(serde_json::from_value::<Rating>(json!(9)).is_err());
  }

  #[test]
  fn error_messages() {
    assert_eq!(
      RatingError::OutOfRange(6).to_string(),
      "Rating must be between 1 and 5, inclusive."
    );
    assert_eq!(RatingError::NotInteger.to_string(), "Rating must be an integer.");
  }
}
