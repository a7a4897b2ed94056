//! Validated review rating.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a rating value falls outside 1-5.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("rating must be between 1 and 5, got {0}")]
pub struct RatingError(pub u8);

/// A star rating between 1 and 5 inclusive.
///
/// Zero is deliberately unrepresentable: a review form with no stars chosen
/// holds `Option<Rating>` and must not submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Create a rating, rejecting values outside 1-5.
    ///
    /// # Errors
    ///
    /// Returns `RatingError` when `value` is 0 or greater than 5.
    pub const fn new(value: u8) -> Result<Self, RatingError> {
        if value >= 1 && value <= 5 {
            Ok(Self(value))
        } else {
            Err(RatingError(value))
        }
    }

    /// The numeric star value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_accepts_one_through_five() {
        for value in 1..=5 {
            assert!(Rating::new(value).is_ok());
        }
    }

    #[test]
    fn test_rating_rejects_zero_and_six() {
        assert_eq!(Rating::new(0), Err(RatingError(0)));
        assert_eq!(Rating::new(6), Err(RatingError(6)));
    }

    #[test]
    fn test_rating_serde_round_trip() {
        let rating = Rating::new(4).expect("valid");
        let json = serde_json::to_string(&rating).expect("serialize");
        assert_eq!(json, "4");

        let back: Rating = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, rating);
    }

    #[test]
    fn test_rating_rejects_invalid_on_deserialize() {
        let result: Result<Rating, _> = serde_json::from_str("0");
        assert!(result.is_err());
    }
}
