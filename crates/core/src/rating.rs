//! Movie rating aggregate.
//!
//! The average is recomputed from scratch from the full set of rating
//! records on every call. There is no weighting, caching or outlier handling.

use serde::Serialize;

use crate::entities::rating::MovieRating;
use crate::error::CoreError;

/// Lowest accepted rating value.
pub const MIN_RATING: f64 = 1.0;

/// Highest accepted rating value.
pub const MAX_RATING: f64 = 5.0;

/// Maximum review length in characters.
pub const MAX_REVIEW_LENGTH: usize = 4000;

/// Average and count over a movie's live ratings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub average_rating: f64,
    pub rating_count: u32,
}

/// Arithmetic mean of the non-deleted ratings, or `0.0` when there are none.
pub fn average_rating(ratings: &[MovieRating]) -> f64 {
    summarize(ratings).average_rating
}

/// Average and count of the non-deleted ratings.
pub fn summarize(ratings: &[MovieRating]) -> RatingSummary {
    let (sum, count) = ratings
        .iter()
        .filter(|r| !r.deleted)
        .fold((0.0_f64, 0_u32), |(sum, count), r| (sum + r.rating, count + 1));

    let average_rating = if count == 0 { 0.0 } else { sum / f64::from(count) };
    RatingSummary {
        average_rating,
        rating_count: count,
    }
}

/// Validate a rating value and optional review.
pub fn validate_rating(rating: f64, review: Option<&str>) -> Result<(), CoreError> {
    if !rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )));
    }
    if let Some(text) = review {
        if text.chars().count() > MAX_REVIEW_LENGTH {
            return Err(CoreError::Validation(format!(
                "Review exceeds {MAX_REVIEW_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(value: f64, deleted: bool) -> MovieRating {
        MovieRating {
            rating: value,
            deleted,
            ..MovieRating::default()
        }
    }

    #[test]
    fn empty_set_averages_to_zero() {
        assert_eq!(average_rating(&[]), 0.0);
        assert_eq!(summarize(&[]).rating_count, 0);
    }

    #[test]
    fn single_rating_is_its_own_average() {
        assert_eq!(average_rating(&[rating(4.0, false)]), 4.0);
    }

    #[test]
    fn deleted_ratings_are_excluded() {
        let ratings = [rating(5.0, false), rating(1.0, true), rating(3.0, false)];
        assert_eq!(average_rating(&ratings), 4.0);
        assert_eq!(summarize(&ratings).rating_count, 2);
    }

    #[test]
    fn only_deleted_ratings_average_to_zero() {
        assert_eq!(average_rating(&[rating(5.0, true)]), 0.0);
    }

    #[test]
    fn validate_rating_bounds() {
        assert!(validate_rating(1.0, None).is_ok());
        assert!(validate_rating(5.0, Some("great")).is_ok());
        assert!(validate_rating(0.5, None).is_err());
        assert!(validate_rating(5.5, None).is_err());
        assert!(validate_rating(f64::NAN, None).is_err());
    }
}
