//! Rating rules: the accepted star range and the starting movie rating.

/// Lowest accepted rating value.
pub const MIN_RATING: i16 = 1;
/// Highest accepted rating value.
pub const MAX_RATING: i16 = 5;

/// Rating stored on a movie before anyone has rated it.
pub const DEFAULT_MOVIE_RATING: f64 = 4.0;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RatingError {
    #[error("Rating must be between {min} and {max}, got {0}", min = MIN_RATING, max = MAX_RATING)]
    OutOfRange(i16),
}

/// Check a submitted rating value.
pub fn validate_rating(value: i16) -> Result<(), RatingError> {
    if !(MIN_RATING..=MAX_RATING).contains(&value) {
        return Err(RatingError::OutOfRange(value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_inclusive() {
        assert_eq!(validate_rating(1), Ok(()));
        assert_eq!(validate_rating(5), Ok(()));
        assert_eq!(validate_rating(0), Err(RatingError::OutOfRange(0)));
        assert_eq!(validate_rating(6), Err(RatingError::OutOfRange(6)));
    }

    #[test]
    fn error_message_names_bounds() {
        assert_eq!(
            RatingError::OutOfRange(9).to_string(),
            "Rating must be between 1 and 5, got 9"
        );
    }
}
