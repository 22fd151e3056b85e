//! Counter math and the brewery-level rating aggregate.

use crate::models::{ExpressionKind, Review};

/// Counters to display after an accepted expression: the expressed kind
/// grows by exactly one, the other is untouched.
pub fn apply_expression(likes: i64, dislikes: i64, kind: ExpressionKind) -> (i64, i64) {
    match kind {
        ExpressionKind::Like => (likes + 1, dislikes),
        ExpressionKind::Dislike => (likes, dislikes + 1),
    }
}

/// Arithmetic mean of all ratings, rounded to one decimal place.
/// An unreviewed brewery rates 0.
pub fn overall_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    let mean = f64::from(total) / reviews.len() as f64;
    (mean * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReviewMonth;

    fn review_with_rating(rating: u8) -> Review {
        Review {
            id: format!("r-{}", rating),
            brewery_id: "abc".to_string(),
            rating,
            description: "fine".to_string(),
            date: ReviewMonth {
                year: 2024,
                month: 1,
            },
            reviewer_name: "anna".to_string(),
            reviewer_color: "#445566".to_string(),
            likes: 0,
            dislikes: 0,
        }
    }

    #[test]
    fn test_apply_expression_increments_one_counter() {
        assert_eq!(apply_expression(3, 1, ExpressionKind::Like), (4, 1));
        assert_eq!(apply_expression(3, 1, ExpressionKind::Dislike), (3, 2));
    }

    #[test]
    fn test_overall_rating_empty_is_zero() {
        assert_eq!(overall_rating(&[]), 0.0);
    }

    #[test]
    fn test_overall_rating_rounds_to_one_decimal() {
        let reviews: Vec<Review> = [5, 4, 4].into_iter().map(review_with_rating).collect();
        // 13 / 3 = 4.333...
        assert_eq!(overall_rating(&reviews), 4.3);

        let reviews: Vec<Review> = [5, 2].into_iter().map(review_with_rating).collect();
        assert_eq!(overall_rating(&reviews), 3.5);
    }
}
