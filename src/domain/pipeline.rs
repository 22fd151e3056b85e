//! Filtering and ordering of review listings.

use crate::models::{Review, SortOrder};

/// Project a review collection into its display order.
///
/// Pure function of its inputs: identical arguments yield identical output
/// order. The sort is stable, so reviews in the same month keep their
/// original relative order (dates only carry month granularity).
pub fn project(
    mut reviews: Vec<Review>,
    sort: SortOrder,
    rating_filter: Option<u8>,
    mine_only: bool,
    current_user: &str,
) -> Vec<Review> {
    reviews.retain(|review| {
        rating_filter.is_none_or(|rating| review.rating == rating)
            && (!mine_only || review.reviewer_name == current_user)
    });

    match sort {
        SortOrder::Latest => reviews.sort_by(|a, b| b.date.cmp(&a.date)),
        SortOrder::Oldest => reviews.sort_by(|a, b| a.date.cmp(&b.date)),
    }

    reviews
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReviewMonth;

    fn review(id: &str, rating: u8, date: &str, reviewer: &str) -> Review {
        Review {
            id: id.to_string(),
            brewery_id: "abc".to_string(),
            rating,
            description: "fine".to_string(),
            date: date.parse::<ReviewMonth>().unwrap(),
            reviewer_name: reviewer.to_string(),
            reviewer_color: "#445566".to_string(),
            likes: 0,
            dislikes: 0,
        }
    }

    fn ids(reviews: &[Review]) -> Vec<&str> {
        reviews.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_sort_latest_and_oldest() {
        let reviews = vec![
            review("jan", 3, "January 2024", "anna"),
            review("mar", 5, "March 2024", "ben"),
        ];

        let latest = project(reviews.clone(), SortOrder::Latest, None, false, "anna");
        assert_eq!(ids(&latest), ["mar", "jan"]);

        let oldest = project(reviews, SortOrder::Oldest, None, false, "anna");
        assert_eq!(ids(&oldest), ["jan", "mar"]);
    }

    #[test]
    fn test_rating_filter_keeps_original_order() {
        let reviews = vec![
            review("a", 5, "January 2024", "anna"),
            review("b", 3, "January 2024", "ben"),
            review("c", 5, "January 2024", "carl"),
        ];

        let filtered = project(reviews, SortOrder::Latest, Some(5), false, "anna");
        assert_eq!(ids(&filtered), ["a", "c"]);
    }

    #[test]
    fn test_mine_only_matches_reviewer_name() {
        let reviews = vec![
            review("a", 5, "January 2024", "anna"),
            review("b", 3, "February 2024", "ben"),
            review("c", 4, "March 2024", "anna"),
        ];

        let mine = project(reviews, SortOrder::Oldest, None, true, "anna");
        assert_eq!(ids(&mine), ["a", "c"]);
    }

    #[test]
    fn test_same_month_ties_are_stable() {
        let reviews = vec![
            review("first", 4, "March 2024", "anna"),
            review("second", 4, "March 2024", "ben"),
            review("third", 4, "March 2024", "carl"),
        ];

        let latest = project(reviews.clone(), SortOrder::Latest, None, false, "anna");
        assert_eq!(ids(&latest), ["first", "second", "third"]);

        let oldest = project(reviews, SortOrder::Oldest, None, false, "anna");
        assert_eq!(ids(&oldest), ["first", "second", "third"]);
    }

    #[test]
    fn test_project_is_idempotent() {
        let reviews = vec![
            review("a", 5, "March 2024", "anna"),
            review("b", 3, "January 2024", "ben"),
            review("c", 4, "March 2024", "carl"),
        ];

        let once = project(reviews.clone(), SortOrder::Latest, None, false, "anna");
        let twice = project(once.clone(), SortOrder::Latest, None, false, "anna");
        assert_eq!(ids(&once), ids(&twice));
    }
}
