//! Review submission: one review per (user, brewery).

use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;

use crate::db::Repository;
use crate::errors::AppError;
use crate::models::{PreferenceUpdate, Review, ReviewMonth};

/// Lowest allowed value per colour channel, so avatars stay readable on a
/// dark background.
const MIN_CHANNEL_BRIGHTNESS: u64 = 50;

/// Creates reviews and records the brewery in the reviewer's preference set.
pub struct ReviewSubmissionFlow {
    repo: Arc<Repository>,
}

impl ReviewSubmissionFlow {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }

    /// Create a review for a brewery, or reject it when the user has
    /// already reviewed that brewery.
    pub async fn submit(
        &self,
        brewery_id: &str,
        username: &str,
        rating: u8,
        description: &str,
    ) -> Result<Review, AppError> {
        if !(1..=5).contains(&rating) {
            return Err(AppError::Validation(
                "Rating must be between 1 and 5".to_string(),
            ));
        }
        if description.trim().is_empty() {
            return Err(AppError::Validation("Description is required".to_string()));
        }

        let preferences = self.repo.get_preferences(username).await?;
        if preferences.reviewed_brewery_ids.contains(brewery_id) {
            return Err(AppError::AlreadyReviewed(
                "You have reviewed this brewery.".to_string(),
            ));
        }

        let review = Review {
            id: uuid::Uuid::new_v4().to_string(),
            brewery_id: brewery_id.to_string(),
            rating,
            description: description.trim().to_string(),
            date: ReviewMonth::now(),
            reviewer_name: username.to_string(),
            reviewer_color: avatar_color(username),
            likes: 0,
            dislikes: 0,
        };

        self.repo.create_review(&review).await?;
        self.repo
            .merge_preferences(
                username,
                &PreferenceUpdate::for_reviewed_brewery(username, brewery_id),
            )
            .await?;

        Ok(review)
    }
}

/// Deterministic avatar colour for a reviewer name.
///
/// Each channel lands in [50, 255] to keep the colour legible; the same
/// name always maps to the same colour.
pub fn avatar_color(name: &str) -> String {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    let hash = hasher.finish();

    let range = 256 - MIN_CHANNEL_BRIGHTNESS;
    let red = MIN_CHANNEL_BRIGHTNESS + (hash & 0xff) % range;
    let green = MIN_CHANNEL_BRIGHTNESS + ((hash >> 8) & 0xff) % range;
    let blue = MIN_CHANNEL_BRIGHTNESS + ((hash >> 16) & 0xff) % range;

    format!("#{:02x}{:02x}{:02x}", red, green, blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_color_is_deterministic() {
        assert_eq!(avatar_color("anna"), avatar_color("anna"));
    }

    #[test]
    fn test_avatar_color_format_and_brightness() {
        for name in ["anna", "ben", "carl", ""] {
            let color = avatar_color(name);
            assert_eq!(color.len(), 7);
            assert!(color.starts_with('#'));
            for i in [1, 3, 5] {
                let channel = u64::from_str_radix(&color[i..i + 2], 16).unwrap();
                assert!(channel >= MIN_CHANNEL_BRIGHTNESS);
            }
        }
    }
}
