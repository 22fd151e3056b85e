//! Per-user preference record: what a user has reviewed and expressed.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::ExpressionKind;

/// Durable record of a user's reviewed breweries and expressed reviews.
///
/// The sets are monotonic: ids are merged in, never removed. A review id
/// can never appear in both the liked and disliked sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceRecord {
    pub reviewed_brewery_ids: BTreeSet<String>,
    pub liked_review_ids: BTreeSet<String>,
    pub disliked_review_ids: BTreeSet<String>,
}

impl PreferenceRecord {
    /// Whether the user has already liked or disliked this review.
    pub fn has_expressed(&self, review_id: &str) -> bool {
        self.liked_review_ids.contains(review_id) || self.disliked_review_ids.contains(review_id)
    }

    /// Merge a partial update into this record with set-union semantics.
    ///
    /// Fails with the offending id when the merge would place a review id
    /// in both the liked and disliked sets.
    pub fn merge(&mut self, update: &PreferenceUpdate) -> Result<(), PreferenceConflict> {
        if let Some(liked) = &update.liked_review_ids {
            for id in liked {
                if self.disliked_review_ids.contains(id) {
                    return Err(PreferenceConflict {
                        review_id: id.clone(),
                    });
                }
            }
        }
        if let Some(disliked) = &update.disliked_review_ids {
            for id in disliked {
                let incoming_liked = update
                    .liked_review_ids
                    .as_ref()
                    .is_some_and(|l| l.contains(id));
                if self.liked_review_ids.contains(id) || incoming_liked {
                    return Err(PreferenceConflict {
                        review_id: id.clone(),
                    });
                }
            }
        }

        if let Some(reviewed) = &update.reviewed_brewery_ids {
            self.reviewed_brewery_ids.extend(reviewed.iter().cloned());
        }
        if let Some(liked) = &update.liked_review_ids {
            self.liked_review_ids.extend(liked.iter().cloned());
        }
        if let Some(disliked) = &update.disliked_review_ids {
            self.disliked_review_ids.extend(disliked.iter().cloned());
        }
        Ok(())
    }
}

/// A merge that would mark a review as both liked and disliked.
#[derive(Debug)]
pub struct PreferenceConflict {
    pub review_id: String,
}

/// Partial preference record for PUT /api/preferences.
///
/// Absent fields leave the corresponding set untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceUpdate {
    pub username: String,
    #[serde(default)]
    pub reviewed_brewery_ids: Option<BTreeSet<String>>,
    #[serde(default)]
    pub liked_review_ids: Option<BTreeSet<String>>,
    #[serde(default)]
    pub disliked_review_ids: Option<BTreeSet<String>>,
}

impl PreferenceUpdate {
    /// Update that records a single expression.
    pub fn for_expression(username: &str, review_id: &str, kind: ExpressionKind) -> Self {
        let ids = Some(BTreeSet::from([review_id.to_string()]));
        let mut update = Self {
            username: username.to_string(),
            ..Self::default()
        };
        match kind {
            ExpressionKind::Like => update.liked_review_ids = ids,
            ExpressionKind::Dislike => update.disliked_review_ids = ids,
        }
        update
    }

    /// Update that records a submitted review for a brewery.
    pub fn for_reviewed_brewery(username: &str, brewery_id: &str) -> Self {
        Self {
            username: username.to_string(),
            reviewed_brewery_ids: Some(BTreeSet::from([brewery_id.to_string()])),
            ..Self::default()
        }
    }
}

/// Response for GET /api/preferences, the protected-page entry check.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceStatus {
    pub reviewed: bool,
    pub reviewed_brewery_ids: BTreeSet<String>,
    pub liked_review_ids: BTreeSet<String>,
    pub disliked_review_ids: BTreeSet<String>,
}

impl PreferenceStatus {
    pub fn new(record: PreferenceRecord, brewery_id: Option<&str>) -> Self {
        let reviewed = brewery_id.is_some_and(|id| record.reviewed_brewery_ids.contains(id));
        Self {
            reviewed,
            reviewed_brewery_ids: record.reviewed_brewery_ids,
            liked_review_ids: record.liked_review_ids,
            disliked_review_ids: record.disliked_review_ids,
        }
    }
}
