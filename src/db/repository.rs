//! Database repository for review and preference operations.
//!
//! Uses prepared statements and a read-modify-write transaction for
//! preference merges.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{ExpressionKind, PreferenceRecord, PreferenceUpdate, Review, ReviewMonth};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== REVIEW OPERATIONS ====================

    /// List all reviews for a brewery in submission order.
    pub async fn list_reviews(&self, brewery_id: &str) -> Result<Vec<Review>, AppError> {
        let rows = sqlx::query(
            "SELECT id, brewery_id, rating, description, review_month, reviewer_name, reviewer_color, likes, dislikes \
             FROM reviews WHERE brewery_id = ? ORDER BY created_at, rowid",
        )
        .bind(brewery_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(review_from_row).collect())
    }

    /// Get a review by ID.
    pub async fn get_review(&self, id: &str) -> Result<Option<Review>, AppError> {
        let row = sqlx::query(
            "SELECT id, brewery_id, rating, description, review_month, reviewer_name, reviewer_color, likes, dislikes \
             FROM reviews WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(review_from_row))
    }

    /// Insert a new review.
    pub async fn create_review(&self, review: &Review) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO reviews (id, brewery_id, rating, description, review_month, reviewer_name, reviewer_color, likes, dislikes, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&review.id)
        .bind(&review.brewery_id)
        .bind(i64::from(review.rating))
        .bind(&review.description)
        .bind(review.date.db_key())
        .bind(&review.reviewer_name)
        .bind(&review.reviewer_color)
        .bind(review.likes)
        .bind(review.dislikes)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // The unique (brewery, reviewer) index backstops the flow-level
            // check when two submissions race
            if e.as_database_error().is_some_and(|db| db.is_unique_violation()) {
                AppError::AlreadyReviewed("You have reviewed this brewery.".to_string())
            } else {
                AppError::from(e)
            }
        })?;

        Ok(())
    }

    /// Bump one of a review's counters by exactly one.
    ///
    /// Relative so two users expressing inside each other's persistence
    /// window cannot overwrite one another's increment.
    pub async fn increment_count(&self, id: &str, kind: ExpressionKind) -> Result<(), AppError> {
        let sql = match kind {
            ExpressionKind::Like => "UPDATE reviews SET likes = likes + 1 WHERE id = ?",
            ExpressionKind::Dislike => "UPDATE reviews SET dislikes = dislikes + 1 WHERE id = ?",
        };
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Review {} not found", id)));
        }
        Ok(())
    }

    // ==================== PREFERENCE OPERATIONS ====================

    /// Get a user's preference record, empty when the user has none yet.
    pub async fn get_preferences(&self, username: &str) -> Result<PreferenceRecord, AppError> {
        let row = sqlx::query(
            "SELECT reviewed_brewery_ids, liked_review_ids, disliked_review_ids \
             FROM preferences WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(preferences_from_row).unwrap_or_default())
    }

    /// Merge a partial update into a user's preference record and persist it.
    ///
    /// The read-modify-write runs inside a transaction so two concurrent
    /// merges cannot drop each other's ids.
    pub async fn merge_preferences(
        &self,
        username: &str,
        update: &PreferenceUpdate,
    ) -> Result<PreferenceRecord, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            "SELECT reviewed_brewery_ids, liked_review_ids, disliked_review_ids \
             FROM preferences WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&mut *tx)
        .await?;

        let mut record = row.as_ref().map(preferences_from_row).unwrap_or_default();
        record.merge(update)?;

        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO preferences (username, reviewed_brewery_ids, liked_review_ids, disliked_review_ids, updated_at) \
             VALUES (?, ?, ?, ?, ?) \
             ON CONFLICT(username) DO UPDATE SET \
                reviewed_brewery_ids = excluded.reviewed_brewery_ids, \
                liked_review_ids = excluded.liked_review_ids, \
                disliked_review_ids = excluded.disliked_review_ids, \
                updated_at = excluded.updated_at",
        )
        .bind(username)
        .bind(serde_json::to_string(&record.reviewed_brewery_ids)?)
        .bind(serde_json::to_string(&record.liked_review_ids)?)
        .bind(serde_json::to_string(&record.disliked_review_ids)?)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(record)
    }
}

// Helper functions for row conversion

fn review_from_row(row: &sqlx::sqlite::SqliteRow) -> Review {
    let rating: i64 = row.get("rating");
    let month_key: String = row.get("review_month");

    Review {
        id: row.get("id"),
        brewery_id: row.get("brewery_id"),
        rating: rating as u8,
        description: row.get("description"),
        date: ReviewMonth::from_db_key(&month_key).unwrap_or_else(ReviewMonth::now),
        reviewer_name: row.get("reviewer_name"),
        reviewer_color: row.get("reviewer_color"),
        likes: row.get("likes"),
        dislikes: row.get("dislikes"),
    }
}

fn preferences_from_row(row: &sqlx::sqlite::SqliteRow) -> PreferenceRecord {
    let reviewed: String = row.get("reviewed_brewery_ids");
    let liked: String = row.get("liked_review_ids");
    let disliked: String = row.get("disliked_review_ids");

    PreferenceRecord {
        reviewed_brewery_ids: parse_json_set(&reviewed),
        liked_review_ids: parse_json_set(&liked),
        disliked_review_ids: parse_json_set(&disliked),
    }
}

fn parse_json_set(s: &str) -> std::collections::BTreeSet<String> {
    serde_json::from_str(s).unwrap_or_default()
}
