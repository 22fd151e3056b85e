//! Review listing, submission and expression endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{success, ApiResult};
use crate::domain::{overall_rating, project};
use crate::errors::AppError;
use crate::models::{CreateReviewRequest, ExpressionRequest, Review, SortOrder};
use crate::AppState;

/// Query parameters for the review listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewListQuery {
    #[serde(default)]
    pub sort: SortOrder,
    /// Keep only reviews with exactly this rating.
    #[serde(default)]
    pub rating: Option<u8>,
    /// Keep only the requesting user's own reviews.
    #[serde(default)]
    pub mine: bool,
    #[serde(default)]
    pub username: Option<String>,
}

/// Review listing with the brewery-level aggregate.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewListResponse {
    pub reviews: Vec<Review>,
    pub overall_rating: f64,
}

/// Counters after an accepted expression.
#[derive(Debug, Serialize)]
pub struct ExpressionResponse {
    pub likes: i64,
    pub dislikes: i64,
}

/// GET /api/breweries/:id/reviews - List reviews for a brewery.
///
/// The overall rating covers every review of the brewery, not just the
/// filtered view.
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(brewery_id): Path<String>,
    Query(params): Query<ReviewListQuery>,
) -> ApiResult<ReviewListResponse> {
    if params.mine && params.username.is_none() {
        return Err(AppError::Validation(
            "username is required when mine=true".to_string(),
        ));
    }

    let reviews = state.repo.list_reviews(&brewery_id).await?;
    let overall = overall_rating(&reviews);

    let current_user = params.username.as_deref().unwrap_or_default();
    let reviews = project(reviews, params.sort, params.rating, params.mine, current_user);

    success(ReviewListResponse {
        reviews,
        overall_rating: overall,
    })
}

/// POST /api/breweries/:id/reviews - Submit a new review.
pub async fn create_review(
    State(state): State<AppState>,
    Path(brewery_id): Path<String>,
    Json(request): Json<CreateReviewRequest>,
) -> ApiResult<Review> {
    if request.username.trim().is_empty() {
        return Err(AppError::Validation("Username is required".to_string()));
    }

    let review = state
        .submissions
        .submit(
            &brewery_id,
            request.username.trim(),
            request.rating,
            &request.description,
        )
        .await?;

    success(review)
}

/// POST /api/reviews/:id/expressions - Register a like or dislike.
///
/// The returned counters are optimistic; the authoritative values arrive
/// with the next listing fetch.
pub async fn express(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
    Json(request): Json<ExpressionRequest>,
) -> ApiResult<ExpressionResponse> {
    if request.username.trim().is_empty() {
        return Err(AppError::Validation("Username is required".to_string()));
    }

    let review = state
        .repo
        .get_review(&review_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Review {} not found", review_id)))?;

    let receipt = state
        .guard
        .try_express(&review, request.username.trim(), request.kind)
        .await?;

    success(ExpressionResponse {
        likes: receipt.likes,
        dislikes: receipt.dislikes,
    })
}
