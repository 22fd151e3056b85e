//! Preference record endpoints.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{PreferenceRecord, PreferenceStatus, PreferenceUpdate};
use crate::AppState;

/// Query parameters for the preference check.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceQuery {
    pub username: String,
    #[serde(default)]
    pub brewery_id: Option<String>,
}

/// GET /api/preferences - Load a user's preference record.
///
/// This is the protected-page entry point, so it doubles as the reload
/// boundary: pending overlay entries are reconciled into the durable
/// record before it is read back.
pub async fn get_preferences(
    State(state): State<AppState>,
    Query(params): Query<PreferenceQuery>,
) -> ApiResult<PreferenceStatus> {
    if params.username.trim().is_empty() {
        return Err(AppError::Validation("Username is required".to_string()));
    }
    let username = params.username.trim();

    state.guard.reconcile(username).await;

    let record = state.repo.get_preferences(username).await?;
    success(PreferenceStatus::new(record, params.brewery_id.as_deref()))
}

/// PUT /api/preferences - Merge a partial preference record.
pub async fn put_preferences(
    State(state): State<AppState>,
    Json(update): Json<PreferenceUpdate>,
) -> ApiResult<PreferenceRecord> {
    if update.username.trim().is_empty() {
        return Err(AppError::Validation("Username is required".to_string()));
    }
    let username = update.username.trim().to_string();

    let record = state.repo.merge_preferences(&username, &update).await?;
    success(record)
}
