//! Brewery directory proxy endpoints.

use axum::extract::{Path, Query, State};
use serde::Deserialize;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::Brewery;
use crate::AppState;

/// Query parameters for brewery search.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrewerySearchQuery {
    #[serde(default)]
    pub query: String,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    9
}

/// Maximum page size forwarded to the directory.
const MAX_PER_PAGE: u32 = 50;

/// GET /api/breweries - Search the external brewery directory.
///
/// A directory failure degrades to an empty list; the frontend renders
/// that as its no-data state.
pub async fn list_breweries(
    State(state): State<AppState>,
    Query(params): Query<BrewerySearchQuery>,
) -> ApiResult<Vec<Brewery>> {
    let page = params.page.max(1);
    let per_page = params.per_page.min(MAX_PER_PAGE);

    match state.directory.search(&params.query, page, per_page).await {
        Ok(breweries) => success(breweries),
        Err(e) => {
            tracing::warn!("Brewery directory unavailable, returning no data: {}", e);
            success(Vec::new())
        }
    }
}

/// GET /api/breweries/:id - Get a single brewery from the directory.
pub async fn get_brewery(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Brewery> {
    let brewery = match state.directory.get_brewery(&id).await {
        Ok(brewery) => brewery,
        Err(e) => {
            tracing::warn!("Brewery directory lookup for {} failed: {}", id, e);
            None
        }
    };

    match brewery {
        Some(brewery) => success(brewery),
        None => Err(AppError::NotFound(format!("Brewery {} not found", id))),
    }
}
