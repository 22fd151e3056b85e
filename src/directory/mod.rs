//! Outbound client for the public brewery directory.
//!
//! The directory is read-only and external; callers treat its errors as
//! "no data" rather than surfacing them.

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::errors::AppError;
use crate::models::Brewery;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for an openbrewerydb-compatible directory.
pub struct BreweryDirectory {
    client: Client,
    base_url: String,
}

impl BreweryDirectory {
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch a single brewery by id. `None` when the directory has no
    /// record for it.
    pub async fn get_brewery(&self, id: &str) -> Result<Option<Brewery>, AppError> {
        let url = format!("{}/breweries/{}", self.base_url, id);
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response.error_for_status()?;
        Ok(Some(response.json().await?))
    }

    /// Search breweries, or list them when the query is empty.
    pub async fn search(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Brewery>, AppError> {
        let query = query.trim();
        let request = if query.is_empty() {
            self.client
                .get(format!("{}/breweries", self.base_url))
                .query(&[("page", page), ("per_page", per_page)])
        } else {
            self.client
                .get(format!("{}/breweries/search", self.base_url))
                .query(&[("query", query)])
                .query(&[("page", page), ("per_page", per_page)])
        };

        let response = request.send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}
