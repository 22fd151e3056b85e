//! Brewery model sourced from the external directory.

use serde::{Deserialize, Serialize};

/// A brewery as returned by the directory API. Read-only for this service.
///
/// Serialized camelCase for our API; the aliases accept the directory's
/// snake_case payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brewery {
    pub id: String,
    pub name: String,
    #[serde(default, alias = "brewery_type", skip_serializing_if = "Option::is_none")]
    pub brewery_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, alias = "website_url", skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
}
