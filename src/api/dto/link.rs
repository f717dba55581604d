//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// Request to create a short link.
///
/// `url` defaults to empty when missing so that absence is reported as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// The original URL to shorten (must be valid HTTP/HTTPS).
    #[serde(default)]
    #[validate(url(message = "Please provide a valid http(s) URL."))]
    pub url: String,

    /// Optional custom short code. Blank means "generate one".
    #[serde(default)]
    pub code: Option<String>,
}

impl CreateLinkRequest {
    /// Trimmed custom code, or `None` when absent or blank.
    pub fn custom_code(&self) -> Option<&str> {
        self.code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}

/// JSON representation of a link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub code: String,
    pub url: String,
    pub short_url: String,
    pub total_clicks: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    /// Builds the response for `link`, using `short_url` as its public address.
    pub fn new(link: Link, short_url: String) -> Self {
        Self {
            code: link.code,
            url: link.target_url,
            short_url,
            total_clicks: link.total_clicks,
            last_clicked_at: link.last_clicked_at,
            created_at: link.created_at,
        }
    }
}

/// Response for `GET /api/links`.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub links: Vec<LinkResponse>,
}
