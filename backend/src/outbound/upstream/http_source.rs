//! Reqwest-backed upstream user source.
//!
//! Owns transport details only: URL construction, the client timeout, HTTP
//! error mapping, and decoding the listing into domain users.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use super::dto::UserListingDto;
use crate::domain::ports::{UserDataset, UserSource, UserSourceError};

/// Upstream location and request limits.
#[derive(Debug, Clone)]
pub struct HttpUserSourceConfig {
    /// Scheme, host and optional path prefix of the upstream.
    pub base_url: Url,
    /// Path of the listing endpoint, joined onto `base_url`.
    pub users_path: String,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Value of the `limit` query parameter sent upstream.
    pub limit: u32,
}

/// Errors raised while building an [`HttpUserSource`].
#[derive(Debug, thiserror::Error)]
pub enum HttpUserSourceBuildError {
    /// Base URL and path do not form a valid URL.
    #[error("invalid upstream users URL: {0}")]
    Url(#[from] url::ParseError),
    /// The reqwest client could not be constructed.
    #[error("failed to build upstream HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// User source performing one `GET` against the upstream listing endpoint.
pub struct HttpUserSource {
    client: Client,
    endpoint: Url,
}

impl HttpUserSource {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoint URL is invalid or the client
    /// cannot be constructed.
    pub fn new(config: HttpUserSourceConfig) -> Result<Self, HttpUserSourceBuildError> {
        let endpoint = users_endpoint(&config.base_url, &config.users_path, config.limit)?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// Fully resolved listing URL, query string included.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl UserSource for HttpUserSource {
    async fn fetch_all(&self) -> Result<UserDataset, UserSourceError> {
        debug!(endpoint = %self.endpoint, "fetching upstream user listing");
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_listing(body.as_ref())
    }
}

fn users_endpoint(base: &Url, users_path: &str, limit: u32) -> Result<Url, url::ParseError> {
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        users_path.trim().trim_start_matches('/')
    );
    let mut endpoint = Url::parse(&joined)?;
    endpoint
        .query_pairs_mut()
        .append_pair("limit", &limit.to_string());
    Ok(endpoint)
}

fn parse_listing(body: &[u8]) -> Result<UserDataset, UserSourceError> {
    let listing: UserListingDto = serde_json::from_slice(body).map_err(|error| {
        UserSourceError::decode(format!("invalid user listing JSON: {error}"))
    })?;
    if listing.is_truncated() {
        warn!(
            total = listing.total,
            skip = listing.skip,
            limit = listing.limit,
            "upstream listing holds more users than were returned"
        );
    }
    listing.into_dataset().map_err(UserSourceError::decode)
}

fn map_transport_error(error: reqwest::Error) -> UserSourceError {
    if error.is_timeout() {
        UserSourceError::timeout(error.to_string())
    } else {
        UserSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> UserSourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_owned()
    } else {
        preview
    };
    UserSourceError::status(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.chars().count() <= PREVIEW_CHAR_LIMIT {
        return compact;
    }
    let mut preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    preview.push_str("...");
    preview
}
