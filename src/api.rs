//! newsapi.org client with success/error response classification.
//!
//! Every endpoint answers with one of two JSON shapes depending on the HTTP
//! status: 200 carries the endpoint's success payload, anything else carries
//! a structured [`ApiError`]. [`NewsApiClient::get_json`] performs that
//! branch once for both endpoints.
//!
//! # Architecture
//!
//! The module uses a trait-based design:
//! - [`NewsApi`]: the seam the interactive driver calls through
//! - [`NewsApiClient`]: the production `reqwest` implementation
//!
//! Tests substitute a scripted implementation of [`NewsApi`] so the driver
//! can be exercised without a network.

use crate::models::{ApiError, SearchResult, Source, SourceListing};
use crate::request::SearchRequest;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

const SOURCES_URL: &str = "https://newsapi.org/v2/sources";

/// Failure modes of one request/response round trip.
///
/// The three recoverable variants are handled differently by the caller:
/// `Api` carries the service's own diagnosis (bad key, rate limit, ...),
/// while `Transport` and `Decode` are connectivity problems. `Url` is an
/// assembly defect and is treated as fatal everywhere.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("error connecting to newsapi.org: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response from newsapi.org: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("newsapi.org error ({}): {}", .0.code, .0.message)]
    Api(ApiError),
    #[error("error building request url: {0}")]
    Url(#[from] url::ParseError),
}

/// Read-only view of the newsapi.org operations the driver needs.
pub trait NewsApi {
    /// Fetch the `/v2/sources` catalog. Doubles as the API key probe: a
    /// rejected key surfaces here as [`FetchError::Api`].
    async fn list_sources(&self, api_key: &str) -> Result<Vec<Source>, FetchError>;

    /// Count the articles matching `request` via `/v2/everything`.
    async fn total_results(
        &self,
        api_key: &str,
        request: &SearchRequest,
    ) -> Result<u64, FetchError>;
}

/// Production [`NewsApi`] implementation over a shared [`reqwest::Client`].
#[derive(Debug, Default)]
pub struct NewsApiClient {
    client: Client,
}

impl NewsApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Issue a GET and route the body by HTTP status: 200 parses as `T`,
    /// anything else parses as [`ApiError`]. Unknown JSON fields are
    /// ignored either way.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            Ok(serde_json::from_str(&body)?)
        } else {
            let error: ApiError = serde_json::from_str(&body)?;
            warn!(status = status.as_u16(), code = %error.code, "newsapi.org returned an error body");
            Err(FetchError::Api(error))
        }
    }
}

impl NewsApi for NewsApiClient {
    #[instrument(level = "info", skip_all)]
    async fn list_sources(&self, api_key: &str) -> Result<Vec<Source>, FetchError> {
        let url = Url::parse(&format!("{}?apiKey={}", SOURCES_URL, api_key))?;
        let listing: SourceListing = self.get_json(url).await?;
        info!(count = listing.sources.len(), "Fetched source catalog");
        Ok(listing.sources)
    }

    // The URL embeds the key, so it is never logged; sources and window
    // bound are enough to correlate calls.
    #[instrument(
        level = "info",
        skip_all,
        fields(sources = %request.sources(), term = request.term().is_some(), from = %request.from_date())
    )]
    async fn total_results(
        &self,
        api_key: &str,
        request: &SearchRequest,
    ) -> Result<u64, FetchError> {
        let url = request.url(api_key)?;
        let result: SearchResult = self.get_json(url).await?;
        debug!(total_results = result.total_results, "Counted articles");
        Ok(result.total_results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = FetchError::Api(ApiError {
            status: "error".to_string(),
            code: "rateLimited".to_string(),
            message: "Too many requests.".to_string(),
        });
        let rendered = err.to_string();
        assert!(rendered.contains("rateLimited"));
        assert!(rendered.contains("Too many requests."));
    }

    #[test]
    fn test_decode_error_from_truncated_body() {
        let parsed: Result<SearchResult, _> = serde_json::from_str(r#"{"totalResults": 5"#);
        let err = FetchError::from(parsed.unwrap_err());
        assert!(matches!(err, FetchError::Decode(_)));
        assert!(err.to_string().contains("malformed response"));
    }

    #[test]
    fn test_url_error_is_distinct() {
        let err = FetchError::from(Url::parse("not a url").unwrap_err());
        assert!(matches!(err, FetchError::Url(_)));
    }
}
