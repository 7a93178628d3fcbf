//! Wire models for the newsapi.org JSON responses.
//!
//! newsapi.org answers every request with one of two shapes: a success
//! payload (`{"status":"ok", ...}` with endpoint-specific fields) or a
//! structured error (`{"status":"error","code":...,"message":...}`).
//! These structs mirror those shapes; unrecognized fields are ignored so
//! additions on the API side do not break deserialization.
//!
//! Several fields use camelCase on the wire, hence the `serde(rename)`
//! attributes.

use serde::{Deserialize, Serialize};

/// One entry of the `/v2/sources` catalog.
///
/// `id` is the stable key used in subsequent `/v2/everything` queries;
/// `name` is the human-facing label shown in prompts and output.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Source {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub country: String,
}

/// Success shape of the `/v2/sources` endpoint.
#[derive(Debug, Deserialize, Serialize)]
pub struct SourceListing {
    #[serde(default)]
    pub status: String,
    pub sources: Vec<Source>,
}

/// The abbreviated source object attached to each article.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArticleSource {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

/// One article row in a search response.
///
/// Only carried through deserialization for completeness; the comparison
/// logic uses `totalResults` alone.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Article {
    pub source: ArticleSource,
    pub author: Option<String>,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "urlToImage")]
    pub url_to_image: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
}

/// Success shape of the `/v2/everything` endpoint.
#[derive(Debug, Deserialize, Serialize)]
pub struct SearchResult {
    #[serde(default)]
    pub status: String,
    #[serde(rename = "totalResults")]
    pub total_results: u64,
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// Error shape returned with any non-200 status.
///
/// `code` draws from a small fixed vocabulary (`apiKeyDisabled`,
/// `apiKeyExhausted`, `apiKeyInvalid`, `rateLimited`, ...); unrecognized
/// codes are surfaced verbatim in a generic message.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    #[serde(default)]
    pub status: String,
    pub code: String,
    pub message: String,
}
