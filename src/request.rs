//! Request construction for the newsapi.org `/v2/everything` endpoint.
//!
//! A [`SearchRequest`] is immutable once built: parameter values are
//! percent-encoded at construction and the lower bound of the time window
//! is fixed to one calendar month before the moment of construction.
//!
//! # Time Window
//!
//! newsapi.org documents a one-month retention window but does not enforce
//! it strictly server-side. Pinning `from` locally keeps the baseline and
//! term queries of one comparison over a comparable range even though they
//! are issued a few seconds apart. The two calls are deliberately not made
//! atomic.

use chrono::{Months, Utc};
use url::Url;

const EVERYTHING_URL: &str = "https://newsapi.org/v2/everything";

/// Timestamp format accepted by the `from` parameter, minute precision.
const FROM_FORMAT: &str = "%Y-%m-%dT%H:%MZ";

/// An immutable, pre-encoded query against the article search endpoint.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Percent-encoded search term, `None` for a baseline (count-everything)
    /// query. The distinction matters: an absent term counts all articles
    /// from the source, an empty term is sent verbatim.
    term: Option<String>,
    /// Comma-joined, individually percent-encoded source ids.
    sources: String,
    /// ISO-8601 UTC timestamp, one month before construction.
    from: String,
}

impl SearchRequest {
    fn new(term: Option<&str>, source_ids: &[&str]) -> Self {
        let sources = source_ids
            .iter()
            .map(|id| urlencoding::encode(id).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        Self {
            term: term.map(|t| urlencoding::encode(t).into_owned()),
            sources,
            from: one_month_ago(),
        }
    }

    /// Baseline query: every article from `source_id` in the window.
    pub fn for_source(source_id: &str) -> Self {
        Self::new(None, &[source_id])
    }

    /// Term query: articles from `source_id` matching `term` exactly.
    pub fn term_search(term: &str, source_id: &str) -> Self {
        Self::new(Some(term), &[source_id])
    }

    /// Build the full request URL.
    ///
    /// The term, when present, is sent quoted (`q="<term>"`) so the API
    /// performs an exact-phrase match. A parse failure here indicates a
    /// programming defect in URL assembly and is propagated as fatal.
    pub fn url(&self, api_key: &str) -> Result<Url, url::ParseError> {
        let mut built = format!(
            "{}?sources={}&from={}&apiKey={}",
            EVERYTHING_URL, self.sources, self.from, api_key
        );
        if let Some(ref term) = self.term {
            built.push_str(&format!("&q=\"{}\"", term));
        }
        Url::parse(&built)
    }

    /// The window lower bound this request was built with.
    pub fn from_date(&self) -> &str {
        &self.from
    }

    /// The encoded, comma-joined source ids this request targets.
    pub fn sources(&self) -> &str {
        &self.sources
    }

    /// The encoded search term, `None` for a baseline query.
    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }
}

/// Current instant minus one calendar month, formatted for the `from`
/// parameter (UTC, truncated to the minute).
fn one_month_ago() -> String {
    let cutoff = Utc::now()
        .checked_sub_months(Months::new(1))
        .unwrap_or_else(Utc::now);
    cutoff.format(FROM_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_baseline_url_omits_term() {
        let req = SearchRequest::for_source("bbc-news");
        let url = req.url("abc123").unwrap();
        let query = url.query().unwrap();
        assert!(query.contains("sources=bbc-news"));
        assert!(query.contains("apiKey=abc123"));
        assert!(!query.contains("q="));
    }

    #[test]
    fn test_term_search_url_has_quoted_term() {
        let req = SearchRequest::term_search("election", "cnn");
        let url = req.url("abc123").unwrap();
        // The quotes may be serialized raw or as %22 depending on the
        // component; accept either.
        let s = url.as_str();
        assert!(s.contains("&q=%22election%22") || s.contains("&q=\"election\""));
    }

    #[test]
    fn test_term_is_percent_encoded() {
        let req = SearchRequest::term_search("climate change", "cnn");
        let url = req.url("abc123").unwrap();
        assert!(url.as_str().contains("climate%20change"));
    }

    #[test]
    fn test_source_id_is_percent_encoded() {
        let req = SearchRequest::for_source("a&b");
        let url = req.url("abc123").unwrap();
        assert!(url.as_str().contains("sources=a%26b"));
    }

    #[test]
    fn test_multiple_sources_comma_joined() {
        let req = SearchRequest::new(None, &["bbc-news", "cnn"]);
        let url = req.url("abc123").unwrap();
        // The comma itself may be normalized to %2C in the query component.
        let s = url.as_str();
        assert!(s.contains("sources=bbc-news,cnn") || s.contains("sources=bbc-news%2Ccnn"));
    }

    #[test]
    fn test_from_date_format() {
        let req = SearchRequest::for_source("cnn");
        let pattern = Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}Z$").unwrap();
        assert!(
            pattern.is_match(req.from_date()),
            "unexpected from date: {}",
            req.from_date()
        );
    }

    #[test]
    fn test_from_date_is_in_the_past() {
        let req = SearchRequest::for_source("cnn");
        let now = Utc::now().format(FROM_FORMAT).to_string();
        // Lexicographic comparison is valid for this fixed-width format.
        assert!(req.from_date() < now.as_str());
    }
}
