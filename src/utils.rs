//! String helpers for input normalization and validation.

use once_cell::sync::Lazy;
use regex::Regex;

/// newsapi.org keys are plain alphanumeric tokens; anything else is
/// rejected before a probe request is ever issued.
static API_KEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new("^[a-zA-Z0-9]+$").unwrap());

/// Trim and lowercase for case-insensitive catalog lookup.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Whether `key` contains only characters valid in an API key.
///
/// An empty string does not match.
pub fn is_valid_api_key(key: &str) -> bool {
    API_KEY_RE.is_match(key)
}

/// Strip exactly one pair of enclosing double quotes, if both are present.
///
/// Users quote a term to signal exact-phrase intent; the request builder
/// re-quotes it on the way out, so a surviving pair here would double up.
/// Unbalanced or absent quotes are left verbatim, as is a lone `"` (which
/// both starts and ends with a quote but has nothing to enclose).
pub fn strip_enclosing_quotes(s: &str) -> &str {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        &s[1..s.len() - 1]
    } else {
        s
    }
}
