//! URL Normalizer
//!
//! `repair` fixes the cheap mistakes users make when typing a URL,
//! `normalize` repairs then splits with generic-URI semantics
//! (scheme://netloc/path;params?query#fragment).
//!
//! The host kept here is the whole netloc, case preserved: userinfo and port
//! stay in it because the `has_at` feature looks for credential tricks there.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::logic::error::{DetectionError, DetectionResult};

/// Generic URI split (RFC 3986, appendix B)
static URI_SPLIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(?:([^:/?#]+):)?(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$")
        .expect("URI split pattern is valid")
});

const SUPPORTED_SCHEMES: &[&str] = &["http", "https"];

// ============================================================================
// PARSED URL
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedUrl {
    /// Lowercased, always `http` or `https`
    pub scheme: String,
    /// Authority / netloc, case preserved
    pub host: String,
    /// Path without query, fragment or `;params`; empty when absent
    pub path: String,
    /// The repaired URL the components were taken from
    pub normalized: String,
}

// ============================================================================
// REPAIR
// ============================================================================

/// Replace backslashes and restore a missing `//` after the scheme. When the
/// prefix is broken, every `http:/` (or `https:/`) in the string is rewritten,
/// including ones inside the query.
pub fn repair(raw: &str) -> String {
    let url = raw.replace('\\', "/");

    if url.starts_with("http:/") && !url.starts_with("http://") {
        url.replace("http:/", "http://")
    } else if url.starts_with("https:/") && !url.starts_with("https://") {
        url.replace("https:/", "https://")
    } else {
        url
    }
}

// ============================================================================
// NORMALIZE
// ============================================================================

/// Repair and parse a raw URL
pub fn normalize(raw: &str) -> DetectionResult<ParsedUrl> {
    let url = repair(raw);

    if !url.starts_with("http") {
        return Err(DetectionError::InvalidUrl(format!(
            "'{}' does not start with http:// or https://",
            raw
        )));
    }

    let split_input = strip_unsafe_whitespace(&url);
    let caps = URI_SPLIT
        .captures(&split_input)
        .ok_or_else(|| DetectionError::Extraction(format!("unparseable URL '{}'", url)))?;

    let scheme = caps
        .get(1)
        .map(|m| m.as_str().to_ascii_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_SCHEMES.contains(&scheme.as_str()) {
        return Err(DetectionError::InvalidUrl(format!(
            "unsupported scheme in '{}'",
            raw
        )));
    }

    let host = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
    if host.contains('[') != host.contains(']') {
        return Err(DetectionError::Extraction(format!(
            "invalid IPv6 authority '{}'",
            host
        )));
    }

    let path = strip_params(caps.get(3).map(|m| m.as_str()).unwrap_or_default());

    Ok(ParsedUrl {
        scheme,
        host: host.to_string(),
        path: path.to_string(),
        normalized: url.clone(),
    })
}

/// Tab, CR and LF are dropped before splitting; `normalized` keeps them
fn strip_unsafe_whitespace(url: &str) -> String {
    url.chars().filter(|c| !matches!(c, '\t' | '\r' | '\n')).collect()
}

/// Drop `;params` from the last path segment
fn strip_params(path: &str) -> &str {
    let segment_start = path.rfind('/').unwrap_or(0);
    match path[segment_start..].find(';') {
        Some(offset) => &path[..segment_start + offset],
        None => path,
    }
}

/// Host as the rule engine expects it: lowercased, leading `www.` removed
pub fn override_host(parsed: &ParsedUrl) -> String {
    let host = parsed.host.to_lowercase();
    match host.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => host,
    }
}

// ============================================================================
// TESTS
// ============================================================================
