//! Override Rules & Thresholds
//!
//! Rule data: the known-domain allowlist, suspicious host substrings and the
//! typo-squat threshold. No override logic here, only data and config.
//!
//! Both sets are built once at startup and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SIMILARITY_THRESHOLD;

// ============================================================================
// DEFAULT DATA
// ============================================================================

/// Brands, banks, carriers and government sites most often impersonated
pub const DEFAULT_KNOWN_DOMAINS: &[&str] = &[
    "google.com", "gmail.com", "youtube.com", "google.co.in",
    "facebook.com", "instagram.com", "whatsapp.com", "meta.com",
    "microsoft.com", "office.com", "live.com", "outlook.com", "office365.com",
    "apple.com", "icloud.com", "itunes.com", "me.com",
    "amazon.com", "primevideo.com", "amazon.in",
    "netflix.com", "disneyplus.com", "hulu.com",
    "paypal.com", "venmo.com", "paypalobjects.com",
    "linkedin.com", "twitter.com", "x.com",
    "snapchat.com", "tiktok.com", "pinterest.com",
    "ebay.com", "alibaba.com", "aliexpress.com", "etsy.com",
    "dhl.com", "fedex.com", "ups.com", "usps.com",
    "chase.com", "bankofamerica.com", "wellsfargo.com",
    "hsbc.com", "santander.com", "barclays.co.uk", "lloydsbank.com",
    "monzo.com", "starlingbank.com", "natwest.com", "halifax.co.uk",
    "americanexpress.com", "amex.com", "capitalone.com",
    "coinbase.com", "binance.com", "crypto.com",
    "naver.com", "rakuten.co.jp", "jcb.co.jp",
    "dpd.com", "royalmail.com", "canadapost-postescanada.ca",
    "lexisnexis.com", "dropbox.com", "zoom.us",
    "steamcommunity.com", "epicgames.com", "origin.com", "battle.net",
    "mac.com",
    "verizon.com", "att.com", "tmobile.com", "sprint.com",
    "orange.fr", "vodafone.com", "telefonica.com",
    "gov.uk", "gov.in", "irs.gov", "ssa.gov", "nhs.uk",
];

/// Host substrings typical of credential-harvesting hostnames
pub const DEFAULT_SUSPICIOUS_PATTERNS: &[&str] = &[
    "secure-", "account-", "login-", "verify-", "update-", "signin-", "authenticate-",
];

// ============================================================================
// KNOWN DOMAIN SET
// ============================================================================

/// Allowlist of lowercase domains without a `www.` prefix, in list order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownDomainSet {
    domains: Vec<String>,
}

impl KnownDomainSet {
    /// Entries are trimmed, lowercased and stripped of `www.`; blanks and
    /// repeats dropped, first occurrence keeps its position
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut kept: Vec<String> = Vec::new();
        for domain in domains {
            let domain = canonical_domain(domain.as_ref());
            if !domain.is_empty() && !kept.contains(&domain) {
                kept.push(domain);
            }
        }
        Self { domains: kept }
    }

    pub fn defaults() -> Self {
        Self::new(DEFAULT_KNOWN_DOMAINS.iter().copied())
    }

    /// Exact membership
    pub fn contains(&self, host: &str) -> bool {
        self.domains.iter().any(|d| d == host)
    }

    /// Configured order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

fn canonical_domain(domain: &str) -> String {
    let domain = domain.trim().to_lowercase();
    match domain.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => domain,
    }
}

// ============================================================================
// SUSPICIOUS PATTERN SET
// ============================================================================

/// Substrings that promote a host to phishing; order is kept for reporting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuspiciousPatternSet {
    patterns: Vec<String>,
}

impl SuspiciousPatternSet {
    /// Blank and duplicate patterns are dropped
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut kept: Vec<String> = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            if !pattern.is_empty() && !kept.iter().any(|p| p == pattern) {
                kept.push(pattern.to_string());
            }
        }
        Self { patterns: kept }
    }

    pub fn defaults() -> Self {
        Self::new(DEFAULT_SUSPICIOUS_PATTERNS.iter().copied())
    }

    /// First pattern found in the host
    pub fn find_in(&self, host: &str) -> Option<&str> {
        self.patterns
            .iter()
            .map(String::as_str)
            .find(|pattern| host.contains(pattern))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

// ============================================================================
// CONFIGURABLE THRESHOLDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverrideThresholds {
    /// Typo-squat fires when similarity is strictly above this
    pub similarity: f64,
}

impl Default for OverrideThresholds {
    fn default() -> Self {
        Self {
            similarity: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}
