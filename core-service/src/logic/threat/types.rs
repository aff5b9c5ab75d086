//! Threat Types
//!
//! Core types for the verdict and the override trail.
//! No logic here, only data structures.

use serde::{Deserialize, Serialize};

// ============================================================================
// VERDICT
// ============================================================================

/// Binary verdict; the numeric label matches the classifier's training labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Legitimate,
    Phishing,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Legitimate => "legitimate",
            Verdict::Phishing => "phishing",
        }
    }

    /// Only 0 and 1 are valid labels
    pub fn from_label(label: i64) -> Option<Self> {
        match label {
            0 => Some(Verdict::Legitimate),
            1 => Some(Verdict::Phishing),
            _ => None,
        }
    }

    pub fn is_phishing(&self) -> bool {
        matches!(self, Verdict::Phishing)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// OVERRIDE TRAIL
// ============================================================================

/// Rule that decided the final verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum OverrideRule {
    /// Host is a near miss of a known domain with a different first label
    TypoSquat { candidate: String, ratio: f64 },
    /// Host is on the allowlist
    Allowlisted,
    /// Host contains a suspicious substring
    SuspiciousPattern { pattern: String },
}

impl OverrideRule {
    pub fn describe(&self) -> String {
        match self {
            OverrideRule::TypoSquat { candidate, ratio } => {
                format!("Looks like a typo of {} (similarity {:.2})", candidate, ratio)
            }
            OverrideRule::Allowlisted => "Domain is on the known-domain allowlist".to_string(),
            OverrideRule::SuspiciousPattern { pattern } => {
                format!("Host contains suspicious pattern '{}'", pattern)
            }
        }
    }
}

/// Final verdict plus the rule that produced it, if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideOutcome {
    pub verdict: Verdict,
    pub rule: Option<OverrideRule>,
}

impl OverrideOutcome {
    pub fn unchanged(verdict: Verdict) -> Self {
        Self { verdict, rule: None }
    }

    pub fn overridden(verdict: Verdict, rule: OverrideRule) -> Self {
        Self { verdict, rule: Some(rule) }
    }
}
