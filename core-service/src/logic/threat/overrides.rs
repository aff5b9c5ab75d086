//! Rule Override Engine
//!
//! Only override logic: no types, no data.
//! Input: pre-normalized host (lowercase, no `www.`), raw classifier verdict
//! Output: OverrideOutcome
//!
//! Rule order, first match wins:
//! 1. Legitimate + typo-squat of a known domain → Phishing
//! 2. Phishing + host on the allowlist → Legitimate
//! 3. host contains a suspicious pattern → Phishing
//! 4. raw verdict unchanged
//!
//! Rule 2 runs before rule 3: an allowlisted host is trusted even when it
//! contains a suspicious substring.

use super::rules::{KnownDomainSet, OverrideThresholds, SuspiciousPatternSet};
use super::similarity::similarity_ratio;
use super::types::{OverrideOutcome, OverrideRule, Verdict};

// ============================================================================
// MAIN OVERRIDE FUNCTION
// ============================================================================

/// Final verdict only, default thresholds
pub fn override_verdict(
    host: &str,
    raw: Verdict,
    known: &KnownDomainSet,
    suspicious: &SuspiciousPatternSet,
) -> Verdict {
    apply_overrides(host, raw, known, suspicious, &OverrideThresholds::default()).verdict
}

pub fn apply_overrides(
    host: &str,
    raw: Verdict,
    known: &KnownDomainSet,
    suspicious: &SuspiciousPatternSet,
    thresholds: &OverrideThresholds,
) -> OverrideOutcome {
    if raw == Verdict::Legitimate {
        if let Some((candidate, ratio)) = find_typo_squat_target(host, known, thresholds.similarity) {
            return OverrideOutcome::overridden(
                Verdict::Phishing,
                OverrideRule::TypoSquat {
                    candidate: candidate.to_string(),
                    ratio,
                },
            );
        }
    }

    if raw == Verdict::Phishing && known.contains(host) {
        return OverrideOutcome::overridden(Verdict::Legitimate, OverrideRule::Allowlisted);
    }

    if let Some(pattern) = suspicious.find_in(host) {
        return OverrideOutcome::overridden(
            Verdict::Phishing,
            OverrideRule::SuspiciousPattern {
                pattern: pattern.to_string(),
            },
        );
    }

    OverrideOutcome::unchanged(raw)
}

// ============================================================================
// TYPO-SQUAT DETECTION
// ============================================================================

/// Host is a near miss (ratio > threshold) of a known domain whose first
/// label differs. Same first label means a TLD or subdomain variant of the
/// same brand, which is skipped.
pub fn is_typo_squat(host: &str, known: &KnownDomainSet, threshold: f64) -> bool {
    find_typo_squat_target(host, known, threshold).is_some()
}

/// The known domain the host imitates, with its similarity ratio
pub fn find_typo_squat_target<'k>(
    host: &str,
    known: &'k KnownDomainSet,
    threshold: f64,
) -> Option<(&'k str, f64)> {
    let domain_name = first_label(host);

    for candidate in known.iter() {
        let ratio = similarity_ratio(host, candidate);
        if ratio > threshold && host != candidate {
            if domain_name == first_label(candidate) {
                continue;
            }
            return Some((candidate, ratio));
        }
    }

    None
}

fn first_label(domain: &str) -> &str {
    domain.split('.').next().unwrap_or(domain)
}

// ============================================================================
// TESTS
// ============================================================================
