//! Threat Module
//!
//! Rule override engine: corrects the classifier's raw verdict with domain
//! knowledge (typo-squats, allowlist, suspicious host substrings).
//!
//! ## Structure
//! - `types`: Verdict and override trail
//! - `rules`: allowlist, patterns, thresholds
//! - `similarity`: Ratcliff/Obershelp ratio
//! - `overrides`: override logic
//!
//! ## Usage
//! ```ignore
//! use crate::logic::threat::{override_verdict, KnownDomainSet, SuspiciousPatternSet, Verdict};
//!
//! let known = KnownDomainSet::defaults();
//! let patterns = SuspiciousPatternSet::defaults();
//! let verdict = override_verdict("gooogle.com", Verdict::Legitimate, &known, &patterns);
//! assert_eq!(verdict, Verdict::Phishing);
//! ```

pub mod overrides;
pub mod rules;
pub mod similarity;
pub mod types;

pub use types::{OverrideOutcome, OverrideRule, Verdict};

pub use rules::{
    KnownDomainSet, OverrideThresholds, SuspiciousPatternSet, DEFAULT_KNOWN_DOMAINS,
    DEFAULT_SUSPICIOUS_PATTERNS,
};

pub use overrides::{apply_overrides, find_typo_squat_target, is_typo_squat, override_verdict};
pub use similarity::similarity_ratio;
