//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the feature schema the classifier was trained on.**
//!
//! ## Rules:
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! A model sidecar declares the layout it was trained with; it is checked
//! against this one when the model loads.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Whole URL (0-3) ===
    "length",            // 0: char count of the repaired URL
    "num_dots",          // 1: '.' count in the URL
    "has_https",         // 2: scheme is https
    "has_at",            // 3: '@' in host

    // === Host / URL mix (4-6) ===
    "has_dash",          // 4: '-' in host
    "num_digits",        // 5: decimal digits in the URL
    "has_ip",            // 6: host is a dotted quad

    // === Path / host sizes (7-10) ===
    "num_subdirs",       // 7: '/' count in path minus one, floored at 0
    "hostname_length",   // 8: char count of host
    "path_length",       // 9: char count of path
    "num_dots_domain",   // 10: '.' count in host
];

/// Total number of features
/// Must match FEATURE_LAYOUT.len()
pub const FEATURE_COUNT: usize = 11;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 over version + ordered names
pub fn compute_layout_hash() -> u32 {
    compute_hash_for(FEATURE_VERSION, FEATURE_LAYOUT.iter().copied())
}

/// Hash any (version, names) pair the same way, e.g. a model sidecar's layout
pub fn compute_hash_for<'a, I>(version: u8, names: I) -> u32
where
    I: IntoIterator<Item = &'a str>,
{
    let mut hasher = Hasher::new();
    hasher.update(&[version]);
    for name in names {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }
    hasher.finalize()
}

pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when feature layout doesn't match expected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Feature layout mismatch: expected v{expected_version} (hash: {expected_hash:08x}), got v{actual_version} (hash: {actual_hash:08x})"
)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

/// Validate that incoming data matches current layout
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

// ============================================================================
// TESTS
// ============================================================================
