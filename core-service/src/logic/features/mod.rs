//! Features Module - Feature Extraction Engine
//!
//! Derives the fixed 11-feature vector from a parsed URL.
//! One extractor per URL part; each fills its own slots of the vector.

pub mod host;
pub mod layout;
pub mod path;
pub mod url;
pub mod vector;

#[cfg(test)]
mod tests;

pub use layout::{feature_index, LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use vector::FeatureVector;

use crate::logic::url::ParsedUrl;

// ============================================================================
// FEATURE EXTRACTOR TRAIT
// ============================================================================

/// Trait for feature extractors
pub trait FeatureExtractor {
    /// Extract features and update the vector
    fn extract(&self, vector: &mut FeatureVector);
}

/// Build the full vector. `raw_url` is the repaired URL string.
pub fn extract(parsed: &ParsedUrl, raw_url: &str) -> FeatureVector {
    let mut vector = FeatureVector::new();

    url::UrlFeatures::new(raw_url, &parsed.scheme).extract(&mut vector);
    host::HostFeatures::new(&parsed.host).extract(&mut vector);
    path::PathFeatures::new(&parsed.path).extract(&mut vector);

    vector
}

/// 0/1 flag encoding used by the model
pub(crate) fn flag(value: bool) -> u32 {
    u32::from(value)
}

/// Char count, saturating into the feature range
pub(crate) fn char_len(s: &str) -> u32 {
    count(s.chars().count())
}

pub(crate) fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
