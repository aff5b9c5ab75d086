//! Feature Vector - Core data structure for ML input
//!
//! Versioned: carries the layout version and hash it was built with, so a
//! vector can never be fed to a model trained on another layout unnoticed.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::layout::{
    layout_hash, validate_layout, LayoutMismatchError, FEATURE_COUNT, FEATURE_LAYOUT,
    FEATURE_VERSION,
};

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Counts and 0/1 flags in FEATURE_LAYOUT order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureVector {
    pub version: u8,
    pub layout_hash: u32,
    pub values: [u32; FEATURE_COUNT],
}

impl FeatureVector {
    /// Zeroed vector with current version
    pub fn new() -> Self {
        Self::from_values([0; FEATURE_COUNT])
    }

    pub fn from_values(values: [u32; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.values.get(index).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Option<u32> {
        super::layout::feature_index(name).and_then(|i| self.get(i))
    }

    pub fn set(&mut self, index: usize, value: u32) {
        if index < FEATURE_COUNT {
            self.values[index] = value;
        }
    }

    /// Returns false for unknown names
    pub fn set_by_name(&mut self, name: &str, value: u32) -> bool {
        if let Some(index) = super::layout::feature_index(name) {
            self.set(index, value);
            true
        } else {
            false
        }
    }

    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.layout_hash)
    }

    /// (name, value) pairs in layout order
    pub fn named_values(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        FEATURE_LAYOUT.iter().copied().zip(self.values.iter().copied())
    }

    /// Model input row in layout order
    pub fn to_model_input(&self) -> [f32; FEATURE_COUNT] {
        let mut row = [0.0f32; FEATURE_COUNT];
        for (slot, value) in row.iter_mut().zip(self.values.iter()) {
            *slot = *value as f32;
        }
        row
    }

    /// JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "values": self.values,
        })
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[u32; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [u32; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}

/// Serializes as `{name: value}` in layout order (the feature inspector view)
impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (name, value) in self.named_values() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

// ============================================================================
// TESTS
// ============================================================================
