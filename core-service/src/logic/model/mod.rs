//! Model Module - Classifier Adapter
//!
//! Keeps inference separate from feature extraction so the model can be
//! swapped (or stubbed in tests) without touching the pipeline.

pub mod checksum;
pub mod classifier;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod inference;
pub mod metadata;

pub use classifier::{ClassifierInfo, FixedClassifier, UrlClassifier};
pub use inference::OnnxClassifier;
pub use metadata::{ModelMetadata, ModelSidecar};
