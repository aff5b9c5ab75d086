//! Classifier capability
//!
//! The pipeline only sees this trait; the trained model is an opaque
//! function from the 11 features to a verdict.

use serde::{Deserialize, Serialize};

use super::metadata::ModelMetadata;
use crate::logic::error::DetectionResult;
use crate::logic::features::FeatureVector;
use crate::logic::threat::Verdict;

/// Classifier description for status output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierInfo {
    /// "onnx", "fixed", ...
    pub kind: String,
    pub name: String,
    pub version: Option<String>,
}

/// Trait for classifier backends (ONNX, fixed stub, ...)
pub trait UrlClassifier: Send + Sync {
    fn classify(&self, features: &FeatureVector) -> DetectionResult<Verdict>;

    fn describe(&self) -> ClassifierInfo;

    /// Artifact details, for backends loaded from a model file
    fn metadata(&self) -> Option<&ModelMetadata> {
        None
    }
}

/// Always answers the same verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClassifier {
    verdict: Verdict,
}

impl FixedClassifier {
    pub fn new(verdict: Verdict) -> Self {
        Self { verdict }
    }

    pub fn legitimate() -> Self {
        Self::new(Verdict::Legitimate)
    }

    pub fn phishing() -> Self {
        Self::new(Verdict::Phishing)
    }
}

impl UrlClassifier for FixedClassifier {
    fn classify(&self, _features: &FeatureVector) -> DetectionResult<Verdict> {
        Ok(self.verdict)
    }

    fn describe(&self) -> ClassifierInfo {
        ClassifierInfo {
            kind: "fixed".to_string(),
            name: format!("always-{}", self.verdict),
            version: None,
        }
    }
}
