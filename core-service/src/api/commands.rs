//! Commands
//!
//! `Result<T, String>`: the error side is a message ready to show the user.

use serde::Serialize;

use crate::constants::APP_VERSION;
use crate::logic::error::DetectionError;
use crate::logic::features::{FeatureVector, LayoutInfo};
use crate::logic::model::{ClassifierInfo, ModelMetadata};
use crate::logic::pipeline::{Detector, Evaluation};
use crate::logic::threat::{OverrideRule, Verdict};

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a URL";
pub const INVALID_URL_MESSAGE: &str = "Please enter a valid url starting with http:// or https://";
pub const PHISHING_MESSAGE: &str = "This URL is likely phishing.";
pub const LEGITIMATE_MESSAGE: &str = "This URL appears legitimate.";

// ============================================================================
// RESPONSE TYPES
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CheckResponse {
    pub url: String,
    pub is_phishing: bool,
    pub message: String,
    pub final_verdict: Verdict,
    pub raw_verdict: Verdict,
    pub override_rule: Option<OverrideRule>,
    /// Human-readable reason when a rule decided the verdict
    pub reason: Option<String>,
    pub features: FeatureVector,
}

impl From<Evaluation> for CheckResponse {
    fn from(evaluation: Evaluation) -> Self {
        let is_phishing = evaluation.is_phishing();
        Self {
            url: evaluation.url,
            is_phishing,
            message: if is_phishing { PHISHING_MESSAGE } else { LEGITIMATE_MESSAGE }.to_string(),
            final_verdict: evaluation.final_verdict,
            raw_verdict: evaluation.raw_verdict,
            reason: evaluation.override_rule.as_ref().map(OverrideRule::describe),
            override_rule: evaluation.override_rule,
            features: evaluation.features,
        }
    }
}

/// What the detector is running with
#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
    pub version: String,
    pub classifier: ClassifierInfo,
    pub model: Option<ModelMetadata>,
    pub layout: LayoutInfo,
    pub known_domains: usize,
    pub suspicious_patterns: usize,
    pub similarity_threshold: f64,
}

// ============================================================================
// COMMANDS
// ============================================================================

/// Check one URL typed by the user
pub fn check_url(detector: &Detector, url: &str) -> Result<CheckResponse, String> {
    if url.is_empty() {
        return Err(EMPTY_INPUT_MESSAGE.to_string());
    }

    detector
        .evaluate(url)
        .map(CheckResponse::from)
        .map_err(|e| user_message(&e))
}

/// Classifier, loaded model and rule set sizes
pub fn get_engine_status(detector: &Detector) -> EngineStatus {
    EngineStatus {
        version: APP_VERSION.to_string(),
        classifier: detector.classifier_info(),
        model: detector.model_metadata().cloned(),
        layout: LayoutInfo::current(),
        known_domains: detector.known_domains().len(),
        suspicious_patterns: detector.suspicious_patterns().len(),
        similarity_threshold: detector.thresholds().similarity,
    }
}

fn user_message(error: &DetectionError) -> String {
    match error {
        DetectionError::InvalidUrl(_) => INVALID_URL_MESSAGE.to_string(),
        other => {
            if other.is_request_scoped() {
                log::warn!("URL check failed: {}", other);
            } else {
                log::error!("URL check failed: {}", other);
            }
            format!("Error processing the URL: {}", other)
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::config::DetectorConfig;
    use crate::logic::model::FixedClassifier;
    use crate::logic::threat::KnownDomainSet;

    fn detector(classifier: FixedClassifier) -> Detector {
        Detector::with_classifier(&DetectorConfig::default(), Box::new(classifier))
    }

    #[test]
    fn test_empty_input() {
        let detector = detector(FixedClassifier::legitimate());
        assert_eq!(check_url(&detector, "").unwrap_err(), EMPTY_INPUT_MESSAGE);
    }

    #[test]
    fn test_input_is_not_trimmed() {
        let detector = detector(FixedClassifier::legitimate());
        assert_eq!(check_url(&detector, "   ").unwrap_err(), INVALID_URL_MESSAGE);
        assert_eq!(
            check_url(&detector, " https://www.google.com").unwrap_err(),
            INVALID_URL_MESSAGE
        );

        let response = check_url(&detector, "https://www.google.com ").unwrap();
        assert_eq!(response.url, "https://www.google.com ");
        assert_eq!(response.features.get_by_name("length"), Some(23));
    }

    #[test]
    fn test_invalid_url_message() {
        let detector = detector(FixedClassifier::legitimate());
        assert_eq!(check_url(&detector, "not-a-url").unwrap_err(), INVALID_URL_MESSAGE);
    }

    #[test]
    fn test_extraction_error_message() {
        let detector = detector(FixedClassifier::legitimate());
        let message = check_url(&detector, "http://[::1/x").unwrap_err();
        assert!(message.starts_with("Error processing the URL:"));
    }

    #[test]
    fn test_legitimate_response() {
        let detector = detector(FixedClassifier::legitimate());
        let response = check_url(&detector, "https://www.google.com").unwrap();
        assert!(!response.is_phishing);
        assert_eq!(response.message, LEGITIMATE_MESSAGE);
        assert!(response.reason.is_none());
    }

    #[test]
    fn test_phishing_response_has_reason() {
        let detector = detector(FixedClassifier::legitimate());
        let response = check_url(&detector, "https://account-verify.example.net").unwrap();
        assert!(response.is_phishing);
        assert_eq!(response.message, PHISHING_MESSAGE);
        assert!(response.reason.unwrap().contains("account-"));
    }

    #[test]
    fn test_engine_status() {
        let detector = detector(FixedClassifier::phishing());
        let status = get_engine_status(&detector);
        assert_eq!(status.classifier.kind, "fixed");
        assert!(status.model.is_none());
        assert_eq!(status.layout, LayoutInfo::current());
        assert_eq!(status.suspicious_patterns, 7);
        assert_eq!(status.known_domains, KnownDomainSet::defaults().len());
        assert_eq!(status.similarity_threshold, 0.8);

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["layout"]["feature_count"], 11);
        assert!(json["model"].is_null());
    }
}
