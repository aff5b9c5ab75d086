//! Detection Pipeline
//!
//! normalize → extract → classify → override.
//! Built once at startup; `evaluate` takes `&self` and shares nothing mutable
//! between requests.

use serde::Serialize;
use uuid::Uuid;

use crate::logic::config::DetectorConfig;
use crate::logic::error::DetectionResult;
use crate::logic::features::{self, FeatureVector};
use crate::logic::model::{ClassifierInfo, ModelMetadata, OnnxClassifier, UrlClassifier};
use crate::logic::threat::{
    apply_overrides, KnownDomainSet, OverrideRule, OverrideThresholds, SuspiciousPatternSet, Verdict,
};
use crate::logic::url::{self, ParsedUrl};

// ============================================================================
// EVALUATION RESULT
// ============================================================================

/// One request's outcome; both verdicts kept for observability
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub id: Uuid,
    /// Repaired URL the features were computed on
    pub url: String,
    /// Host as seen by the rule engine (lowercase, no `www.`)
    pub host: String,
    pub final_verdict: Verdict,
    pub raw_verdict: Verdict,
    pub override_rule: Option<OverrideRule>,
    pub features: FeatureVector,
}

impl Evaluation {
    pub fn is_phishing(&self) -> bool {
        self.final_verdict.is_phishing()
    }

    pub fn was_overridden(&self) -> bool {
        self.final_verdict != self.raw_verdict
    }
}

// ============================================================================
// DETECTOR
// ============================================================================

pub struct Detector {
    classifier: Box<dyn UrlClassifier>,
    known: KnownDomainSet,
    suspicious: SuspiciousPatternSet,
    thresholds: OverrideThresholds,
}

impl Detector {
    pub fn new(
        classifier: Box<dyn UrlClassifier>,
        known: KnownDomainSet,
        suspicious: SuspiciousPatternSet,
        thresholds: OverrideThresholds,
    ) -> Self {
        log::info!(
            "Detector ready: {} classifier, {} known domains, {} suspicious patterns",
            classifier.describe().kind,
            known.len(),
            suspicious.len()
        );
        Self {
            classifier,
            known,
            suspicious,
            thresholds,
        }
    }

    /// Load the ONNX model named in the config. Fails with `ModelLoad`.
    pub fn from_config(config: &DetectorConfig) -> DetectionResult<Self> {
        let classifier = OnnxClassifier::load(&config.model)?;
        Ok(Self::with_classifier(config, Box::new(classifier)))
    }

    /// Rule sets from config, classifier supplied by the caller
    pub fn with_classifier(config: &DetectorConfig, classifier: Box<dyn UrlClassifier>) -> Self {
        Self::new(
            classifier,
            config.known_domain_set(),
            config.suspicious_pattern_set(),
            config.override_thresholds(),
        )
    }

    pub fn classifier_info(&self) -> ClassifierInfo {
        self.classifier.describe()
    }

    /// `None` unless the classifier was loaded from a model file
    pub fn model_metadata(&self) -> Option<&ModelMetadata> {
        self.classifier.metadata()
    }

    pub fn known_domains(&self) -> &KnownDomainSet {
        &self.known
    }

    pub fn suspicious_patterns(&self) -> &SuspiciousPatternSet {
        &self.suspicious
    }

    pub fn thresholds(&self) -> &OverrideThresholds {
        &self.thresholds
    }

    pub fn evaluate(&self, raw_url: &str) -> DetectionResult<Evaluation> {
        let parsed: ParsedUrl = url::normalize(raw_url)?;
        let features = features::extract(&parsed, &parsed.normalized);

        let raw_verdict = self.classifier.classify(&features)?;

        let host = url::override_host(&parsed);
        let outcome = apply_overrides(&host, raw_verdict, &self.known, &self.suspicious, &self.thresholds);

        if let Some(rule) = &outcome.rule {
            if outcome.verdict != raw_verdict {
                log::warn!(
                    "Override {} -> {} for {}: {}",
                    raw_verdict,
                    outcome.verdict,
                    host,
                    rule.describe()
                );
            }
        }
        log::debug!(
            "Evaluated {} raw={} final={} features={}",
            parsed.normalized,
            raw_verdict,
            outcome.verdict,
            features.to_log_entry()
        );

        Ok(Evaluation {
            id: Uuid::new_v4(),
            url: parsed.normalized,
            host,
            final_verdict: outcome.verdict,
            raw_verdict,
            override_rule: outcome.rule,
            features,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
