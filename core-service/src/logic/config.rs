//! Detector Configuration
//!
//! Loaded once at startup: JSON file (optional) → environment overrides →
//! validation. Everything has a default so an empty file is a valid config.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{self, DEFAULT_MODEL_PATH, DEFAULT_SCORE_THRESHOLD, DEFAULT_SIMILARITY_THRESHOLD};
use crate::logic::error::{DetectionError, DetectionResult};
use crate::logic::threat::{
    KnownDomainSet, OverrideThresholds, SuspiciousPatternSet, DEFAULT_KNOWN_DOMAINS,
    DEFAULT_SUSPICIOUS_PATTERNS,
};

// ============================================================================
// MODEL CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// ONNX artifact
    pub path: String,
    /// Expected SHA-256 (hex) of the artifact
    pub sha256: Option<String>,
    /// Sidecar metadata; defaults to `<model>.json` when present
    pub metadata_path: Option<String>,
    /// Used for float outputs when the sidecar has no threshold
    pub score_threshold: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_MODEL_PATH.to_string(),
            sha256: None,
            metadata_path: None,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
        }
    }
}

// ============================================================================
// DETECTOR CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub model: ModelConfig,
    /// Typo-squat similarity ratio must be strictly above this
    pub similarity_threshold: f64,
    pub known_domains: Vec<String>,
    pub suspicious_patterns: Vec<String>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            known_domains: DEFAULT_KNOWN_DOMAINS.iter().map(|s| s.to_string()).collect(),
            suspicious_patterns: DEFAULT_SUSPICIOUS_PATTERNS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl DetectorConfig {
    /// Explicit path, then `PHISHGUARD_CONFIG`, then the user config dir;
    /// defaults when none exists. Environment overrides are applied last.
    pub fn load(explicit: Option<&Path>) -> DetectionResult<Self> {
        let from_env = constants::get_config_path().map(PathBuf::from);

        let mut config = match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::from_file(&path)?,
            None => match constants::default_config_file().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    log::info!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> DetectionResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DetectionError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_json(&content)?;
        log::info!("Configuration loaded from: {}", path.display());
        Ok(config)
    }

    pub fn from_json(content: &str) -> DetectionResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| DetectionError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn apply_env_overrides(&mut self) {
        if let Some(path) = constants::get_model_path() {
            self.model.path = path;
        }
        if let Some(sha256) = constants::get_model_sha256() {
            self.model.sha256 = Some(sha256);
        }
        if let Some(threshold) = constants::get_similarity_threshold() {
            self.similarity_threshold = threshold;
        }
    }

    pub fn validate(&self) -> DetectionResult<()> {
        if self.model.path.trim().is_empty() {
            return Err(DetectionError::Config("model.path is empty".to_string()));
        }
        if !(self.similarity_threshold > 0.0 && self.similarity_threshold <= 1.0) {
            return Err(DetectionError::Config(format!(
                "similarity_threshold {} outside (0, 1]",
                self.similarity_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.model.score_threshold) {
            return Err(DetectionError::Config(format!(
                "model.score_threshold {} outside [0, 1]",
                self.model.score_threshold
            )));
        }
        Ok(())
    }

    pub fn known_domain_set(&self) -> KnownDomainSet {
        KnownDomainSet::new(&self.known_domains)
    }

    pub fn suspicious_pattern_set(&self) -> SuspiciousPatternSet {
        SuspiciousPatternSet::new(&self.suspicious_patterns)
    }

    pub fn override_thresholds(&self) -> OverrideThresholds {
        OverrideThresholds {
            similarity: self.similarity_threshold,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DetectorConfig::default();
        assert_eq!(config.similarity_threshold, 0.8);
        assert_eq!(config.model.path, DEFAULT_MODEL_PATH);
        assert!(config.known_domains.iter().any(|d| d == "paypal.com"));
        assert_eq!(config.suspicious_patterns.len(), 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(DetectorConfig::from_json("{}").unwrap(), DetectorConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config = DetectorConfig::from_json(
            r#"{"model": {"path": "/srv/model.onnx"}, "known_domains": ["Example.com"]}"#,
        )
        .unwrap();
        assert_eq!(config.model.path, "/srv/model.onnx");
        assert_eq!(config.model.score_threshold, DEFAULT_SCORE_THRESHOLD);
        assert!(config.known_domain_set().contains("example.com"));
        assert_eq!(config.known_domain_set().len(), 1);
        assert_eq!(config.suspicious_pattern_set().len(), 7);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(DetectorConfig::from_json("[1,"), Err(DetectionError::Config(_))));
    }

    #[test]
    fn test_validate_thresholds() {
        let mut config = DetectorConfig::default();
        config.similarity_threshold = 0.0;
        assert!(config.validate().is_err());
        config.similarity_threshold = 1.2;
        assert!(config.validate().is_err());
        config.similarity_threshold = 1.0;
        assert!(config.validate().is_ok());

        config.model.score_threshold = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_model_path() {
        let mut config = DetectorConfig::default();
        config.model.path = "  ".to_string();
        assert!(matches!(config.validate(), Err(DetectionError::Config(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"similarity_threshold": 0.9}"#).unwrap();

        let config = DetectorConfig::from_file(&path).unwrap();
        assert_eq!(config.override_thresholds().similarity, 0.9);

        assert!(matches!(
            DetectorConfig::from_file(&dir.path().join("missing.json")),
            Err(DetectionError::Config(_))
        ));
    }
}
