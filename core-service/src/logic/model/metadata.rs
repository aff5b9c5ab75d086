//! Model sidecar metadata
//!
//! Optional `<model>.json` written by the training pipeline next to the
//! artifact. It declares the feature layout the model was trained on, so a
//! model trained on another column order is rejected at load time instead of
//! silently scoring garbage.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::error::{DetectionError, DetectionResult};
use crate::logic::features::layout::{compute_hash_for, layout_hash, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};

/// Contents of the sidecar file; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSidecar {
    pub model_version: Option<String>,
    pub feature_version: Option<u8>,
    pub feature_names: Option<Vec<String>>,
    /// Score threshold for float outputs
    pub threshold: Option<f32>,
}

impl ModelSidecar {
    pub fn from_file(path: &Path) -> DetectionResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DetectionError::ModelLoad(format!("Failed to read metadata {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> DetectionResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| DetectionError::ModelLoad(format!("Failed to parse metadata: {}", e)))
    }

    /// Declared layout must equal FEATURE_LAYOUT, names and order
    pub fn validate_layout(&self) -> DetectionResult<()> {
        if let Some(version) = self.feature_version {
            if version != FEATURE_VERSION {
                return Err(DetectionError::ModelLoad(format!(
                    "model trained on feature layout v{}, service uses v{}",
                    version, FEATURE_VERSION
                )));
            }
        }

        if let Some(names) = &self.feature_names {
            let version = self.feature_version.unwrap_or(FEATURE_VERSION);
            let declared = compute_hash_for(version, names.iter().map(String::as_str));
            if declared != layout_hash() {
                return Err(DetectionError::ModelLoad(format!(
                    "feature layout mismatch: model expects [{}], service produces [{}]",
                    names.join(", "),
                    FEATURE_LAYOUT.join(", ")
                )));
            }
        }

        if let Some(threshold) = self.threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(DetectionError::ModelLoad(format!(
                    "threshold {} outside [0, 1]",
                    threshold
                )));
            }
        }

        Ok(())
    }
}

/// What was loaded, for status output and logs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub model_version: Option<String>,
    pub sha256: String,
    pub features: usize,
    pub layout_hash: u32,
    pub threshold: f32,
    pub loaded_at: DateTime<Utc>,
}

impl ModelMetadata {
    pub fn new(model_path: &str, sha256: String, sidecar: &ModelSidecar, threshold: f32) -> Self {
        Self {
            model_path: model_path.to_string(),
            model_version: sidecar.model_version.clone(),
            sha256,
            features: FEATURE_COUNT,
            layout_hash: layout_hash(),
            threshold,
            loaded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current_names() -> Vec<String> {
        FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_sidecar_is_valid() {
        let sidecar = ModelSidecar::from_json("{}").unwrap();
        assert_eq!(sidecar, ModelSidecar::default());
        assert!(sidecar.validate_layout().is_ok());
    }

    #[test]
    fn test_matching_layout() {
        let sidecar = ModelSidecar {
            feature_version: Some(FEATURE_VERSION),
            feature_names: Some(current_names()),
            threshold: Some(0.5),
            ..Default::default()
        };
        assert!(sidecar.validate_layout().is_ok());
    }

    #[test]
    fn test_reordered_layout_rejected() {
        let mut names = current_names();
        names.swap(0, 1);
        let sidecar = ModelSidecar {
            feature_names: Some(names),
            ..Default::default()
        };
        assert!(matches!(sidecar.validate_layout(), Err(DetectionError::ModelLoad(_))));
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let sidecar = ModelSidecar {
            feature_version: Some(FEATURE_VERSION + 1),
            ..Default::default()
        };
        assert!(sidecar.validate_layout().is_err());
    }

    #[test]
    fn test_threshold_range() {
        let sidecar = ModelSidecar {
            threshold: Some(1.5),
            ..Default::default()
        };
        assert!(sidecar.validate_layout().is_err());
    }

    #[test]
    fn test_parse_full_sidecar() {
        let json = r#"{
            "model_version": "2024.06-rf",
            "feature_version": 1,
            "feature_names": ["length","num_dots","has_https","has_at","has_dash","num_digits",
                              "has_ip","num_subdirs","hostname_length","path_length","num_dots_domain"],
            "threshold": 0.6
        }"#;
        let sidecar = ModelSidecar::from_json(json).unwrap();
        assert_eq!(sidecar.model_version.as_deref(), Some("2024.06-rf"));
        assert!(sidecar.validate_layout().is_ok());
    }

    #[test]
    fn test_malformed_sidecar() {
        assert!(matches!(ModelSidecar::from_json("{"), Err(DetectionError::ModelLoad(_))));
    }
}
