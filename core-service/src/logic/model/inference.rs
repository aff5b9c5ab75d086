//! Inference Engine - ONNX Runtime Integration
//!
//! Loads the trained URL classifier (exported to ONNX by the training
//! pipeline) once at startup and scores one feature row per request.
//!
//! Accepted model outputs (first output only):
//! - integer label tensor: 0 = legitimate, 1 = phishing
//! - float tensor: a single score, or `[p_legit, p_phishing]`, compared
//!   against the threshold

use std::path::{Path, PathBuf};
use std::time::Instant;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use parking_lot::Mutex;

use super::checksum::{sha256_hex, verify_checksum};
use super::classifier::{ClassifierInfo, UrlClassifier};
use super::metadata::{ModelMetadata, ModelSidecar};
use crate::logic::config::ModelConfig;
use crate::logic::error::{DetectionError, DetectionResult};
use crate::logic::features::{FeatureVector, FEATURE_COUNT};
use crate::logic::threat::Verdict;

// ============================================================================
// ONNX CLASSIFIER
// ============================================================================

pub struct OnnxClassifier {
    /// Running a session needs exclusive access
    session: Mutex<Session>,
    metadata: ModelMetadata,
}

impl OnnxClassifier {
    /// Read, verify and load the artifact. Every failure is `ModelLoad`.
    pub fn load(config: &ModelConfig) -> DetectionResult<Self> {
        let model_path = Path::new(&config.path);
        log::info!("Loading ONNX model from: {}", model_path.display());

        let bytes = read_artifact(model_path)?;

        let sha256 = match config.sha256.as_deref() {
            Some(expected) => verify_checksum(&bytes, expected)?,
            None => {
                log::warn!("No model checksum configured, skipping verification");
                sha256_hex(&bytes)
            }
        };

        let sidecar = load_sidecar(config)?;
        sidecar.validate_layout()?;
        let threshold = sidecar.threshold.unwrap_or(config.score_threshold);

        let session = Session::builder()
            .map_err(|e| DetectionError::ModelLoad(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| DetectionError::ModelLoad(format!("Failed to set optimization: {}", e)))?
            .commit_from_memory(&bytes)
            .map_err(|e| DetectionError::ModelLoad(format!("Failed to load model: {}", e)))?;

        let metadata = ModelMetadata::new(&config.path, sha256, &sidecar, threshold);
        log::info!(
            "ONNX model loaded (sha256 {}, version {}, threshold {})",
            &metadata.sha256[..12],
            metadata.model_version.as_deref().unwrap_or("unknown"),
            metadata.threshold
        );

        Ok(Self {
            session: Mutex::new(session),
            metadata,
        })
    }

    fn run(&self, features: &FeatureVector) -> DetectionResult<Verdict> {
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), features.to_model_input().to_vec())
            .map_err(|e| DetectionError::Inference(format!("Failed to create array: {}", e)))?;

        let input_tensor = Tensor::from_array(input_array)
            .map_err(|e| DetectionError::Inference(format!("Failed to create tensor: {}", e)))?;

        let mut session = self.session.lock();

        // Get output name BEFORE run to avoid borrow conflict
        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| DetectionError::Inference("No output defined".to_string()))?;

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| DetectionError::Inference(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(&output_name)
            .ok_or_else(|| DetectionError::Inference("No output from model".to_string()))?;

        if let Ok(labels) = output.try_extract_tensor::<i64>() {
            let label = labels
                .1
                .first()
                .copied()
                .ok_or_else(|| DetectionError::Inference("Empty label output".to_string()))?;
            return Verdict::from_label(label)
                .ok_or_else(|| DetectionError::Inference(format!("Unexpected label {}", label)));
        }

        let scores = output
            .try_extract_tensor::<f32>()
            .map_err(|e| DetectionError::Inference(format!("Failed to extract output: {}", e)))?;
        score_to_verdict(scores.1, self.metadata.threshold)
    }
}

impl UrlClassifier for OnnxClassifier {
    fn classify(&self, features: &FeatureVector) -> DetectionResult<Verdict> {
        features
            .validate()
            .map_err(|e| DetectionError::Inference(e.to_string()))?;

        let start_time = Instant::now();
        let verdict = self.run(features)?;
        log::debug!(
            "ONNX verdict {} in {}us",
            verdict,
            start_time.elapsed().as_micros()
        );
        Ok(verdict)
    }

    fn describe(&self) -> ClassifierInfo {
        ClassifierInfo {
            kind: "onnx".to_string(),
            name: self.metadata.model_path.clone(),
            version: self.metadata.model_version.clone(),
        }
    }

    fn metadata(&self) -> Option<&ModelMetadata> {
        Some(&self.metadata)
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn read_artifact(model_path: &Path) -> DetectionResult<Vec<u8>> {
    if !model_path.exists() {
        return Err(DetectionError::ModelLoad(format!(
            "Model not found: {}",
            model_path.display()
        )));
    }

    let bytes = std::fs::read(model_path).map_err(|e| {
        DetectionError::ModelLoad(format!("Failed to read {}: {}", model_path.display(), e))
    })?;

    if bytes.is_empty() {
        return Err(DetectionError::ModelLoad(format!(
            "Model file is empty: {}",
            model_path.display()
        )));
    }

    Ok(bytes)
}

/// Explicit sidecar must exist; the implicit `<model>.json` is optional
fn load_sidecar(config: &ModelConfig) -> DetectionResult<ModelSidecar> {
    if let Some(path) = &config.metadata_path {
        return ModelSidecar::from_file(Path::new(path));
    }

    let implicit = default_sidecar_path(Path::new(&config.path));
    if implicit.exists() {
        log::info!("Model metadata loaded from: {}", implicit.display());
        ModelSidecar::from_file(&implicit)
    } else {
        log::info!("No model metadata next to the artifact, using defaults");
        Ok(ModelSidecar::default())
    }
}

pub fn default_sidecar_path(model_path: &Path) -> PathBuf {
    model_path.with_extension("json")
}

/// Single score, or class probabilities where index 1 is phishing
fn score_to_verdict(scores: &[f32], threshold: f32) -> DetectionResult<Verdict> {
    let score = match scores {
        [] => return Err(DetectionError::Inference("Empty score output".to_string())),
        [score] => *score,
        [_, phishing, ..] => *phishing,
    };

    if !score.is_finite() {
        return Err(DetectionError::Inference(format!("Non-finite score {}", score)));
    }

    Ok(if score >= threshold {
        Verdict::Phishing
    } else {
        Verdict::Legitimate
    })
}

// ============================================================================
// TESTS
// ============================================================================
