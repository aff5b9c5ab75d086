//! Error handling
//!
//! One error kind per pipeline stage so each failure mode is testable alone.

use thiserror::Error;

pub type DetectionResult<T> = Result<T, DetectionError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectionError {
    /// Input does not start with `http` after slash repair, or has another scheme
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Model artifact missing, corrupt or incompatible (fatal at startup)
    #[error("Model load failed: {0}")]
    ModelLoad(String),

    /// Authority or path defeats parsing
    #[error("Feature extraction failed: {0}")]
    Extraction(String),

    /// Classifier could not produce a verdict for this request
    #[error("Inference failed: {0}")]
    Inference(String),

    /// Configuration file unreadable or invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DetectionError {
    /// Errors scoped to a single request; the process keeps serving
    pub fn is_request_scoped(&self) -> bool {
        matches!(
            self,
            DetectionError::InvalidUrl(_) | DetectionError::Extraction(_) | DetectionError::Inference(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_scoped_errors() {
        assert!(DetectionError::InvalidUrl("x".into()).is_request_scoped());
        assert!(DetectionError::Extraction("x".into()).is_request_scoped());
        assert!(DetectionError::Inference("x".into()).is_request_scoped());
        assert!(!DetectionError::ModelLoad("x".into()).is_request_scoped());
        assert!(!DetectionError::Config("x".into()).is_request_scoped());
    }

    #[test]
    fn test_display() {
        let err = DetectionError::InvalidUrl("not-a-url".into());
        assert_eq!(err.to_string(), "Invalid URL: not-a-url");
    }
}
