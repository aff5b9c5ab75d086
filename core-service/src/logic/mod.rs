//! Logic Module - Detection Engines
//!
//! - `url/` - URL repair and parsing
//! - `features/` - Feature extraction (versioned 11-feature layout)
//! - `model/` - Classifier adapter (ONNX, fixed)
//! - `threat/` - Rule override engine (typo-squat, allowlist, patterns)
//! - `pipeline` - Wires the stages together

pub mod config;
pub mod error;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod threat;
pub mod url;
