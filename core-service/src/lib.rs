//! PhishGuard Core
//!
//! Classifies URLs as phishing or legitimate: an ONNX classifier scores an
//! 11-feature vector derived from the URL string, then a deterministic rule
//! layer corrects typo-squats and allowlisted domains.

pub mod api;
pub mod constants;
pub mod logic;

pub use logic::error::{DetectionError, DetectionResult};
pub use logic::pipeline::{Detector, Evaluation};
pub use logic::threat::Verdict;
