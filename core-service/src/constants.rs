//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Every value can be overridden through the environment or the config file.

/// Default ONNX model artifact location
pub const DEFAULT_MODEL_PATH: &str = "models/phishing_model.onnx";

/// Typo-squat similarity ratio must be strictly above this
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Classifier score at or above which a float output counts as phishing
pub const DEFAULT_SCORE_THRESHOLD: f32 = 0.5;

/// Config file name searched under the user config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "phishguard";

pub const ENV_MODEL_PATH: &str = "PHISHGUARD_MODEL_PATH";
pub const ENV_MODEL_SHA256: &str = "PHISHGUARD_MODEL_SHA256";
pub const ENV_CONFIG_PATH: &str = "PHISHGUARD_CONFIG";
pub const ENV_SIMILARITY_THRESHOLD: &str = "PHISHGUARD_SIMILARITY_THRESHOLD";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get model path from environment, if set
pub fn get_model_path() -> Option<String> {
    std::env::var(ENV_MODEL_PATH).ok().filter(|s| !s.trim().is_empty())
}

/// Get expected model checksum from environment, if set
pub fn get_model_sha256() -> Option<String> {
    std::env::var(ENV_MODEL_SHA256).ok().filter(|s| !s.trim().is_empty())
}

/// Get config file path from environment, if set
pub fn get_config_path() -> Option<String> {
    std::env::var(ENV_CONFIG_PATH).ok().filter(|s| !s.trim().is_empty())
}

/// Get similarity threshold from environment, if set and parseable
pub fn get_similarity_threshold() -> Option<f64> {
    std::env::var(ENV_SIMILARITY_THRESHOLD)
        .ok()
        .and_then(|s| s.trim().parse().ok())
}

/// Default config file location: `<config dir>/phishguard/config.json`
pub fn default_config_file() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE_NAME))
}
