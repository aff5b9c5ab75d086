//! Model artifact checksum
//!
//! The artifact is produced by a separate training pipeline; pinning its
//! SHA-256 in config ties the service to one exact model version.

use sha2::{Digest, Sha256};

use crate::logic::error::{DetectionError, DetectionResult};

/// Lowercase hex SHA-256 of the artifact bytes
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Compare against an expected hex digest (case-insensitive, surrounding whitespace ignored)
pub fn verify_checksum(bytes: &[u8], expected: &str) -> DetectionResult<String> {
    let expected = expected.trim().to_ascii_lowercase();
    if expected.len() != 64 || hex::decode(&expected).is_err() {
        return Err(DetectionError::ModelLoad(format!(
            "expected checksum '{}' is not a SHA-256 hex digest",
            expected
        )));
    }

    let actual = sha256_hex(bytes);
    if actual != expected {
        return Err(DetectionError::ModelLoad(format!(
            "checksum mismatch: expected {}, got {}",
            expected, actual
        )));
    }

    Ok(actual)
}
