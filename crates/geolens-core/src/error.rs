//! Typed errors for loading crawl results and configuration.
//!
//! The engine itself never fails; these only surface at the input boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    /// Input document is not valid JSON or has the wrong shape
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration parsed but holds unusable values
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

pub type Result<T> = std::result::Result<T, AuditError>;
