//! Error types for the service layer

use thiserror::Error;

use scarab_core::InstanceId;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Contract-layer rejection
    #[error("contract error: {0}")]
    Contract(#[from] scarab_core::ScarabError),

    /// Crypto primitive error
    #[error("ocs error: {0}")]
    Ocs(#[from] scarab_ocs::OcsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The host refuses to commit the same instance twice
    #[error("instance {} already exists", .0.to_hex())]
    DuplicateInstance(InstanceId),

    /// Setup request names an unusable node set or threshold
    #[error("invalid LTS setup request: {0}")]
    Setup(String),
}
