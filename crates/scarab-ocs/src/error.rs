//! Error types for the OCS primitives

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OcsError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OcsError {
    #[error("invalid threshold {threshold} for {nodes} nodes")]
    InvalidThreshold { threshold: u32, nodes: u32 },

    #[error("not enough re-encryption shares: got {got}, need {need}")]
    NotEnoughShares { got: usize, need: usize },

    #[error("duplicate share index {0}")]
    DuplicateIndex(u32),

    #[error("share index must be greater than zero")]
    InvalidIndex,

    #[error("invalid compressed point")]
    InvalidPoint,
}
