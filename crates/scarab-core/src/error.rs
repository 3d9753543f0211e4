//! Error taxonomy for the scarab protocol
//!
//! A closed set of rejection kinds. Every contract-layer error rejects the
//! instruction outright: nothing is partially applied, and no error here
//! is retryable by the core itself.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScarabError>;

#[derive(Debug, Error)]
pub enum ScarabError {
    /// A spawn instruction is missing its record argument, or it is empty.
    #[error("need a non-empty '{0}' argument")]
    MissingArgument(&'static str),

    /// A record argument failed to decode.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// The write correctness proof did not verify, or its policy binding
    /// does not match the policy the instruction executed under.
    #[error("proof of write failed: {0}")]
    ProofInvalid(String),

    /// Not a spawn instruction, or the named contract is not recognized.
    #[error("unsupported contract or instruction: {0}")]
    UnsupportedContract(String),

    /// The read's write reference resolved to nothing, or to an instance
    /// that is not a write.
    #[error("referenced write instance is not valid: {0}")]
    BadWriteReference(String),

    /// The read grant does not match the write instance it was presented
    /// against. Definitive denial; never retried with the same inputs.
    #[error("read grant does not authorize this write instance")]
    Unauthorized,

    /// The crypto primitive layer failed.
    #[error("crypto failure: {0}")]
    CryptoFailure(String),
}

impl From<scarab_ocs::OcsError> for ScarabError {
    fn from(err: scarab_ocs::OcsError) -> Self {
        ScarabError::CryptoFailure(err.to_string())
    }
}
