//! Error taxonomy for the library

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsaError {
    /// A commitment is missing required data or carries domain-invalid values.
    /// Surfaced to the caller, never silently defaulted.
    #[error("invalid commitment: {reason}")]
    InvalidCommitment { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not parse {input:?} as a decimal amount")]
    ParseAmount { input: String },

    #[error("could not parse {input:?} as a date (expected YYYY-MM-DD)")]
    ParseDate { input: String },
}

pub type Result<T> = std::result::Result<T, CsaError>;
