//! Error types for the Tierline engine
//!
//! Provides a unified error type and domain-specific error variants. No
//! error in this crate is fatal to a hosting process; all are values
//! returned to the orchestration layer.

use thiserror::Error;

/// Result type alias using TierlineError
pub type Result<T> = std::result::Result<T, TierlineError>;

/// Unified error type for Tierline operations
#[derive(Debug, Error)]
pub enum TierlineError {
    // Scoring errors
    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),

    // Keyed-lookup errors
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    // Activity provider errors
    #[error("Provider error: {0}")]
    Provider(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Score calculation errors
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Wallet not found on the ledger: {0}")]
    WalletUnresolved(String),
}

/// Errors for records that could not be found
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("User not found: {0}")]
    ProfileNotFound(String),

    #[error("Lender not found: {0}")]
    LenderNotFound(String),
}

impl From<serde_json::Error> for TierlineError {
    fn from(err: serde_json::Error) -> Self {
        TierlineError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TierlineError::Lookup(LookupError::ProfileNotFound("GTEST".to_string()));
        assert!(err.to_string().contains("GTEST"));
    }

    #[test]
    fn test_scoring_error_conversion() {
        let err: TierlineError = ScoringError::WalletUnresolved("GABC".to_string()).into();
        assert!(matches!(err, TierlineError::Scoring(_)));
    }
}
