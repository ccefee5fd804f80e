//! Error types for solana-stake-action

use thiserror::Error;

/// Main error type for stake action operations
#[derive(Debug, Clone, Error)]
pub enum StakeActionError {
    /// Amount is not a finite, positive SOL value
    #[error("Invalid amount parameter: {0}")]
    InvalidAmount(String),
    /// Staker address does not decode to a public key
    #[error("Invalid wallet account: {0}")]
    InvalidAddress(String),
    /// Request body has no `account` field
    #[error("Missing wallet account")]
    MissingAccount,
    /// Request body or query string could not be parsed
    #[error("Invalid request body: {0}")]
    InvalidRequestBody(String),
    /// Service was configured with unusable values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// RPC endpoint unreachable or timed out
    #[error("Solana RPC unavailable: {0}")]
    NetworkUnavailable(String),
    /// RPC endpoint answered with an error
    #[error("Solana RPC error: {0}")]
    Rpc(String),
    /// Transaction assembly or (de)serialization failed
    #[error("Transaction error: {0}")]
    Transaction(String),
}

impl StakeActionError {
    /// Caller-caused errors. These map to HTTP 400 and are never retried.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StakeActionError::InvalidAmount(_)
                | StakeActionError::InvalidAddress(_)
                | StakeActionError::MissingAccount
                | StakeActionError::InvalidRequestBody(_)
        )
    }
}
