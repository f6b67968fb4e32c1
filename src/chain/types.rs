//! Chain-specific error definitions.

use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Signing identity could not be resolved for a role. No RPC call is
    /// attempted once this is raised.
    #[error("signer unavailable for role '{role}': {reason}")]
    SignerUnavailable { role: String, reason: String },

    /// Gas price or gas limit query failed.
    #[error("fee query failed: {0}")]
    FeeQuery(String),

    /// Transaction broadcast, inclusion, or execution failed.
    #[error("transaction submit failed: {0}")]
    Submit(String),

    /// Loaded interface does not match the requested call.
    #[error("interface mismatch: {0}")]
    InterfaceMismatch(String),
}

/// Result type for ledger operations.
pub type ChainResult<T> = Result<T, ChainError>;
