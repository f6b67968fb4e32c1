//! Top-level error type with the process exit-status contract.
//!
//! Every failure kind maps to a fixed exit code so operators and scripts
//! can branch on the status instead of scraping log text. A ledger call
//! that the contract rejects is not an error here: the dispatcher logs it
//! and the process exits 0.

use thiserror::Error;

use crate::artifact::ArtifactError;
use crate::chain::ChainError;
use crate::compiler::CompileError;
use crate::config::ConfigError;

/// Exit code for argument parse failures, shared with the clap handler.
pub const USAGE_EXIT_CODE: i32 = 1;

/// Any failure that aborts an invocation.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("usage: {0}")]
    Usage(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error("upload failed: {0}")]
    Upload(String),
}

impl CliError {
    /// Deterministic exit code per error kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => USAGE_EXIT_CODE,
            CliError::Config(ConfigError::NotFound { .. }) => 2,
            CliError::Config(_) => 3,
            CliError::Chain(ChainError::SignerUnavailable { .. }) => 4,
            CliError::Compile(_) => 5,
            CliError::Artifact(ArtifactError::NotFound { .. }) => 6,
            CliError::Artifact(_) => 7,
            CliError::Chain(ChainError::InterfaceMismatch(_)) => 7,
            CliError::Chain(ChainError::FeeQuery(_)) => 8,
            CliError::Chain(ChainError::Submit(_)) => 9,
            CliError::Upload(_) => 10,
        }
    }
}
