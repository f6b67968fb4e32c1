//! Persisted contract artifacts.
//!
//! One JSON file per contract at `<buildDir>/<contract>.json`, written at
//! deploy time and read by every later invocation that needs the interface.
//!
//! Format v1 is flat and versioned:
//! `{ "format": 1, "contract": "...", "abi": [...], "bytecode": "0x..." }`.
//! This breaks with the legacy layout that nested the full multi-contract
//! compiler output under the contract name twice; legacy files are rejected
//! with a message telling the operator to recompile.

use std::fs;
use std::path::{Path, PathBuf};

use alloy::json_abi::JsonAbi;
use alloy::primitives::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current artifact file format version.
pub const ARTIFACT_FORMAT: u32 = 1;

/// Errors reading or writing artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Artifact file absent; the contract was never compiled here.
    #[error("artifact not found at {path}: {source}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exists but is not a readable v1 artifact.
    #[error("malformed artifact {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    /// Artifact could not be written.
    #[error("cannot write artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Compiled output for one contract: interface description plus bytecode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractArtifact {
    pub contract: String,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
}

#[derive(Serialize, Deserialize)]
struct ArtifactFile {
    format: u32,
    #[serde(flatten)]
    artifact: ContractArtifact,
}

fn artifact_path(contract: &str, build_dir: &Path) -> PathBuf {
    build_dir.join(format!("{}.json", contract))
}

impl ContractArtifact {
    /// Write the artifact as `<buildDir>/<contract>.json`, creating the
    /// build directory if needed. Returns the written path.
    pub fn persist(&self, build_dir: &Path) -> Result<PathBuf, ArtifactError> {
        fs::create_dir_all(build_dir).map_err(|e| ArtifactError::Io {
            path: build_dir.to_path_buf(),
            source: e,
        })?;

        let path = artifact_path(&self.contract, build_dir);
        let file = ArtifactFile {
            format: ARTIFACT_FORMAT,
            artifact: self.clone(),
        };
        let json = serde_json::to_string_pretty(&file).map_err(|e| ArtifactError::Malformed {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        fs::write(&path, json).map_err(|e| ArtifactError::Io {
            path: path.clone(),
            source: e,
        })?;

        tracing::info!(contract = %self.contract, path = %path.display(), "Artifact written");
        Ok(path)
    }

    /// Load a previously persisted artifact by contract name.
    pub fn load(contract: &str, build_dir: &Path) -> Result<Self, ArtifactError> {
        let path = artifact_path(contract, build_dir);
        let raw = fs::read_to_string(&path).map_err(|e| ArtifactError::NotFound {
            path: path.clone(),
            source: e,
        })?;

        let file: ArtifactFile =
            serde_json::from_str(&raw).map_err(|e| ArtifactError::Malformed {
                path: path.clone(),
                reason: format!(
                    "{} (legacy nested artifacts are not readable; recompile with deploy)",
                    e
                ),
            })?;
        if file.format != ARTIFACT_FORMAT {
            return Err(ArtifactError::Malformed {
                path,
                reason: format!(
                    "unsupported artifact format {} (expected {})",
                    file.format, ARTIFACT_FORMAT
                ),
            });
        }

        Ok(file.artifact)
    }

    /// Load only the interface description for a contract.
    pub fn load_abi(contract: &str, build_dir: &Path) -> Result<JsonAbi, ArtifactError> {
        Ok(Self::load(contract, build_dir)?.abi)
    }
}
