//! Driver for the external `solc` compiler over its standard-JSON interface.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use alloy::json_abi::JsonAbi;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::artifact::ContractArtifact;
use crate::compiler::imports;

/// Errors from the compile step.
#[derive(Debug, Error)]
pub enum CompileError {
    /// Contract source could not be read.
    #[error("cannot read contract source {path}: {source}")]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The `solc` process could not be run.
    #[error("cannot run solc: {0}")]
    Toolchain(String),

    /// The compiler reported error-severity diagnostics (already logged).
    #[error("solc reported {count} error(s)")]
    Diagnostics { count: usize },

    /// Compiler output did not have the expected shape.
    #[error("malformed compiler output: {0}")]
    MalformedOutput(String),

    /// Output carried no entry for a requested contract.
    #[error("compiler produced no output for contract '{0}'")]
    MissingOutput(String),
}

#[derive(Debug, Serialize)]
struct StandardJsonInput {
    language: &'static str,
    sources: BTreeMap<String, SourceContent>,
    settings: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct SourceContent {
    content: String,
}

#[derive(Debug, Deserialize)]
struct StandardJsonOutput {
    #[serde(default)]
    errors: Vec<Diagnostic>,
    /// Grouped by source unit, then by contract name within the unit.
    #[serde(default)]
    contracts: BTreeMap<String, BTreeMap<String, ContractOutput>>,
}

#[derive(Debug, Deserialize)]
struct Diagnostic {
    severity: String,
    message: String,
    #[serde(rename = "formattedMessage")]
    formatted_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContractOutput {
    abi: JsonAbi,
    evm: EvmOutput,
}

#[derive(Debug, Deserialize)]
struct EvmOutput {
    bytecode: BytecodeOutput,
}

#[derive(Debug, Deserialize)]
struct BytecodeOutput {
    object: String,
}

fn run_solc(input: &StandardJsonInput) -> Result<StandardJsonOutput, CompileError> {
    let payload = serde_json::to_vec(input)
        .map_err(|e| CompileError::Toolchain(format!("building input: {}", e)))?;

    let mut child = Command::new("solc")
        .arg("--standard-json")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| CompileError::Toolchain(format!("cannot launch solc: {}", e)))?;

    let Some(mut stdin) = child.stdin.take() else {
        return Err(CompileError::Toolchain("solc stdin not piped".to_string()));
    };
    stdin
        .write_all(&payload)
        .map_err(|e| CompileError::Toolchain(format!("writing input: {}", e)))?;
    drop(stdin);

    let output = child
        .wait_with_output()
        .map_err(|e| CompileError::Toolchain(e.to_string()))?;
    if !output.status.success() {
        return Err(CompileError::Toolchain(format!(
            "solc exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        )));
    }

    serde_json::from_slice(&output.stdout)
        .map_err(|e| CompileError::MalformedOutput(e.to_string()))
}

/// Compile the named contracts from `contracts_dir`, resolving imports
/// against `lib_dir`.
///
/// Diagnostics are logged verbatim; any error-severity diagnostic fails the
/// compile. On success every requested name has an artifact.
pub fn compile(
    names: &[String],
    contracts_dir: &Path,
    lib_dir: &Path,
) -> Result<BTreeMap<String, ContractArtifact>, CompileError> {
    let sources = imports::collect_sources(names, contracts_dir, lib_dir)
        .map_err(|(path, source)| CompileError::Source { path, source })?;

    let input = StandardJsonInput {
        language: "Solidity",
        sources: sources
            .into_iter()
            .map(|(unit, content)| (unit, SourceContent { content }))
            .collect(),
        settings: serde_json::json!({
            "outputSelection": { "*": { "*": ["abi", "evm.bytecode.object"] } }
        }),
    };

    let output = run_solc(&input)?;
    let artifacts = extract(output, names)?;
    tracing::info!(contracts = names.len(), "Contracts compiled");
    Ok(artifacts)
}

fn extract(
    output: StandardJsonOutput,
    names: &[String],
) -> Result<BTreeMap<String, ContractArtifact>, CompileError> {
    let mut error_count = 0usize;
    for diagnostic in &output.errors {
        let message = diagnostic
            .formatted_message
            .as_deref()
            .unwrap_or(&diagnostic.message);
        if diagnostic.severity == "error" {
            error_count += 1;
            tracing::error!("{}", message.trim_end());
        } else {
            tracing::warn!("{}", message.trim_end());
        }
    }
    if error_count > 0 {
        return Err(CompileError::Diagnostics { count: error_count });
    }

    let mut artifacts = BTreeMap::new();
    for name in names {
        // Source units are keyed by contract name, so the output sits at
        // [name][name] in solc's unit-then-contract grouping.
        let contract = output
            .contracts
            .get(name)
            .and_then(|unit| unit.get(name))
            .ok_or_else(|| CompileError::MissingOutput(name.clone()))?;

        let bytecode = alloy::hex::decode(&contract.evm.bytecode.object).map_err(|e| {
            CompileError::MalformedOutput(format!("bytecode for '{}': {}", name, e))
        })?;

        artifacts.insert(
            name.clone(),
            ContractArtifact {
                contract: name.clone(),
                abi: contract.abi.clone(),
                bytecode: bytecode.into(),
            },
        );
    }
    Ok(artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTPUT: &str = r#"{
        "errors": [
            {
                "severity": "warning",
                "message": "SPDX license identifier not provided",
                "formattedMessage": "Warning: SPDX license identifier not provided"
            }
        ],
        "contracts": {
            "MyToken": {
                "MyToken": {
                    "abi": [
                        {
                            "type": "function",
                            "name": "addFarmer",
                            "inputs": [{ "name": "farmer", "type": "address" }],
                            "outputs": [],
                            "stateMutability": "nonpayable"
                        }
                    ],
                    "evm": { "bytecode": { "object": "6080604052" } }
                }
            }
        }
    }"#;

    #[test]
    fn test_extract_requested_contract() {
        let output: StandardJsonOutput = serde_json::from_str(OUTPUT).unwrap();
        let artifacts = extract(output, &["MyToken".to_string()]).unwrap();

        let artifact = &artifacts["MyToken"];
        assert_eq!(artifact.contract, "MyToken");
        assert_eq!(
            artifact.bytecode,
            alloy::primitives::Bytes::from(vec![0x60, 0x80, 0x60, 0x40, 0x52])
        );
        assert!(artifact.abi.function("addFarmer").is_some());
    }

    #[test]
    fn test_error_diagnostics_fail_compile() {
        let output: StandardJsonOutput = serde_json::from_str(
            r#"{
                "errors": [
                    { "severity": "error", "message": "ParserError: expected ';'" },
                    { "severity": "error", "message": "DeclarationError: undefined" }
                ],
                "contracts": {}
            }"#,
        )
        .unwrap();
        let err = extract(output, &["MyToken".to_string()]).unwrap_err();
        assert!(matches!(err, CompileError::Diagnostics { count: 2 }));
    }

    #[test]
    fn test_missing_contract_in_output() {
        let output: StandardJsonOutput = serde_json::from_str(OUTPUT).unwrap();
        let err = extract(output, &["Other".to_string()]).unwrap_err();
        assert!(matches!(err, CompileError::MissingOutput(name) if name == "Other"));
    }

    #[test]
    fn test_bad_bytecode_hex() {
        let output: StandardJsonOutput = serde_json::from_str(
            r#"{
                "contracts": {
                    "MyToken": {
                        "MyToken": {
                            "abi": [],
                            "evm": { "bytecode": { "object": "zz" } }
                        }
                    }
                }
            }"#,
        )
        .unwrap();
        let err = extract(output, &["MyToken".to_string()]).unwrap_err();
        assert!(matches!(err, CompileError::MalformedOutput(_)));
    }
}
