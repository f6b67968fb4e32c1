//! `deploy`: compile a contract and submit its creation transaction.

use crate::chain::{deploy, ChainClient, RoleSigner};
use crate::cli::Cli;
use crate::compiler::{self, CompileError};
use crate::error::CliError;

/// ResolveSigner → Compile → Persist → submit creation → report address.
///
/// A compiled artifact left on disk by a failed deploy is reused input for
/// the next attempt, not corruption; every stage failure simply aborts.
pub async fn execute(
    client: &ChainClient,
    opts: &Cli,
    signer_role: &str,
    contract_name: &str,
) -> Result<(), CliError> {
    let signer = RoleSigner::resolve(&opts.accounts, signer_role)?;

    let mut artifacts = compiler::compile(
        &[contract_name.to_string()],
        &opts.contracts_dir,
        &opts.lib_dir,
    )?;
    let artifact = artifacts
        .remove(contract_name)
        .ok_or_else(|| CompileError::MissingOutput(contract_name.to_string()))?;
    artifact.persist(&opts.build_dir)?;

    let outcome =
        deploy::deploy_contract(client, &signer, &artifact, opts.gas_multiplier).await?;

    tracing::info!(
        contract = %contract_name,
        address = %outcome.address,
        block = ?outcome.block_number,
        "Deployment confirmed"
    );
    println!("Contract deployed at address: {}", outcome.address);
    Ok(())
}
