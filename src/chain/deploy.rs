//! Contract deployment orchestration.
//!
//! Linear stage sequence, no branching:
//! build creation tx → estimate fee → submit → await receipt → report address.
//! Each stage failure aborts the rest and surfaces as a `ChainError`; an
//! already-persisted artifact is acceptable residual state for a retry.

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, TxHash};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;

use crate::artifact::ContractArtifact;
use crate::chain::client::ChainClient;
use crate::chain::fees;
use crate::chain::signer::RoleSigner;
use crate::chain::types::{ChainError, ChainResult};

/// Result of a confirmed contract creation.
#[derive(Debug, Clone)]
pub struct DeployOutcome {
    pub address: Address,
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

/// Submit a contract-creation transaction and wait for inclusion.
///
/// Returns only after the creation is mined; the reported address is backed
/// by confirmed code, not just a broadcast.
pub async fn deploy_contract(
    client: &ChainClient,
    signer: &RoleSigner,
    artifact: &ContractArtifact,
    gas_multiplier: u64,
) -> ChainResult<DeployOutcome> {
    let creation = TransactionRequest::default()
        .with_from(signer.address())
        .with_deploy_code(artifact.bytecode.clone());

    let fee = fees::estimate(client.provider(), creation.clone(), gas_multiplier).await?;

    let tx = creation
        .with_gas_price(fee.gas_price)
        .with_gas_limit(fee.padded_gas());

    let provider = client.with_signer(signer);
    let pending = provider
        .send_transaction(tx)
        .await
        .map_err(|e| ChainError::Submit(e.to_string()))?;

    let tx_hash = *pending.tx_hash();
    tracing::info!(
        contract = %artifact.contract,
        tx_hash = %tx_hash,
        from = %signer.address(),
        "Creation transaction submitted"
    );

    let receipt = pending
        .get_receipt()
        .await
        .map_err(|e| ChainError::Submit(format!("awaiting inclusion: {}", e)))?;

    if !receipt.status() {
        return Err(ChainError::Submit(
            "creation transaction reverted".to_string(),
        ));
    }

    let address = receipt.contract_address.ok_or_else(|| {
        ChainError::Submit("receipt carries no contract address".to_string())
    })?;

    Ok(DeployOutcome {
        address,
        tx_hash: receipt.transaction_hash,
        block_number: receipt.block_number,
    })
}
