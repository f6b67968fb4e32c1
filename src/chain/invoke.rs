//! Named-method calls against a deployed contract.
//!
//! Two explicit operations instead of one mixed path: `submit_transaction`
//! signs, broadcasts, and waits for inclusion; `query` is a synchronous
//! read with no confirmation semantics. The caller picks one per verb from
//! the static table; nothing is inferred from the interface description.

use alloy::dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy::json_abi::{Function, JsonAbi};
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;

use crate::chain::client::ChainClient;
use crate::chain::signer::RoleSigner;
use crate::chain::types::{ChainError, ChainResult};

/// Confirmation semantics of a verb, fixed in the static table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// State mutation; signed, broadcast, awaited to inclusion.
    Transaction,
    /// Read-only call; no transaction, no confirmation.
    Query,
}

/// Result of a confirmed state-mutating call.
#[derive(Debug, Clone)]
pub struct CallOutcome {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

fn function<'a>(abi: &'a JsonAbi, method: &str) -> ChainResult<&'a Function> {
    abi.function(method)
        .and_then(|overloads| overloads.first())
        .ok_or_else(|| {
            ChainError::InterfaceMismatch(format!(
                "method '{}' not present in contract interface",
                method
            ))
        })
}

/// Encode a call to `method` with the given arguments.
pub fn encode_call(abi: &JsonAbi, method: &str, args: &[DynSolValue]) -> ChainResult<Bytes> {
    let function = function(abi, method)?;
    let data = function.abi_encode_input(args).map_err(|e| {
        ChainError::InterfaceMismatch(format!("encoding '{}': {}", method, e))
    })?;
    Ok(data.into())
}

/// Sign and submit a state-mutating call, awaiting inclusion.
pub async fn submit_transaction(
    client: &ChainClient,
    signer: &RoleSigner,
    contract: Address,
    abi: &JsonAbi,
    method: &str,
    args: &[DynSolValue],
) -> ChainResult<CallOutcome> {
    let data = encode_call(abi, method, args)?;

    let tx = TransactionRequest::default()
        .with_from(signer.address())
        .with_to(contract)
        .with_input(data);

    let provider = client.with_signer(signer);
    let pending = provider
        .send_transaction(tx)
        .await
        .map_err(|e| ChainError::Submit(e.to_string()))?;

    tracing::info!(
        method = %method,
        contract = %contract,
        tx_hash = %pending.tx_hash(),
        from = %signer.address(),
        "Call submitted"
    );

    let receipt = pending
        .get_receipt()
        .await
        .map_err(|e| ChainError::Submit(format!("awaiting inclusion: {}", e)))?;

    if !receipt.status() {
        return Err(ChainError::Submit(format!("'{}' reverted on-chain", method)));
    }

    Ok(CallOutcome {
        tx_hash: receipt.transaction_hash,
        block_number: receipt.block_number,
    })
}

/// Issue a read-only call and decode the return values.
pub async fn query(
    client: &ChainClient,
    from: Address,
    contract: Address,
    abi: &JsonAbi,
    method: &str,
    args: &[DynSolValue],
) -> ChainResult<Vec<DynSolValue>> {
    let function = function(abi, method)?;
    let data: Bytes = function
        .abi_encode_input(args)
        .map_err(|e| ChainError::InterfaceMismatch(format!("encoding '{}': {}", method, e)))?
        .into();

    let tx = TransactionRequest::default()
        .with_from(from)
        .with_to(contract)
        .with_input(data);

    let raw = client
        .provider()
        .call(tx)
        .await
        .map_err(|e| ChainError::Submit(format!("'{}' call: {}", method, e)))?;

    function.abi_decode_output(&raw).map_err(|e| {
        ChainError::InterfaceMismatch(format!("decoding '{}' output: {}", method, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;

    fn role_abi() -> JsonAbi {
        serde_json::from_str(
            r#"[
                {
                    "type": "function",
                    "name": "addFarmer",
                    "inputs": [{ "name": "farmer", "type": "address" }],
                    "outputs": [],
                    "stateMutability": "nonpayable"
                },
                {
                    "type": "function",
                    "name": "createBatch",
                    "inputs": [
                        { "name": "weight", "type": "uint256" },
                        { "name": "expireDate", "type": "uint256" },
                        { "name": "transporter", "type": "address" }
                    ],
                    "outputs": [{ "name": "counter", "type": "uint256" }],
                    "stateMutability": "nonpayable"
                }
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_encode_prepends_selector() {
        let abi = role_abi();
        let farmer: Address = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
            .parse()
            .unwrap();
        let data = encode_call(&abi, "addFarmer", &[DynSolValue::Address(farmer)]).unwrap();

        let function = abi.function("addFarmer").unwrap().first().unwrap();
        assert_eq!(&data[..4], function.selector().as_slice());
        // selector + one 32-byte word
        assert_eq!(data.len(), 4 + 32);
    }

    #[test]
    fn test_encode_unknown_method() {
        let abi = role_abi();
        let err = encode_call(&abi, "addBroker", &[]).unwrap_err();
        assert!(matches!(err, ChainError::InterfaceMismatch(_)));
        assert!(err.to_string().contains("addBroker"));
    }

    #[test]
    fn test_encode_wrong_arity() {
        let abi = role_abi();
        let err = encode_call(
            &abi,
            "createBatch",
            &[DynSolValue::Uint(U256::from(100u64), 256)],
        )
        .unwrap_err();
        assert!(matches!(err, ChainError::InterfaceMismatch(_)));
    }
}
