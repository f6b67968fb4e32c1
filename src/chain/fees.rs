//! Fee estimation for submitted transactions.
//!
//! The padded gas ceiling is the network-reported estimate scaled by an
//! integer multiplier and rendered as a decimal string, so large values
//! never pass through floating point.

use alloy::providers::{DynProvider, Provider};
use alloy::rpc::types::TransactionRequest;

use crate::chain::types::{ChainError, ChainResult};

/// Historical padding multiplier. The source this tool replaces documented
/// the value as a 25% increase but shipped 10x; the magnitude is kept until
/// product confirms the intent, and is overridable via `--gas-multiplier`.
pub const DEFAULT_GAS_MULTIPLIER: u64 = 10;

/// Fee ceiling for one pending transaction. Computed per submit; never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeEstimate {
    /// Network gas price in wei.
    pub gas_price: u128,
    /// Gas limit reported by the node for this exact transaction.
    pub gas_limit: u64,
    /// Padded limit, `gas_limit * multiplier`, as a decimal string.
    pub padded_limit: String,
}

impl FeeEstimate {
    /// Padded limit as a numeric gas value, saturating at `u64::MAX`.
    pub fn padded_gas(&self) -> u64 {
        self.padded_limit
            .parse::<u128>()
            .map_or(u64::MAX, |v| v.try_into().unwrap_or(u64::MAX))
    }
}

/// Scale a gas limit by the padding multiplier.
///
/// Integer product, so the ceiling is exact; the decimal-string form is the
/// value callers log and compare.
pub fn pad_gas_limit(gas_limit: u64, multiplier: u64) -> String {
    (gas_limit as u128 * multiplier as u128).to_string()
}

/// Query the node for the current gas price and a limit estimate scoped to
/// `tx`, then apply the padding multiplier.
///
/// No retries; a transient RPC failure aborts the enclosing deployment.
pub async fn estimate(
    provider: &DynProvider,
    tx: TransactionRequest,
    multiplier: u64,
) -> ChainResult<FeeEstimate> {
    let gas_price = provider
        .get_gas_price()
        .await
        .map_err(|e| ChainError::FeeQuery(format!("gas price: {}", e)))?;

    let gas_limit = provider
        .estimate_gas(tx)
        .await
        .map_err(|e| ChainError::FeeQuery(format!("gas limit: {}", e)))?;

    let padded_limit = pad_gas_limit(gas_limit, multiplier);
    tracing::info!(
        gas_price,
        gas_limit,
        padded_limit = %padded_limit,
        "Estimated transaction fee"
    );

    Ok(FeeEstimate {
        gas_price,
        gas_limit,
        padded_limit,
    })
}
