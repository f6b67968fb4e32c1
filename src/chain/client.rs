//! Ledger RPC connection.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint named by the provider record
//! - Hand out a plain provider for reads and estimates
//! - Build a signing provider scoped to one resolved identity
//!
//! The connection is lazy: failures surface on the first RPC call, not at
//! construction. Timeouts are left to the transport defaults; a single
//! command performs a handful of sequential requests and a human retries.

use alloy::network::EthereumWallet;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use url::Url;

use crate::chain::signer::RoleSigner;
use crate::config::ProviderConfig;

/// Process-scoped connection to the ledger node.
#[derive(Clone)]
pub struct ChainClient {
    endpoint: Url,
    provider: DynProvider,
}

impl ChainClient {
    /// Connect to the configured endpoint.
    pub fn connect(config: &ProviderConfig) -> Self {
        let provider = ProviderBuilder::new()
            .connect_http(config.endpoint.clone())
            .erased();
        Self {
            endpoint: config.endpoint.clone(),
            provider,
        }
    }

    /// Read-only provider for queries and gas estimation.
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    /// Provider that signs submissions with the given identity.
    ///
    /// The signer stays a per-call value; nothing is registered globally.
    pub fn with_signer(&self, signer: &RoleSigner) -> DynProvider {
        ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer.key().clone()))
            .connect_http(self.endpoint.clone())
            .erased()
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_is_lazy() {
        // No node is listening here; construction must still succeed.
        let config = ProviderConfig {
            endpoint: "http://127.0.0.1:8545".parse().unwrap(),
        };
        let client = ChainClient::connect(&config);
        assert_eq!(client.endpoint().port(), Some(8545));
    }
}
