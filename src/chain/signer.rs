//! Identity resolution and transaction signing.
//!
//! # Security
//! - Private keys come from the flat local account store only
//! - Keys are never logged or serialized; only the derived address is

use std::path::Path;

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

use crate::chain::types::{ChainError, ChainResult};
use crate::config;

/// A signing identity bound to a role name.
///
/// Threaded explicitly through every call that submits a transaction;
/// there is no process-global wallet.
#[derive(Debug, Clone)]
pub struct RoleSigner {
    role: String,
    signer: PrivateKeySigner,
}

impl RoleSigner {
    /// Resolve the signing identity for a role from the account store.
    ///
    /// The role must match an account key exactly (case-sensitive).
    pub fn resolve(accounts_path: &Path, role: &str) -> ChainResult<Self> {
        let account = config::load_account(accounts_path, role).map_err(|e| {
            ChainError::SignerUnavailable {
                role: role.to_string(),
                reason: e.to_string(),
            }
        })?;

        // Strip 0x prefix if present
        let key_hex = account
            .private_key
            .strip_prefix("0x")
            .unwrap_or(&account.private_key);
        let signer: PrivateKeySigner =
            key_hex
                .parse()
                .map_err(|e| ChainError::SignerUnavailable {
                    role: role.to_string(),
                    reason: format!("invalid private key: {}", e),
                })?;

        tracing::info!(
            role = %role,
            address = %signer.address(),
            "Resolved signing identity"
        );

        Ok(Self {
            role: role.to_string(),
            signer,
        })
    }

    /// The address transactions are sent from.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub(crate) fn key(&self) -> &PrivateKeySigner {
        &self.signer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    // Well-known test private key (Anvil's first account)
    const TEST_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn account_store(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_resolve_known_role() {
        let store = account_store(&format!(
            r#"{{ "manager": {{ "pvtKey": "{}" }} }}"#,
            TEST_PRIVATE_KEY
        ));
        let signer = RoleSigner::resolve(store.path(), "manager").unwrap();
        assert_eq!(signer.role(), "manager");
        // This is the corresponding address for the test key
        assert_eq!(
            signer.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_resolve_with_0x_prefix() {
        let store = account_store(&format!(
            r#"{{ "manager": {{ "pvtKey": "0x{}" }} }}"#,
            TEST_PRIVATE_KEY
        ));
        let signer = RoleSigner::resolve(store.path(), "manager").unwrap();
        assert_eq!(
            signer.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_resolve_missing_role() {
        let store = account_store(&format!(
            r#"{{ "manager": {{ "pvtKey": "{}" }} }}"#,
            TEST_PRIVATE_KEY
        ));
        let err = RoleSigner::resolve(store.path(), "farmer").unwrap_err();
        assert!(matches!(err, ChainError::SignerUnavailable { role, .. } if role == "farmer"));
    }

    #[test]
    fn test_resolve_invalid_key() {
        let store = account_store(r#"{ "manager": { "pvtKey": "not-a-key" } }"#);
        let err = RoleSigner::resolve(store.path(), "manager").unwrap_err();
        assert!(err.to_string().contains("invalid private key"));
    }
}
