//! Configuration loading from disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Backing file is missing or unreadable.
    #[error("cannot read {path}: {source}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exists but does not parse as the expected record.
    #[error("malformed record in {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    /// Account store has no entry for the requested role.
    #[error("no account for role '{role}' in {path}")]
    MissingRole { role: String, path: PathBuf },

    /// Provider link is not a valid URL.
    #[error("invalid provider endpoint '{link}': {reason}")]
    InvalidEndpoint { link: String, reason: String },
}

/// Which provider link to use from the provider record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    /// Node started from the command line (`provider_link_cli`).
    Cli,
    /// Node started from the GUI (`provider_link_ui`).
    Ui,
}

/// Resolved node endpoint. Loaded once per run; immutable.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub endpoint: Url,
}

/// One signing identity from the account store.
///
/// Never persisted back; the key is handed to the signer and dropped.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub role: String,
    pub private_key: String,
}

#[derive(Debug, Deserialize)]
struct ProviderFile {
    provider_link_cli: String,
    provider_link_ui: String,
}

#[derive(Debug, Deserialize)]
struct AccountEntry {
    #[serde(rename = "pvtKey")]
    pvt_key: String,
}

/// Load the node endpoint for the given deployment profile.
pub fn load_provider_config(path: &Path, profile: Profile) -> Result<ProviderConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|e| ConfigError::NotFound {
        path: path.to_path_buf(),
        source: e,
    })?;
    let record: ProviderFile = serde_json::from_str(&raw).map_err(|e| ConfigError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let link = match profile {
        Profile::Cli => record.provider_link_cli,
        Profile::Ui => record.provider_link_ui,
    };
    let endpoint = Url::parse(&link).map_err(|e| ConfigError::InvalidEndpoint {
        link,
        reason: e.to_string(),
    })?;

    Ok(ProviderConfig { endpoint })
}

/// Load the account record for a role. Lookup is exact and case-sensitive.
pub fn load_account(path: &Path, role: &str) -> Result<AccountRecord, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|e| ConfigError::NotFound {
        path: path.to_path_buf(),
        source: e,
    })?;
    let records: BTreeMap<String, AccountEntry> =
        serde_json::from_str(&raw).map_err(|e| ConfigError::Malformed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let entry = records.get(role).ok_or_else(|| ConfigError::MissingRole {
        role: role.to_string(),
        path: path.to_path_buf(),
    })?;

    Ok(AccountRecord {
        role: role.to_string(),
        private_key: entry.pvt_key.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const PROVIDERS: &str = r#"{
        "provider_link_cli": "ws://127.0.0.1:8545",
        "provider_link_ui": "ws://127.0.0.1:7545"
    }"#;

    const ACCOUNTS: &str = r#"{
        "manager": { "pvtKey": "0xaa" },
        "farmer": { "pvtKey": "0xbb" }
    }"#;

    #[test]
    fn test_provider_profile_selection() {
        let file = write_file(PROVIDERS);

        let cli = load_provider_config(file.path(), Profile::Cli).unwrap();
        assert_eq!(cli.endpoint.as_str(), "ws://127.0.0.1:8545/");

        let ui = load_provider_config(file.path(), Profile::Ui).unwrap();
        assert_eq!(ui.endpoint.port(), Some(7545));
    }

    #[test]
    fn test_provider_file_missing() {
        let err = load_provider_config(Path::new("/nonexistent/providers.json"), Profile::Cli)
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_provider_file_malformed() {
        let file = write_file("not json at all");
        let err = load_provider_config(file.path(), Profile::Cli).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed { .. }));
    }

    #[test]
    fn test_provider_link_invalid() {
        let file = write_file(r#"{"provider_link_cli": "::::", "provider_link_ui": "::::"}"#);
        let err = load_provider_config(file.path(), Profile::Cli).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_account_lookup() {
        let file = write_file(ACCOUNTS);
        let account = load_account(file.path(), "farmer").unwrap();
        assert_eq!(account.role, "farmer");
        assert_eq!(account.private_key, "0xbb");
    }

    #[test]
    fn test_account_role_is_case_sensitive() {
        let file = write_file(ACCOUNTS);
        let err = load_account(file.path(), "Manager").unwrap_err();
        assert!(matches!(err, ConfigError::MissingRole { .. }));
    }

    #[test]
    fn test_account_role_absent() {
        let file = write_file(ACCOUNTS);
        let err = load_account(file.path(), "retailer").unwrap_err();
        assert!(matches!(err, ConfigError::MissingRole { role, .. } if role == "retailer"));
    }
}
