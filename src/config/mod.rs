//! Local configuration records.
//!
//! # Data Flow
//! ```text
//! eth_providers/providers.json
//!     → loader.rs (parse & profile selection)
//!     → ProviderConfig (endpoint URL, immutable)
//!
//! eth_accounts/accounts.json
//!     → loader.rs (role lookup, case-sensitive)
//!     → AccountRecord (role + private key, never persisted back)
//! ```
//!
//! # Design Decisions
//! - Records are read fresh on every run; nothing is cached across processes
//! - A missing file and a missing role key are distinct error kinds with
//!   distinct exit codes
//! - Private keys pass through as opaque strings; parsing happens in the
//!   signer, and keys are never logged

pub mod loader;

pub use loader::{load_account, load_provider_config};
pub use loader::{AccountRecord, ConfigError, Profile, ProviderConfig};
