//! Ledger integration subsystem.
//!
//! # Data Flow
//! ```text
//! ProviderConfig (endpoint URL)
//!     → client.rs (HTTP provider connection)
//! AccountRecord (role + private key)
//!     → signer.rs (explicit RoleSigner value, threaded through calls)
//!
//! deploy:  artifact → fees.rs (padded gas ceiling) → submit → await receipt
//! invoke:  interface + static verb table → encode → submit | query
//! ```
//!
//! # Security Constraints
//! - Private keys are never logged; only derived addresses appear in output
//! - The signer is a value passed to each call, not process-global state
//! - One connection per process; no state survives the invocation

pub mod client;
pub mod deploy;
pub mod fees;
pub mod invoke;
pub mod signer;
pub mod types;

pub use client::ChainClient;
pub use signer::RoleSigner;
pub use types::ChainError;
