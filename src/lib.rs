//! agritrace: operator CLI for a ledger-resident supply-chain contract.
//!
//! Each invocation is one stateless unit of work: read local configuration,
//! connect to the ledger node, resolve a signing identity, compile or load
//! the contract interface, submit one request, print the result, exit.
//!
//! # Architecture Overview
//!
//! ```text
//!   argv ──▶ cli (closed verb enum + static verb table)
//!              │
//!              ├─ deploy ──▶ compiler ──▶ artifact (persist)
//!              │               │
//!              │               ▼
//!              │             chain::deploy ──▶ fees ──▶ submit ──▶ receipt
//!              │
//!              ├─ add*/createBatch/updateStatus
//!              │        artifact (load) ──▶ chain::invoke ──▶ submit | query
//!              │
//!              └─ upload ──▶ ipfs (content-addressed store)
//!
//!   config (provider + accounts) and chain::signer feed every chain verb;
//!   error maps each failure kind to a fixed process exit code.
//! ```
//!
//! Control flow is strictly linear per invocation; no component keeps state
//! across runs. The ledger contract itself is the source of truth for role
//! permissions and status transitions; nothing is re-verified off-chain.

pub mod artifact;
pub mod chain;
pub mod cli;
pub mod commands;
pub mod compiler;
pub mod config;
pub mod error;
pub mod ipfs;
