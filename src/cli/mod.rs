//! Command-line surface and the static verb table.
//!
//! # Design Decisions
//! - Verbs are a closed clap subcommand enum; an unknown verb is a parse
//!   error with exit code 1, never a silent no-op
//! - The verb → remote-method mapping is a static table (`CallSpec`), not
//!   inferred from the interface description
//! - Role-registration verbs always sign as the fixed manager role; batch
//!   and inspection verbs sign as the operator-supplied role

use std::path::PathBuf;

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, U256};
use clap::{Parser, Subcommand};
use url::Url;

use crate::chain::fees::DEFAULT_GAS_MULTIPLIER;
use crate::chain::invoke::CallKind;
use crate::config::Profile;

/// Role that authorizes registration verbs on-chain.
pub const MANAGER_ROLE: &str = "manager";

#[derive(Debug, Parser)]
#[command(name = "agritrace")]
#[command(about = "Compile, deploy, and drive the supply-chain ledger contract", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Provider link profile (node started from CLI vs. GUI)
    #[arg(long, value_enum, default_value_t = Profile::Cli)]
    pub profile: Profile,

    /// Provider record path
    #[arg(long, default_value = "eth_providers/providers.json")]
    pub providers: PathBuf,

    /// Account store path
    #[arg(long, default_value = "eth_accounts/accounts.json")]
    pub accounts: PathBuf,

    /// Contract source directory
    #[arg(long, default_value = "contracts")]
    pub contracts_dir: PathBuf,

    /// Import dependency store
    #[arg(long, default_value = "node_modules")]
    pub lib_dir: PathBuf,

    /// Artifact output directory
    #[arg(long, default_value = "build")]
    pub build_dir: PathBuf,

    /// Gas padding multiplier applied to the network estimate
    #[arg(long, default_value_t = DEFAULT_GAS_MULTIPLIER)]
    pub gas_multiplier: u64,

    /// Content-addressed store API for `upload`
    #[arg(long, default_value = "https://ipfs.infura.io:5001")]
    pub ipfs_api: Url,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile a contract and deploy it with the given signing role
    Deploy {
        signer_role: String,
        contract_name: String,
    },

    /// Register a farmer identity (signed by the manager role)
    #[command(name = "addFarmer")]
    AddFarmer {
        contract_name: String,
        contract_address: Address,
        identity: Address,
    },

    /// Register a transporter identity (signed by the manager role)
    #[command(name = "addTransporter")]
    AddTransporter {
        contract_name: String,
        contract_address: Address,
        identity: Address,
    },

    /// Register an inspector identity (signed by the manager role)
    #[command(name = "addInspector")]
    AddInspector {
        contract_name: String,
        contract_address: Address,
        identity: Address,
    },

    /// Register a retailer identity (signed by the manager role)
    #[command(name = "addRetailer")]
    AddRetailer {
        contract_name: String,
        contract_address: Address,
        identity: Address,
    },

    /// Create a produce batch
    #[command(name = "createBatch")]
    CreateBatch {
        signer_role: String,
        contract_name: String,
        contract_address: Address,
        weight: u64,
        expire_date: u64,
        transporter: Address,
    },

    /// Record an inspection status update for a batch
    #[command(name = "updateStatus")]
    UpdateStatus {
        signer_role: String,
        contract_name: String,
        contract_address: Address,
        weight: u64,
        expire_date: u64,
        transporter: Address,
    },

    /// Upload a file to the content-addressed store and print its CID
    Upload { file: PathBuf },
}

/// Which role signs a contract call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerPolicy {
    /// Always the fixed manager role.
    Manager,
    /// The role named on the command line.
    CallerSupplied,
}

/// One row of the verb table: remote method, signer policy, call kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSpec {
    pub method: &'static str,
    pub signer: SignerPolicy,
    pub kind: CallKind,
}

/// A fully resolved contract invocation, ready for the dispatcher.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub spec: CallSpec,
    pub contract_name: String,
    pub contract_address: Address,
    pub signer_role: String,
    pub args: Vec<DynSolValue>,
}

const fn registration(method: &'static str) -> CallSpec {
    CallSpec {
        method,
        signer: SignerPolicy::Manager,
        kind: CallKind::Transaction,
    }
}

impl Command {
    /// Static verb table. `None` for verbs that are not contract calls.
    pub fn call_spec(&self) -> Option<CallSpec> {
        match self {
            Command::AddFarmer { .. } => Some(registration("addFarmer")),
            Command::AddTransporter { .. } => Some(registration("addTransporter")),
            Command::AddInspector { .. } => Some(registration("addInspector")),
            Command::AddRetailer { .. } => Some(registration("addRetailer")),
            Command::CreateBatch { .. } => Some(CallSpec {
                method: "createBatch",
                signer: SignerPolicy::CallerSupplied,
                kind: CallKind::Transaction,
            }),
            Command::UpdateStatus { .. } => Some(CallSpec {
                method: "updateInspectionStatus",
                signer: SignerPolicy::CallerSupplied,
                kind: CallKind::Transaction,
            }),
            Command::Deploy { .. } | Command::Upload { .. } => None,
        }
    }

    /// Resolve the verb into an [`Invocation`], applying the signer policy
    /// and encoding-ready argument values.
    pub fn invocation(&self) -> Option<Invocation> {
        let spec = self.call_spec()?;
        match self {
            Command::AddFarmer {
                contract_name,
                contract_address,
                identity,
            }
            | Command::AddTransporter {
                contract_name,
                contract_address,
                identity,
            }
            | Command::AddInspector {
                contract_name,
                contract_address,
                identity,
            }
            | Command::AddRetailer {
                contract_name,
                contract_address,
                identity,
            } => Some(Invocation {
                spec,
                contract_name: contract_name.clone(),
                contract_address: *contract_address,
                signer_role: MANAGER_ROLE.to_string(),
                args: vec![DynSolValue::Address(*identity)],
            }),

            Command::CreateBatch {
                signer_role,
                contract_name,
                contract_address,
                weight,
                expire_date,
                transporter,
            }
            | Command::UpdateStatus {
                signer_role,
                contract_name,
                contract_address,
                weight,
                expire_date,
                transporter,
            } => Some(Invocation {
                spec,
                contract_name: contract_name.clone(),
                contract_address: *contract_address,
                signer_role: signer_role.clone(),
                args: vec![
                    DynSolValue::Uint(U256::from(*weight), 256),
                    DynSolValue::Uint(U256::from(*expire_date), 256),
                    DynSolValue::Address(*transporter),
                ],
            }),

            Command::Deploy { .. } | Command::Upload { .. } => None,
        }
    }
}
