//! Role-gated calls against an already-deployed contract.

use crate::artifact::ContractArtifact;
use crate::chain::invoke::{self, CallKind};
use crate::chain::{ChainClient, ChainError, RoleSigner};
use crate::cli::{Cli, Invocation};
use crate::error::CliError;

/// Load the interface, resolve the signer the verb table names, and issue
/// the call.
///
/// A ledger rejection (revert, unauthorized role) is an expected operator
/// outcome: it is logged and the process still exits 0. Interface
/// mismatches and everything before the submit stay fatal.
pub async fn execute(
    client: &ChainClient,
    opts: &Cli,
    invocation: Invocation,
) -> Result<(), CliError> {
    let abi = ContractArtifact::load_abi(&invocation.contract_name, &opts.build_dir)?;
    let signer = RoleSigner::resolve(&opts.accounts, &invocation.signer_role)?;
    let spec = invocation.spec;

    match spec.kind {
        CallKind::Transaction => {
            let result = invoke::submit_transaction(
                client,
                &signer,
                invocation.contract_address,
                &abi,
                spec.method,
                &invocation.args,
            )
            .await;
            match result {
                Ok(outcome) => {
                    println!("{}: confirmed in tx {}", spec.method, outcome.tx_hash);
                }
                Err(err @ ChainError::InterfaceMismatch(_)) => return Err(err.into()),
                Err(err) => {
                    tracing::error!(
                        method = %spec.method,
                        role = %signer.role(),
                        error = %err,
                        "Ledger call rejected"
                    );
                }
            }
        }
        CallKind::Query => {
            let result = invoke::query(
                client,
                signer.address(),
                invocation.contract_address,
                &abi,
                spec.method,
                &invocation.args,
            )
            .await;
            match result {
                Ok(values) => println!("{}: {:?}", spec.method, values),
                Err(err @ ChainError::InterfaceMismatch(_)) => return Err(err.into()),
                Err(err) => {
                    tracing::error!(
                        method = %spec.method,
                        error = %err,
                        "Ledger query rejected"
                    );
                }
            }
        }
    }

    Ok(())
}
