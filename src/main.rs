use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agritrace::chain::ChainClient;
use agritrace::cli::{Cli, Command};
use agritrace::commands;
use agritrace::config;
use agritrace::error::{CliError, USAGE_EXIT_CODE};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agritrace=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(USAGE_EXIT_CODE as u8),
            };
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Upload { file } => commands::upload::execute(&cli.ipfs_api, file).await,

        Command::Deploy {
            signer_role,
            contract_name,
        } => {
            let client = connect(&cli)?;
            commands::deploy::execute(&client, &cli, signer_role, contract_name).await
        }

        verb => {
            let client = connect(&cli)?;
            // Every remaining verb is a contract invocation in the static table.
            let invocation = verb
                .invocation()
                .ok_or_else(|| CliError::Usage(format!("verb has no call mapping: {:?}", verb)))?;
            commands::invoke::execute(&client, &cli, invocation).await
        }
    }
}

fn connect(cli: &Cli) -> Result<ChainClient, CliError> {
    let provider_config = config::load_provider_config(&cli.providers, cli.profile)?;
    let client = ChainClient::connect(&provider_config);
    tracing::info!(endpoint = %client.endpoint(), "Connected to provider");
    Ok(client)
}
