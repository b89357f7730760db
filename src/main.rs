//! Operator CLI for the transaction client.
//!
//! Validates configuration files and exercises the faucet funding path
//! against a running chain without needing a keyring.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use cosmos_client::config::{load_config, ClientConfig};
use cosmos_client::faucet::{BalanceQuery, FaucetFunder, HttpFaucetClient, RestBalanceQuery};
use cosmos_client::lifecycle::Cancellation;
use cosmos_client::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "cosmos-client")]
#[command(about = "Cosmos transaction client tooling", long_about = None)]
struct Cli {
    /// Configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a configuration file
    CheckConfig { path: PathBuf },
    /// Print the faucet denom balance of an address
    Balance { address: String },
    /// Fund an address from the faucet until it holds the minimum balance
    Fund { address: String },
    /// Ask the configured faucet to describe itself
    FaucetInfo,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };
    init_logging(&config.observability);

    match cli.command {
        Commands::CheckConfig { path } => match load_config(&path) {
            Ok(config) => {
                println!("{} is valid", path.display());
                println!("{}", toml::to_string_pretty(&config)?);
            }
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        Commands::Balance { address } => {
            let balances = rest_balances(&config)?;
            let amount = balances.balance(&address, &config.faucet.denom).await?;
            println!("{}{}", amount, config.faucet.denom);
        }
        Commands::FaucetInfo => {
            let timeout = Duration::from_secs(config.rpc_timeout_secs);
            let faucet = HttpFaucetClient::new(config.faucet.address.clone(), timeout)?;
            let info = faucet.faucet_info().await?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Commands::Fund { address } => {
            let timeout = Duration::from_secs(config.rpc_timeout_secs);
            let faucet = Arc::new(HttpFaucetClient::new(config.faucet.address.clone(), timeout)?);
            let funder = FaucetFunder::from_config(&config.faucet, faucet, Arc::new(rest_balances(&config)?));

            let cancellation = Cancellation::new();
            let token = cancellation.token();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::info!("Interrupt received, cancelling");
                    cancellation.cancel();
                }
            });

            funder.ensure_funds(&address, &token).await?;
            println!(
                "{} holds at least {}{}",
                address,
                funder.min_amount(),
                funder.denom()
            );
        }
    }

    Ok(())
}

fn rest_balances(config: &ClientConfig) -> Result<RestBalanceQuery, Box<dyn std::error::Error>> {
    let timeout = Duration::from_secs(config.rpc_timeout_secs);
    Ok(RestBalanceQuery::new(config.api_address.clone(), timeout)?)
}
