use std::io;
use std::path::PathBuf;

use alloy::primitives::U256;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pasifika_rpc_demo::config::{self, parse_address, Config};
use pasifika_rpc_demo::domain::accounts::DEV_PRIVATE_KEY;
use pasifika_rpc_demo::infrastructure::ethereum::{
    create_provider, normalize_http_endpoint, signer_from_key, AlloyProvider, ProviderConfig,
};
use pasifika_rpc_demo::modules::toolkit::parse_amount;
use pasifika_rpc_demo::modules::workflow;

#[derive(Debug, Parser)]
#[command(
    name = "pasifika",
    version,
    about = "Deploy a contract and send transfers on the Pasifika PoA chain"
)]
struct Args {
    /// HTTP JSON-RPC endpoint (default http://localhost:8545)
    #[arg(long, global = true)]
    rpc: Option<String>,

    /// WebSocket endpoint (e.g. ws://localhost:8546)
    #[arg(long, global = true, conflicts_with = "rpc")]
    ws: Option<String>,

    /// IPC path. Unix only.
    #[arg(long, global = true, conflicts_with_all = ["rpc", "ws"])]
    ipc: Option<PathBuf>,

    /// Hex private key of the signing account
    #[arg(long, global = true, env = "PASIFIKA_PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Deploy the Storage contract, store a value and read it back
    Deploy {
        /// Gas limit for the creation transaction
        #[arg(long)]
        gas_limit: Option<u64>,

        /// Value passed to store()
        #[arg(long)]
        value: Option<u64>,
    },
    /// Send a native transfer and report balances before and after
    Transfer {
        /// Recipient address
        #[arg(long)]
        to: Option<String>,

        /// Amount, ether unless a unit follows ("10", "5 gwei")
        #[arg(long)]
        amount: Option<String>,

        /// Gas limit for the transfer
        #[arg(long)]
        gas_limit: Option<u64>,
    },
    /// Show chain id, client and balances of the configured accounts
    Network,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = config::load();
    let endpoint = endpoint_from_args_and_config(&args, &config)?;
    let provider = connect(&args, &config, endpoint).await?;

    let mut stdout = io::stdout().lock();
    match args.command {
        Command::Deploy { gas_limit, value } => {
            let mut params = config.deploy_params();
            if let Some(gas_limit) = gas_limit {
                params.deploy_gas.gas_limit = gas_limit;
            }
            if let Some(value) = value {
                params.store_value = U256::from(value);
            }
            workflow::deploy(&provider, &params, &mut stdout).await?;
        }
        Command::Transfer {
            to,
            amount,
            gas_limit,
        } => {
            let mut params = config.transfer_params()?;
            if let Some(to) = to {
                params.receiver = parse_address(&to)?;
            }
            if let Some(amount) = amount {
                params.amount = parse_amount(&amount)?;
            }
            if let Some(gas_limit) = gas_limit {
                params.gas.gas_limit = gas_limit;
            }
            workflow::transfer(&provider, &params, &mut stdout).await?;
        }
        Command::Network => {
            let accounts = config.account_addresses()?;
            workflow::network(&provider, &accounts, config.expected_chain_id, &mut stdout).await?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pasifika_rpc_demo={level},pasifika={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn endpoint_from_args_and_config(args: &Args, config: &Config) -> Result<ProviderConfig> {
    // CLI arguments take precedence
    if let Some(ipc) = args.ipc.clone() {
        #[cfg(unix)]
        {
            return Ok(ProviderConfig::Ipc(ipc));
        }
        #[cfg(not(unix))]
        {
            let _ = ipc;
            return Err(anyhow::anyhow!("IPC is not supported on this platform"));
        }
    }
    if let Some(ws) = args.ws.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        return Ok(ProviderConfig::WebSocket(ws.to_string()));
    }

    let rpc = args
        .rpc
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(config.rpc.as_str());
    if rpc.starts_with("ws://") || rpc.starts_with("wss://") {
        return Ok(ProviderConfig::WebSocket(rpc.to_string()));
    }
    Ok(ProviderConfig::Http(normalize_http_endpoint(rpc)))
}

async fn connect(args: &Args, config: &Config, endpoint: ProviderConfig) -> Result<AlloyProvider> {
    let key = match args.private_key.as_deref().or(config.private_key.as_deref()) {
        Some(key) => key,
        None => {
            tracing::warn!("no private key supplied; signing with the well-known development key");
            DEV_PRIVATE_KEY
        }
    };
    let signer = signer_from_key(key)?;

    create_provider(endpoint.clone(), signer, config.receipt_policy())
        .await
        .with_context(|| format!("Failed to connect to {}", endpoint.display()))
}
