//! dapp-connect command line.
//!
//! Drives the wallet adapter, network switch flow and data client from a
//! terminal. The wallet is a JSON-RPC endpoint (`provider.rpc_url` or
//! `DAPP_PROVIDER_RPC_URL`); with none configured every wallet command
//! reports the "no wallet" result.
//!
//! ```text
//! config (TOML + DAPP_* env)
//!     → WalletAdapter(RpcWalletProvider?) → status / connect / switch / watch-tx
//!     → SharedDataClient                  → query
//!     → routing                           → route
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use alloy::primitives::B256;
use clap::{Parser, Subcommand};
use serde_json::Value;
use tokio::sync::oneshot;

use dapp_connect::config::{self, AppConfig};
use dapp_connect::connectivity::ConnectivityTracker;
use dapp_connect::data::{FetchPolicy, GraphQlRequest, SharedDataClient};
use dapp_connect::network::{ChainDescriptor, NetworkSwitcher};
use dapp_connect::observability;
use dapp_connect::routing;
use dapp_connect::wallet::{Eip1193Provider, RpcWalletProvider, WalletAdapter};

#[derive(Parser)]
#[command(name = "dapp-connect")]
#[command(about = "Wallet connectivity and GraphQL data access", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the connected account and chain
    Status,
    /// Request account access
    Connect,
    /// Switch the wallet to the configured network, adding it if needed
    Switch,
    /// Wait for a transaction to be mined
    WatchTx {
        /// Transaction hash (0x-prefixed)
        hash: String,
    },
    /// Run a GraphQL query against the configured endpoint
    Query {
        /// Query document
        query: String,
        /// Variables as a JSON object
        #[arg(long)]
        variables: Option<String>,
        /// Bypass the response cache
        #[arg(long)]
        network_only: bool,
    },
    /// Resolve a location to a page
    Route {
        /// Path or URL, e.g. "/tos" or "https://host/#/whitepaper"
        location: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;
    observability::logging::init(&config.observability)?;

    tracing::info!(chain_id = config.network.chain_id, "dapp-connect starting");

    match cli.command {
        Commands::Status => {
            let adapter = build_adapter(&config)?;
            let tracker = ConnectivityTracker::new();
            let mut activation = tracker.activate(&adapter);
            activation.loaded().await;
            println!("{}", serde_json::to_string_pretty(&tracker.snapshot())?);
        }
        Commands::Connect => {
            let adapter = build_adapter(&config)?;
            let connected = adapter.request_connect().await;
            println!("connected: {}", connected);
            if connected {
                if let Some(address) = adapter.get_address().await {
                    println!("account: {}", address);
                }
            }
        }
        Commands::Switch => {
            let adapter = build_adapter(&config)?;
            let switcher = NetworkSwitcher::new(adapter, ChainDescriptor::from(&config.network));
            let outcome = switcher.switch().await;
            println!("{:?} (success: {})", outcome, outcome.is_success());
        }
        Commands::WatchTx { hash } => {
            let tx_hash: B256 = hash.parse()?;
            let adapter = build_adapter(&config)?;
            let (tx, rx) = oneshot::channel();
            let watch = adapter.watch_transaction(tx_hash, move |receipt, success| {
                let _ = tx.send((receipt, success));
            });
            match watch {
                Some(_watch) => {
                    let (receipt, success) = rx.await?;
                    println!("{}", serde_json::to_string_pretty(&receipt)?);
                    println!("success: {}", success);
                }
                None => println!("no wallet available"),
            }
        }
        Commands::Query {
            query,
            variables,
            network_only,
        } => {
            let mut request = GraphQlRequest::new(query);
            if let Some(variables) = variables {
                request = request.with_variables(serde_json::from_str(&variables)?);
            }
            let policy = if network_only {
                FetchPolicy::NetworkOnly
            } else {
                FetchPolicy::CacheFirst
            };

            let client = SharedDataClient::new(config.data.clone()).get()?;
            let data: Value = client.query(&request, policy).await?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Commands::Route { location } => match routing::resolve(&location) {
            Some(page) => println!("{} ({})", page, page.path()),
            None => println!("no page for {}", location),
        },
    }

    Ok(())
}

/// The configured wallet endpoint, or an adapter with no wallet.
fn build_adapter(config: &AppConfig) -> Result<WalletAdapter, Box<dyn std::error::Error>> {
    let provider = if config.provider.rpc_url.is_empty() {
        tracing::info!("No wallet provider configured");
        None
    } else {
        let provider = RpcWalletProvider::connect(&config.provider)?;
        Some(Arc::new(provider) as Arc<dyn Eip1193Provider>)
    };

    Ok(WalletAdapter::new(provider).with_receipt_poll_interval(
        std::time::Duration::from_millis(config.provider.receipt_poll_interval_ms),
    ))
}
