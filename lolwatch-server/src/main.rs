//! lolwatch server
//!
//! Watches League of Legends summoners and posts a short report to a
//! Discord channel whenever one of them finishes a game.

mod adapters;
mod api;
mod commands;
mod config;
mod server;
mod shutdown;
mod state;

use adapters::{DiscordAdapter, RiotAdapter};
use clap::Parser;
use config::ConfigLoader;
use lolwatch_core::bootstrap::{persist_registry, restore_registry};
use lolwatch_core::persistence::StateFile;
use lolwatch_core::processors::WatchSupervisor;
use lolwatch_sdk::client::{DataDragonClient, DiscordClient, RiotClient};
use lolwatch_sdk::objects::ChampionCatalog;
use server::{build_router, run_server};
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// lolwatch - League of Legends match reporter for Discord
#[derive(Parser, Debug)]
#[command(name = "lolwatch")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./lolwatch.toml")]
    config: PathBuf,

    /// Override the listen address (e.g., 0.0.0.0:3000)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Override the state file path
    #[arg(short, long)]
    state: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOLWATCH_JSON_LOGS", default_value = "false")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing(args.json_logs);

    tracing::info!("Starting lolwatch v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_loader = ConfigLoader::new(&args.config, args.listen, args.state);
    let loaded_config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;
    tracing::info!("Configuration loaded from {:?}", args.config);

    let listen_addr = loaded_config.listen;
    let upstream = loaded_config.upstream;
    let credentials = loaded_config.credentials;
    let settings = loaded_config.watch;

    // Upstream clients share one connection pool
    let http = reqwest::Client::builder()
        .timeout(settings.request_timeout)
        .build()?;
    let riot = RiotClient::new(upstream.riot_base, credentials.riot_api_key)
        .with_http_client(http.clone());
    let discord = DiscordClient::new(upstream.discord_base, &credentials.discord_token)
        .with_http_client(http.clone());
    let ddragon = DataDragonClient::new(upstream.data_dragon_base).with_http_client(http);

    let champions = match ddragon.latest_catalog(&upstream.data_dragon_locale).await {
        Ok(catalog) => {
            tracing::info!(champions = catalog.len(), "Champion catalog loaded");
            catalog
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load champion catalog, reports will use champion ids");
            ChampionCatalog::default()
        }
    };

    let riot = Arc::new(RiotAdapter::new(riot, champions));
    let discord = Arc::new(DiscordAdapter::new(discord));

    // Restore saved watches
    let state_file = StateFile::new(settings.state_path.clone());
    let registry = restore_registry(
        &state_file,
        riot.as_ref(),
        discord.as_ref(),
        settings.request_timeout,
    )
    .await;

    let supervisor = Arc::new(WatchSupervisor::new(
        registry,
        riot.clone(),
        discord.clone(),
        settings,
    ));
    let resumed = supervisor.spawn_restored().await;
    tracing::info!(resumed, "Watch workers started");

    // Build the router
    let state = AppState::new(supervisor.clone(), riot, discord.clone(), discord);
    let router = build_router(state);

    // Run the server
    tracing::info!("Starting HTTP server on {}", listen_addr);
    let result = run_server(router, listen_addr).await;

    // Workers are stopped before the final save
    supervisor.shutdown().await;
    if persist_registry(supervisor.registry(), &state_file)
        .await
        .is_err()
    {
        tracing::warn!("Shutting down without a saved state");
    }
    tracing::info!("Server shutdown complete");

    result.map_err(Into::into)
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,lolwatch_core=info,reqwest=warn"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
