//! Bandwatch service entry point

use anyhow::{Context, Result};
use bandwatch_config::BandwatchConfig;
use bandwatch_gateway::logging::init_tracing;
use bandwatch_gateway::{spawn_periodic_check, AppState, GatewayServer};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Bind address (overrides configuration)
    #[arg(long, global = true)]
    bind_address: Option<String>,

    /// Port (overrides configuration)
    #[arg(short, long, global = true)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Serve the HTTP endpoints (default)
    Serve,
    /// Run one alert check and print the report as JSON
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = BandwatchConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(bind_address) = args.bind_address {
        config.server.bind_address = bind_address;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    init_tracing(&config.logging);

    info!("Starting bandwatch");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let state = Arc::new(AppState::from_config(&config)?);

    match args.command.unwrap_or(Command::Serve) {
        Command::Check => {
            let report = state.checker.check_all().await;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Command::Serve => serve(config, state).await,
    }
}

async fn serve(config: BandwatchConfig, state: Arc<AppState>) -> Result<()> {
    let addr = GatewayServer::bind_addr(&config.server.bind_address, config.server.port)?;

    let periodic = config.server.check_interval_secs.filter(|secs| *secs > 0).map(|secs| {
        info!("Scheduled alert checks every {}s", secs);
        spawn_periodic_check(Arc::clone(&state), Duration::from_secs(secs))
    });

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received");
    };

    let result = GatewayServer::new(state, addr).run(shutdown_signal).await;

    if let Some(handle) = periodic {
        handle.abort();
    }
    info!("Bandwatch stopped");
    result
}
