mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, ScanCommandHandler, commands::Commands};
use wlan_watcher::config::WatcherConfig;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut config = WatcherConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(key) = cli.correlation_key {
        config.correlation_key = key;
    }
    if let Some(source) = cli.hardware_address_source {
        config.hardware_address_source = source;
    }

    let handler = ScanCommandHandler::new(config, cli.replay);

    match cli.command {
        Commands::Scan { json } => handler.handle_scan_command(json)?,
        Commands::Live { interval_ms } => handler.handle_live_command(interval_ms).await?,
        Commands::Adapters => handler.handle_adapters_command()?,
        Commands::Snapshot { output } => handler.handle_snapshot_command(&output)?,
        Commands::Config => handler.handle_config_command()?,
    }

    Ok(())
}
