//! Salesboard main entry point

use anyhow::Context;
use clap::Parser;
use salesboard_api::start_server;
use salesboard_config::{Config, ConfigOrigin};
use salesboard_core::Dataset;
use salesboard_source::HttpDatasetSource;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "salesboard")]
#[command(version = "0.1.0")]
#[command(about = "Monthly sales dashboard API over a remote product-transaction dataset", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Override server.port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override source.url
    #[arg(long)]
    source_url: Option<String>,

    /// Load the dataset once before serving
    #[arg(long)]
    preload: bool,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    // The logger level comes from the config, so config errors go to stderr directly
    let (mut config, origin) = Config::load_or_default(&args.config).map_err(|e| {
        eprintln!("{}", e.report());
        anyhow::Error::new(e).context(format!(
            "Failed to load configuration from {}",
            args.config.display()
        ))
    })?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(url) = args.source_url {
        config.source.url = url;
    }
    config.validate().map_err(|e| {
        eprintln!("{}", e.report());
        anyhow::Error::new(e).context("Invalid configuration after CLI overrides")
    })?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if origin == ConfigOrigin::Defaults {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    }
    log::info!(
        "Config loaded: source={}, timeout={}s, per_page={}",
        config.source.url,
        config.source.timeout_secs,
        config.pagination.per_page
    );

    let source = Arc::new(HttpDatasetSource::new(
        config.source.url.clone(),
        config.source_timeout(),
    ));
    let dataset = Arc::new(Dataset::new(config, source));

    if args.preload {
        match dataset.initialize().await {
            Ok(count) => log::info!("Preloaded {} transactions", count),
            Err(e) => log::error!("Preload failed, starting with an empty store: {}", e),
        }
    }

    start_server(dataset).await.context("Server error")?;
    Ok(())
}
