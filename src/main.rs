use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use urlrisk::cli::{self, Cli, Commands};
use urlrisk::config::ServerConfig;
use urlrisk::server;

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let config = ServerConfig::from_env()?;

    let level = if args.verbose { "debug" } else { config.log_level.as_str() };
    init_tracing(level);

    match args.command {
        Commands::Check { urls, json } => {
            cli::print_reports(&urls, json)?;
        }
        Commands::Batch { json } => {
            if !json {
                println!("Enter URLs: (type '{}' to finish)", cli::BATCH_TERMINATOR);
            }
            let urls = cli::read_batch(io::stdin().lock())?;
            if urls.is_empty() {
                println!("No URLs provided. Exiting.");
                return Ok(());
            }
            cli::print_reports(&urls, json)?;
        }
        Commands::File { path, json } => {
            let urls = cli::read_url_file(&path)?;
            if urls.is_empty() {
                println!("No URLs found in {}. Exiting.", path.display());
                return Ok(());
            }
            cli::print_reports(&urls, json)?;
        }
        Commands::Serve { host, port } => {
            let config = config.with_overrides(host, port);
            info!("🕵️ Starting URL risk analyzer on {}", config.bind_addr());
            server::serve(&config).await?;
        }
    }

    Ok(())
}
