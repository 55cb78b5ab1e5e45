use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use concursos::config::Config;

mod commands;

#[derive(Parser)]
#[command(
    name = "concursos",
    version,
    about = "Brazilian public-exam listings per state, scraped hourly and served as JSON",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the configuration file
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the refresh scheduler and the HTTP API
    Serve {
        /// Port to listen on (keeps the configured host)
        #[arg(short, long)]
        port: Option<u16>,

        /// Seconds between refresh cycles
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Fetch and classify one region's listings once, printing JSON
    Scrape {
        /// Region code, e.g. "pa"
        uf: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let log_format = cli
        .log_format
        .clone()
        .unwrap_or_else(|| config.logging.format.clone());
    setup_tracing(&log_format, &config.logging.level, cli.verbose)?;

    match cli.command {
        Commands::Serve { port, interval } => {
            tracing::info!(port = ?port, interval = ?interval, "Starting serve command");
            commands::serve(config, port, interval).await?;
        }

        Commands::Scrape { uf } => {
            tracing::info!(uf = %uf, "Starting scrape command");
            commands::scrape(&config, &uf).await?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let directives = if verbose {
        "concursos=debug,tower_http=debug,info".to_string()
    } else {
        format!("concursos={level},tower_http=info,warn")
    };
    let env_filter = tracing_subscriber::EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log level '{level}'"))?;

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
