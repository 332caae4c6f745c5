//! NRL Trade Calculator - Main Entry Point
//!
//! Serves the trade calculator over HTTP, or runs a single calculation from
//! the command line and prints the ranked options as JSON.

use anyhow::{Context, Result};
use chrono::FixedOffset;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::FmtSubscriber;

use nrl_trade_calculator::api::assembler::assemble;
use nrl_trade_calculator::catalog::{CatalogStore, CsvCatalogSource, PostgresCatalogSource};
use nrl_trade_calculator::common::traits::CatalogSource;
use nrl_trade_calculator::config::{load_config, AppConfig};
use nrl_trade_calculator::engine::{CalculateParams, TradeEngine};
use nrl_trade_calculator::ApiServer;

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); defaults to the configured level
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service (default)
    Serve {
        /// Address to bind, overriding the configuration
        #[arg(long, env = "NRL_BIND_ADDRESS")]
        bind: Option<String>,
    },
    /// Rank trade options once and print them as JSON
    Calculate {
        /// Outgoing player
        #[arg(long)]
        player1: String,

        /// Second outgoing player
        #[arg(long)]
        player2: Option<String>,

        /// Strategy: 1 (value), 2 (base) or 3 (hybrid)
        #[arg(long, default_value = "1")]
        strategy: String,

        /// likeForLike or positionalSwap
        #[arg(long, default_value = "likeForLike")]
        trade_type: String,

        /// Comma-separated positions for a positional swap
        #[arg(long, value_delimiter = ',')]
        positions: Option<Vec<String>>,

        /// Only recommend players on the team list
        #[arg(long)]
        restrict_to_team_list: bool,

        /// Exclude players past their lockout
        #[arg(long)]
        apply_lockout: bool,

        /// Reference time for the lockout check
        #[arg(long)]
        simulate_date_time: Option<String>,

        /// Extra salary on top of the outgoing players' prices
        #[arg(long)]
        salary_slack: Option<i64>,
    },
}

fn parse_level(raw: &str) -> Level {
    match raw.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Build the catalog store from the configured source
async fn build_store(config: &AppConfig, offset: FixedOffset) -> Result<Arc<CatalogStore>> {
    let catalog = &config.catalog;
    let source: Arc<dyn CatalogSource> = match &catalog.database {
        Some(database) => {
            let mut source = PostgresCatalogSource::connect(database)
                .await
                .context("connecting to the catalog database")?;
            if let Some(path) = &catalog.team_list_path {
                source = source.with_team_list(path.clone());
            }
            Arc::new(source)
        }
        None => {
            let mut source = CsvCatalogSource::new(&catalog.csv_path, offset);
            if let Some(path) = &catalog.team_list_path {
                source = source.with_team_list(path.clone());
            }
            Arc::new(source)
        }
    };

    let store = CatalogStore::from_source(source)
        .await
        .context("loading the player catalog")?;
    Ok(Arc::new(store))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let config = load_config(Some(&args.config)).context("loading configuration")?;

    // Initialize logging; RUST_LOG directives take precedence over the level
    let level = parse_level(args.log_level.as_deref().unwrap_or(&config.settings.log_level));
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting NRL trade calculator");
    info!("Configuration file: {}", args.config);

    let engine = Arc::new(TradeEngine::new(config.engine.clone())?);
    let store = build_store(&config, engine.utc_offset()).await?;

    match args.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => {
            if config.catalog.reload_interval_seconds > 0 {
                let every = Duration::from_secs(config.catalog.reload_interval_seconds);
                info!("Reloading catalog every {:?}", every);
                Arc::clone(&store).spawn_periodic_reload(every);
            }

            let addr = bind.unwrap_or_else(|| config.server.bind_address.clone());
            ApiServer::new(store, engine).serve(&addr).await?;
        }
        Command::Calculate {
            player1,
            player2,
            strategy,
            trade_type,
            positions,
            restrict_to_team_list,
            apply_lockout,
            simulate_date_time,
            salary_slack,
        } => {
            let params = CalculateParams {
                player1,
                player2,
                strategy,
                trade_type: Some(trade_type),
                restrict_to_team_list,
                apply_lockout,
                simulate_date_time,
                positions,
                salary_slack,
            };
            let request = params.into_request(engine.utc_offset())?;
            let options = engine.search(&store.snapshot(), &request, &engine.deadline())?;
            println!(
                "{}",
                serde_json::to_string_pretty(&assemble(&options, request.strategy))?
            );
        }
    }

    info!("Shutdown complete");
    Ok(())
}
