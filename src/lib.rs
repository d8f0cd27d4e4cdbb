//! rWorklog library root.
//! Exposes the CLI parser, the conversation engine, storage backends and
//! the high-level run() function.

pub mod ai;
pub mod cli;
pub mod config;
pub mod db;
pub mod engine;
pub mod errors;
pub mod export;
pub mod models;
pub mod stats;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use tracing_subscriber::EnvFilter;

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Record => cli::commands::record::handle(cfg).await,
        Commands::Report => cli::commands::report::handle(cfg).await,
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg).await,
        Commands::Stats => cli::commands::stats::handle(cfg).await,
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg).await,
        Commands::Ping => cli::commands::ping::handle(cfg).await,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // a second init (e.g. from tests) is not an error
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Entry point used by main.rs
pub async fn run() -> AppResult<()> {
    init_tracing();

    let cli = Cli::parse();

    // configuration is loaded once, then command-line overrides win
    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(user) = &cli.user {
        cfg.user_name = user.clone();
    }
    if let Some(storage) = cli.storage {
        cfg.storage = storage;
    }
    if cli.test {
        cfg.typing_delay_ms = 0;
    }

    tracing::debug!(storage = ?cfg.storage, ai = cfg.ai_enabled(), "configuration loaded");

    dispatch(&cli, &cfg).await
}
