use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;

use movie_catalog::{storage, Config, Menu, OmdbClient, StorageBackend};

/// Interactive movie catalog
#[derive(Debug, Parser)]
#[command(name = "movie-catalog", version)]
struct Cli {
    /// Configuration file (defaults to ./movie_catalog.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Storage backend override
    #[arg(short, long, value_enum)]
    backend: Option<Backend>,

    /// Data file override (JSON file or SQLite database)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Backend {
    Json,
    Sql,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging - stderr, so the menu owns stdout
    let log_level = if cli.verbose { "debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("movie_catalog={}", log_level)));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    // Load configuration with CLI overrides
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(backend) = cli.backend {
        config.storage.backend = match backend {
            Backend::Json => StorageBackend::Json,
            Backend::Sql => StorageBackend::Sql,
        };
    }
    if let Some(data) = cli.data {
        config.storage.path = Some(data);
    }

    tracing::info!(version = movie_catalog::VERSION, backend = ?config.storage.backend, "starting");

    let store = storage::open(&config.storage)?;
    let lookup = OmdbClient::new(&config.omdb)?;
    if config.omdb.api_key.is_none() {
        tracing::warn!("no OMDb API key configured, adding movies will fail");
    }

    let stdin = io::stdin();
    let mut menu = Menu::new(store, Box::new(lookup), config, stdin.lock(), io::stdout());
    menu.run()?;

    Ok(())
}
