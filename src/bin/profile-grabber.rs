//! profile-grabber CLI: cached profile retrieval from a rendered page snapshot.
//!
//! Usage:
//!   profile-grabber get [--snapshot path] [--pretty]
//!   profile-grabber extract <snapshot> [--pretty]
//!   profile-grabber cache <show|clear>
//!
//! Profiles are written to stdout as JSON; logs go to stderr (`RUST_LOG`).

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use profile_grabber::config::parse_duration;
use profile_grabber::{
    extract_profile_from_html, Config, ExtractingSource, MemoryStore, OpenStore, Profile,
    ProfileSource, RetrievalCoordinator, SnapshotFile, SourceError, SqliteStore, Store,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "profile-grabber",
    version,
    about = "Cached, failure-tolerant profile retrieval"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to a YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Path to SQLite database file
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Keep the cache in memory only (not valid with `cache` commands)
    #[arg(long, global = true, conflicts_with = "db")]
    ephemeral: bool,
    /// Cache key of the managed profile
    #[arg(long, global = true)]
    key: Option<String>,
    /// Maximum cache age before refreshing (e.g. 4h, 30m)
    #[arg(long, global = true)]
    cache_time: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Return the profile, refreshing from the snapshot when stale
    Get {
        /// Rendered HTML snapshot of the profile page
        #[arg(long)]
        snapshot: Option<PathBuf>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Extract a profile from a snapshot without touching the cache
    Extract {
        /// Rendered HTML snapshot of the profile page
        snapshot: PathBuf,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Inspect or clear the cached profile
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Print the cached profile as-is, without refreshing
    Show {
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Remove the cached profile
    Clear,
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,profile_grabber=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Merge config file, environment, and command-line overrides
fn resolve_config(cli: &Cli) -> Result<Config, String> {
    let mut config = Config::load(cli.config.as_deref()).map_err(|e| e.to_string())?;
    if let Some(db) = &cli.db {
        config.db_path = Some(db.clone());
    }
    if let Some(key) = &cli.key {
        config.identity_key = key.clone();
    }
    if let Some(cache_time) = &cli.cache_time {
        config.staleness_threshold = parse_duration(cache_time).map_err(|e| e.to_string())?;
    }
    Ok(config)
}

fn open_store(config: &Config, ephemeral: bool) -> Result<Arc<dyn Store>, String> {
    if ephemeral {
        return Ok(Arc::new(MemoryStore::new()));
    }
    let db_path = config.db_path_or_default();
    let store = SqliteStore::open(&db_path)
        .map_err(|e| format!("Failed to open database at {}: {}", db_path.display(), e))?;
    tracing::debug!(path = %db_path.display(), "opened cache database");
    Ok(Arc::new(store))
}

/// Stands in for a source when no snapshot is configured; only the cache is usable
struct NoSnapshot;

#[async_trait]
impl ProfileSource for NoSnapshot {
    fn name(&self) -> &str {
        "none"
    }

    async fn fetch(&self) -> Result<Profile, SourceError> {
        Err(SourceError::Unavailable(
            "no snapshot configured (use --snapshot or PROFILE_SNAPSHOT)".to_string(),
        ))
    }
}

fn open_coordinator(
    config: &Config,
    ephemeral: bool,
    snapshot: Option<PathBuf>,
) -> Result<RetrievalCoordinator, String> {
    let store = open_store(config, ephemeral)?;
    let source: Arc<dyn ProfileSource> = match snapshot {
        Some(path) => Arc::new(ExtractingSource::new(SnapshotFile::new(path))),
        None => Arc::new(NoSnapshot),
    };
    Ok(RetrievalCoordinator::new(store, source, config.coordinator_config()))
}

fn runtime() -> Result<tokio::runtime::Runtime, String> {
    tokio::runtime::Runtime::new().map_err(|e| format!("failed to create tokio runtime: {}", e))
}

/// Cache commands inspect the persistent store; an ephemeral one is always empty
fn check_cache_target(ephemeral: bool) -> Result<(), String> {
    if ephemeral {
        return Err("--ephemeral cannot be combined with cache commands".to_string());
    }
    Ok(())
}

fn print_profile(profile: &Profile, pretty: bool) -> i32 {
    let json = if pretty {
        serde_json::to_string_pretty(profile)
    } else {
        serde_json::to_string(profile)
    };
    match json {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_get(config: &Config, ephemeral: bool, snapshot: Option<PathBuf>, pretty: bool) -> i32 {
    let snapshot = match snapshot.or_else(|| config.snapshot_path.clone()) {
        Some(path) => path,
        None => {
            eprintln!("Error: no snapshot configured (use --snapshot or PROFILE_SNAPSHOT)");
            return 1;
        }
    };
    let coordinator = match open_coordinator(config, ephemeral, Some(snapshot)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let rt = match runtime() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };
    match rt.block_on(coordinator.get()) {
        Ok(profile) => print_profile(&profile, pretty),
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_extract(snapshot: &PathBuf, pretty: bool) -> i32 {
    let html = match std::fs::read_to_string(snapshot) {
        Ok(html) => html,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", snapshot.display(), e);
            return 1;
        }
    };
    match extract_profile_from_html(&html) {
        Ok(profile) => print_profile(&profile, pretty),
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_cache_show(config: &Config, pretty: bool) -> i32 {
    let coordinator = match open_coordinator(config, false, config.snapshot_path.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    match coordinator.cached() {
        Ok(Some(profile)) => print_profile(&profile, pretty),
        Ok(None) => {
            eprintln!("No cached profile under '{}'", config.identity_key);
            1
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_cache_clear(config: &Config) -> i32 {
    let coordinator = match open_coordinator(config, false, config.snapshot_path.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let rt = match runtime() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };
    match rt.block_on(coordinator.invalidate()) {
        Ok(true) => {
            println!("Cleared cached profile '{}'", config.identity_key);
            0
        }
        Ok(false) => {
            println!("No cached profile under '{}'", config.identity_key);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Get { snapshot, pretty } => cmd_get(&config, cli.ephemeral, snapshot, pretty),
        Commands::Extract { snapshot, pretty } => cmd_extract(&snapshot, pretty),
        Commands::Cache { action } => match check_cache_target(cli.ephemeral) {
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
            Ok(()) => match action {
                CacheAction::Show { pretty } => cmd_cache_show(&config, pretty),
                CacheAction::Clear => cmd_cache_clear(&config),
            },
        },
    };
    std::process::exit(code);
}
