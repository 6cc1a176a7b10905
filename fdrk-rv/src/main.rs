//! fdrk-rv (Ranking View) - read-only ranking page
//!
//! Renders rank.csv from the resolved root folder on 127.0.0.1:5742 by
//! default. Runs independently of fdrk-fe and never writes.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fdrk_common::config::{RootFolderInitializer, RootFolderResolver, TomlConfig};
use fdrk_common::logging;
use fdrk_common::shutdown::shutdown_signal;
use fdrk_common::RankingReader;
use fdrk_rv::{build_router, AppState};
use tracing::{info, warn};

const MODULE_NAME: &str = "fdrk-rv";

/// Command-line arguments for fdrk-rv
#[derive(Parser, Debug)]
#[command(name = "fdrk-rv")]
#[command(about = "Food ranking display page")]
#[command(version)]
struct Args {
    /// Port to listen on (ignored when --bind is given)
    #[arg(short, long, default_value = "5742", env = "FDRK_RV_PORT")]
    port: u16,

    /// Full bind address, e.g. 0.0.0.0:5742
    #[arg(long, env = "FDRK_RV_BIND")]
    bind: Option<String>,

    /// Root folder holding rank.csv
    #[arg(short, long)]
    root_folder: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let toml_config = TomlConfig::load_for_module(MODULE_NAME).unwrap_or_default();

    logging::init(&["fdrk_rv", "fdrk_common"], &toml_config.logging)
        .context("Failed to initialize logging")?;

    info!(
        "Starting fdrk Ranking View (fdrk-rv) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let root_folder = RootFolderResolver::new(MODULE_NAME)
        .with_cli_override(args.root_folder)
        .resolve();
    let initializer = RootFolderInitializer::new(root_folder);
    let rank_table = initializer.data_paths().rank_table;
    info!("Ranked table: {}", rank_table.display());
    if !initializer.rank_table_exists() {
        warn!("Ranked table does not exist yet; serving the empty state until fdrk-fe writes it");
    }

    let state = AppState::new(RankingReader::new(rank_table));
    let app = build_router(state);

    let bind_addr = args
        .bind
        .or(toml_config.bind_addr)
        .unwrap_or_else(|| format!("127.0.0.1:{}", args.port));
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    info!("fdrk-rv listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}
