//! fdrk-fe (Form Entry) - food rating submission service
//!
//! Serves the submission form and JSON API on 127.0.0.1:5741 by default.
//! Tables and archived images live under the resolved root folder.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fdrk_common::config::{RootFolderInitializer, RootFolderResolver, TomlConfig};
use fdrk_common::logging;
use fdrk_common::shutdown::shutdown_signal;
use fdrk_common::FoodRanking;
use fdrk_fe::{build_router, AppState};
use tracing::info;

const MODULE_NAME: &str = "fdrk-fe";

/// Command-line arguments for fdrk-fe
#[derive(Parser, Debug)]
#[command(name = "fdrk-fe")]
#[command(about = "Food ranking submission service")]
#[command(version)]
struct Args {
    /// Port to listen on (ignored when --bind is given)
    #[arg(short, long, default_value = "5741", env = "FDRK_FE_PORT")]
    port: u16,

    /// Full bind address, e.g. 0.0.0.0:5741
    #[arg(long, env = "FDRK_FE_BIND")]
    bind: Option<String>,

    /// Root folder holding data.csv, rank.csv and food_picture/
    #[arg(short, long)]
    root_folder: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let toml_config = TomlConfig::load_for_module(MODULE_NAME).unwrap_or_default();

    logging::init(&["fdrk_fe", "fdrk_common"], &toml_config.logging)
        .context("Failed to initialize logging")?;

    // Build identification first, before any filesystem work
    info!(
        "Starting fdrk Form Entry (fdrk-fe) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let root_folder = RootFolderResolver::new(MODULE_NAME)
        .with_cli_override(args.root_folder)
        .resolve();
    let initializer = RootFolderInitializer::new(root_folder.clone());
    initializer
        .ensure_directory_exists()
        .context("Failed to initialize root folder")?;

    let paths = initializer.data_paths();
    info!("Submission table: {}", paths.data_table.display());
    info!("Ranked table: {}", paths.rank_table.display());
    info!("Image directory: {}", paths.image_dir.display());

    let state = AppState::new(FoodRanking::new(&paths), root_folder);
    let app = build_router(state);

    let bind_addr = args
        .bind
        .or(toml_config.bind_addr)
        .unwrap_or_else(|| format!("127.0.0.1:{}", args.port));
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    info!("fdrk-fe listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}
