//! One-shot submission from the command line
//!
//! **Usage:**
//! ```bash
//! fdrk-submit --image ~/Pictures/photo.jpg --taste 8 --price 6 --speed 7 --remark spicy_noodles
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fdrk_common::config::{RootFolderInitializer, RootFolderResolver};
use fdrk_common::{FoodRanking, SubmissionForm};

/// Record one food rating and rerank all entries
#[derive(Parser, Debug)]
#[command(name = "fdrk-submit")]
#[command(about = "Submit a food rating and regenerate rank.csv")]
#[command(version)]
struct Args {
    /// Image file to archive with this rating
    #[arg(long)]
    image: String,

    /// Taste score (0-10)
    #[arg(long)]
    taste: String,

    /// Price score (0-10)
    #[arg(long)]
    price: String,

    /// Serving speed score (0-10)
    #[arg(long)]
    speed: String,

    /// New name for the archived image (extension is kept)
    #[arg(long, default_value = "")]
    remark: String,

    /// Root folder holding data.csv, rank.csv and food_picture/
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let root_folder = RootFolderResolver::new("fdrk-fe")
        .with_cli_override(args.root_folder)
        .resolve();
    let initializer = RootFolderInitializer::new(root_folder);
    initializer
        .ensure_directory_exists()
        .context("Failed to initialize root folder")?;

    let service = FoodRanking::new(&initializer.data_paths());
    let form = SubmissionForm {
        image: args.image,
        taste: args.taste,
        price: args.price,
        speed: args.speed,
        remark: args.remark,
    };
    let outcome = service.submit(&form).context("Submission rejected")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("Saved as:        {}", outcome.image);
        println!("Archived to:     {}", outcome.archived_path.display());
        println!("Composite score: {:.2}", outcome.composite_score);
        println!("Rank:            {} of {}", outcome.rank, outcome.total_entries);
    }
    Ok(())
}
