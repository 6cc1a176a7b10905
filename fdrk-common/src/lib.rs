//! # fdrk Common Library
//!
//! Shared code for the fdrk services:
//! - Score validation and the weighted composite score
//! - Submission table (`data.csv`) and ranked table (`rank.csv`)
//! - Image archiving into the managed directory
//! - Ranking display rows
//! - Configuration loading and root folder resolution
//! - Log subscriber setup for the service binaries

pub mod archive;
pub mod browse;
pub mod config;
pub mod error;
pub mod logging;
pub mod rank;
pub mod reader;
pub mod score;
pub mod service;
pub mod shutdown;
pub mod store;
mod table;

pub use error::{Error, Result};
pub use rank::{RankTable, RankedRecord, Ranking};
pub use reader::{DisplayRow, RankingReader};
pub use score::Scores;
pub use service::{FoodRanking, SubmissionForm, SubmissionOutcome};
pub use store::{RecordStore, SubmissionRecord};
