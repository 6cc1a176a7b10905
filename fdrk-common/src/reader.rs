//! Ranking reader: the ranked table as display rows

use serde::Serialize;
use std::path::PathBuf;

use crate::rank::RankTable;
use crate::Result;

/// One line of the ranking listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub rank: usize,
    pub food_name: String,
    pub composite_score: f64,
}

/// Image reference with its final extension removed
///
/// Only the last path component is inspected; leading dots of that component
/// do not start an extension, so `.hidden` stays `.hidden`.
pub fn display_name(image_ref: &str) -> &str {
    let base_start = image_ref
        .rfind(|c: char| c == '/' || c == '\\')
        .map_or(0, |i| i + 1);
    let base = &image_ref[base_start..];
    let leading_dots = base.len() - base.trim_start_matches('.').len();

    match base[leading_dots..].rfind('.') {
        Some(dot) => &image_ref[..base_start + leading_dots + dot],
        None => image_ref,
    }
}

/// Read-only view over the ranked table
#[derive(Debug, Clone)]
pub struct RankingReader {
    table: RankTable,
}

impl RankingReader {
    pub fn new(rank_table: impl Into<PathBuf>) -> Self {
        Self {
            table: RankTable::new(rank_table),
        }
    }

    /// Display rows in table order
    ///
    /// Fails with `RankingUnavailable` when the ranked table does not exist.
    pub fn read(&self) -> Result<Vec<DisplayRow>> {
        Ok(self
            .table
            .read_all()?
            .into_iter()
            .map(|row| DisplayRow {
                rank: row.rank,
                food_name: display_name(&row.image).to_string(),
                composite_score: row.composite_score,
            })
            .collect())
    }
}
