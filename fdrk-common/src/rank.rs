//! Ranker and the ranked table (`rank.csv`)
//!
//! The ranked table is a projection of the record store: every submission
//! triggers a full recompute, sort and overwrite. Rows are
//! `Image,Composite Score,Rank` in rank order.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::store::SubmissionRecord;
use crate::table::write_table;
use crate::{Error, Result};

/// One row of the ranked table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRecord {
    #[serde(rename = "Image")]
    pub image: String,
    #[serde(rename = "Composite Score")]
    pub composite_score: f64,
    #[serde(rename = "Rank")]
    pub rank: usize,
}

/// Result of ranking a set of submissions
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    rows: Vec<RankedRecord>,
    /// `source_index[i]` is the submission index that ended up at `rows[i]`
    source_index: Vec<usize>,
}

impl Ranking {
    pub fn rows(&self) -> &[RankedRecord] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<RankedRecord> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rank assigned to the submission at `index` in insertion order
    pub fn rank_of(&self, index: usize) -> Option<usize> {
        self.source_index
            .iter()
            .position(|&i| i == index)
            .map(|pos| self.rows[pos].rank)
    }
}

/// Sort by composite score descending and assign dense ranks `1..=N`
///
/// The sort is stable, so equal scores keep insertion order.
pub fn rank_records(records: &[SubmissionRecord]) -> Ranking {
    let mut scored: Vec<(usize, f64)> = records
        .iter()
        .enumerate()
        .map(|(i, r)| (i, r.composite()))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    let (rows, source_index) = scored
        .into_iter()
        .enumerate()
        .map(|(pos, (index, score))| {
            let row = RankedRecord {
                image: records[index].image.clone(),
                composite_score: score,
                rank: pos + 1,
            };
            (row, index)
        })
        .unzip();

    Ranking { rows, source_index }
}

/// File-backed ranked table
#[derive(Debug, Clone)]
pub struct RankTable {
    path: PathBuf,
}

impl RankTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rank `records` and overwrite the table with the result
    pub fn rebuild(&self, records: &[SubmissionRecord]) -> Result<Ranking> {
        let ranking = rank_records(records);
        self.write_all(ranking.rows())?;
        info!("Ranked {} entries into {}", ranking.len(), self.path.display());
        Ok(ranking)
    }

    pub fn write_all(&self, rows: &[RankedRecord]) -> Result<()> {
        write_table(&self.path, rows).map_err(|e| Error::ranking(&self.path, e))
    }

    /// Read every row in file order
    ///
    /// A missing table is [`Error::RankingUnavailable`]; callers decide how to
    /// present the empty state.
    pub fn read_all(&self) -> Result<Vec<RankedRecord>> {
        let file = File::open(&self.path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::ranking(&self.path, "ranked table has not been generated yet")
            } else {
                Error::ranking(&self.path, e)
            }
        })?;

        let rows = csv::Reader::from_reader(file)
            .into_deserialize()
            .collect::<std::result::Result<Vec<RankedRecord>, _>>()
            .map_err(|e| Error::ranking(&self.path, e))?;
        debug!("Read {} ranked rows from {}", rows.len(), self.path.display());
        Ok(rows)
    }

    /// Rewrite every row whose image reference equals `old`
    pub fn update_image_reference(&self, old: &str, new: &str) -> Result<usize> {
        let mut rows = self.read_all()?;
        let mut changed = 0;
        for row in rows.iter_mut().filter(|r| r.image == old) {
            row.image = new.to_string();
            changed += 1;
        }

        if changed == 0 {
            debug!("No ranked rows reference {}", old);
            return Ok(0);
        }
        if changed > 1 {
            warn!("{} ranked rows referenced {}; all renamed to {}", changed, old, new);
        }

        self.write_all(&rows)?;
        Ok(changed)
    }
}
