//! Submission service: the submit-command behind every entry surface
//!
//! Order of side effects for one submission:
//! 1. validate scores, remark and image path (nothing written on failure)
//! 2. append the row with the image path as given
//! 3. rerank every row and overwrite the ranked table
//! 4. copy the image into the managed directory
//! 5. if the archived name differs, rewrite the reference in both tables
//!
//! If step 4 fails, the appended row is removed again and the ranked table is
//! rebuilt, so a retry never leaves a duplicate entry behind.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::archive::{ensure_source, target_name, ImageArchiver};
use crate::config::DataPaths;
use crate::rank::{RankTable, Ranking};
use crate::reader::RankingReader;
use crate::score::Scores;
use crate::store::{RecordStore, SubmissionRecord};
use crate::{Error, Result};

/// Raw form input, exactly as typed
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    pub image: String,
    pub taste: String,
    pub price: String,
    pub speed: String,
    pub remark: String,
}

/// What a successful submission did
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionOutcome {
    /// Image path as submitted
    pub source_image: String,
    /// Reference now stored in both tables
    pub image: String,
    pub archived_path: PathBuf,
    pub composite_score: f64,
    /// Rank of this submission after the rerank
    pub rank: usize,
    pub total_entries: usize,
    pub renamed_records: usize,
    pub renamed_rankings: usize,
}

/// Owns the table and image locations for one root folder
#[derive(Debug, Clone)]
pub struct FoodRanking {
    store: RecordStore,
    rankings: RankTable,
    archiver: ImageArchiver,
}

impl FoodRanking {
    pub fn new(paths: &DataPaths) -> Self {
        Self {
            store: RecordStore::new(&paths.data_table),
            rankings: RankTable::new(&paths.rank_table),
            archiver: ImageArchiver::new(&paths.image_dir),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn rankings(&self) -> &RankTable {
        &self.rankings
    }

    pub fn archiver(&self) -> &ImageArchiver {
        &self.archiver
    }

    pub fn reader(&self) -> RankingReader {
        RankingReader::new(self.rankings.path())
    }

    /// Recompute the ranked table from the record store
    pub fn rerank(&self) -> Result<Ranking> {
        let records = self.store.read_all()?;
        self.rankings.rebuild(&records)
    }

    pub fn submit(&self, form: &SubmissionForm) -> Result<SubmissionOutcome> {
        let scores = Scores::parse(&form.taste, &form.price, &form.speed)?;

        let image = form.image.trim();
        if image.is_empty() {
            return Err(Error::Validation("an image must be selected".to_string()));
        }
        let source = Path::new(image);
        let remark = Some(form.remark.as_str());
        // Resolves the remark before any write so a bad remark rejects cleanly
        target_name(source, remark)?;
        ensure_source(source)?;

        let prior_rows = self.store.read_all()?.len();
        let record = SubmissionRecord::new(image, scores);
        self.store.append(&record)?;

        let ranking = self.rerank()?;
        let index = ranking.len().saturating_sub(1);
        let rank = ranking.rank_of(index).unwrap_or(ranking.len());

        let archived = match self.archiver.archive(source, remark) {
            Ok(archived) => archived,
            Err(e) => {
                self.roll_back(prior_rows);
                return Err(e);
            }
        };

        let (renamed_records, renamed_rankings) = if archived.name != image {
            (
                self.store.update_image_reference(image, &archived.name)?,
                self.rankings.update_image_reference(image, &archived.name)?,
            )
        } else {
            (0, 0)
        };

        info!(
            "Recorded {} (composite {:.2}, rank {}/{})",
            archived.name,
            scores.composite(),
            rank,
            ranking.len()
        );

        Ok(SubmissionOutcome {
            source_image: image.to_string(),
            image: archived.name,
            archived_path: archived.path,
            composite_score: scores.composite(),
            rank,
            total_entries: ranking.len(),
            renamed_records,
            renamed_rankings,
        })
    }

    /// Drop rows appended after the first `keep` and rebuild the ranking
    fn roll_back(&self, keep: usize) {
        let result = self
            .store
            .truncate(keep)
            .and_then(|_| self.rerank().map(|_| ()));
        match result {
            Ok(()) => info!("Rolled back submission; {} rows remain", keep),
            Err(e) => warn!("Failed to roll back submission: {}", e),
        }
    }
}
