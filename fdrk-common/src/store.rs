//! Record store: the authoritative submission table (`data.csv`)
//!
//! Rows are `Image,Taste,Price,Speed`. The table is append-only except for
//! image reference rewrites after an image is archived under a new name.

use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::score::{composite_score, Scores};
use crate::table::{ensure_parent, write_table};
use crate::{Error, Result};

/// One submitted rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    #[serde(rename = "Image")]
    pub image: String,
    #[serde(rename = "Taste")]
    pub taste: f64,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Speed")]
    pub speed: f64,
}

impl SubmissionRecord {
    pub fn new(image: impl Into<String>, scores: Scores) -> Self {
        Self {
            image: image.into(),
            taste: scores.taste,
            price: scores.price,
            speed: scores.speed,
        }
    }

    pub fn composite(&self) -> f64 {
        composite_score(self.taste, self.price, self.speed)
    }
}

/// File-backed submission table
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row, writing the header first if the table is absent or empty
    pub fn append(&self, record: &SubmissionRecord) -> Result<()> {
        let needs_header = match std::fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == ErrorKind::NotFound => true,
            Err(e) => return Err(Error::store(&self.path, e)),
        };

        ensure_parent(&self.path).map_err(|e| Error::store(&self.path, e))?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::store(&self.path, e))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer
            .serialize(record)
            .map_err(|e| Error::store(&self.path, e))?;
        writer.flush().map_err(|e| Error::store(&self.path, e))?;

        debug!("Appended submission for {} to {}", record.image, self.path.display());
        Ok(())
    }

    /// Lazily iterate over all stored rows
    ///
    /// Each call reopens the file, so the sequence can be restarted. A table
    /// that does not exist yet yields nothing.
    pub fn records(&self) -> Result<Records> {
        if self.path.is_dir() {
            return Err(Error::store(&self.path, "path is a directory"));
        }
        match File::open(&self.path) {
            Ok(file) => Ok(Records {
                path: self.path.clone(),
                inner: Some(csv::Reader::from_reader(file).into_deserialize()),
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Records {
                path: self.path.clone(),
                inner: None,
            }),
            Err(e) => Err(Error::store(&self.path, e)),
        }
    }

    pub fn read_all(&self) -> Result<Vec<SubmissionRecord>> {
        self.records()?.collect()
    }

    /// Rewrite every row whose image reference equals `old`
    ///
    /// Returns the number of rows changed. Zero matches leaves the file as is.
    pub fn update_image_reference(&self, old: &str, new: &str) -> Result<usize> {
        let mut records = self.read_all()?;
        let mut changed = 0;
        for record in records.iter_mut().filter(|r| r.image == old) {
            record.image = new.to_string();
            changed += 1;
        }

        if changed == 0 {
            debug!("No submission rows reference {}", old);
            return Ok(0);
        }
        if changed > 1 {
            warn!("{} submission rows referenced {}; all renamed to {}", changed, old, new);
        }

        write_table(&self.path, &records).map_err(|e| Error::store(&self.path, e))?;
        info!("Updated image reference {} -> {} in {}", old, new, self.path.display());
        Ok(changed)
    }

    /// Keep only the first `len` rows, in order
    pub fn truncate(&self, len: usize) -> Result<()> {
        let mut records = self.read_all()?;
        if records.len() <= len {
            return Ok(());
        }
        records.truncate(len);
        write_table(&self.path, &records).map_err(|e| Error::store(&self.path, e))?;
        debug!("Truncated {} to {} rows", self.path.display(), len);
        Ok(())
    }
}

/// Restartable iterator over the submission table, see [`RecordStore::records`]
pub struct Records {
    path: PathBuf,
    inner: Option<csv::DeserializeRecordsIntoIter<File, SubmissionRecord>>,
}

impl Iterator for Records {
    type Item = Result<SubmissionRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = &self.path;
        self.inner
            .as_mut()?
            .next()
            .map(|row| row.map_err(|e| Error::store(path, e)))
    }
}
