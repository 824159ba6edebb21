//! Paged record retrieval.
//!
//! The core only needs a finite, possibly-paged sequence of record
//! snapshots; the `RecordSource` trait is the seam to whatever persistence
//! layer supplies them. Sources return records ordered descending by
//! creation time, and `fetch_all` stops at the first short page or once the
//! cap is reached.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::core::normalize::created_date;
use crate::core::types::ReviewRecord;

pub trait RecordSource {
    /// Return the next batch of up to `page_size` records. An empty batch
    /// means the source is exhausted.
    fn next_page(&mut self, page_size: usize) -> Result<Vec<ReviewRecord>>;
}

/// Fetch pages until a short page or `max_records`. A short final page is
/// the stop signal, so the total may overshoot the cap by at most one page.
pub fn fetch_all(
    source: &mut dyn RecordSource,
    page_size: usize,
    max_records: usize,
) -> Result<Vec<ReviewRecord>> {
    let mut all = Vec::new();
    while all.len() < max_records {
        let batch = source.next_page(page_size)?;
        let short = batch.len() < page_size;
        debug!("fetched page of {} records", batch.len());
        all.extend(batch);
        if short {
            break;
        }
    }
    info!("fetched {} records total", all.len());
    Ok(all)
}

/// A `RecordSource` over a JSON array export, sorted descending by creation
/// time and served page by page.
pub struct JsonFileSource {
    records: Vec<ReviewRecord>,
    cursor: usize,
}

impl JsonFileSource {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read records file {}", path.display()))?;
        let records: Vec<ReviewRecord> = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse records file {}", path.display()))?;
        Ok(Self::from_records(records))
    }

    pub fn from_records(mut records: Vec<ReviewRecord>) -> Self {
        // Descending by creation time; records with no resolvable creation
        // time sort last.
        records.sort_by(|a, b| match (created_date(b), created_date(a)) {
            (Some(b_ts), Some(a_ts)) => b_ts.cmp(&a_ts),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        Self { records, cursor: 0 }
    }
}

impl RecordSource for JsonFileSource {
    fn next_page(&mut self, page_size: usize) -> Result<Vec<ReviewRecord>> {
        let end = (self.cursor + page_size).min(self.records.len());
        let batch = self.records[self.cursor..end].to_vec();
        self.cursor = end;
        Ok(batch)
    }
}
