//! Batch export: one CSV row per player per lineup, or the whole batch as
//! JSON.

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::domain::{LineupBatch, Platform};
use crate::error::Result;

/// JSON envelope for an exported batch.
#[derive(Debug, Serialize)]
pub struct BatchExport<'a> {
    pub generated_at: DateTime<Utc>,
    pub platform: Platform,
    pub salary_cap: u32,
    #[serde(flatten)]
    pub batch: &'a LineupBatch,
}

impl<'a> BatchExport<'a> {
    pub fn new(platform: Platform, salary_cap: u32, batch: &'a LineupBatch) -> Self {
        Self {
            generated_at: Utc::now(),
            platform,
            salary_cap,
            batch,
        }
    }
}

/// Write the batch as CSV rows labelled `Lineup_1`, `Lineup_2`, ...
///
/// # Errors
///
/// Fails when the writer does.
pub fn write_batch_csv<W: Write>(wtr: W, batch: &LineupBatch) -> Result<()> {
    let mut writer = csv::Writer::from_writer(wtr);
    for row in batch.rows() {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a JSON export.
///
/// # Errors
///
/// Fails when serialization or the writer does.
pub fn write_batch_json<W: Write>(wtr: W, export: &BatchExport<'_>) -> Result<()> {
    serde_json::to_writer_pretty(wtr, export)?;
    Ok(())
}

/// Save the batch as CSV.
///
/// # Errors
///
/// Fails when the file cannot be created or written.
pub fn save_batch_csv(path: &Path, batch: &LineupBatch) -> Result<()> {
    write_batch_csv(std::fs::File::create(path)?, batch)?;
    info!(path = %path.display(), lineups = batch.len(), "exported lineups");
    Ok(())
}

/// Save a JSON export.
///
/// # Errors
///
/// Fails when the file cannot be created or written.
pub fn save_batch_json(path: &Path, export: &BatchExport<'_>) -> Result<()> {
    write_batch_json(std::fs::File::create(path)?, export)?;
    info!(path = %path.display(), "exported batch json");
    Ok(())
}
