//! CSV boundary adapters.
//!
//! Each source has a reader-based loader (testable without files) and a
//! path-based wrapper that tags failures with the [`DataSource`] that could
//! not be read. Rows that fail validation are collected as [`RejectedRow`]s
//! instead of aborting the load.

use std::fs::File;
use std::path::Path;

use crate::error::{DataSource, Error, Result};

pub mod export;
pub mod odds;
pub mod overrides;
pub mod projection;
pub mod salary;

pub use export::{save_batch_csv, save_batch_json, write_batch_csv, write_batch_json, BatchExport};
pub use odds::{load_odds, read_odds};
pub use overrides::{load_overrides, read_overrides, save_overrides, write_overrides};
pub use projection::{load_projections, read_projections, select_source, SourceChoice};
pub use salary::{load_salaries, read_salaries};

/// A row skipped during loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// 1-based line number in the source, header included.
    pub line: u64,
    pub reason: String,
}

/// Records accepted from a source plus the rows that were skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    pub rejected: Vec<RejectedRow>,
}

impl<T> Loaded<T> {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            rejected: Vec::new(),
        }
    }

    fn reject(&mut self, line: u64, reason: impl Into<String>) {
        self.rejected.push(RejectedRow {
            line,
            reason: reason.into(),
        });
    }
}

/// Column lookup over trimmed, lower-cased headers.
struct Headers(Vec<String>);

impl Headers {
    fn new(record: &csv::StringRecord) -> Self {
        Self(record.iter().map(|h| h.trim().to_lowercase()).collect())
    }

    /// Index of the first header matching any alias, in alias order.
    fn find(&self, aliases: &[&str]) -> Option<usize> {
        aliases
            .iter()
            .find_map(|alias| self.0.iter().position(|h| h == alias))
    }

    fn require(&self, source: DataSource, aliases: &[&str]) -> Result<usize> {
        self.find(aliases).ok_or_else(|| {
            Error::upstream(source, format!("missing column '{}'", aliases.join("' or '")))
        })
    }
}

fn field(record: &csv::StringRecord, index: usize) -> &str {
    record.get(index).map(str::trim).unwrap_or_default()
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map_or(0, csv::Position::line)
}

fn open(path: &Path, source: DataSource) -> Result<File> {
    File::open(path).map_err(|e| Error::upstream(source, format!("{}: {e}", path.display())))
}

fn reader<R: std::io::Read>(rdr: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new().flexible(true).from_reader(rdr)
}
