//! Manual identity overrides: `dfs_name,projection_name`.
//!
//! Both columns are normalized on load, so the file may hold display names.

use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{line_of, open, Loaded};
use crate::application::ManualOverrides;
use crate::domain::NormalizedName;
use crate::error::{DataSource, Result};

#[derive(Debug, Serialize, Deserialize)]
struct OverrideRow {
    #[serde(alias = "salary_name", alias = "name")]
    dfs_name: String,
    #[serde(alias = "projected_name", alias = "match")]
    projection_name: String,
}

/// Read overrides from any reader. Later rows replace earlier ones.
///
/// # Errors
///
/// Fails only when the CSV cannot be read at all.
pub fn read_overrides<R: Read>(rdr: R) -> Result<Loaded<(NormalizedName, NormalizedName)>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let headers = reader.headers()?.clone();
    let mut loaded = Loaded::new();
    for result in reader.records() {
        let record = result?;
        let line = line_of(&record);
        let row: OverrideRow = match record.deserialize(Some(&headers)) {
            Ok(row) => row,
            Err(e) => {
                loaded.reject(line, e.to_string());
                continue;
            }
        };
        match (
            NormalizedName::try_new(&row.dfs_name),
            NormalizedName::try_new(&row.projection_name),
        ) {
            (Ok(from), Ok(to)) => loaded.records.push((from, to)),
            (Err(e), _) | (_, Err(e)) => loaded.reject(line, e.to_string()),
        }
    }
    Ok(loaded)
}

/// Load an override file into a lookup table.
///
/// # Errors
///
/// An upstream failure when the file cannot be opened.
pub fn load_overrides(path: &Path) -> Result<ManualOverrides> {
    let loaded = read_overrides(open(path, DataSource::ManualOverrides)?)?;
    let overrides: ManualOverrides = loaded.records.into_iter().collect();
    info!(count = overrides.len(), "loaded manual overrides");
    Ok(overrides)
}

/// Write overrides to any writer, sorted by DFS name.
///
/// # Errors
///
/// Fails when the writer does.
pub fn write_overrides<W: Write>(wtr: W, overrides: &ManualOverrides) -> Result<()> {
    let mut writer = csv::Writer::from_writer(wtr);
    for (from, to) in overrides {
        writer.serialize(OverrideRow {
            dfs_name: from.to_string(),
            projection_name: to.to_string(),
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Write overrides to disk, replacing the file.
///
/// # Errors
///
/// Fails when the file cannot be created or written.
pub fn save_overrides(path: &Path, overrides: &ManualOverrides) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_overrides(file, overrides)?;
    info!(count = overrides.len(), path = %path.display(), "saved manual overrides");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_both_sides() {
        let csv = "dfs_name,projection_name\nD.K. Metcalf,DK Metcalf\nJa'Marr Chase,Jamarr Chase\n";
        let loaded = read_overrides(csv.as_bytes()).unwrap();
        assert_eq!(
            loaded.records[0],
            (NormalizedName::new("dkmetcalf"), NormalizedName::new("dkmetcalf"))
        );
        assert_eq!(loaded.records[1].0.as_str(), "jamarrchase");
    }

    #[test]
    fn blank_names_are_rejected() {
        let csv = "dfs_name,projection_name\n...,Somebody\n";
        let loaded = read_overrides(csv.as_bytes()).unwrap();
        assert!(loaded.records.is_empty());
        assert_eq!(loaded.rejected[0].line, 2);
    }

    #[test]
    fn written_file_reads_back() {
        let mut overrides = ManualOverrides::new();
        overrides.insert(NormalizedName::new("Gabe Davis"), NormalizedName::new("Gabriel Davis"));
        let mut buf = Vec::new();
        write_overrides(&mut buf, &overrides).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("dfs_name,projection_name\n"));
        let loaded = read_overrides(text.as_bytes()).unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].1.as_str(), "gabrieldavis");
    }
}
