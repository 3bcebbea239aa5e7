use crate::error::{ExplorerError, Result};
use crate::models::{Cell, Dataset};
use crate::query::LatestValues;
use crate::table::Table;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Anything able to hand over a loaded table per dataset.
pub trait TableSource {
    fn load_table(&self, dataset: Dataset) -> Result<Table>;
}

/// Reads each dataset from `<dir>/<Dataset::file_name()>`.
#[derive(Debug, Clone)]
pub struct CsvDirectory {
    dir: PathBuf,
}

impl CsvDirectory {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, dataset: Dataset) -> PathBuf {
        self.dir.join(dataset.file_name())
    }
}

impl TableSource for CsvDirectory {
    fn load_table(&self, dataset: Dataset) -> Result<Table> {
        let path = self.path_for(dataset);
        read_csv_table(dataset.as_str(), &path).map_err(|e| ExplorerError::Load {
            dataset: dataset.as_str().to_string(),
            reason: format!("{}: {}", path.display(), e),
        })
    }
}

/// Parse one CSV file into a [`Table`]. Ragged rows are accepted and padded.
pub fn read_csv_table(name: &str, path: &Path) -> std::result::Result<Table, csv::Error> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let columns: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    let mut ragged = 0usize;
    for rec in rdr.records() {
        let rec = rec?;
        if rec.len() != columns.len() {
            ragged += 1;
        }
        rows.push(rec.iter().map(Cell::parse).collect::<Vec<_>>());
    }
    if ragged > 0 {
        log::warn!(
            "{}: {} row(s) do not match the {}-column header",
            path.display(),
            ragged,
            columns.len()
        );
    }
    log::debug!("read {} rows x {} columns from {}", rows.len(), columns.len(), path.display());
    Ok(Table::new(name, columns, rows))
}

/// Prefix text that a spreadsheet would evaluate as a formula.
fn neutralize(s: &str) -> String {
    if s.starts_with(['=', '+', '-', '@']) {
        format!("'{s}")
    } else {
        s.to_string()
    }
}

fn csv_value(cell: &Cell) -> String {
    match cell {
        Cell::Number(v) => v.to_string(),
        Cell::Text(s) => neutralize(s),
        Cell::Missing => String::new(),
    }
}

/// Save latest-year values as CSV with header.
pub fn save_csv<P: AsRef<Path>>(latest: &LatestValues, path: P) -> anyhow::Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record(["dataset", "country", "year", "value"])?;
    let year = latest.year.as_deref().unwrap_or("");
    for obs in &latest.values {
        wtr.write_record([
            latest.dataset.as_str().to_string(),
            neutralize(&obs.country),
            neutralize(year),
            csv_value(&obs.value),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save latest-year values as a pretty JSON object.
pub fn save_json<P: AsRef<Path>>(latest: &LatestValues, path: P) -> anyhow::Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(latest)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
