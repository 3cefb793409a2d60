use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::{Row, TimeSeries};

/// Number of columns in a simulation output record.
const COLUMNS: usize = 4;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load simulation output from a headerless CSV file and group it by time.
///
/// Each record must hold exactly four numeric fields, read as
/// `time, position, u, v`:
///
/// ```text
/// 0,0,1,0
/// 0,1,0,1
/// 1,0,2,0
/// ```
pub fn load_file(path: &Path) -> Result<TimeSeries> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening data file {}", path.display()))?;
    let rows = read_rows(file).with_context(|| format!("parsing {}", path.display()))?;

    let series = TimeSeries::from_rows(rows);
    if series.is_empty() {
        bail!("{} contains no rows", path.display());
    }

    log::info!(
        "Loaded {} rows in {} time frames from {}",
        series.row_count(),
        series.len(),
        path.display()
    );
    Ok(series)
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

fn read_rows(input: impl std::io::Read) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        if record.len() != COLUMNS {
            bail!(
                "CSV row {row_no}: expected {COLUMNS} columns (time, position, u, v), found {}",
                record.len()
            );
        }

        let row: Row = record
            .deserialize(None)
            .with_context(|| format!("CSV row {row_no}: non-numeric field"))?;
        rows.push(row);
    }

    Ok(rows)
}
