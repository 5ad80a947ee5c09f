use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use thiserror::Error;

use super::model::{CellValue, RawRow, RawTable, Workbook};
use crate::config::LoaderConfig;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The bytes are not a spreadsheet container we can read. No partial
    /// workbook is produced.
    #[error("{name} is not a readable spreadsheet: {reason}")]
    Parse { name: String, reason: String },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read the whole file, then hand the buffer to [`load_bytes`] once.
pub fn load_file(path: &Path, config: &LoaderConfig) -> Result<Workbook, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("spreadsheet");
    load_bytes(name, &bytes, config)
}

/// Parse a complete spreadsheet buffer into one [`RawTable`] per sheet.
///
/// `source_name` is only used to pick the CSV path (by extension) and to name
/// the single topic of a CSV source. Everything else is detected from the
/// content: xlsx, xlsm, xlsb, xls and ods.
pub fn load_bytes(
    source_name: &str,
    bytes: &[u8],
    config: &LoaderConfig,
) -> Result<Workbook, LoadError> {
    let ext = Path::new(source_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let workbook = match ext.as_str() {
        "csv" => load_csv(source_name, bytes, config)?,
        _ => load_spreadsheet(source_name, bytes, config)?,
    };

    log::info!(
        "Loaded {source_name}: {} sheet(s), {} row(s)",
        workbook.tables.len(),
        workbook.row_count()
    );
    Ok(workbook)
}

// ---------------------------------------------------------------------------
// Spreadsheet containers
// ---------------------------------------------------------------------------

fn load_spreadsheet(
    source_name: &str,
    bytes: &[u8],
    config: &LoaderConfig,
) -> Result<Workbook, LoadError> {
    let parse_error = |reason: String| {
        log::error!("Failed to parse {source_name}: {reason}");
        LoadError::Parse {
            name: source_name.to_string(),
            reason,
        }
    };

    let mut sheets = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| parse_error(e.to_string()))?;

    let mut tables = Vec::new();
    for name in sheets.sheet_names() {
        let range = sheets
            .worksheet_range(&name)
            .map_err(|e| parse_error(format!("sheet '{name}': {e}")))?;
        let table = table_from_range(&name, &range, config.header_row);
        log::debug!("Sheet '{name}': {} row(s)", table.len());
        tables.push(table);
    }

    Ok(Workbook::new(tables))
}

/// Convert a sheet's used range into a [`RawTable`].
pub fn table_from_range(name: &str, range: &Range<Data>, header_row: usize) -> RawTable {
    build_table(
        name,
        range.rows().map(|row| row.iter().map(cell_from_data).collect()),
        header_row,
    )
}

fn cell_from_data(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV (single sheet)
// ---------------------------------------------------------------------------

fn load_csv(source_name: &str, bytes: &[u8], config: &LoaderConfig) -> Result<Workbook, LoadError> {
    let topic = Path::new(source_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(source_name);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            log::error!("Failed to parse {source_name}: CSV row {row_no}: {e}");
            LoadError::Parse {
                name: source_name.to_string(),
                reason: format!("CSV row {row_no}: {e}"),
            }
        })?;
        rows.push(record.iter().map(CellValue::from_text).collect::<Vec<_>>());
    }

    Ok(Workbook::new(vec![build_table(
        topic,
        rows.into_iter(),
        config.header_row,
    )]))
}

// ---------------------------------------------------------------------------
// Shared row handling
// ---------------------------------------------------------------------------

/// Skip to the header row, take labels from it and key every following
/// non-blank row by those labels.
fn build_table(
    name: &str,
    mut rows: impl Iterator<Item = Vec<CellValue>>,
    header_row: usize,
) -> RawTable {
    let Some(header) = rows.nth(header_row) else {
        return RawTable {
            name: name.to_string(),
            columns: Vec::new(),
            rows: Vec::new(),
        };
    };
    let columns = header_labels(&header);

    let rows = rows
        .filter(|cells| cells.iter().any(|c| !c.is_empty()))
        .map(|cells| {
            columns
                .iter()
                .zip(cells)
                .filter(|(_, cell)| !cell.is_empty())
                .map(|(col, cell)| (col.clone(), cell))
                .collect::<RawRow>()
        })
        .collect();

    RawTable {
        name: name.to_string(),
        columns,
        rows,
    }
}

/// Trimmed header labels; blanks become `column_<n>` and repeats get a
/// `_<n>` suffix so every label is unique.
fn header_labels(header: &[CellValue]) -> Vec<String> {
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    header
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let label = cell.to_string().trim().to_string();
            let label = if label.is_empty() {
                format!("column_{}", i + 1)
            } else {
                label
            };
            let n = seen.entry(label.clone()).or_insert(0);
            *n += 1;
            if *n == 1 {
                label
            } else {
                format!("{label}_{n}")
            }
        })
        .collect()
}
