//! Medicine dataset loading
//!
//! Reads a spreadsheet (`xlsx`, `xls`, `xlsm`, `ods`) or a delimited text
//! file (`csv`, `tsv`), validates the header and produces typed [`Record`]s.
//! Only the first worksheet of a workbook is read.

use std::path::Path;

use calamine::{open_workbook_auto, DataType, Reader};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

pub const COL_DRUG_NAME: &str = "Drug_Name";
pub const COL_REASON: &str = "Reason";
pub const COL_DESCRIPTION: &str = "Description";

/// One medicine row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub drug_name: String,
    pub reason: String,
    pub description: String,
    full_text: String,
}

impl Record {
    /// Build a record; absent `reason` / `description` become empty strings
    pub fn new(
        drug_name: impl Into<String>,
        reason: Option<String>,
        description: Option<String>,
    ) -> Self {
        let reason = reason.unwrap_or_default();
        let description = description.unwrap_or_default();
        let full_text = format!("{reason} {description}");
        Self {
            drug_name: drug_name.into(),
            reason,
            description,
            full_text,
        }
    }

    /// `reason + " " + description`, the text that gets indexed
    #[inline]
    pub fn full_text(&self) -> &str {
        &self.full_text
    }
}

/// Column positions of the required fields in a header row
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    drug_name: usize,
    reason: usize,
    description: usize,
}

impl ColumnMap {
    fn from_headers<S: AsRef<str>>(headers: &[S]) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.as_ref().trim() == name);
        let drug_name = find(COL_DRUG_NAME);
        let reason = find(COL_REASON);
        let description = find(COL_DESCRIPTION);

        match (drug_name, reason, description) {
            (Some(drug_name), Some(reason), Some(description)) => Ok(Self {
                drug_name,
                reason,
                description,
            }),
            _ => {
                let missing = [
                    (COL_DRUG_NAME, drug_name),
                    (COL_REASON, reason),
                    (COL_DESCRIPTION, description),
                ]
                .iter()
                .filter(|(_, pos)| pos.is_none())
                .map(|(name, _)| name.to_string())
                .collect();
                Err(Error::MissingColumns(missing))
            }
        }
    }

    /// Turn one row of cells into a record.
    /// `None` for fully blank rows.
    fn record(&self, cells: &[Option<String>], line: usize) -> Option<Record> {
        if cells.iter().all(Option::is_none) {
            return None;
        }
        let cell = |idx: usize| cells.get(idx).cloned().flatten();
        let drug_name = cell(self.drug_name).unwrap_or_else(|| {
            warn!(line, "row without {COL_DRUG_NAME}, using an empty name");
            String::new()
        });
        Some(Record::new(drug_name, cell(self.reason), cell(self.description)))
    }
}

/// Load records from `path`, choosing the reader by file extension
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let records = match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "ods" => read_workbook(path)?,
        "csv" => read_delimited(std::fs::File::open(path)?, b',')?,
        "tsv" => read_delimited(std::fs::File::open(path)?, b'\t')?,
        _ => return Err(Error::UnsupportedFormat(ext)),
    };

    info!(path = %path.display(), records = records.len(), "loaded medicine dataset");
    Ok(records)
}

fn read_workbook(path: &Path) -> Result<Vec<Record>> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(Error::EmptyWorkbook)?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .ok_or(Error::EmptyWorkbook)??;
    debug!(sheet = %sheet_name, "reading worksheet");

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(|c| cell_to_string(c).unwrap_or_default()).collect(),
        None => return Err(Error::MissingColumns(required_columns())),
    };
    let columns = ColumnMap::from_headers(&headers)?;

    Ok(rows
        .enumerate()
        .filter_map(|(i, row)| {
            let cells: Vec<Option<String>> = row.iter().map(cell_to_string).collect();
            // header is line 1
            columns.record(&cells, i + 2)
        })
        .collect())
}

/// Read records from delimited text with a header line
pub fn read_delimited<R: std::io::Read>(reader: R, delimiter: u8) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row?;
        let cells: Vec<Option<String>> = row
            .iter()
            .map(|v| if v.is_empty() { None } else { Some(v.to_string()) })
            .collect();
        if let Some(record) = columns.record(&cells, i + 2) {
            records.push(record);
        }
    }
    Ok(records)
}

/// Cell text, `None` for empty or error cells
fn cell_to_string(cell: &DataType) -> Option<String> {
    match cell {
        DataType::Empty => None,
        DataType::String(s) if s.is_empty() => None,
        DataType::String(s) => Some(s.clone()),
        DataType::Error(e) => {
            warn!(error = ?e, "spreadsheet cell holds an error value, treating it as empty");
            None
        }
        other => Some(other.to_string()),
    }
}

fn required_columns() -> Vec<String> {
    vec![COL_DRUG_NAME.into(), COL_REASON.into(), COL_DESCRIPTION.into()]
}
