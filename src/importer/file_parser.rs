// ==========================================
// Safety Operations Platform - Tabular decoder
// ==========================================
// Stage 0 of the import pipeline: raw bytes -> headers + rows
// Supports: Excel (.xlsx/.xls) / CSV (.csv), chosen by the declared
// file name's extension. Pure transformation; never touches the store.
// ==========================================

use crate::importer::error::ImportError;
use calamine::{Data, Range, Reader, Xls, Xlsx};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

// ==========================================
// RawCell - one cell as it came off the file
// ==========================================
// Absence is represented by the key missing from the row map.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl RawCell {
    /// True for cells that carry no usable content
    pub fn is_blank(&self) -> bool {
        matches!(self, RawCell::Text(s) if s.is_empty())
    }
}

/// One decoded row: column header -> raw cell value
pub type RawRow = HashMap<String, RawCell>;

// ==========================================
// DecodedTable - the decoder's output
// ==========================================
// `headers` preserves file column order; `rows` index into it by name.
#[derive(Debug, Clone)]
pub struct DecodedTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Decode a raw file into headers and rows
///
/// # Arguments
/// - file_name: declared name, used only to pick CSV vs spreadsheet
/// - bytes: full file content
///
/// # Errors
/// - UnsupportedFormat for unknown extensions
/// - EmptyFile when no data rows are present
/// - CsvParseError / ExcelParseError on malformed input
pub fn decode(file_name: &str, bytes: &[u8]) -> Result<DecodedTable, ImportError> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let table = match ext.as_str() {
        "csv" => decode_csv(bytes)?,
        "xlsx" => decode_range(read_first_sheet_xlsx(bytes)?)?,
        "xls" => decode_range(read_first_sheet_xls(bytes)?)?,
        _ => return Err(ImportError::UnsupportedFormat(ext)),
    };

    if table.rows.is_empty() {
        return Err(ImportError::EmptyFile);
    }

    Ok(table)
}

// ==========================================
// CSV decoding
// ==========================================
fn decode_csv(bytes: &[u8]) -> Result<DecodedTable, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // tolerate ragged rows
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row: RawRow = HashMap::new();

        for (col_idx, value) in record.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                row.insert(header.clone(), RawCell::Text(value.trim().to_string()));
            }
        }

        // Skip fully blank rows
        if row.values().all(|v| v.is_blank()) {
            continue;
        }

        rows.push(row);
    }

    Ok(DecodedTable { headers, rows })
}

// ==========================================
// Spreadsheet decoding
// ==========================================
fn read_first_sheet_xlsx(bytes: &[u8]) -> Result<Range<Data>, ImportError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;

    // Always the first sheet only
    let first = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ImportError::ExcelParseError("workbook has no sheets".to_string()))?;

    Ok(workbook.worksheet_range(&first)?)
}

fn read_first_sheet_xls(bytes: &[u8]) -> Result<Range<Data>, ImportError> {
    let mut workbook: Xls<_> = Xls::new(Cursor::new(bytes))?;

    let first = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ImportError::ExcelParseError("workbook has no sheets".to_string()))?;

    Ok(workbook.worksheet_range(&first)?)
}

fn decode_range(range: Range<Data>) -> Result<DecodedTable, ImportError> {
    let mut row_iter = range.rows();

    let header_row = match row_iter.next() {
        Some(row) => row,
        None => return Ok(DecodedTable { headers: Vec::new(), rows: Vec::new() }),
    };

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for data_row in row_iter {
        let mut row: RawRow = HashMap::new();

        for (col_idx, cell) in data_row.iter().enumerate() {
            let header = match headers.get(col_idx) {
                Some(h) => h,
                None => continue,
            };

            let value = match cell {
                Data::Empty => continue,
                Data::String(s) => RawCell::Text(s.trim().to_string()),
                Data::Float(f) => RawCell::Number(*f),
                Data::Int(i) => RawCell::Number(*i as f64),
                Data::Bool(b) => RawCell::Bool(*b),
                // Datetime cells surface as serials so the field
                // normalizer applies one decoding path for both
                // spreadsheet and CSV sources.
                Data::DateTime(dt) => RawCell::Number(dt.as_f64()),
                Data::DateTimeIso(s) => RawCell::Text(s.trim().to_string()),
                Data::DurationIso(s) => RawCell::Text(s.trim().to_string()),
                Data::Error(_) => continue,
            };

            row.insert(header.clone(), value);
        }

        if row.values().all(|v| v.is_blank()) {
            continue;
        }

        rows.push(row);
    }

    Ok(DecodedTable { headers, rows })
}
