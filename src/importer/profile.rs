// ==========================================
// Safety Operations Platform - Import profile plumbing
// ==========================================
// Each import profile declares its columns as an ordered candidate
// list: the machine-readable canonical key first, then the human
// header from the external export. Lookups try candidates in exactly
// that order; nothing falls back implicitly.
// ==========================================

use crate::importer::error::ImportError;
use crate::importer::file_parser::{RawCell, RawRow};
use crate::importer::normalize;
use chrono::NaiveDateTime;

// ==========================================
// ColumnSpec - one logical column of a profile
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    /// Canonical target field name (for summaries and error text)
    pub field: &'static str,
    /// Acceptable headers, tried in order: canonical key, then the
    /// human-readable header as printed by the export
    pub candidates: &'static [&'static str],
    /// Required columns gate the whole file; optional ones do not
    pub required: bool,
}

impl ColumnSpec {
    /// The header name shown to users in MissingColumns errors
    /// (the human header, i.e. the last candidate)
    pub fn display_header(&self) -> &'static str {
        self.candidates.last().copied().unwrap_or(self.field)
    }

    /// Whether any acceptable header for this column is present
    pub fn present_in(&self, headers: &[String]) -> bool {
        self.candidates
            .iter()
            .any(|c| headers.iter().any(|h| h == c))
    }
}

/// Fetch a cell by candidate order
pub fn lookup<'a>(row: &'a RawRow, spec: &ColumnSpec) -> Option<&'a RawCell> {
    for candidate in spec.candidates {
        if let Some(cell) = row.get(*candidate) {
            return Some(cell);
        }
    }
    None
}

/// Find a column spec by canonical field name
///
/// Panics on unknown names; profile tables are static and the call
/// sites are compiled against them.
pub fn column<'a>(columns: &'a [ColumnSpec], field: &str) -> &'a ColumnSpec {
    columns
        .iter()
        .find(|c| c.field == field)
        .unwrap_or_else(|| panic!("unknown profile column: {}", field))
}

// ==========================================
// Shared field extraction
// ==========================================
// The three row mappers funnel through these so that missing-field
// collection and date-failure reporting behave identically.

/// Required text field; pushes the human header onto `missing` when
/// the cell is absent or blank
pub fn required_text(
    row: &RawRow,
    columns: &[ColumnSpec],
    field: &str,
    missing: &mut Vec<String>,
) -> String {
    let spec = column(columns, field);
    match normalize::opt_string(lookup(row, spec)) {
        Some(value) => value,
        None => {
            missing.push(spec.display_header().to_string());
            String::new()
        }
    }
}

/// Optional text field; `None` on absent/blank
pub fn optional_text(row: &RawRow, columns: &[ColumnSpec], field: &str) -> Option<String> {
    normalize::opt_string(lookup(row, column(columns, field)))
}

/// Numeric field with default-on-empty coercion; never errors
pub fn number_or(row: &RawRow, columns: &[ColumnSpec], field: &str, default: f64) -> f64 {
    normalize::as_number(lookup(row, column(columns, field)), default)
}

/// Required date field
///
/// Absent/blank counts as a missing field (collected alongside the
/// text fields); a present-but-unparseable value is an InvalidDate
/// row error, never a silent default.
pub fn required_date(
    row: &RawRow,
    columns: &[ColumnSpec],
    field: &str,
    missing: &mut Vec<String>,
) -> Result<Option<NaiveDateTime>, ImportError> {
    let spec = column(columns, field);
    match normalize::as_date(lookup(row, spec)) {
        Ok(Some(dt)) => Ok(Some(dt)),
        Ok(None) => {
            missing.push(spec.display_header().to_string());
            Ok(None)
        }
        Err(e) => Err(ImportError::InvalidDate {
            field: spec.display_header().to_string(),
            value: e.value,
        }),
    }
}

/// Optional date field; absent/blank is `None`, malformed is an error
pub fn optional_date(
    row: &RawRow,
    columns: &[ColumnSpec],
    field: &str,
) -> Result<Option<NaiveDateTime>, ImportError> {
    let spec = column(columns, field);
    normalize::as_date(lookup(row, spec)).map_err(|e| ImportError::InvalidDate {
        field: spec.display_header().to_string(),
        value: e.value,
    })
}
