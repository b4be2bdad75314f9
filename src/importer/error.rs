// ==========================================
// Safety Operations Platform - Import error types
// ==========================================
// Two severities:
// - whole-file errors abort the import before any row is written
// - row-level errors are caught per row and folded into the summary
// ==========================================

use thiserror::Error;

/// Import pipeline error type
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== Whole-file errors (no rows processed) =====
    #[error("unsupported file format: {0} (expected .csv/.xlsx/.xls)")]
    UnsupportedFormat(String),

    #[error("file contains no data rows")]
    EmptyFile,

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("spreadsheet parse failed: {0}")]
    ExcelParseError(String),

    #[error("CSV parse failed: {0}")]
    CsvParseError(String),

    // ===== Row-level errors (isolated per row) =====
    // Display text deliberately omits the row number; the result
    // aggregator prefixes "Row {n}: " when recording the outcome.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingRequiredFields(Vec<String>),

    #[error("invalid date for {field}: {value}")]
    InvalidDate { field: String, value: String },

    // ===== Generic =====
    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// Whole-file errors abort the import; everything else is
    /// recorded against a single row and processing continues.
    pub fn is_whole_file(&self) -> bool {
        matches!(
            self,
            ImportError::UnsupportedFormat(_)
                | ImportError::EmptyFile
                | ImportError::MissingColumns(_)
                | ImportError::ExcelParseError(_)
                | ImportError::CsvParseError(_)
        )
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

impl From<calamine::XlsError> for ImportError {
    fn from(err: calamine::XlsError) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result alias for the import pipeline
pub type ImportPipelineResult<T> = Result<T, ImportError>;
