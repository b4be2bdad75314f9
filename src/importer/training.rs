// ==========================================
// Safety Operations Platform - Training row mapper
// ==========================================
// Maps one decoded row onto TrainingRecord and derives the compliance
// status from the row's dates as of `today`.
// ==========================================

use crate::domain::training::TrainingRecord;
use crate::domain::types::TrainingStatus;
use crate::importer::error::ImportError;
use crate::importer::file_parser::RawRow;
use crate::importer::profile::{self, ColumnSpec};
use chrono::{DateTime, NaiveDate, Utc};

// ==========================================
// Column table
// ==========================================
pub const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        field: "employee_id",
        candidates: &["employeeId", "Employee ID"],
        required: true,
    },
    ColumnSpec {
        field: "employee_name",
        candidates: &["employeeName", "Employee Name"],
        required: true,
    },
    ColumnSpec {
        field: "training_type",
        candidates: &["trainingType", "Training Type"],
        required: true,
    },
    ColumnSpec {
        field: "training_name",
        candidates: &["trainingName", "Training Name"],
        required: true,
    },
    ColumnSpec {
        field: "required_by",
        candidates: &["requiredBy", "Required By"],
        required: true,
    },
    ColumnSpec {
        field: "completed_on",
        candidates: &["completionDate", "Completion Date"],
        required: false,
    },
    ColumnSpec {
        field: "expires_on",
        candidates: &["expirationDate", "Expiration Date"],
        required: false,
    },
    ColumnSpec {
        field: "instructor",
        candidates: &["instructor", "Instructor"],
        required: false,
    },
    ColumnSpec {
        field: "hours",
        candidates: &["hours", "Hours"],
        required: false,
    },
];

/// Map one raw row onto a TrainingRecord, deriving status as of `today`
pub fn map_row(
    row: &RawRow,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Result<TrainingRecord, ImportError> {
    let mut missing = Vec::new();

    let employee_id = profile::required_text(row, COLUMNS, "employee_id", &mut missing);
    let employee_name = profile::required_text(row, COLUMNS, "employee_name", &mut missing);
    let training_type = profile::required_text(row, COLUMNS, "training_type", &mut missing);
    let training_name = profile::required_text(row, COLUMNS, "training_name", &mut missing);
    let required_by = profile::required_date(row, COLUMNS, "required_by", &mut missing)?;

    if !missing.is_empty() {
        return Err(ImportError::MissingRequiredFields(missing));
    }

    let required_by = required_by
        .map(|dt| dt.date())
        .ok_or_else(|| ImportError::InternalError("required-by date lost after validation".into()))?;

    let completed_on = profile::optional_date(row, COLUMNS, "completed_on")?.map(|dt| dt.date());
    let expires_on = profile::optional_date(row, COLUMNS, "expires_on")?.map(|dt| dt.date());

    let hours = match profile::optional_text(row, COLUMNS, "hours") {
        Some(_) => Some(profile::number_or(row, COLUMNS, "hours", 0.0)),
        None => None,
    };

    let status = TrainingStatus::derive(required_by, completed_on, expires_on, today);

    Ok(TrainingRecord {
        employee_id,
        training_type,
        training_name,
        employee_name,
        required_by,
        completed_on,
        expires_on,
        instructor: profile::optional_text(row, COLUMNS, "instructor"),
        hours,
        status,
        created_at: now,
        updated_at: now,
    })
}
