// ==========================================
// Safety Operations Platform - SQLite stores
// ==========================================
// One store per import target table, all sharing the unified
// connection setup from db.rs. Dates are stored as TEXT:
// calendar dates as %Y-%m-%d, local timestamps as %Y-%m-%d %H:%M:%S,
// audit timestamps as RFC 3339.
// ==========================================

pub mod incident;
pub mod telemetry;
pub mod training;

pub use incident::SqliteIncidentStore;
pub use telemetry::SqliteTelemetryStore;
pub use training::SqliteTrainingStore;

use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) fn lock_conn(
    conn: &Arc<Mutex<Connection>>,
) -> RepositoryResult<MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|e| RepositoryError::LockError(e.to_string()))
}

// ===== TEXT <-> chrono codecs =====

pub(crate) fn date_to_text(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn text_to_date(raw: &str) -> RepositoryResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| RepositoryError::QueryError(format!("stored date '{}' invalid: {}", raw, e)))
}

pub(crate) fn datetime_to_text(dt: NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

pub(crate) fn text_to_datetime(raw: &str) -> RepositoryResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT).map_err(|e| {
        RepositoryError::QueryError(format!("stored timestamp '{}' invalid: {}", raw, e))
    })
}

pub(crate) fn utc_to_text(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

pub(crate) fn text_to_utc(raw: &str) -> RepositoryResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            RepositoryError::QueryError(format!("stored audit time '{}' invalid: {}", raw, e))
        })
}

pub(crate) fn opt_date_to_text(date: Option<NaiveDate>) -> Option<String> {
    date.map(date_to_text)
}

pub(crate) fn opt_text_to_date(raw: Option<String>) -> RepositoryResult<Option<NaiveDate>> {
    raw.map(|s| text_to_date(&s)).transpose()
}
