// ==========================================
// Safety Operations Platform - Training SQLite store
// ==========================================
// Composite natural key: (employee_id, training_type, training_name).
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::training::TrainingRecord;
use crate::domain::types::TrainingStatus;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::sqlite::{
    date_to_text, lock_conn, opt_date_to_text, opt_text_to_date, text_to_date, text_to_utc,
    utc_to_text,
};
use crate::repository::store::RecordStore;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::str::FromStr;
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str = "employee_id, training_type, training_name, employee_name, \
     required_by, completed_on, expires_on, status, instructor, hours, created_at, updated_at";

// ==========================================
// SqliteTrainingStore
// ==========================================
pub struct SqliteTrainingStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTrainingStore {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn with_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

struct RawStoredTraining {
    employee_id: String,
    training_type: String,
    training_name: String,
    employee_name: String,
    required_by: String,
    completed_on: Option<String>,
    expires_on: Option<String>,
    status: String,
    instructor: Option<String>,
    hours: Option<f64>,
    created_at: String,
    updated_at: String,
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<RawStoredTraining> {
    Ok(RawStoredTraining {
        employee_id: row.get(0)?,
        training_type: row.get(1)?,
        training_name: row.get(2)?,
        employee_name: row.get(3)?,
        required_by: row.get(4)?,
        completed_on: row.get(5)?,
        expires_on: row.get(6)?,
        status: row.get(7)?,
        instructor: row.get(8)?,
        hours: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

impl RawStoredTraining {
    fn decode(self) -> RepositoryResult<TrainingRecord> {
        let status = TrainingStatus::from_str(&self.status)
            .map_err(RepositoryError::QueryError)?;
        Ok(TrainingRecord {
            employee_id: self.employee_id,
            training_type: self.training_type,
            training_name: self.training_name,
            employee_name: self.employee_name,
            required_by: text_to_date(&self.required_by)?,
            completed_on: opt_text_to_date(self.completed_on)?,
            expires_on: opt_text_to_date(self.expires_on)?,
            instructor: self.instructor,
            hours: self.hours,
            status,
            created_at: text_to_utc(&self.created_at)?,
            updated_at: text_to_utc(&self.updated_at)?,
        })
    }
}

#[async_trait]
impl RecordStore for SqliteTrainingStore {
    type Record = TrainingRecord;

    async fn find_by_key(
        &self,
        key: &(String, String, String),
    ) -> RepositoryResult<Option<TrainingRecord>> {
        let (employee_id, training_type, training_name) = key;
        let conn = lock_conn(&self.conn)?;
        let sql = format!(
            "SELECT {} FROM training_record \
             WHERE employee_id = ?1 AND training_type = ?2 AND training_name = ?3",
            SELECT_COLUMNS
        );
        let raw = conn
            .query_row(
                &sql,
                params![employee_id, training_type, training_name],
                row_to_record,
            )
            .optional()?;
        drop(conn);
        raw.map(RawStoredTraining::decode).transpose()
    }

    async fn insert(&self, record: TrainingRecord) -> RepositoryResult<()> {
        let conn = lock_conn(&self.conn)?;
        conn.execute(
            r#"
            INSERT INTO training_record (
                employee_id, employee_name, training_type, training_name,
                required_by, completed_on, expires_on, status, instructor,
                hours, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12
            )
            "#,
            params![
                record.employee_id,
                record.employee_name,
                record.training_type,
                record.training_name,
                date_to_text(record.required_by),
                opt_date_to_text(record.completed_on),
                opt_date_to_text(record.expires_on),
                record.status.as_str(),
                record.instructor,
                record.hours,
                utc_to_text(record.created_at),
                utc_to_text(record.updated_at),
            ],
        )?;
        Ok(())
    }

    async fn update_by_key(
        &self,
        key: &(String, String, String),
        record: TrainingRecord,
    ) -> RepositoryResult<()> {
        let (employee_id, training_type, training_name) = key;
        let conn = lock_conn(&self.conn)?;
        conn.execute(
            r#"
            UPDATE training_record SET
                employee_name = ?1, required_by = ?2, completed_on = ?3,
                expires_on = ?4, status = ?5, instructor = ?6, hours = ?7,
                updated_at = ?8
            WHERE employee_id = ?9 AND training_type = ?10 AND training_name = ?11
            "#,
            params![
                record.employee_name,
                date_to_text(record.required_by),
                opt_date_to_text(record.completed_on),
                opt_date_to_text(record.expires_on),
                record.status.as_str(),
                record.instructor,
                record.hours,
                utc_to_text(record.updated_at),
                employee_id,
                training_type,
                training_name,
            ],
        )?;
        Ok(())
    }
}
