// ==========================================
// Safety Operations Platform - Incident SQLite store
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::incident::IncidentRecord;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::sqlite::{
    date_to_text, datetime_to_text, lock_conn, text_to_date, text_to_datetime, text_to_utc,
    utc_to_text,
};
use crate::repository::store::RecordStore;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str = "report_number, observer, employee_name, division, home_plant, \
     hire_date, supervisor, event_type, incident_at, location, preventability, \
     event_category, shift, job_title, description, corrective_action, created_at, updated_at";

// ==========================================
// SqliteIncidentStore
// ==========================================
pub struct SqliteIncidentStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteIncidentStore {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Share an already-configured connection
    pub fn with_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<RawStoredIncident> {
    Ok(RawStoredIncident {
        report_number: row.get(0)?,
        observer: row.get(1)?,
        employee_name: row.get(2)?,
        division: row.get(3)?,
        home_plant: row.get(4)?,
        hire_date: row.get(5)?,
        supervisor: row.get(6)?,
        event_type: row.get(7)?,
        incident_at: row.get(8)?,
        location: row.get(9)?,
        preventability: row.get(10)?,
        event_category: row.get(11)?,
        shift: row.get(12)?,
        job_title: row.get(13)?,
        description: row.get(14)?,
        corrective_action: row.get(15)?,
        created_at: row.get(16)?,
        updated_at: row.get(17)?,
    })
}

// Intermediate shape: dates still TEXT, decoded outside the rusqlite
// closure so codec failures map to RepositoryError
struct RawStoredIncident {
    report_number: String,
    observer: String,
    employee_name: String,
    division: String,
    home_plant: String,
    hire_date: String,
    supervisor: String,
    event_type: String,
    incident_at: String,
    location: String,
    preventability: String,
    event_category: String,
    shift: Option<String>,
    job_title: Option<String>,
    description: Option<String>,
    corrective_action: Option<String>,
    created_at: String,
    updated_at: String,
}

impl RawStoredIncident {
    fn decode(self) -> RepositoryResult<IncidentRecord> {
        Ok(IncidentRecord {
            report_number: self.report_number,
            observer: self.observer,
            employee_name: self.employee_name,
            division: self.division,
            home_plant: self.home_plant,
            hire_date: text_to_date(&self.hire_date)?,
            supervisor: self.supervisor,
            event_type: self.event_type,
            incident_at: text_to_datetime(&self.incident_at)?,
            location: self.location,
            preventability: self.preventability,
            event_category: self.event_category,
            shift: self.shift,
            job_title: self.job_title,
            description: self.description,
            corrective_action: self.corrective_action,
            created_at: text_to_utc(&self.created_at)?,
            updated_at: text_to_utc(&self.updated_at)?,
        })
    }
}

#[async_trait]
impl RecordStore for SqliteIncidentStore {
    type Record = IncidentRecord;

    async fn find_by_key(&self, key: &String) -> RepositoryResult<Option<IncidentRecord>> {
        let conn = lock_conn(&self.conn)?;
        let sql = format!(
            "SELECT {} FROM incident_report WHERE report_number = ?1",
            SELECT_COLUMNS
        );
        let raw = conn
            .query_row(&sql, params![key], row_to_record)
            .optional()?;
        drop(conn);
        raw.map(RawStoredIncident::decode).transpose()
    }

    async fn insert(&self, record: IncidentRecord) -> RepositoryResult<()> {
        let conn = lock_conn(&self.conn)?;
        conn.execute(
            r#"
            INSERT INTO incident_report (
                report_number, observer, employee_name, division, home_plant,
                hire_date, supervisor, event_type, incident_at, location,
                preventability, event_category, shift, job_title, description,
                corrective_action, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18
            )
            "#,
            params![
                record.report_number,
                record.observer,
                record.employee_name,
                record.division,
                record.home_plant,
                date_to_text(record.hire_date),
                record.supervisor,
                record.event_type,
                datetime_to_text(record.incident_at),
                record.location,
                record.preventability,
                record.event_category,
                record.shift,
                record.job_title,
                record.description,
                record.corrective_action,
                utc_to_text(record.created_at),
                utc_to_text(record.updated_at),
            ],
        )?;
        Ok(())
    }

    async fn update_by_key(&self, key: &String, record: IncidentRecord) -> RepositoryResult<()> {
        let conn = lock_conn(&self.conn)?;
        conn.execute(
            r#"
            UPDATE incident_report SET
                report_number = ?1, observer = ?2, employee_name = ?3,
                division = ?4, home_plant = ?5, hire_date = ?6,
                supervisor = ?7, event_type = ?8, incident_at = ?9,
                location = ?10, preventability = ?11, event_category = ?12,
                shift = ?13, job_title = ?14, description = ?15,
                corrective_action = ?16, updated_at = ?17
            WHERE report_number = ?18
            "#,
            params![
                record.report_number,
                record.observer,
                record.employee_name,
                record.division,
                record.home_plant,
                date_to_text(record.hire_date),
                record.supervisor,
                record.event_type,
                datetime_to_text(record.incident_at),
                record.location,
                record.preventability,
                record.event_category,
                record.shift,
                record.job_title,
                record.description,
                record.corrective_action,
                utc_to_text(record.updated_at),
                key,
            ],
        )?;
        Ok(())
    }
}
