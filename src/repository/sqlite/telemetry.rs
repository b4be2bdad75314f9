// ==========================================
// Safety Operations Platform - Driver telemetry SQLite store
// ==========================================
// Singleton row per driver: update replaces the whole snapshot.
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::telemetry::{BehaviorEvents, DriverTelemetryRecord, SpeedingBreakdown};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::sqlite::{
    lock_conn, opt_date_to_text, opt_text_to_date, text_to_utc, utc_to_text,
};
use crate::repository::store::RecordStore;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str = "driver_id, driver_name, safety_score, drive_time_hours, \
     total_distance, total_events, light_speeding, moderate_speeding, heavy_speeding, \
     severe_speeding, harsh_accel, harsh_brake, harsh_turn, seatbelt_events, phone_usage, \
     week_start, week_end, created_at, updated_at";

// ==========================================
// SqliteTelemetryStore
// ==========================================
pub struct SqliteTelemetryStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTelemetryStore {
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

struct RawStoredTelemetry {
    driver_id: String,
    driver_name: String,
    safety_score: f64,
    drive_time_hours: f64,
    total_distance: f64,
    total_events: f64,
    light_speeding: f64,
    moderate_speeding: f64,
    heavy_speeding: f64,
    severe_speeding: f64,
    harsh_accel: f64,
    harsh_brake: f64,
    harsh_turn: f64,
    seatbelt_events: f64,
    phone_usage: f64,
    week_start: Option<String>,
    week_end: Option<String>,
    created_at: String,
    updated_at: String,
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<RawStoredTelemetry> {
    Ok(RawStoredTelemetry {
        driver_id: row.get(0)?,
        driver_name: row.get(1)?,
        safety_score: row.get(2)?,
        drive_time_hours: row.get(3)?,
        total_distance: row.get(4)?,
        total_events: row.get(5)?,
        light_speeding: row.get(6)?,
        moderate_speeding: row.get(7)?,
        heavy_speeding: row.get(8)?,
        severe_speeding: row.get(9)?,
        harsh_accel: row.get(10)?,
        harsh_brake: row.get(11)?,
        harsh_turn: row.get(12)?,
        seatbelt_events: row.get(13)?,
        phone_usage: row.get(14)?,
        week_start: row.get(15)?,
        week_end: row.get(16)?,
        created_at: row.get(17)?,
        updated_at: row.get(18)?,
    })
}

impl RawStoredTelemetry {
    fn decode(self) -> RepositoryResult<DriverTelemetryRecord> {
        Ok(DriverTelemetryRecord {
            driver_id: self.driver_id,
            driver_name: self.driver_name,
            safety_score: self.safety_score,
            drive_time_hours: self.drive_time_hours,
            total_distance: self.total_distance,
            total_events: self.total_events,
            speeding: SpeedingBreakdown {
                light: self.light_speeding,
                moderate: self.moderate_speeding,
                heavy: self.heavy_speeding,
                severe: self.severe_speeding,
            },
            behavior: BehaviorEvents {
                harsh_accel: self.harsh_accel,
                harsh_brake: self.harsh_brake,
                harsh_turn: self.harsh_turn,
                seatbelt: self.seatbelt_events,
                phone_usage: self.phone_usage,
            },
            week_start: opt_text_to_date(self.week_start)?,
            week_end: opt_text_to_date(self.week_end)?,
            created_at: text_to_utc(&self.created_at)?,
            updated_at: text_to_utc(&self.updated_at)?,
        })
    }
}

#[async_trait]
impl RecordStore for SqliteTelemetryStore {
    type Record = DriverTelemetryRecord;

    async fn find_by_key(&self, key: &String) -> RepositoryResult<Option<DriverTelemetryRecord>> {
        let conn = lock_conn(&self.conn)?;
        let sql = format!(
            "SELECT {} FROM driver_telemetry WHERE driver_id = ?1",
            SELECT_COLUMNS
        );
        let raw = conn
            .query_row(&sql, params![key], row_to_record)
            .optional()?;
        drop(conn);
        raw.map(RawStoredTelemetry::decode).transpose()
    }

    async fn insert(&self, record: DriverTelemetryRecord) -> RepositoryResult<()> {
        let conn = lock_conn(&self.conn)?;
        conn.execute(
            r#"
            INSERT INTO driver_telemetry (
                driver_id, driver_name, safety_score, drive_time_hours,
                total_distance, total_events, light_speeding, moderate_speeding,
                heavy_speeding, severe_speeding, harsh_accel, harsh_brake,
                harsh_turn, seatbelt_events, phone_usage, week_start, week_end,
                created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19
            )
            "#,
            params![
                record.driver_id,
                record.driver_name,
                record.safety_score,
                record.drive_time_hours,
                record.total_distance,
                record.total_events,
                record.speeding.light,
                record.speeding.moderate,
                record.speeding.heavy,
                record.speeding.severe,
                record.behavior.harsh_accel,
                record.behavior.harsh_brake,
                record.behavior.harsh_turn,
                record.behavior.seatbelt,
                record.behavior.phone_usage,
                opt_date_to_text(record.week_start),
                opt_date_to_text(record.week_end),
                utc_to_text(record.created_at),
                utc_to_text(record.updated_at),
            ],
        )?;
        Ok(())
    }

    async fn update_by_key(
        &self,
        key: &String,
        record: DriverTelemetryRecord,
    ) -> RepositoryResult<()> {
        let conn = lock_conn(&self.conn)?;
        conn.execute(
            r#"
            UPDATE driver_telemetry SET
                driver_id = ?1, driver_name = ?2, safety_score = ?3,
                drive_time_hours = ?4, total_distance = ?5, total_events = ?6,
                light_speeding = ?7, moderate_speeding = ?8, heavy_speeding = ?9,
                severe_speeding = ?10, harsh_accel = ?11, harsh_brake = ?12,
                harsh_turn = ?13, seatbelt_events = ?14, phone_usage = ?15,
                week_start = ?16, week_end = ?17, updated_at = ?18
            WHERE driver_id = ?19
            "#,
            params![
                record.driver_id,
                record.driver_name,
                record.safety_score,
                record.drive_time_hours,
                record.total_distance,
                record.total_events,
                record.speeding.light,
                record.speeding.moderate,
                record.speeding.heavy,
                record.speeding.severe,
                record.behavior.harsh_accel,
                record.behavior.harsh_brake,
                record.behavior.harsh_turn,
                record.behavior.seatbelt,
                record.behavior.phone_usage,
                opt_date_to_text(record.week_start),
                opt_date_to_text(record.week_end),
                utc_to_text(record.updated_at),
                key,
            ],
        )?;
        Ok(())
    }
}
