// ==========================================
// Safety Operations Platform - SQLite connection init
// ==========================================
// Goals:
// - One place for Connection::open PRAGMA behavior, so every module
//   gets the same foreign-key and busy-timeout settings
// - Schema bootstrap for the three import target tables
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// Default busy_timeout (milliseconds)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Apply the unified PRAGMA set to a connection
///
/// foreign_keys and busy_timeout are per-connection settings and must
/// be applied to every connection we open.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a SQLite connection with the unified configuration
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Create the import target tables if they do not exist
///
/// Natural keys are enforced as PRIMARY KEY / UNIQUE so a bad upsert
/// path surfaces as a constraint error instead of a silent duplicate.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS incident_report (
            report_number TEXT PRIMARY KEY,
            observer TEXT NOT NULL,
            employee_name TEXT NOT NULL,
            division TEXT NOT NULL,
            home_plant TEXT NOT NULL,
            hire_date TEXT NOT NULL,
            supervisor TEXT NOT NULL,
            event_type TEXT NOT NULL,
            incident_at TEXT NOT NULL,
            location TEXT NOT NULL,
            preventability TEXT NOT NULL,
            event_category TEXT NOT NULL,
            shift TEXT,
            job_title TEXT,
            description TEXT,
            corrective_action TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS driver_telemetry (
            driver_id TEXT PRIMARY KEY,
            driver_name TEXT NOT NULL,
            safety_score REAL NOT NULL,
            drive_time_hours REAL NOT NULL,
            total_distance REAL NOT NULL,
            total_events REAL NOT NULL,
            light_speeding REAL NOT NULL,
            moderate_speeding REAL NOT NULL,
            heavy_speeding REAL NOT NULL,
            severe_speeding REAL NOT NULL,
            harsh_accel REAL NOT NULL,
            harsh_brake REAL NOT NULL,
            harsh_turn REAL NOT NULL,
            seatbelt_events REAL NOT NULL,
            phone_usage REAL NOT NULL,
            week_start TEXT,
            week_end TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS training_record (
            employee_id TEXT NOT NULL,
            employee_name TEXT NOT NULL,
            training_type TEXT NOT NULL,
            training_name TEXT NOT NULL,
            required_by TEXT NOT NULL,
            completed_on TEXT,
            expires_on TEXT,
            status TEXT NOT NULL,
            instructor TEXT,
            hours REAL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            PRIMARY KEY (employee_id, training_type, training_name)
        );
        "#,
    )?;
    Ok(())
}
