// ==========================================
// Test helpers
// ==========================================
// Temp database setup shared by the integration tests.
// ==========================================

use rusqlite::Connection;
use std::error::Error;
use tempfile::NamedTempFile;

/// Create a temp database file with the import target tables
///
/// Returns the NamedTempFile (keep it alive) and the path.
#[allow(dead_code)]
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("temp path is not valid UTF-8")?
        .to_string();

    let conn = Connection::open(&db_path)?;
    safety_ops::db::configure_sqlite_connection(&conn)?;
    safety_ops::db::init_schema(&conn)?;

    Ok((temp_file, db_path))
}
