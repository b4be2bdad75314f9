// ==========================================
// Safety Operations Platform - Configuration
// ==========================================
// Responsibility: resolve runtime settings (database path, data
// source selection) from the environment. The import pipeline itself
// takes everything per-call and never reads ambient state.
// ==========================================

use std::env;

/// Environment variable for the SQLite database path
pub const ENV_DB_PATH: &str = "SAFETY_OPS_DB";

/// Environment variable for the data source selection
pub const ENV_DATA_SOURCE: &str = "SAFETY_OPS_DATA_SOURCE";

/// Default database file, relative to the working directory
pub const DEFAULT_DB_PATH: &str = "safety_ops.db";

// ==========================================
// DataSource - explicit store selection
// ==========================================
// The legacy client kept a mock/live toggle in client-local state.
// Here the caller picks a source explicitly and hands it to whatever
// composes the pipeline; nothing downstream consults a global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// SQLite-backed persistent store
    Sqlite { db_path: String },
    /// In-memory store (demos, tests)
    InMemory,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_source: DataSource,
}

impl AppConfig {
    /// Resolve configuration from the environment
    ///
    /// - SAFETY_OPS_DATA_SOURCE=memory selects the in-memory store
    /// - SAFETY_OPS_DB overrides the database path (default: safety_ops.db)
    pub fn from_env() -> Self {
        let data_source = match env::var(ENV_DATA_SOURCE).ok().as_deref() {
            Some("memory") => DataSource::InMemory,
            _ => DataSource::Sqlite {
                db_path: env::var(ENV_DB_PATH).unwrap_or_else(|_| DEFAULT_DB_PATH.to_string()),
            },
        };

        Self { data_source }
    }
}
