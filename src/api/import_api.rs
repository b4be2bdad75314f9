// ==========================================
// Safety Operations Platform - Import API
// ==========================================
// One thin handler per import profile. The request boundary hands us
// the raw bytes and the declared file name; everything else comes
// from the configured data source.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::DataSource;
use crate::db;
use crate::domain::incident::IncidentRecord;
use crate::domain::telemetry::DriverTelemetryRecord;
use crate::domain::training::TrainingRecord;
use crate::importer::{
    DriverTelemetryImporter, ImportSummary, IncidentImporter, TrainingImporter,
};
use crate::repository::sqlite::{SqliteIncidentStore, SqliteTelemetryStore, SqliteTrainingStore};
use crate::repository::InMemoryStore;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Import API response: the summary plus call timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportApiResponse {
    #[serde(flatten)]
    pub summary: ImportSummary,
    /// Import duration (milliseconds)
    pub elapsed_ms: i64,
}

// ==========================================
// ImportApi
// ==========================================
// In-memory stores are held for the API's lifetime so the mock data
// source keeps records across calls; SQLite stores are opened per
// call against the configured path.
pub struct ImportApi {
    source: DataSource,
    mem_incidents: InMemoryStore<IncidentRecord>,
    mem_telemetry: InMemoryStore<DriverTelemetryRecord>,
    mem_training: InMemoryStore<TrainingRecord>,
}

impl ImportApi {
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            mem_incidents: InMemoryStore::new(),
            mem_telemetry: InMemoryStore::new(),
            mem_training: InMemoryStore::new(),
        }
    }

    pub fn data_source(&self) -> &DataSource {
        &self.source
    }

    /// Open the configured database and make sure the target tables
    /// exist
    fn open_database(db_path: &str) -> ApiResult<Arc<Mutex<Connection>>> {
        let conn = db::open_sqlite_connection(db_path)
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;
        db::init_schema(&conn).map_err(|e| ApiError::DatabaseError(e.to_string()))?;
        Ok(Arc::new(Mutex::new(conn)))
    }

    /// Import one incident export file
    pub async fn import_incidents(
        &self,
        file_name: &str,
        bytes: &[u8],
    ) -> ApiResult<ImportApiResponse> {
        let start = Instant::now();
        let summary = match &self.source {
            DataSource::InMemory => {
                IncidentImporter::new(self.mem_incidents.clone())
                    .import(file_name, bytes)
                    .await?
            }
            DataSource::Sqlite { db_path } => {
                let conn = Self::open_database(db_path)?;
                IncidentImporter::new(SqliteIncidentStore::with_connection(conn))
                    .import(file_name, bytes)
                    .await?
            }
        };
        Ok(ImportApiResponse {
            summary,
            elapsed_ms: start.elapsed().as_millis() as i64,
        })
    }

    /// Import one driver-telemetry export file
    pub async fn import_telemetry(
        &self,
        file_name: &str,
        bytes: &[u8],
    ) -> ApiResult<ImportApiResponse> {
        let start = Instant::now();
        let summary = match &self.source {
            DataSource::InMemory => {
                DriverTelemetryImporter::new(self.mem_telemetry.clone())
                    .import(file_name, bytes)
                    .await?
            }
            DataSource::Sqlite { db_path } => {
                let conn = Self::open_database(db_path)?;
                DriverTelemetryImporter::new(SqliteTelemetryStore::with_connection(conn))
                    .import(file_name, bytes)
                    .await?
            }
        };
        Ok(ImportApiResponse {
            summary,
            elapsed_ms: start.elapsed().as_millis() as i64,
        })
    }

    /// Import one training export file
    pub async fn import_training(
        &self,
        file_name: &str,
        bytes: &[u8],
    ) -> ApiResult<ImportApiResponse> {
        let start = Instant::now();
        let summary = match &self.source {
            DataSource::InMemory => {
                TrainingImporter::new(self.mem_training.clone())
                    .import(file_name, bytes)
                    .await?
            }
            DataSource::Sqlite { db_path } => {
                let conn = Self::open_database(db_path)?;
                TrainingImporter::new(SqliteTrainingStore::with_connection(conn))
                    .import(file_name, bytes)
                    .await?
            }
        };
        Ok(ImportApiResponse {
            summary,
            elapsed_ms: start.elapsed().as_millis() as i64,
        })
    }
}
