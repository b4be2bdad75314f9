// ==========================================
// Safety Operations Platform - Data access layer
// ==========================================
// The import pipeline sees only the RecordStore trait; SQLite and
// in-memory implementations live below it.
// ==========================================

// Module declarations
pub mod error;
pub mod sqlite;
pub mod store;

// Re-export core types
pub use error::{RepositoryError, RepositoryResult};
pub use sqlite::{SqliteIncidentStore, SqliteTelemetryStore, SqliteTrainingStore};
pub use store::{InMemoryStore, RecordStore};
