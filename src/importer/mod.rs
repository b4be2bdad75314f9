// ==========================================
// Safety Operations Platform - Import layer
// ==========================================
// Bulk ingestion of external spreadsheet exports
// Flow: decode -> column gate -> map -> reconcile -> summarize
// Supports: CSV, Excel (.xlsx/.xls)
// ==========================================

// Module declarations
pub mod error;
pub mod file_parser;
pub mod incident;
pub mod normalize;
pub mod pipeline;
pub mod profile;
pub mod schema;
pub mod summary;
pub mod telemetry;
pub mod training;
pub mod upsert;

// Re-export core types
pub use error::{ImportError, ImportPipelineResult};
pub use file_parser::{DecodedTable, RawCell, RawRow};
pub use pipeline::{DriverTelemetryImporter, IncidentImporter, TrainingImporter};
pub use profile::ColumnSpec;
pub use summary::{ImportOutcome, ImportSummary};
pub use upsert::UpsertOutcome;
