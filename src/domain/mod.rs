// ==========================================
// Safety Operations Platform - Domain layer
// ==========================================
// Responsibility: business-typed records produced by the import
// pipeline and read by the reporting surface
// ==========================================

pub mod incident;
pub mod telemetry;
pub mod training;
pub mod types;

pub use incident::IncidentRecord;
pub use telemetry::{BehaviorEvents, DriverTelemetryRecord, SpeedingBreakdown};
pub use training::TrainingRecord;
pub use types::{NaturalKey, TrainingStatus};
