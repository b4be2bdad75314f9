// ==========================================
// Safety Operations Platform - Core Library
// ==========================================
// Tech stack: Rust + SQLite
// System role: reporting backend for incidents,
// driver telemetry and training compliance
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and types
pub mod domain;

// Repository layer - data access
pub mod repository;

// Importer layer - bulk file ingestion
pub mod importer;

// Configuration layer
pub mod config;

// Database infrastructure (connection init / PRAGMA unification)
pub mod db;

// Logging
pub mod logging;

// API layer - thin request handlers
pub mod api;

// ==========================================
// Re-exports
// ==========================================

// Domain types
pub use domain::types::TrainingStatus;

// Domain entities
pub use domain::{
    BehaviorEvents, DriverTelemetryRecord, IncidentRecord, SpeedingBreakdown, TrainingRecord,
};

// Importer
pub use importer::{
    DriverTelemetryImporter, ImportError, ImportSummary, IncidentImporter, TrainingImporter,
};

// API
pub use api::ImportApi;

// ==========================================
// Constants
// ==========================================

// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// System name
pub const APP_NAME: &str = "Safety Operations Platform";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
