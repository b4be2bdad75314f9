// ==========================================
// Safety Operations Platform - Import pipeline
// ==========================================
// One importer per profile, wired the same way:
// decode -> column gate -> per-row { map -> reconcile -> aggregate }
// Rows run strictly in sequence so a later row with the same natural
// key observes the earlier row's write. Row failures never abort the
// file; decode and column failures abort before any write.
// ==========================================

use crate::domain::incident::IncidentRecord;
use crate::domain::telemetry::DriverTelemetryRecord;
use crate::domain::training::TrainingRecord;
use crate::importer::error::ImportError;
use crate::importer::file_parser::{self, RawRow};
use crate::importer::profile::ColumnSpec;
use crate::importer::schema;
use crate::importer::summary::{ImportOutcome, ImportSummary};
use crate::importer::upsert::{self, UpsertOutcome};
use crate::importer::{incident, telemetry, training};
use crate::repository::store::RecordStore;
use chrono::{DateTime, Local, NaiveDate, Utc};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// Shared per-file driver
// ==========================================
async fn run_import<S, F>(
    store: &S,
    file_name: &str,
    bytes: &[u8],
    columns: &[ColumnSpec],
    map: F,
) -> Result<ImportSummary, ImportError>
where
    S: RecordStore,
    F: Fn(&RawRow, DateTime<Utc>) -> Result<S::Record, ImportError>,
{
    let start_time = Instant::now();
    let batch_id = Uuid::new_v4().to_string();
    let now = Utc::now();

    info!(batch_id = %batch_id, file_name = %file_name, size = bytes.len(), "import started");

    // === Step 1: decode the file ===
    debug!("step 1: decode");
    let table = file_parser::decode(file_name, bytes)?;
    info!(total_rows = table.rows.len(), "file decoded");

    // === Step 2: required-column gate (whole-file) ===
    debug!("step 2: validate columns");
    schema::validate_columns(&table.headers, columns)?;

    // === Step 3: map + reconcile, row by row ===
    debug!("step 3: process rows");
    let mut summary = ImportSummary::new(table.rows.len());
    for row in &table.rows {
        let outcome = match map(row, now) {
            Ok(record) => match upsert::reconcile(store, record).await {
                Ok(UpsertOutcome::Imported) => ImportOutcome::Imported,
                Ok(UpsertOutcome::Updated) => ImportOutcome::Updated,
                Err(e) => {
                    warn!(batch_id = %batch_id, error = %e, "store write failed");
                    ImportOutcome::Errored(e.to_string())
                }
            },
            Err(e) => {
                warn!(batch_id = %batch_id, error = %e, "row rejected");
                ImportOutcome::Errored(e.to_string())
            }
        };
        summary.record(outcome);
    }

    info!(
        batch_id = %batch_id,
        imported = summary.imported,
        updated = summary.updated,
        errors = summary.errors,
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "import finished"
    );
    Ok(summary)
}

// ==========================================
// IncidentImporter
// ==========================================
pub struct IncidentImporter<S> {
    store: S,
}

impl<S> IncidentImporter<S>
where
    S: RecordStore<Record = IncidentRecord>,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Import one incident export file
    #[instrument(skip(self, bytes))]
    pub async fn import(
        &self,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<ImportSummary, ImportError> {
        run_import(&self.store, file_name, bytes, incident::COLUMNS, |row, now| {
            incident::map_row(row, now)
        })
        .await
    }
}

// ==========================================
// DriverTelemetryImporter
// ==========================================
pub struct DriverTelemetryImporter<S> {
    store: S,
}

impl<S> DriverTelemetryImporter<S>
where
    S: RecordStore<Record = DriverTelemetryRecord>,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Import one driver-telemetry export file
    ///
    /// Keyed by driver id alone: each import overwrites the driver's
    /// current snapshot rather than appending a time-series point.
    #[instrument(skip(self, bytes))]
    pub async fn import(
        &self,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<ImportSummary, ImportError> {
        run_import(&self.store, file_name, bytes, telemetry::COLUMNS, |row, now| {
            telemetry::map_row(row, now)
        })
        .await
    }
}

// ==========================================
// TrainingImporter
// ==========================================
pub struct TrainingImporter<S> {
    store: S,
}

impl<S> TrainingImporter<S>
where
    S: RecordStore<Record = TrainingRecord>,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Import one training export file; status derivation uses the
    /// local calendar date at call entry
    pub async fn import(
        &self,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<ImportSummary, ImportError> {
        self.import_as_of(file_name, bytes, Local::now().date_naive())
            .await
    }

    /// Import with an explicit `today`, so one file derives every
    /// status against the same date
    #[instrument(skip(self, bytes))]
    pub async fn import_as_of(
        &self,
        file_name: &str,
        bytes: &[u8],
        today: NaiveDate,
    ) -> Result<ImportSummary, ImportError> {
        run_import(&self.store, file_name, bytes, training::COLUMNS, |row, now| {
            training::map_row(row, today, now)
        })
        .await
    }
}
