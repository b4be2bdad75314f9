// ==========================================
// SQLite store - integration tests
// ==========================================
// Runs the import pipeline against real database files and checks
// the stored rows round-trip through the TEXT date codecs.
// ==========================================

mod test_helpers;

use chrono::NaiveDate;
use safety_ops::importer::{DriverTelemetryImporter, IncidentImporter, TrainingImporter};
use safety_ops::repository::{
    RecordStore, SqliteIncidentStore, SqliteTelemetryStore, SqliteTrainingStore,
};
use safety_ops::TrainingStatus;

const INCIDENT_CSV: &str = "\
Report Number,Observer,Employee Name,Division,Home Plant,Hire Date,Supervisor,Event Type,Date/Time of Incident,Location,Preventability,Event Category
IR-1,O1,E1,North,Plant 7,2019-05-20,S1,Near Miss,2024-03-15T08:30:00,Yard,Preventable,Vehicle
IR-2,O2,E2,South,Plant 2,2020-01-02,S2,Injury,2024-03-16 10:00:00,Dock,Non-Preventable,Slip
";

#[tokio::test]
async fn test_incident_import_persists_and_reimports() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let store = SqliteIncidentStore::new(&db_path).unwrap();
    let importer = IncidentImporter::new(store);

    let first = importer
        .import("incidents.csv", INCIDENT_CSV.as_bytes())
        .await
        .unwrap();
    assert_eq!(first.imported, 2);

    let second = importer
        .import("incidents.csv", INCIDENT_CSV.as_bytes())
        .await
        .unwrap();
    assert_eq!(second.imported, 0);
    assert_eq!(second.updated, 2);

    // Round-trip through the TEXT codecs
    let reopened = SqliteIncidentStore::new(&db_path).unwrap();
    let record = reopened
        .find_by_key(&"IR-1".to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.observer, "O1");
    assert_eq!(
        record.hire_date,
        NaiveDate::from_ymd_opt(2019, 5, 20).unwrap()
    );
    assert_eq!(record.incident_at.to_string(), "2024-03-15 08:30:00");
}

#[tokio::test]
async fn test_training_composite_key_lookup() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let store = SqliteTrainingStore::new(&db_path).unwrap();
    let importer = TrainingImporter::new(store);

    let csv = "\
Employee ID,Employee Name,Training Type,Training Name,Required By,Completion Date
E-1,Alice,Safety,Forklift,2025-12-01,2026-01-10
E-1,Alice,Safety,Lockout/Tagout,2025-12-01,
";
    let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
    let summary = importer
        .import_as_of("training.csv", csv.as_bytes(), today)
        .await
        .unwrap();
    assert_eq!(summary.imported, 2);

    let reopened = SqliteTrainingStore::new(&db_path).unwrap();
    let completed = reopened
        .find_by_key(&(
            "E-1".to_string(),
            "Safety".to_string(),
            "Forklift".to_string(),
        ))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(completed.status, TrainingStatus::Completed);
    assert_eq!(
        completed.completed_on,
        Some(NaiveDate::from_ymd_opt(2026, 1, 10).unwrap())
    );

    let overdue = reopened
        .find_by_key(&(
            "E-1".to_string(),
            "Safety".to_string(),
            "Lockout/Tagout".to_string(),
        ))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(overdue.status, TrainingStatus::Overdue);
}

#[tokio::test]
async fn test_telemetry_update_replaces_snapshot() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let store = SqliteTelemetryStore::new(&db_path).unwrap();
    let importer = DriverTelemetryImporter::new(store);

    let week_one = "\
Driver ID,Driver Name,Safety Score,Drive Time (hrs),Total Distance,Total Events,Heavy Speeding
D-1,Alice,92.5,38,1650,8,2
";
    let week_two = "\
Driver ID,Driver Name,Safety Score,Drive Time (hrs),Total Distance,Total Events
D-1,Alice,85.0,44,2010,15
";

    importer.import("w1.csv", week_one.as_bytes()).await.unwrap();
    importer.import("w2.csv", week_two.as_bytes()).await.unwrap();

    let reopened = SqliteTelemetryStore::new(&db_path).unwrap();
    let record = reopened
        .find_by_key(&"D-1".to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.safety_score, 85.0);
    // Whole-snapshot replace: breakdown from week one is gone
    assert_eq!(record.speeding.heavy, 0.0);
    assert_eq!(record.week_start, None);

    let absent = reopened.find_by_key(&"D-404".to_string()).await.unwrap();
    assert!(absent.is_none());
}
