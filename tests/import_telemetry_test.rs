// ==========================================
// Driver telemetry import - integration tests
// ==========================================
// Snapshot semantics: each import overwrites the driver's current
// record; breakdown columns default to zero when absent.
// ==========================================

use safety_ops::importer::{DriverTelemetryImporter, ImportError};
use safety_ops::repository::InMemoryStore;
use safety_ops::DriverTelemetryRecord;

fn setup() -> (
    InMemoryStore<DriverTelemetryRecord>,
    DriverTelemetryImporter<InMemoryStore<DriverTelemetryRecord>>,
) {
    let store: InMemoryStore<DriverTelemetryRecord> = InMemoryStore::new();
    let importer = DriverTelemetryImporter::new(store.clone());
    (store, importer)
}

#[tokio::test]
async fn test_import_full_export() {
    let (store, importer) = setup();
    let csv = "\
Driver ID,Driver Name,Safety Score,Drive Time (hrs),Total Distance,Total Events,Heavy Speeding,Harsh Braking,Week Start,Week End
D-1,Alice,92.5,38,1650,8,2,3,2025-06-02,2025-06-08
D-2,Bob,88,41,1824,12,0,1,2025-06-02,2025-06-08
";

    let summary = importer.import("weekly.csv", csv.as_bytes()).await.unwrap();
    assert_eq!(summary.imported, 2);
    assert_eq!(summary.errors, 0);

    let alice = store.get(&"D-1".to_string()).unwrap();
    assert_eq!(alice.safety_score, 92.5);
    assert_eq!(alice.speeding.heavy, 2.0);
    assert_eq!(alice.speeding.light, 0.0);
    assert_eq!(alice.behavior.harsh_brake, 3.0);
    assert_eq!(alice.week_start.unwrap().to_string(), "2025-06-02");
}

#[tokio::test]
async fn test_later_import_overwrites_snapshot() {
    let (store, importer) = setup();
    let week_one = "\
Driver ID,Driver Name,Safety Score,Drive Time (hrs),Total Distance,Total Events
D-1,Alice,92.5,38,1650,8
";
    let week_two = "\
Driver ID,Driver Name,Safety Score,Drive Time (hrs),Total Distance,Total Events
D-1,Alice,85.0,44,2010,15
";

    importer.import("w1.csv", week_one.as_bytes()).await.unwrap();
    let second = importer.import("w2.csv", week_two.as_bytes()).await.unwrap();

    assert_eq!(second.updated, 1);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(&"D-1".to_string()).unwrap().safety_score, 85.0);
}

#[tokio::test]
async fn test_missing_driver_name_column_fails_whole_file() {
    let (store, importer) = setup();
    let csv = "\
Driver ID,Safety Score,Drive Time (hrs),Total Distance,Total Events
D-1,92.5,38,1650,8
";

    let err = importer.import("weekly.csv", csv.as_bytes()).await.unwrap_err();
    match err {
        ImportError::MissingColumns(columns) => {
            assert_eq!(columns, vec!["Driver Name".to_string()]);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_blank_driver_id_is_row_error() {
    let (store, importer) = setup();
    let csv = "\
Driver ID,Driver Name,Safety Score,Drive Time (hrs),Total Distance,Total Events
,Alice,92.5,38,1650,8
D-2,Bob,88,41,1824,12
";

    let summary = importer.import("weekly.csv", csv.as_bytes()).await.unwrap();
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.imported, 1);
    assert!(summary.error_details[0].starts_with("Row 1:"));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_canonical_key_headers_accepted() {
    let (store, importer) = setup();
    let csv = "\
driverId,driverName,safetyScore,driveTime,totalDistance,totalEvents
D-7,Carol,95,30,1200,2
";

    let summary = importer.import("weekly.csv", csv.as_bytes()).await.unwrap();
    assert_eq!(summary.imported, 1);
    assert_eq!(store.get(&"D-7".to_string()).unwrap().driver_name, "Carol");
}
