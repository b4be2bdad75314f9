// ==========================================
// Training import - integration tests
// ==========================================
// Date-driven status derivation and composite-key reconciliation.
// import_as_of pins `today` so derivations are deterministic.
// ==========================================

use chrono::NaiveDate;
use safety_ops::importer::TrainingImporter;
use safety_ops::repository::InMemoryStore;
use safety_ops::{TrainingRecord, TrainingStatus};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn setup() -> (
    InMemoryStore<TrainingRecord>,
    TrainingImporter<InMemoryStore<TrainingRecord>>,
) {
    let store: InMemoryStore<TrainingRecord> = InMemoryStore::new();
    let importer = TrainingImporter::new(store.clone());
    (store, importer)
}

fn key(employee: &str, training_type: &str, name: &str) -> (String, String, String) {
    (employee.to_string(), training_type.to_string(), name.to_string())
}

#[tokio::test]
async fn test_status_derivation_per_row() {
    let (store, importer) = setup();
    let csv = "\
Employee ID,Employee Name,Training Type,Training Name,Required By,Completion Date,Expiration Date
E-1,Alice,Safety,Forklift,2025-12-01,,
E-2,Bob,Safety,Forklift,2026-03-01,,
E-3,Carol,Safety,Forklift,2025-12-01,2026-01-10,
E-4,Dan,Safety,Forklift,2024-12-01,2024-12-15,2025-12-15
";

    let summary = importer
        .import_as_of("training.csv", csv.as_bytes(), d(2026, 1, 15))
        .await
        .unwrap();
    assert_eq!(summary.imported, 4);
    assert_eq!(summary.errors, 0);

    let status = |e: &str| store.get(&key(e, "Safety", "Forklift")).unwrap().status;
    assert_eq!(status("E-1"), TrainingStatus::Overdue);
    assert_eq!(status("E-2"), TrainingStatus::Pending);
    assert_eq!(status("E-3"), TrainingStatus::Completed);
    assert_eq!(status("E-4"), TrainingStatus::Expired);
}

#[tokio::test]
async fn test_completion_added_on_reimport_flips_status() {
    let (store, importer) = setup();
    let before = "\
Employee ID,Employee Name,Training Type,Training Name,Required By,Completion Date
E-1,Alice,Safety,Forklift,2025-12-01,
";
    let after = "\
Employee ID,Employee Name,Training Type,Training Name,Required By,Completion Date
E-1,Alice,Safety,Forklift,2025-12-01,2026-01-10
";
    let today = d(2026, 1, 15);

    importer
        .import_as_of("training.csv", before.as_bytes(), today)
        .await
        .unwrap();
    assert_eq!(
        store.get(&key("E-1", "Safety", "Forklift")).unwrap().status,
        TrainingStatus::Overdue
    );

    let second = importer
        .import_as_of("training.csv", after.as_bytes(), today)
        .await
        .unwrap();
    assert_eq!(second.updated, 1);
    assert_eq!(
        store.get(&key("E-1", "Safety", "Forklift")).unwrap().status,
        TrainingStatus::Completed
    );
}

#[tokio::test]
async fn test_composite_key_distinguishes_trainings() {
    let (store, importer) = setup();
    let csv = "\
Employee ID,Employee Name,Training Type,Training Name,Required By
E-1,Alice,Safety,Forklift,2026-06-01
E-1,Alice,Safety,Lockout/Tagout,2026-06-01
E-1,Alice,Compliance,Forklift,2026-06-01
";

    let summary = importer
        .import_as_of("training.csv", csv.as_bytes(), d(2026, 1, 1))
        .await
        .unwrap();
    assert_eq!(summary.imported, 3);
    assert_eq!(store.len(), 3);
}

#[tokio::test]
async fn test_optional_fields_carried_through() {
    let (store, importer) = setup();
    let csv = "\
Employee ID,Employee Name,Training Type,Training Name,Required By,Instructor,Hours
E-1,Alice,Safety,Forklift,2026-06-01,J. Coach,4.5
";

    importer
        .import_as_of("training.csv", csv.as_bytes(), d(2026, 1, 1))
        .await
        .unwrap();
    let record = store.get(&key("E-1", "Safety", "Forklift")).unwrap();
    assert_eq!(record.instructor.as_deref(), Some("J. Coach"));
    assert_eq!(record.hours, Some(4.5));
}

#[tokio::test]
async fn test_serial_required_by_date() {
    let (store, importer) = setup();
    let csv = "\
Employee ID,Employee Name,Training Type,Training Name,Required By
E-1,Alice,Safety,Forklift,44106
";

    importer
        .import_as_of("training.csv", csv.as_bytes(), d(2026, 1, 1))
        .await
        .unwrap();
    let record = store.get(&key("E-1", "Safety", "Forklift")).unwrap();
    assert_eq!(record.required_by, d(2020, 10, 2));
    // Past due, no completion
    assert_eq!(record.status, TrainingStatus::Overdue);
}
