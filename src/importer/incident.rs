// ==========================================
// Safety Operations Platform - Incident row mapper
// ==========================================
// Maps one decoded row onto IncidentRecord. Column candidates are
// tried in order: canonical key, then the human header printed by
// the export.
// ==========================================

use crate::domain::incident::IncidentRecord;
use crate::importer::error::ImportError;
use crate::importer::file_parser::RawRow;
use crate::importer::profile::{self, ColumnSpec};
use chrono::{DateTime, Utc};

// ==========================================
// Column table
// ==========================================
pub const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        field: "report_number",
        candidates: &["reportNumber", "Report Number"],
        required: true,
    },
    ColumnSpec {
        field: "observer",
        candidates: &["observer", "Observer"],
        required: true,
    },
    ColumnSpec {
        field: "employee_name",
        candidates: &["employeeName", "Employee Name"],
        required: true,
    },
    ColumnSpec {
        field: "division",
        candidates: &["division", "Division"],
        required: true,
    },
    ColumnSpec {
        field: "home_plant",
        candidates: &["homePlant", "Home Plant"],
        required: true,
    },
    ColumnSpec {
        field: "hire_date",
        candidates: &["hireDate", "Hire Date"],
        required: true,
    },
    ColumnSpec {
        field: "supervisor",
        candidates: &["supervisor", "Supervisor"],
        required: true,
    },
    ColumnSpec {
        field: "event_type",
        candidates: &["eventType", "Event Type"],
        required: true,
    },
    ColumnSpec {
        field: "incident_at",
        candidates: &["incidentDateTime", "Date/Time of Incident"],
        required: true,
    },
    ColumnSpec {
        field: "location",
        candidates: &["location", "Location"],
        required: true,
    },
    ColumnSpec {
        field: "preventability",
        candidates: &["preventability", "Preventability"],
        required: true,
    },
    ColumnSpec {
        field: "event_category",
        candidates: &["eventCategory", "Event Category"],
        required: true,
    },
    ColumnSpec {
        field: "shift",
        candidates: &["shift", "Shift"],
        required: false,
    },
    ColumnSpec {
        field: "job_title",
        candidates: &["jobTitle", "Job Title"],
        required: false,
    },
    ColumnSpec {
        field: "description",
        candidates: &["description", "Description"],
        required: false,
    },
    ColumnSpec {
        field: "corrective_action",
        candidates: &["correctiveAction", "Corrective Action"],
        required: false,
    },
];

/// Map one raw row onto an IncidentRecord
///
/// Every required field missing on the row is collected before the
/// error is returned, so the message names all of them at once.
pub fn map_row(row: &RawRow, now: DateTime<Utc>) -> Result<IncidentRecord, ImportError> {
    let mut missing = Vec::new();

    let report_number = profile::required_text(row, COLUMNS, "report_number", &mut missing);
    let observer = profile::required_text(row, COLUMNS, "observer", &mut missing);
    let employee_name = profile::required_text(row, COLUMNS, "employee_name", &mut missing);
    let division = profile::required_text(row, COLUMNS, "division", &mut missing);
    let home_plant = profile::required_text(row, COLUMNS, "home_plant", &mut missing);
    let supervisor = profile::required_text(row, COLUMNS, "supervisor", &mut missing);
    let event_type = profile::required_text(row, COLUMNS, "event_type", &mut missing);
    let location = profile::required_text(row, COLUMNS, "location", &mut missing);
    let preventability = profile::required_text(row, COLUMNS, "preventability", &mut missing);
    let event_category = profile::required_text(row, COLUMNS, "event_category", &mut missing);

    let hire_date = profile::required_date(row, COLUMNS, "hire_date", &mut missing)?;
    let incident_at = profile::required_date(row, COLUMNS, "incident_at", &mut missing)?;

    if !missing.is_empty() {
        return Err(ImportError::MissingRequiredFields(missing));
    }

    // The missing check above guarantees both dates are present
    let hire_date = hire_date
        .map(|dt| dt.date())
        .ok_or_else(|| ImportError::InternalError("hire date lost after validation".into()))?;
    let incident_at = incident_at
        .ok_or_else(|| ImportError::InternalError("incident date lost after validation".into()))?;

    Ok(IncidentRecord {
        report_number,
        observer,
        employee_name,
        division,
        home_plant,
        hire_date,
        supervisor,
        event_type,
        incident_at,
        location,
        preventability,
        event_category,
        shift: profile::optional_text(row, COLUMNS, "shift"),
        job_title: profile::optional_text(row, COLUMNS, "job_title"),
        description: profile::optional_text(row, COLUMNS, "description"),
        corrective_action: profile::optional_text(row, COLUMNS, "corrective_action"),
        created_at: now,
        updated_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::file_parser::RawCell;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn full_row() -> RawRow {
        let mut row: RawRow = HashMap::new();
        for (header, value) in [
            ("Report Number", "IR-1001"),
            ("Observer", "J. Field"),
            ("Employee Name", "A. Driver"),
            ("Division", "North"),
            ("Home Plant", "Plant 7"),
            ("Hire Date", "2019-05-20"),
            ("Supervisor", "M. Lead"),
            ("Event Type", "Near Miss"),
            ("Date/Time of Incident", "2024-03-15T08:30:00"),
            ("Location", "Yard B"),
            ("Preventability", "Preventable"),
            ("Event Category", "Vehicle"),
            ("Shift", "Day"),
        ] {
            row.insert(header.to_string(), RawCell::Text(value.to_string()));
        }
        row
    }

    #[test]
    fn test_map_row_full() {
        let record = map_row(&full_row(), Utc::now()).unwrap();
        assert_eq!(record.report_number, "IR-1001");
        assert_eq!(
            record.hire_date,
            NaiveDate::from_ymd_opt(2019, 5, 20).unwrap()
        );
        assert_eq!(
            record.incident_at.date(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
        assert_eq!(record.shift.as_deref(), Some("Day"));
        assert_eq!(record.job_title, None);
    }

    #[test]
    fn test_map_row_collects_all_missing_fields() {
        let mut row = full_row();
        row.remove("Observer");
        row.remove("Location");

        let err = map_row(&row, Utc::now()).unwrap_err();
        match err {
            ImportError::MissingRequiredFields(fields) => {
                assert!(fields.contains(&"Observer".to_string()));
                assert!(fields.contains(&"Location".to_string()));
                assert_eq!(fields.len(), 2);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_map_row_accepts_canonical_keys() {
        let mut row: RawRow = HashMap::new();
        for (key, value) in [
            ("reportNumber", "IR-2"),
            ("observer", "O"),
            ("employeeName", "E"),
            ("division", "D"),
            ("homePlant", "P"),
            ("hireDate", "2020-01-01"),
            ("supervisor", "S"),
            ("eventType", "T"),
            ("incidentDateTime", "2024-01-02 10:00:00"),
            ("location", "L"),
            ("preventability", "Non-Preventable"),
            ("eventCategory", "C"),
        ] {
            row.insert(key.to_string(), RawCell::Text(value.to_string()));
        }

        let record = map_row(&row, Utc::now()).unwrap();
        assert_eq!(record.report_number, "IR-2");
    }

    #[test]
    fn test_map_row_serial_hire_date() {
        let mut row = full_row();
        row.insert("Hire Date".to_string(), RawCell::Number(44106.0));

        let record = map_row(&row, Utc::now()).unwrap();
        assert_eq!(
            record.hire_date,
            NaiveDate::from_ymd_opt(2020, 10, 2).unwrap()
        );
    }

    #[test]
    fn test_map_row_bad_incident_date_is_invalid_date() {
        let mut row = full_row();
        row.insert(
            "Date/Time of Incident".to_string(),
            RawCell::Text("yesterday-ish".to_string()),
        );

        let err = map_row(&row, Utc::now()).unwrap_err();
        assert!(matches!(err, ImportError::InvalidDate { .. }));
    }
}
