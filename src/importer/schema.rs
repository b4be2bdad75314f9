// ==========================================
// Safety Operations Platform - Schema validator
// ==========================================
// Gate before any row is processed: every required column of the
// profile must be present in the decoded header set. The only
// whole-file failure mode after decoding.
// ==========================================

use crate::importer::error::ImportError;
use crate::importer::profile::ColumnSpec;

/// Validate the decoded headers against a profile's column table
///
/// A required column is satisfied when any of its candidate headers
/// appears. All missing columns are reported together so the caller
/// can fix the export in one pass.
pub fn validate_columns(headers: &[String], columns: &[ColumnSpec]) -> Result<(), ImportError> {
    let missing: Vec<String> = columns
        .iter()
        .filter(|c| c.required && !c.present_in(headers))
        .map(|c| c.display_header().to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ImportError::MissingColumns(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &[ColumnSpec] = &[
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
            field: "description",
            candidates: &["description", "Description"],
            required: false,
        },
    ];

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_all_required_present() {
        let h = headers(&["Report Number", "Observer"]);
        assert!(validate_columns(&h, COLUMNS).is_ok());
    }

    #[test]
    fn test_canonical_keys_also_satisfy() {
        let h = headers(&["reportNumber", "observer"]);
        assert!(validate_columns(&h, COLUMNS).is_ok());
    }

    #[test]
    fn test_missing_columns_all_reported() {
        let h = headers(&["Description"]);
        match validate_columns(&h, COLUMNS) {
            Err(ImportError::MissingColumns(missing)) => {
                assert_eq!(missing, vec!["Report Number", "Observer"]);
            }
            other => panic!("expected MissingColumns, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_optional_columns_never_gate() {
        let h = headers(&["Report Number", "Observer"]);
        // description absent, still fine
        assert!(validate_columns(&h, COLUMNS).is_ok());
    }
}
