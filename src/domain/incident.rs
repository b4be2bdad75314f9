// ==========================================
// Safety Operations Platform - Incident domain model
// ==========================================
// Written by the import layer, read-only for the reporting surface
// ==========================================

use crate::domain::types::NaturalKey;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// IncidentRecord - one observed safety event
// ==========================================
// Natural key: report_number (exact match against existing records)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentRecord {
    // ===== Natural key =====
    pub report_number: String,

    // ===== Required fields =====
    pub observer: String,
    pub employee_name: String,
    pub division: String,
    pub home_plant: String,
    pub hire_date: NaiveDate,
    pub supervisor: String,
    pub event_type: String,
    pub incident_at: NaiveDateTime,
    pub location: String,
    pub preventability: String,
    pub event_category: String,

    // ===== Optional fields =====
    pub shift: Option<String>,
    pub job_title: Option<String>,
    pub description: Option<String>,
    pub corrective_action: Option<String>,

    // ===== Audit =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NaturalKey for IncidentRecord {
    type Key = String;

    fn natural_key(&self) -> String {
        self.report_number.clone()
    }
}
