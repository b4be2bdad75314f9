// ==========================================
// Safety Operations Platform - Training domain model
// ==========================================

use crate::domain::types::{NaturalKey, TrainingStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// TrainingRecord - one training assignment per employee
// ==========================================
// Natural key: (employee_id, training_type, training_name)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingRecord {
    // ===== Natural key =====
    pub employee_id: String,
    pub training_type: String,
    pub training_name: String,

    // ===== Required fields =====
    pub employee_name: String,
    pub required_by: NaiveDate,

    // ===== Optional fields =====
    pub completed_on: Option<NaiveDate>,
    pub expires_on: Option<NaiveDate>,
    pub instructor: Option<String>,
    pub hours: Option<f64>,

    // ===== Derived =====
    pub status: TrainingStatus,

    // ===== Audit =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NaturalKey for TrainingRecord {
    type Key = (String, String, String);

    fn natural_key(&self) -> (String, String, String) {
        (
            self.employee_id.clone(),
            self.training_type.clone(),
            self.training_name.clone(),
        )
    }
}
