// ==========================================
// Safety Operations Platform - Shared domain types
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

// ==========================================
// NaturalKey - a record that knows its business identity
// ==========================================
// The reconciliation engine uses this key to decide between insert
// and update; it is never a surrogate id.
pub trait NaturalKey {
    type Key: Eq + Hash + Clone + Send + Sync;

    fn natural_key(&self) -> Self::Key;
}

// ==========================================
// TrainingStatus - compliance state machine
// ==========================================
// Transitions are date-driven, never user-driven:
//   Pending  -> Overdue    required_by < today and no completion
//   Pending/Overdue -> Completed   completion date present
//   Completed -> Expired   expires_on present and expires_on < today
// Terminal: Expired, or Completed with no expiration date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingStatus {
    Pending,
    Overdue,
    Completed,
    Expired,
}

impl TrainingStatus {
    /// Derive the status for a training record as of `today`
    pub fn derive(
        required_by: NaiveDate,
        completed_on: Option<NaiveDate>,
        expires_on: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Self {
        match completed_on {
            Some(_) => match expires_on {
                Some(expires) if expires < today => TrainingStatus::Expired,
                _ => TrainingStatus::Completed,
            },
            None => {
                if required_by < today {
                    TrainingStatus::Overdue
                } else {
                    TrainingStatus::Pending
                }
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrainingStatus::Pending => "pending",
            TrainingStatus::Overdue => "overdue",
            TrainingStatus::Completed => "completed",
            TrainingStatus::Expired => "expired",
        }
    }
}

impl std::str::FromStr for TrainingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TrainingStatus::Pending),
            "overdue" => Ok(TrainingStatus::Overdue),
            "completed" => Ok(TrainingStatus::Completed),
            "expired" => Ok(TrainingStatus::Expired),
            other => Err(format!("unknown training status: {}", other)),
        }
    }
}
