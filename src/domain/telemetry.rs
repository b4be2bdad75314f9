// ==========================================
// Safety Operations Platform - Driver telemetry domain model
// ==========================================
// One snapshot per driver, overwritten on each import
// ==========================================

use crate::domain::types::NaturalKey;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// SpeedingBreakdown - speeding events by severity band
// ==========================================
// Every field normalized with numeric default 0
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeedingBreakdown {
    pub light: f64,
    pub moderate: f64,
    pub heavy: f64,
    pub severe: f64,
}

// ==========================================
// BehaviorEvents - driving behavior event counts
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorEvents {
    pub harsh_accel: f64,
    pub harsh_brake: f64,
    pub harsh_turn: f64,
    pub seatbelt: f64,
    pub phone_usage: f64,
}

// ==========================================
// DriverTelemetryRecord - per-driver safety snapshot
// ==========================================
// Natural key: driver_id. Each import overwrites the driver's current
// snapshot; week_start/week_end describe the reporting window of the
// latest export only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverTelemetryRecord {
    // ===== Natural key =====
    pub driver_id: String,

    // ===== Required fields =====
    pub driver_name: String,
    pub safety_score: f64,
    pub drive_time_hours: f64,
    pub total_distance: f64,
    pub total_events: f64,

    // ===== Breakdowns (default-to-zero) =====
    pub speeding: SpeedingBreakdown,
    pub behavior: BehaviorEvents,

    // ===== Reporting window =====
    pub week_start: Option<NaiveDate>,
    pub week_end: Option<NaiveDate>,

    // ===== Audit =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NaturalKey for DriverTelemetryRecord {
    type Key = String;

    fn natural_key(&self) -> String {
        self.driver_id.clone()
    }
}
