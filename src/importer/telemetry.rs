// ==========================================
// Safety Operations Platform - Driver telemetry row mapper
// ==========================================
// Identity and name are hard-required; every metric coerces with
// numeric default 0 so a sparse export still produces a snapshot.
// ==========================================

use crate::domain::telemetry::{BehaviorEvents, DriverTelemetryRecord, SpeedingBreakdown};
use crate::importer::error::ImportError;
use crate::importer::file_parser::RawRow;
use crate::importer::profile::{self, ColumnSpec};
use chrono::{DateTime, Utc};

// ==========================================
// Column table
// ==========================================
pub const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        field: "driver_id",
        candidates: &["driverId", "Driver ID"],
        required: true,
    },
    ColumnSpec {
        field: "driver_name",
        candidates: &["driverName", "Driver Name"],
        required: true,
    },
    ColumnSpec {
        field: "safety_score",
        candidates: &["safetyScore", "Safety Score"],
        required: true,
    },
    ColumnSpec {
        field: "drive_time_hours",
        candidates: &["driveTime", "Drive Time (hrs)"],
        required: true,
    },
    ColumnSpec {
        field: "total_distance",
        candidates: &["totalDistance", "Total Distance"],
        required: true,
    },
    ColumnSpec {
        field: "total_events",
        candidates: &["totalEvents", "Total Events"],
        required: true,
    },
    // ===== Speeding breakdown (optional, default 0) =====
    ColumnSpec {
        field: "light_speeding",
        candidates: &["lightSpeeding", "Light Speeding"],
        required: false,
    },
    ColumnSpec {
        field: "moderate_speeding",
        candidates: &["moderateSpeeding", "Moderate Speeding"],
        required: false,
    },
    ColumnSpec {
        field: "heavy_speeding",
        candidates: &["heavySpeeding", "Heavy Speeding"],
        required: false,
    },
    ColumnSpec {
        field: "severe_speeding",
        candidates: &["severeSpeeding", "Severe Speeding"],
        required: false,
    },
    // ===== Behavior events (optional, default 0) =====
    ColumnSpec {
        field: "harsh_accel",
        candidates: &["harshAccel", "Harsh Acceleration"],
        required: false,
    },
    ColumnSpec {
        field: "harsh_brake",
        candidates: &["harshBrake", "Harsh Braking"],
        required: false,
    },
    ColumnSpec {
        field: "harsh_turn",
        candidates: &["harshTurn", "Harsh Cornering"],
        required: false,
    },
    ColumnSpec {
        field: "seatbelt",
        candidates: &["seatbelt", "Seatbelt"],
        required: false,
    },
    ColumnSpec {
        field: "phone_usage",
        candidates: &["phoneUsage", "Phone Usage"],
        required: false,
    },
    // ===== Reporting window (optional) =====
    ColumnSpec {
        field: "week_start",
        candidates: &["weekStart", "Week Start"],
        required: false,
    },
    ColumnSpec {
        field: "week_end",
        candidates: &["weekEnd", "Week End"],
        required: false,
    },
];

/// Map one raw row onto a DriverTelemetryRecord
pub fn map_row(row: &RawRow, now: DateTime<Utc>) -> Result<DriverTelemetryRecord, ImportError> {
    let mut missing = Vec::new();

    let driver_id = profile::required_text(row, COLUMNS, "driver_id", &mut missing);
    let driver_name = profile::required_text(row, COLUMNS, "driver_name", &mut missing);

    if !missing.is_empty() {
        return Err(ImportError::MissingRequiredFields(missing));
    }

    let week_start = profile::optional_date(row, COLUMNS, "week_start")?.map(|dt| dt.date());
    let week_end = profile::optional_date(row, COLUMNS, "week_end")?.map(|dt| dt.date());

    Ok(DriverTelemetryRecord {
        driver_id,
        driver_name,
        safety_score: profile::number_or(row, COLUMNS, "safety_score", 0.0),
        drive_time_hours: profile::number_or(row, COLUMNS, "drive_time_hours", 0.0),
        total_distance: profile::number_or(row, COLUMNS, "total_distance", 0.0),
        total_events: profile::number_or(row, COLUMNS, "total_events", 0.0),
        speeding: SpeedingBreakdown {
            light: profile::number_or(row, COLUMNS, "light_speeding", 0.0),
            moderate: profile::number_or(row, COLUMNS, "moderate_speeding", 0.0),
            heavy: profile::number_or(row, COLUMNS, "heavy_speeding", 0.0),
            severe: profile::number_or(row, COLUMNS, "severe_speeding", 0.0),
        },
        behavior: BehaviorEvents {
            harsh_accel: profile::number_or(row, COLUMNS, "harsh_accel", 0.0),
            harsh_brake: profile::number_or(row, COLUMNS, "harsh_brake", 0.0),
            harsh_turn: profile::number_or(row, COLUMNS, "harsh_turn", 0.0),
            seatbelt: profile::number_or(row, COLUMNS, "seatbelt", 0.0),
            phone_usage: profile::number_or(row, COLUMNS, "phone_usage", 0.0),
        },
        week_start,
        week_end,
        created_at: now,
        updated_at: now,
    })
}
