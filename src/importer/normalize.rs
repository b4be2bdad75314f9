// ==========================================
// Safety Operations Platform - Field normalizer
// ==========================================
// Per-field coercion: trim/default strings, default-on-empty numbers,
// dual-mode dates (ISO-style text or spreadsheet serial number).
// Pure functions; row mappers add row/field context to failures.
// ==========================================

use crate::importer::file_parser::RawCell;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

/// A cell that could not be read as a calendar date
#[derive(Error, Debug)]
#[error("unparseable date value: {value}")]
pub struct DateParseError {
    pub value: String,
}

/// Coerce a cell to a trimmed string, falling back to `default`
/// when the cell is absent or blank
pub fn as_string(raw: Option<&RawCell>, default: &str) -> String {
    opt_string(raw).unwrap_or_else(|| default.to_string())
}

/// Coerce a cell to a trimmed string, `None` when absent or blank
pub fn opt_string(raw: Option<&RawCell>) -> Option<String> {
    match raw {
        None => None,
        Some(RawCell::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Some(RawCell::Number(n)) => {
            // Whole numbers render without the trailing ".0" so IDs
            // exported as numeric cells keep their text form
            if n.fract() == 0.0 && n.abs() < 1e15 {
                Some(format!("{}", *n as i64))
            } else {
                Some(format!("{}", n))
            }
        }
        Some(RawCell::Bool(b)) => Some(if *b { "true".into() } else { "false".into() }),
    }
}

/// Coerce a cell to a number, falling back to `default` on absent,
/// blank, or non-numeric input. Never errors.
pub fn as_number(raw: Option<&RawCell>, default: f64) -> f64 {
    match raw {
        None => default,
        Some(RawCell::Number(n)) => *n,
        Some(RawCell::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(RawCell::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return default;
            }
            // Exports sometimes carry thousands separators
            trimmed.replace(',', "").parse::<f64>().unwrap_or(default)
        }
    }
}

/// Coerce a cell to a date/time
///
/// - absent/blank -> Ok(None)
/// - text -> ISO-style parsing; numeric-looking text is treated as a
///   spreadsheet serial (CSV exports carry serials as text); anything
///   else is a hard error, never a silent default
/// - number -> spreadsheet serial decoding (see serial_to_datetime)
pub fn as_date(raw: Option<&RawCell>) -> Result<Option<NaiveDateTime>, DateParseError> {
    match raw {
        None => Ok(None),
        Some(RawCell::Number(serial)) => serial_to_datetime(*serial)
            .map(Some)
            .ok_or_else(|| DateParseError {
                value: serial.to_string(),
            }),
        Some(RawCell::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }

            if let Some(dt) = parse_datetime_text(trimmed) {
                return Ok(Some(dt));
            }

            if let Ok(serial) = trimmed.parse::<f64>() {
                if let Some(dt) = serial_to_datetime(serial) {
                    return Ok(Some(dt));
                }
            }

            Err(DateParseError {
                value: trimmed.to_string(),
            })
        }
        Some(RawCell::Bool(b)) => Err(DateParseError {
            value: b.to_string(),
        }),
    }
}

/// Date-only convenience wrapper around as_date
pub fn as_calendar_date(raw: Option<&RawCell>) -> Result<Option<NaiveDate>, DateParseError> {
    Ok(as_date(raw)?.map(|dt| dt.date()))
}

/// Parse the ISO-style text encodings the source exports use
fn parse_datetime_text(value: &str) -> Option<NaiveDateTime> {
    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.fZ",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
    ];
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y"];

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }

    None
}

/// Decode a spreadsheet serial date
///
/// Serial 1 is 1900-01-01 in the 1900 date system, which counts a
/// phantom 1900-02-29 (the leap year that never happened). Downstream
/// consumers expect exactly the values the source system exported, so
/// the defect is reproduced here rather than corrected: anchoring at
/// 1899-12-31 and subtracting one day lands every serial above 60 on
/// the calendar date the spreadsheet displays.
///
/// Reference points: 44106 -> 2020-10-02,
/// 45819.40625 -> 2025-06-11T09:45:00.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 1.0 || serial > 2_958_465.0 {
        // 2958465 is 9999-12-31, the spreadsheet ceiling
        return None;
    }

    let days = serial.trunc() as i64;
    let frac = serial - days as f64;

    let anchor = NaiveDate::from_ymd_opt(1899, 12, 31)?;
    let date = anchor.checked_add_signed(Duration::days(days - 1))?;

    let seconds = (frac * 86_400.0).round() as u32;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds.min(86_399), 0)?;

    Some(NaiveDateTime::new(date, time))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawCell {
        RawCell::Text(s.to_string())
    }

    #[test]
    fn test_as_string_trims_and_defaults() {
        assert_eq!(as_string(Some(&text("  hello  ")), ""), "hello");
        assert_eq!(as_string(Some(&text("   ")), "n/a"), "n/a");
        assert_eq!(as_string(None, "n/a"), "n/a");
    }

    #[test]
    fn test_opt_string_numeric_id() {
        // Numeric cells holding IDs must not grow a ".0" suffix
        assert_eq!(
            opt_string(Some(&RawCell::Number(10452.0))),
            Some("10452".to_string())
        );
    }

    #[test]
    fn test_as_number_coerces_text() {
        assert_eq!(as_number(Some(&text("42.5")), 0.0), 42.5);
        assert_eq!(as_number(Some(&text("1,250")), 0.0), 1250.0);
        assert_eq!(as_number(Some(&RawCell::Number(7.0)), 0.0), 7.0);
    }

    #[test]
    fn test_as_number_defaults_never_errors() {
        assert_eq!(as_number(None, 3.0), 3.0);
        assert_eq!(as_number(Some(&text("")), 3.0), 3.0);
        assert_eq!(as_number(Some(&text("not a number")), 3.0), 3.0);
    }

    #[test]
    fn test_as_date_absent_is_none() {
        assert_eq!(as_date(None).unwrap(), None);
        assert_eq!(as_date(Some(&text("  "))).unwrap(), None);
    }

    #[test]
    fn test_as_date_iso_string() {
        let dt = as_date(Some(&text("2024-03-15T08:30:00"))).unwrap().unwrap();
        assert_eq!(
            dt,
            NaiveDate::from_ymd_opt(2024, 3, 15)
                .unwrap()
                .and_hms_opt(8, 30, 0)
                .unwrap()
        );

        let d = as_date(Some(&text("2024-03-15"))).unwrap().unwrap();
        assert_eq!(d.date(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_as_date_us_style_string() {
        let d = as_date(Some(&text("3/15/2024"))).unwrap().unwrap();
        assert_eq!(d.date(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_as_date_malformed_is_error_not_default() {
        assert!(as_date(Some(&text("not a date"))).is_err());
        assert!(as_date(Some(&text("2024-13-45"))).is_err());
    }

    #[test]
    fn test_serial_date_reference_point() {
        // Known anchor from the source exports
        let dt = serial_to_datetime(44106.0).unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2020, 10, 2).unwrap());
        assert_eq!(dt.time(), NaiveTime::MIN);
    }

    #[test]
    fn test_serial_date_with_time_fraction() {
        let dt = serial_to_datetime(45819.40625).unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2025, 6, 11).unwrap());
        assert_eq!(dt.time(), NaiveTime::from_hms_opt(9, 45, 0).unwrap());
    }

    #[test]
    fn test_serial_date_from_numeric_text() {
        // CSV exports carry serials as plain text
        let dt = as_date(Some(&text("44106"))).unwrap().unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2020, 10, 2).unwrap());
    }

    #[test]
    fn test_serial_date_out_of_range() {
        assert!(serial_to_datetime(0.0).is_none());
        assert!(serial_to_datetime(-5.0).is_none());
        assert!(serial_to_datetime(f64::NAN).is_none());
    }
}
