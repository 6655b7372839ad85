//! Cell-level parse helpers shared by classification and analysis.
//!
//! All parsing here is speculative: a value that does not match simply
//! yields `None`/`Err`, never a panic. Date parsing is permissive and
//! format-agnostic per cell — each cell is tried against a fixed list
//! of common calendar formats, date-only first, then timestamped.

use anyhow::{Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime};

/// Attempts to parse a cell as a finite floating-point number.
///
/// Non-finite tokens (`NaN`, `inf`) are rejected so that no aggregate
/// built from numeric cells can ever carry a non-finite value.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|number| number.is_finite())
}

pub fn parse_naive_date(value: &str) -> Result<NaiveDate> {
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y"];
    for fmt in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(value, fmt) {
            return Ok(parsed);
        }
    }
    Err(anyhow!("Failed to parse '{value}' as date"))
}

pub fn parse_naive_datetime(value: &str) -> Result<NaiveDateTime> {
    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%d/%m/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(parsed);
        }
    }
    Err(anyhow!("Failed to parse '{value}' as datetime"))
}

/// Best-effort calendar-date parse used by date-likeness detection and
/// the timeline grouping. Timestamps collapse to their calendar date.
pub fn parse_date_value(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = parse_naive_date(trimmed) {
        return Some(date);
    }
    parse_naive_datetime(trimmed).ok().map(|dt| dt.date())
}
