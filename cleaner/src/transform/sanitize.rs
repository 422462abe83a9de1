//! Per-row cleaning rules for year labels, value cells and region codes.
//!
//! None of these rules fail: rows that do not parse are dropped.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{CleanRecord, DatedRow, MeltedRow};

/// Marker Eurostat uses for a missing observation.
pub const MISSING_MARKER: &str = ":";

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}$").expect("valid year regex"));

/// Leading signed decimal; anything after it (flags such as `e`, `p`, `b`) is ignored.
static VALUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]+(?:\.[0-9]+)?").expect("valid value regex"));

/// Parse a year-column label.
///
/// The trimmed label must be exactly four ASCII digits.
pub fn parse_year(label: &str) -> Option<i32> {
    let label = label.trim();
    if YEAR_RE.is_match(label) {
        label.parse().ok()
    } else {
        None
    }
}

/// Extract the numeric part of a value cell.
///
/// # Example
/// ```
/// use life_expectancy::parse_value;
///
/// assert_eq!(parse_value("80.6 e"), Some(80.6));
/// assert_eq!(parse_value("81"), Some(81.0));
/// assert_eq!(parse_value(":"), None);
/// ```
pub fn parse_value(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw == MISSING_MARKER {
        return None;
    }
    let token = VALUE_RE.find(raw)?;
    token.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Trim and uppercase a requested country code.
pub fn normalize_country(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Keep rows whose year label is a 4-digit year, converting it.
pub fn validate_years(rows: Vec<MeltedRow>) -> Vec<DatedRow> {
    rows.into_iter()
        .filter_map(|row| {
            let year = parse_year(&row.year)?;
            Some(DatedRow {
                key: row.key,
                year,
                value: row.value,
            })
        })
        .collect()
}

/// Keep rows with an extractable numeric value, producing final records.
pub fn sanitize_values(rows: Vec<DatedRow>) -> Vec<CleanRecord> {
    rows.into_iter()
        .filter_map(|row| {
            let value = parse_value(&row.value)?;
            Some(CleanRecord::new(row.key, row.year, value))
        })
        .collect()
}

/// Keep records for one region.
///
/// The request is normalized; stored region codes are compared as-is.
pub fn filter_region(records: Vec<CleanRecord>, country: &str) -> Vec<CleanRecord> {
    let country = normalize_country(country);
    records.into_iter().filter(|r| r.region == country).collect()
}
