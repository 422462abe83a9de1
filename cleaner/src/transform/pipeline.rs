//! The reshape-and-clean pipeline and the `clean` entry point.
//!
//! ```text
//! raw wide table ─▶ split keys ─▶ melt ─▶ years ─▶ values ─▶ region ─▶ CSV
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use life_expectancy::{clean, CleanConfig};
//!
//! let report = clean(&CleanConfig::default().with_country("pt"))?;
//! println!("Wrote {} rows to {}", report.stats.kept, report.output_path.display());
//! # Ok::<(), life_expectancy::PipelineError>(())
//! ```

use serde::Serialize;
use std::path::PathBuf;

use super::reshape::{melt, split_keys};
use super::sanitize::{filter_region, normalize_country, sanitize_values, validate_years};
use crate::config::CleanConfig;
use crate::error::PipelineResult;
use crate::logs::{log_info, log_success, log_warning};
use crate::models::{CleanRecord, RawTable};
use crate::parser::read_raw_table;
use crate::writer::write_records;

/// Row counts collected while cleaning
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanStats {
    /// Wide rows read
    pub input_rows: usize,
    /// Columns after the key column
    pub year_columns: usize,
    /// Rows produced by the melt
    pub melted_rows: usize,
    /// Rows whose year label was not a 4-digit year
    pub dropped_year: usize,
    /// Rows with a missing or non-numeric value
    pub dropped_value: usize,
    /// Clean rows belonging to other regions
    pub other_regions: usize,
    /// Rows kept for the requested region
    pub kept: usize,
}

/// Cleaned records plus the counts that produced them
#[derive(Debug, Clone, PartialEq)]
pub struct CleanOutcome {
    pub records: Vec<CleanRecord>,
    pub stats: CleanStats,
}

/// Result of a complete `clean` run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanReport {
    /// Normalized region code
    pub country: String,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub stats: CleanStats,
}

/// Run every cleaning stage over an in-memory wide table.
///
/// Pass `None` to keep all regions. The only failure is a malformed key.
pub fn clean_table(table: RawTable, country: Option<&str>) -> PipelineResult<CleanOutcome> {
    let mut stats = CleanStats {
        input_rows: table.rows.len(),
        year_columns: table.year_labels().len(),
        ..CleanStats::default()
    };

    let (labels, keyed) = split_keys(table)?;

    let melted = melt(&labels, &keyed);
    stats.melted_rows = melted.len();

    let dated = validate_years(melted);
    stats.dropped_year = stats.melted_rows - dated.len();

    let dated_count = dated.len();
    let cleaned = sanitize_values(dated);
    stats.dropped_value = dated_count - cleaned.len();

    let cleaned_count = cleaned.len();
    let records = match country {
        Some(code) => filter_region(cleaned, code),
        None => cleaned,
    };
    stats.other_regions = cleaned_count - records.len();
    stats.kept = records.len();

    Ok(CleanOutcome { records, stats })
}

/// Clean the configured raw file for one country and write the result.
///
/// Nothing is written unless the whole table was processed.
pub fn clean(config: &CleanConfig) -> PipelineResult<CleanReport> {
    let country = normalize_country(&config.country);
    let input_path = config.input_path();
    let output_path = config.output_path();

    log_info(format!("Cleaning life expectancy data for {}", country));
    let table = read_raw_table(&input_path)?;

    let outcome = clean_table(table, Some(&country))?;
    log_stats(&outcome.stats);

    if outcome.records.is_empty() {
        log_warning(format!("No rows found for region '{}'", country));
    }

    write_records(&output_path, &outcome.records)?;
    log_success(format!(
        "Wrote {} rows to {}",
        outcome.stats.kept,
        output_path.display()
    ));

    Ok(CleanReport {
        country,
        input_path,
        output_path,
        stats: outcome.stats,
    })
}

fn log_stats(stats: &CleanStats) {
    log_info(format!(
        "Melted {} rows x {} year columns into {} rows",
        stats.input_rows, stats.year_columns, stats.melted_rows
    ));
    if stats.dropped_year > 0 {
        log_info(format!("Dropped {} rows with invalid year labels", stats.dropped_year));
    }
    if stats.dropped_value > 0 {
        log_info(format!("Dropped {} rows with missing or non-numeric values", stats.dropped_value));
    }
    log_info(format!("Filtered out {} rows from other regions", stats.other_regions));
}
