//! # Life Expectancy - Eurostat table cleaning
//!
//! Reshapes the Eurostat wide life expectancy table (one column per year)
//! into a long, per-country CSV.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Raw TSV    │────▶│   Parser    │────▶│  Transform  │────▶│  Writer     │
//! │  (wide)     │     │  (auto-enc) │     │ (melt+clean)│     │  (CSV)      │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use life_expectancy::{clean, CleanConfig};
//!
//! let report = clean(&CleanConfig::default()).unwrap();
//! println!("{} rows for {}", report.stats.kept, report.country);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`config`] - Paths and country selection
//! - [`logs`] - Progress logging
//! - [`models`] - Table shapes (raw, melted, cleaned)
//! - [`parser`] - TSV loading with encoding detection
//! - [`transform`] - Reshape, sanitize, pipeline
//! - [`writer`] - CSV output

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Input / output
pub mod parser;
pub mod writer;

// Transformation
pub mod transform;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::CleanConfig;

pub use error::{InputError, OutputError, PipelineError};

pub use models::{CleanRecord, DatedRow, KeyedRow, MeltedRow, RawRow, RawTable, RegionKey, OUTPUT_COLUMNS};

pub use parser::{decode_content, detect_encoding, parse_raw_table, read_raw_table};

pub use transform::{
    clean, clean_table, filter_region, melt, normalize_country, parse_value, parse_year,
    sanitize_values, split_key, split_keys, validate_years, CleanOutcome, CleanReport, CleanStats,
};

pub use writer::{format_value, to_csv_string, write_records};
