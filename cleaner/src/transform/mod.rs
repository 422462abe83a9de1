//! Transformation module.
//!
//! - Reshape: composite key split and wide-to-long melt
//! - Sanitize: year, value and region rules
//! - Pipeline: the stages chained together, plus file I/O

pub mod pipeline;
pub mod reshape;
pub mod sanitize;

pub use pipeline::*;
pub use reshape::{melt, split_key, split_keys};
pub use sanitize::{
    filter_region, normalize_country, parse_value, parse_year, sanitize_values, validate_years,
};
