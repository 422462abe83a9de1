//! Run configuration: where the raw table lives and which country to keep.
//!
//! Precedence is command line, then environment (`.env` is loaded first),
//! then the defaults below.

use std::env;
use std::path::PathBuf;

use crate::transform::sanitize::normalize_country;

/// Data directory used when nothing else is configured.
///
/// Relative paths resolve against the current working directory, not the
/// binary's location: run from the repository root or set
/// `LIFE_EXPECTANCY_DATA_DIR`.
pub const DEFAULT_DATA_DIR: &str = "data";

/// File name of the Eurostat bulk download.
pub const RAW_FILE_NAME: &str = "eu_life_expectancy_raw.tsv";

/// Country kept when none is requested.
pub const DEFAULT_COUNTRY: &str = "PT";

/// Suffix of every cleaned output file.
const OUTPUT_SUFFIX: &str = "_life_expectancy.csv";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "LIFE_EXPECTANCY_DATA_DIR";

/// Environment variable overriding the country.
pub const COUNTRY_ENV: &str = "LIFE_EXPECTANCY_COUNTRY";

/// Options for a cleaning run
#[derive(Debug, Clone, PartialEq)]
pub struct CleanConfig {
    /// Directory holding both the raw input and the cleaned output
    pub data_dir: PathBuf,
    /// Raw TSV file name inside `data_dir`
    pub raw_file_name: String,
    /// Requested country code, as given (normalized on use)
    pub country: String,
    /// Explicit output path, replacing the derived one
    pub output: Option<PathBuf>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            raw_file_name: RAW_FILE_NAME.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            output: None,
        }
    }
}

impl CleanConfig {
    /// Defaults overlaid with `LIFE_EXPECTANCY_*` environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(country) = env::var(COUNTRY_ENV) {
            if !country.trim().is_empty() {
                config.country = country;
            }
        }
        config
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Trimmed, uppercased country code.
    pub fn normalized_country(&self) -> String {
        normalize_country(&self.country)
    }

    pub fn input_path(&self) -> PathBuf {
        self.data_dir.join(&self.raw_file_name)
    }

    /// `<data_dir>/<country>_life_expectancy.csv` with the country lowercased,
    /// unless an explicit output was set.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => self.data_dir.join(format!(
                "{}{}",
                self.normalized_country().to_lowercase(),
                OUTPUT_SUFFIX
            )),
        }
    }
}
