//! Life expectancy CLI - Clean the Eurostat wide table into a per-country CSV
//!
//! ```bash
//! life-expectancy clean                    # data/eu_life_expectancy_raw.tsv -> data/pt_life_expectancy.csv
//! life-expectancy clean --country es       # -> data/es_life_expectancy.csv
//! life-expectancy parse raw.tsv -c PT      # Print cleaned records as JSON
//! ```

use clap::{Parser, Subcommand};
use life_expectancy::logs::{init_logging, log_success};
use life_expectancy::{clean, clean_table, read_raw_table, CleanConfig};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "life-expectancy")]
#[command(about = "Reshape Eurostat life expectancy data into a long per-country CSV", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean the raw table for one country and write the CSV
    Clean {
        /// Country code to filter by (default: PT, or LIFE_EXPECTANCY_COUNTRY)
        #[arg(short, long)]
        country: Option<String>,

        /// Directory holding eu_life_expectancy_raw.tsv (default: data, or LIFE_EXPECTANCY_DATA_DIR)
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Output file (default: <data-dir>/<country>_life_expectancy.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print run statistics as JSON on stdout
        #[arg(long)]
        summary: bool,
    },

    /// Clean any raw TSV and print the records as JSON
    Parse {
        /// Input TSV file
        input: PathBuf,

        /// Keep only this country (default: all regions)
        #[arg(short, long)]
        country: Option<String>,
    },
}

fn main() {
    init_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Clean {
            country,
            data_dir,
            output,
            summary,
        } => cmd_clean(country, data_dir, output, summary),

        Commands::Parse { input, country } => cmd_parse(&input, country.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_clean(
    country: Option<String>,
    data_dir: Option<PathBuf>,
    output: Option<PathBuf>,
    summary: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CleanConfig::from_env();
    if let Some(country) = country {
        config = config.with_country(country);
    }
    if let Some(dir) = data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(path) = output {
        config = config.with_output(path);
    }

    let report = clean(&config)?;

    if summary {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

fn cmd_parse(input: &Path, country: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let table = read_raw_table(input)?;
    let outcome = clean_table(table, country)?;
    log_success(format!("{} clean records", outcome.records.len()));

    println!("{}", serde_json::to_string_pretty(&outcome.records)?);
    Ok(())
}
