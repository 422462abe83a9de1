//! CSV output for cleaned records.
//!
//! The output is staged in a temporary file next to the destination and
//! persisted in one rename, so a failed run never leaves a partial file.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{OutputError, OutputResult};
use crate::models::{CleanRecord, OUTPUT_COLUMNS};

/// Format a value as a plain decimal.
///
/// Integral values keep one fractional digit (`81.0`); everything else uses
/// the shortest representation that round-trips. Never uses exponent notation.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Format a year with at least four digits.
pub fn format_year(year: i32) -> String {
    format!("{:04}", year)
}

/// Write the header and every record to a CSV writer.
pub fn write_csv<W: Write>(writer: W, records: &[CleanRecord]) -> OutputResult<W> {
    let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    csv_writer.write_record(OUTPUT_COLUMNS)?;
    for r in records {
        csv_writer.write_record([
            r.unit.as_str(),
            r.sex.as_str(),
            r.age.as_str(),
            r.region.as_str(),
            format_year(r.year).as_str(),
            format_value(r.value).as_str(),
        ])?;
    }

    csv_writer
        .into_inner()
        .map_err(|e| OutputError::Csv(csv::Error::from(e.into_error())))
}

/// Render records as CSV text.
pub fn to_csv_string(records: &[CleanRecord]) -> OutputResult<String> {
    let bytes = write_csv(Vec::new(), records)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write records to `path`, replacing any existing file.
///
/// The parent directory is created when missing.
pub fn write_records(path: &Path, records: &[CleanRecord]) -> OutputResult<()> {
    let io_err = |source: std::io::Error| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(io_err)?;

    let staged = NamedTempFile::new_in(dir).map_err(io_err)?;
    let mut staged = write_csv(staged, records)?;
    staged.flush().map_err(io_err)?;
    match_plain_create_permissions(staged.as_file(), path).map_err(io_err)?;
    staged.persist(path).map_err(|e| io_err(e.error))?;

    Ok(())
}

/// Temp files are created owner-only; give the staged file the mode of the
/// file it replaces, or 0644 for a new one.
#[cfg(unix)]
fn match_plain_create_permissions(file: &File, path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let permissions = match std::fs::metadata(path) {
        Ok(meta) => meta.permissions(),
        Err(_) => std::fs::Permissions::from_mode(0o644),
    };
    file.set_permissions(permissions)
}

#[cfg(not(unix))]
fn match_plain_create_permissions(_file: &File, _path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RegionKey;

    fn record(year: i32, value: f64) -> CleanRecord {
        CleanRecord::new(
            RegionKey {
                unit: "YR".into(),
                sex: "F".into(),
                age: "Y_LT1".into(),
                region: "PT".into(),
            },
            year,
            value,
        )
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(81.0), "81.0");
        assert_eq!(format_value(81.2), "81.2");
        assert_eq!(format_value(-0.5), "-0.5");
        assert_eq!(format_value(84.15), "84.15");
        assert_eq!(format_value(1e21), "1000000000000000000000.0");
    }

    #[test]
    fn test_format_year_pads() {
        assert_eq!(format_year(2019), "2019");
        assert_eq!(format_year(999), "0999");
    }

    #[test]
    fn test_header_only_for_no_records() {
        assert_eq!(to_csv_string(&[]).unwrap(), "unit,sex,age,region,year,value\n");
    }

    #[test]
    fn test_csv_rows() {
        let csv = to_csv_string(&[record(2019, 81.2), record(2021, 81.0)]).unwrap();
        assert_eq!(
            csv,
            "unit,sex,age,region,year,value\n\
             YR,F,Y_LT1,PT,2019,81.2\n\
             YR,F,Y_LT1,PT,2021,81.0\n"
        );
    }

    #[test]
    fn test_write_records_creates_dir_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pt_life_expectancy.csv");

        write_records(&path, &[record(2019, 81.2)]).unwrap();
        write_records(&path, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "unit,sex,age,region,year,value\n");

        let leftovers = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_new_output_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pt_life_expectancy.csv");
        write_records(&path, &[]).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_replaced_output_keeps_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pt_life_expectancy.csv");
        std::fs::write(&path, "old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();

        write_records(&path, &[record(2019, 81.2)]).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
        assert!(std::fs::read_to_string(&path).unwrap().contains("2019,81.2"));
    }
}
