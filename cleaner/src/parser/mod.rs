//! Raw TSV loading with encoding auto-detection.
//!
//! Reads the whole file at once, decodes it, and parses it into a
//! [`RawTable`]. No cleaning happens here beyond padding short rows.

use std::path::Path;

use crate::error::{InputError, InputResult};
use crate::logs::{log_info, log_success};
use crate::models::{RawRow, RawTable};

/// Field delimiter of the Eurostat bulk download format.
pub const TSV_DELIMITER: u8 = b'\t';

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "iso-8859-15" | "latin-9" | "latin9" => "iso-8859-15".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the given encoding.
///
/// Latin-1 is decoded as Windows-1252 (the WHATWG reading of the label);
/// Latin-9 keeps its own table. Unknown encodings fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let decoded = match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        "iso-8859-15" | "latin-9" | "latin9" => encoding_rs::ISO_8859_15.decode(bytes).0.into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    };
    decoded.trim_start_matches('\u{feff}').to_string()
}

/// Load the raw wide table from a TSV file.
///
/// The file handle is held only for the single read.
pub fn read_raw_table<P: AsRef<Path>>(path: P) -> InputResult<RawTable> {
    let path = path.as_ref();
    log_info(format!("Reading {}", path.display()));

    let bytes = std::fs::read(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let encoding = detect_encoding(&bytes);
    log_info(format!("Detected encoding: {}", encoding));

    let content = decode_content(&bytes, &encoding);
    let table = parse_raw_table(&content)?;
    log_success(format!(
        "Read {} rows x {} year columns",
        table.rows.len(),
        table.year_labels().len()
    ));
    Ok(table)
}

/// Parse tab-separated content into a [`RawTable`].
///
/// Rows shorter than the header are padded with empty cells; rows longer
/// than the header are rejected.
pub fn parse_raw_table(content: &str) -> InputResult<RawTable> {
    if content.trim().is_empty() {
        return Err(InputError::EmptyFile);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(TSV_DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(InputError::NoHeaders);
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(rows.len() + 2);

        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        if record.len() > headers.len() {
            return Err(InputError::RaggedRow {
                line,
                expected: headers.len(),
                found: record.len(),
            });
        }

        let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
        cells.resize(headers.len(), String::new());
        rows.push(RawRow { line, cells });
    }

    Ok(RawTable { headers, rows })
}
