//! Structural reshaping: composite key split and wide-to-long melt.

use std::collections::HashSet;

use crate::error::{PipelineError, PipelineResult};
use crate::logs::log_warning;
use crate::models::{KeyedRow, MeltedRow, RawTable, RegionKey};

/// Separator inside the composite key column.
pub const KEY_SEPARATOR: char = ',';

/// Number of parts in a composite key (`unit,sex,age,region`).
pub const KEY_PARTS: usize = 4;

/// Split a composite key into its four trimmed codes.
///
/// Returns the number of parts found when it is not exactly four.
pub fn split_key(raw: &str) -> Result<RegionKey, usize> {
    let parts: Vec<&str> = raw.split(KEY_SEPARATOR).map(str::trim).collect();
    match parts.as_slice() {
        [unit, sex, age, region] => Ok(RegionKey {
            unit: unit.to_string(),
            sex: sex.to_string(),
            age: age.to_string(),
            region: region.to_string(),
        }),
        _ => Err(parts.len()),
    }
}

/// Replace the first column of every row with its parsed [`RegionKey`].
///
/// Returns the year-column labels alongside the keyed rows. The first
/// malformed key aborts the whole table.
pub fn split_keys(table: RawTable) -> PipelineResult<(Vec<String>, Vec<KeyedRow>)> {
    let RawTable { mut headers, rows } = table;
    let labels = if headers.is_empty() { Vec::new() } else { headers.split_off(1) };

    let mut keyed = Vec::with_capacity(rows.len());
    for row in rows {
        let mut cells = row.cells.into_iter();
        let raw_key = cells.next().unwrap_or_default();
        let key = split_key(&raw_key).map_err(|parts| PipelineError::MalformedKey {
            line: row.line,
            key: raw_key.clone(),
            parts,
        })?;
        keyed.push(KeyedRow {
            key,
            cells: cells.collect(),
        });
    }

    Ok((labels, keyed))
}

/// Melt keyed wide rows into one row per (row, year-column) pair.
///
/// Iterates column-major: every row for the first year column, then every
/// row for the second, and so on. Only the first of several identical
/// labels is melted.
pub fn melt(labels: &[String], rows: &[KeyedRow]) -> Vec<MeltedRow> {
    let mut seen = HashSet::new();
    let mut melted = Vec::with_capacity(labels.len() * rows.len());

    for (col, label) in labels.iter().enumerate() {
        if !seen.insert(label.as_str()) {
            log_warning(format!("Skipping duplicate year column '{}'", label.trim()));
            continue;
        }
        for row in rows {
            melted.push(MeltedRow {
                key: row.key.clone(),
                year: label.clone(),
                value: row.cells.get(col).cloned().unwrap_or_default(),
            });
        }
    }

    melted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawRow;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .enumerate()
                .map(|(i, cells)| RawRow {
                    line: i + 2,
                    cells: cells.iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_split_key_trims_parts() {
        let key = split_key(" YR , F,Y_LT1 ,PT ").unwrap();
        assert_eq!(key.unit, "YR");
        assert_eq!(key.sex, "F");
        assert_eq!(key.age, "Y_LT1");
        assert_eq!(key.region, "PT");
    }

    #[test]
    fn test_split_key_wrong_part_count() {
        assert_eq!(split_key("YR,F,PT"), Err(3));
        assert_eq!(split_key("YR,F,Y1,PT,X"), Err(5));
        assert_eq!(split_key(""), Err(1));
    }

    #[test]
    fn test_split_keys_discards_key_header() {
        let raw = table(&["unit,sex,age,geo\\time", "2020", "2019"], &[&["YR,F,Y1,PT", "81", "80"]]);
        let (labels, rows) = split_keys(raw).unwrap();
        assert_eq!(labels, vec!["2020", "2019"]);
        assert_eq!(rows[0].key.region, "PT");
        assert_eq!(rows[0].cells, vec!["81", "80"]);
    }

    #[test]
    fn test_split_keys_malformed_is_fatal() {
        let raw = table(
            &["key", "2020"],
            &[&["YR,F,Y1,PT", "81"], &["YR,F,PT", "80"]],
        );
        match split_keys(raw) {
            Err(PipelineError::MalformedKey { line, key, parts }) => {
                assert_eq!(line, 3);
                assert_eq!(key, "YR,F,PT");
                assert_eq!(parts, 3);
            }
            other => panic!("expected MalformedKey, got {:?}", other),
        }
    }

    #[test]
    fn test_melt_column_major_order() {
        let raw = table(
            &["key", "2020", "2019"],
            &[&["YR,F,Y1,PT", "a20", "a19"], &["YR,M,Y1,PT", "b20", "b19"]],
        );
        let (labels, rows) = split_keys(raw).unwrap();
        let melted = melt(&labels, &rows);

        let order: Vec<(&str, &str, &str)> = melted
            .iter()
            .map(|m| (m.key.sex.as_str(), m.year.as_str(), m.value.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("F", "2020", "a20"),
                ("M", "2020", "b20"),
                ("F", "2019", "a19"),
                ("M", "2019", "b19"),
            ]
        );
    }

    #[test]
    fn test_melt_keeps_raw_labels_and_values() {
        let raw = table(&["key", " 2020 "], &[&["YR,F,Y1,PT", " 81.2 e"]]);
        let (labels, rows) = split_keys(raw).unwrap();
        let melted = melt(&labels, &rows);
        assert_eq!(melted[0].year, " 2020 ");
        assert_eq!(melted[0].value, " 81.2 e");
    }

    #[test]
    fn test_melt_skips_duplicate_labels() {
        let raw = table(&["key", "2020", "2020"], &[&["YR,F,Y1,PT", "first", "second"]]);
        let (labels, rows) = split_keys(raw).unwrap();
        let melted = melt(&labels, &rows);
        assert_eq!(melted.len(), 1);
        assert_eq!(melted[0].value, "first");
    }
}
