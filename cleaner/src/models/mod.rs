//! Table shapes that flow through the cleaning pipeline.
//!
//! - [`RawTable`] - The wide table as read from the TSV
//! - [`KeyedRow`] - A wide row with its composite key split into [`RegionKey`]
//! - [`MeltedRow`] - One (row, year-column) pair with raw label and raw value
//! - [`DatedRow`] - A melted row whose year label passed validation
//! - [`CleanRecord`] - The final long-format record
//!
//! Each stage consumes the previous table and produces a new one.

use serde::Serialize;

/// Column order of the cleaned output.
pub const OUTPUT_COLUMNS: [&str; 6] = ["unit", "sex", "age", "region", "year", "value"];

// =============================================================================
// Wide Table
// =============================================================================

/// The raw wide table, fully materialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Header row. The first entry names the composite key column and is ignored.
    pub headers: Vec<String>,
    /// Data rows, in file order.
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Labels of every column after the key column.
    pub fn year_labels(&self) -> &[String] {
        self.headers.get(1..).unwrap_or(&[])
    }
}

/// A single wide row.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 1-based line in the source file (header is line 1).
    pub line: usize,
    /// Cells, padded to the header width.
    pub cells: Vec<String>,
}

// =============================================================================
// Long-format Stages
// =============================================================================

/// The four identifying codes carried by every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionKey {
    pub unit: String,
    pub sex: String,
    pub age: String,
    pub region: String,
}

/// A wide row after the key split; `cells` holds the year-column values.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedRow {
    pub key: RegionKey,
    pub cells: Vec<String>,
}

/// A melted row before any validation.
#[derive(Debug, Clone, PartialEq)]
pub struct MeltedRow {
    pub key: RegionKey,
    /// Raw year label, as found in the header.
    pub year: String,
    /// Raw cell content.
    pub value: String,
}

/// A melted row with a validated year.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedRow {
    pub key: RegionKey,
    pub year: i32,
    pub value: String,
}

/// A cleaned long-format record.
///
/// Field order matches [`OUTPUT_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanRecord {
    pub unit: String,
    pub sex: String,
    pub age: String,
    pub region: String,
    pub year: i32,
    pub value: f64,
}

impl CleanRecord {
    pub fn new(key: RegionKey, year: i32, value: f64) -> Self {
        Self {
            unit: key.unit,
            sex: key.sex,
            age: key.age,
            region: key.region,
            year,
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_labels_skip_key_column() {
        let table = RawTable {
            headers: vec!["unit,sex,age,geo\\time".into(), "2021 ".into(), "2020 ".into()],
            rows: vec![],
        };
        assert_eq!(table.year_labels(), &["2021 ".to_string(), "2020 ".to_string()]);
        assert!(RawTable::default().year_labels().is_empty());
    }

    #[test]
    fn test_clean_record_serializes_in_output_order() {
        let key = RegionKey {
            unit: "YR".into(),
            sex: "F".into(),
            age: "Y_LT1".into(),
            region: "PT".into(),
        };
        let record = CleanRecord::new(key, 2019, 81.2);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"unit":"YR","sex":"F","age":"Y_LT1","region":"PT","year":2019,"value":81.2}"#
        );
    }
}
