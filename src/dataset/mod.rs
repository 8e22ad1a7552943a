//! In-memory snapshot of the table being filtered.
//!
//! A dataset is loaded once at startup from a CSV/TSV or JSON file. Every
//! cell is kept as a string, which is all autocomplete and prefix filtering
//! need.

use anyhow::{Context, Result, bail};
use rustc_hash::FxHashSet;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// One table row, cells in column order
pub type Row = Vec<String>;

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset from column names and rows. Short rows are padded with
    /// empty cells and long rows are cut to the column count.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self {
            columns: columns.into_iter().map(|c| c.trim().to_string()).collect(),
            rows,
        }
    }

    /// Load a dataset, picking the reader from the file extension
    pub fn load(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset {}", path.display()))?;

        let dataset = match ext.as_str() {
            "csv" => Self::from_delimited(&content, b','),
            "tsv" => Self::from_delimited(&content, b'\t'),
            "json" => Self::from_json(&content),
            other => bail!(
                "Unsupported dataset format {:?} for {} (expected csv, tsv or json)",
                other,
                path.display()
            ),
        }
        .with_context(|| format!("Failed to parse dataset {}", path.display()))?;

        info!(
            path = %path.display(),
            rows = dataset.len(),
            columns = dataset.columns.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    /// Parse delimited text with a header row
    pub fn from_delimited(content: &str, delimiter: u8) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let columns: Vec<String> = reader
            .headers()
            .context("Failed to read header row")?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("Malformed record {}", i + 1))?;
            rows.push(record.iter().map(|cell| cell.to_string()).collect());
        }

        Ok(Self::new(columns, rows))
    }

    /// Parse a JSON array of flat objects.
    ///
    /// Columns are the union of keys in first-seen order. Missing keys and
    /// `null` become empty cells; other non-string values are written out as
    /// JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).context("Invalid JSON")?;
        let Value::Array(records) = value else {
            bail!("Expected a JSON array of records");
        };

        let mut columns: Vec<String> = Vec::new();
        let mut seen: FxHashSet<String> = FxHashSet::default();
        for (i, record) in records.iter().enumerate() {
            let Value::Object(map) = record else {
                bail!("Record {} is not a JSON object", i + 1);
            };
            for key in map.keys() {
                if seen.insert(key.clone()) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .iter()
            .filter_map(Value::as_object)
            .map(|map| {
                columns
                    .iter()
                    .map(|col| map.get(col).map(cell_text).unwrap_or_default())
                    .collect()
            })
            .collect();

        Ok(Self::new(columns, rows))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Position of the named column
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Trimmed, non-empty values of a column, deduplicated in first-seen order
    pub fn distinct_values(&self, column: usize) -> Vec<&str> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let values: Vec<&str> = self
            .rows
            .iter()
            .filter_map(|row| row.get(column))
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty() && seen.insert(*cell))
            .collect();
        debug!(column, distinct = values.len(), "collected distinct values");
        values
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_csv_pads_and_trims_headers() {
        let content = "Name , Borough\nAlphabet City,Manhattan\nDUMBO\n";
        let data = Dataset::from_delimited(content, b',').unwrap();
        assert_eq!(data.columns(), &["Name", "Borough"]);
        assert_eq!(data.len(), 2);
        assert_eq!(
            data.row(1).unwrap(),
            &vec!["DUMBO".to_string(), String::new()]
        );
        assert_eq!(data.column("Borough"), Some(1));
        assert_eq!(data.column("borough"), None);
    }

    #[test]
    fn test_from_json_unions_keys() {
        let data = Dataset::from_json(
            r#"[{"name": "ACE", "count": 3}, {"name": null, "set": "neo"}, {"set": "sta"}]"#,
        )
        .unwrap();
        assert_eq!(data.columns(), &["name", "count", "set"]);
        assert_eq!(
            data.row(0).unwrap(),
            &vec!["ACE".to_string(), "3".into(), "".into()]
        );
        assert_eq!(
            data.row(1).unwrap(),
            &vec!["".to_string(), "".into(), "neo".into()]
        );
        assert_eq!(data.row(2).unwrap()[2], "sta");
    }

    #[test]
    fn test_from_json_rejects_non_array() {
        assert!(Dataset::from_json(r#"{"name": "x"}"#).is_err());
        assert!(Dataset::from_json(r#"[1, 2]"#).is_err());
        assert!(Dataset::from_json("not json").is_err());
    }

    #[test]
    fn test_distinct_values_trim_and_skip_empty() {
        let data = Dataset::new(
            vec!["Name".into()],
            vec![
                vec!["  SoHo ".into()],
                vec!["".into()],
                vec!["SoHo".into()],
                vec!["   ".into()],
                vec!["NoHo".into()],
            ],
        );
        assert_eq!(data.distinct_values(0), vec!["SoHo", "NoHo"]);
        assert!(data.distinct_values(5).is_empty());
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let tsv = dir.path().join("places.tsv");
        let mut f = fs::File::create(&tsv).unwrap();
        writeln!(f, "Name\tBorough").unwrap();
        writeln!(f, "Alphabet City\tManhattan").unwrap();
        let data = Dataset::load(&tsv).unwrap();
        assert_eq!(data.row(0).unwrap()[1], "Manhattan");

        let txt = dir.path().join("places.txt");
        fs::write(&txt, "Name\n").unwrap();
        let err = Dataset::load(&txt).unwrap_err();
        assert!(format!("{err:#}").contains("Unsupported dataset format"));

        assert!(Dataset::load(&dir.path().join("missing.csv")).is_err());
    }
}
