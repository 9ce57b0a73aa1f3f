//! Spreadsheet reader for delimited text and JSON row exports.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::{CellValue, DataTable, SourceMetadata};
use crate::error::{GeofenceError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Reads spreadsheet exports into a [`DataTable`].
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the data table and metadata.
    ///
    /// Files ending in `.json` are read as an array of row objects; anything
    /// else is treated as delimited text.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| GeofenceError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| GeofenceError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let size_bytes = contents.len() as u64;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let is_json = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let (data_table, format) = if contents.iter().all(u8::is_ascii_whitespace) {
            (DataTable::new(Vec::new(), Vec::new()), "empty".to_string())
        } else if is_json {
            (self.parse_json(&contents)?, "json".to_string())
        } else {
            let delimiter = match self.config.delimiter {
                Some(d) => d,
                None => detect_delimiter(&contents)?,
            };
            let format = match delimiter {
                b'\t' => "tsv",
                b',' => "csv",
                b';' => "csv-semicolon",
                b'|' => "psv",
                _ => "delimited",
            }
            .to_string();
            (self.parse_bytes(&contents, delimiter)?, format)
        };

        debug!(
            file = %path.display(),
            format = %format,
            rows = data_table.row_count(),
            "source decoded"
        );

        let source_metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            data_table.row_count(),
            data_table.column_count(),
        );

        Ok((data_table, source_metadata))
    }

    /// Parse delimited bytes. A header with no data rows is a valid, empty table.
    pub fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut records = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }
            records.push(result?);
        }

        let headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(|s| s.to_string()).collect()
        } else {
            let width = records.iter().map(|r| r.len()).max().unwrap_or(0);
            (0..width).map(|i| format!("column_{}", i + 1)).collect()
        };

        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(GeofenceError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = headers.len();
        let rows = records
            .iter()
            .map(|record| {
                let mut row: Vec<CellValue> = record.iter().map(CellValue::from).collect();
                row.resize(expected_cols, CellValue::Text(String::new()));
                row
            })
            .collect();

        Ok(DataTable::new(headers, rows))
    }

    /// Parse a JSON array of row objects, the shape a sheet-to-JSON export produces.
    ///
    /// Headers are the union of keys in first-seen order. Null cells are left
    /// out of the row; booleans become text.
    pub fn parse_json(&self, bytes: &[u8]) -> Result<DataTable> {
        let value: Value = serde_json::from_slice(bytes)?;
        let Value::Array(items) = value else {
            return Err(GeofenceError::UnsupportedFormat(
                "expected a JSON array of row objects".to_string(),
            ));
        };

        let mut headers: IndexMap<String, ()> = IndexMap::new();
        let mut keyed_rows = Vec::with_capacity(items.len());
        for (row_idx, item) in items.into_iter().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }
            let Value::Object(map) = item else {
                return Err(GeofenceError::UnsupportedFormat(format!(
                    "row {} is not an object",
                    row_idx + 1
                )));
            };
            let mut cells = IndexMap::new();
            for (key, cell) in map {
                let cell = match cell {
                    Value::Null => continue,
                    Value::String(s) => CellValue::Text(s),
                    Value::Number(n) => match n.as_f64() {
                        Some(f) => CellValue::Number(f),
                        None => CellValue::Text(n.to_string()),
                    },
                    Value::Bool(b) => CellValue::Text(b.to_string()),
                    other => CellValue::Text(other.to_string()),
                };
                headers.entry(key.clone()).or_insert(());
                cells.insert(key, cell);
            }
            keyed_rows.push(cells);
        }

        let headers: Vec<String> = headers.into_keys().collect();
        let rows = keyed_rows
            .into_iter()
            .map(|mut cells| {
                headers
                    .iter()
                    .map(|h| {
                        cells
                            .shift_remove(h)
                            .unwrap_or_else(|| CellValue::Text(String::new()))
                    })
                    .collect()
            })
            .collect();

        Ok(DataTable::new(headers, rows))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(GeofenceError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Commas inside quoted WKT cells are not counted.
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
