//! CSV/TSV loader with delimiter detection and cell typing.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use super::source::{SourceMetadata, format_for_delimiter};
use crate::error::{DfqaError, Result};
use crate::model::{CellValue, Column, ColumnKind, Table};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Spreadsheet and columnar formats that need a dedicated reader.
const BINARY_EXTENSIONS: &[&str] = &["xlsx", "xls", "xlsm", "ods", "parquet", "feather"];

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
    /// Raw fields loaded as missing cells. Compared after trimming.
    pub na_values: Vec<String>,
    /// Store every value of a numeric column as a float once any float appears.
    pub promote_numeric: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
            na_values: vec![String::new()],
            promote_numeric: true,
        }
    }
}

/// Parses delimited text files into tables.
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

    /// Parse a file and return the table and its source metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        let path = path.as_ref();

        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            let ext = ext.to_ascii_lowercase();
            if BINARY_EXTENSIONS.contains(&ext.as_str()) {
                return Err(DfqaError::UnsupportedFormat(format!(
                    "'.{}' files are not delimited text",
                    ext
                )));
            }
        }

        let io_err = |e| DfqaError::Io {
            path: path.to_path_buf(),
            source: e,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let size_bytes = file.metadata().map_err(io_err)?.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_err)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents, self.config.quote)?,
        };

        let table = self.parse_bytes(&contents, delimiter)?;

        tracing::debug!(
            file = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            delimiter = %(delimiter as char).escape_default(),
            "loaded table"
        );

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format_for_delimiter(delimiter).to_string(),
            table.row_count(),
            table.column_count(),
        );

        Ok((table, source))
    }

    /// Parse in-memory delimited text, detecting the delimiter if unset.
    pub fn parse_str(&self, data: &str) -> Result<Table> {
        let bytes = data.as_bytes();
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(bytes, self.config.quote)?,
        };
        self.parse_bytes(bytes, delimiter)
    }

    /// Parse bytes with a known delimiter.
    ///
    /// Fields are decoded lossily so that invalid UTF-8 surfaces as
    /// replacement characters instead of aborting the load.
    fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<Table> {
        if delimiter == self.config.quote || delimiter == b'\n' || delimiter == b'\r' {
            return Err(DfqaError::InvalidDelimiter(format!(
                "{:?} cannot be used as a field delimiter",
                delimiter as char
            )));
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut headers: Vec<String> = if self.config.has_header {
            reader
                .byte_headers()?
                .iter()
                .map(|h| String::from_utf8_lossy(h).trim().to_string())
                .collect()
        } else {
            Vec::new()
        };

        let mut rows: Vec<Vec<String>> = Vec::new();
        for (row_idx, result) in reader.byte_records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            rows.push(
                record
                    .iter()
                    .map(|f| String::from_utf8_lossy(f).into_owned())
                    .collect(),
            );
        }

        if !self.config.has_header {
            let width = rows.iter().map(Vec::len).max().ok_or_else(|| {
                DfqaError::EmptyData("No data rows found".to_string())
            })?;
            headers = (0..width).map(|i| format!("column_{}", i + 1)).collect();
        }

        if headers.is_empty() {
            return Err(DfqaError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = headers.len();
        let mut columns: Vec<Vec<Option<String>>> =
            vec![Vec::with_capacity(rows.len()); expected_cols];

        for row in rows {
            // Short rows are padded with missing cells; extra fields are dropped.
            let mut fields = row.into_iter();
            for values in columns.iter_mut() {
                values.push(fields.next());
            }
        }

        let columns = headers
            .into_iter()
            .zip(columns)
            .map(|(name, values)| self.build_column(name, values))
            .collect();

        Table::new(columns)
    }

    fn type_cell(&self, raw: &str) -> CellValue {
        let trimmed = raw.trim();
        if self.config.na_values.iter().any(|na| na == trimmed) {
            CellValue::Missing
        } else {
            CellValue::infer(raw)
        }
    }

    /// Type a column's raw fields and settle its kind.
    ///
    /// A column that infers as `Text` keeps every present field as its raw
    /// text, so `20230106` or `1` next to words stay strings. Numeric
    /// columns are promoted to floats when configured.
    fn build_column(&self, name: String, raw: Vec<Option<String>>) -> Column {
        let mut values: Vec<CellValue> = raw
            .iter()
            .map(|field| field.as_deref().map_or(CellValue::Missing, |f| self.type_cell(f)))
            .collect();
        let kind = ColumnKind::infer(&values);

        match kind {
            ColumnKind::Text => {
                for (value, field) in values.iter_mut().zip(raw) {
                    match field {
                        Some(field) if !value.is_missing() => *value = CellValue::Text(field),
                        _ => {}
                    }
                }
            }
            ColumnKind::Numeric
                if self.config.promote_numeric
                    && values.iter().any(|v| matches!(v, CellValue::Float(_))) =>
            {
                for value in &mut values {
                    if let CellValue::Integer(i) = *value {
                        *value = CellValue::Float(i as f64);
                    }
                }
            }
            _ => {}
        }

        Column::new(name, kind, values)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect the delimiter by analyzing the first few lines.
///
/// Lines are decoded lossily, so invalid UTF-8 never hides input.
fn detect_delimiter(bytes: &[u8], quote: u8) -> Result<u8> {
    let lines: Vec<String> = bytes
        .split(|&b| b == b'\n')
        .take(10)
        .map(|line| String::from_utf8_lossy(line).trim_end_matches('\r').to_string())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(DfqaError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim, quote))
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

        // Consistent counts win; tab gets a slight bonus as it rarely appears in values.
        let score = if consistent {
            first_count * 1000 + if delim == b'\t' { 100 } else { 0 }
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
fn count_delimiter_in_line(line: &str, delimiter: u8, quote: u8) -> usize {
    let delim_char = delimiter as char;
    let quote_char = quote as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            c if c == quote_char => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data, b'"').unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data, b'"').unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_ignores_quoted() {
        let data = b"name;note\n\"Smith, J\";ok\n\"Doe, A\";fine";
        assert_eq!(detect_delimiter(data, b'"').unwrap(), b';');
    }

    #[test]
    fn test_detect_delimiter_respects_configured_quote() {
        let data = b"name;note\n'Smith, J';ok\n'Doe, A';fine";
        assert_eq!(detect_delimiter(data, b'\'').unwrap(), b';');

        let config = ParserConfig {
            quote: b'\'',
            ..ParserConfig::default()
        };
        let table = Parser::with_config(config).parse_str(std::str::from_utf8(data).unwrap()).unwrap();
        assert_eq!(table.get(0, 0), Some(&CellValue::from("Smith, J")));
    }

    #[test]
    fn test_detect_delimiter_survives_invalid_utf8() {
        assert_eq!(detect_delimiter(b"name,caf\xe9\nx,y\n", b'"').unwrap(), b',');
        assert_eq!(detect_delimiter(b"a\tb\r\n\xff\t1\r\n", b'"').unwrap(), b'\t');
    }

    #[test]
    fn test_parse_csv_types_cells() {
        let parser = Parser::new();
        let table = parser
            .parse_str("name,age,score,active\nAlice,30,1.5,true\nBob,,2,false")
            .unwrap();

        assert_eq!(table.column_names(), vec!["name", "age", "score", "active"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, 0), Some(&CellValue::from("Alice")));
        assert_eq!(table.get(0, 1), Some(&CellValue::Integer(30)));
        assert_eq!(table.get(1, 1), Some(&CellValue::Missing));
        assert_eq!(table.column("name").unwrap().kind, ColumnKind::Text);
        assert_eq!(table.column("age").unwrap().kind, ColumnKind::Numeric);
        assert_eq!(table.column("active").unwrap().kind, ColumnKind::Other);
    }

    #[test]
    fn test_numeric_promotion() {
        let table = Parser::new().parse_str("v\n1\n2.5\n3").unwrap();
        let col = table.column("v").unwrap();
        assert_eq!(
            col.values,
            vec![CellValue::Float(1.0), CellValue::Float(2.5), CellValue::Float(3.0)]
        );

        let config = ParserConfig {
            promote_numeric: false,
            ..ParserConfig::default()
        };
        let table = Parser::with_config(config).parse_str("v\n1\n2.5\n3").unwrap();
        assert_eq!(table.get(0, 0), Some(&CellValue::Integer(1)));
    }

    #[test]
    fn test_placeholders_stay_text_by_default() {
        let table = Parser::new().parse_str("status\nNA\nactive\n").unwrap();
        assert_eq!(table.get(0, 0), Some(&CellValue::from("NA")));
    }

    #[test]
    fn test_custom_na_values() {
        let config = ParserConfig {
            na_values: vec![String::new(), "NA".to_string()],
            ..ParserConfig::default()
        };
        let table = Parser::with_config(config).parse_str("status\nNA\nactive\n").unwrap();
        assert_eq!(table.get(0, 0), Some(&CellValue::Missing));
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let table = Parser::new().parse_str("a,b,c\n1,2\n4,5,6,7").unwrap();
        assert_eq!(table.get(0, 2), Some(&CellValue::Missing));
        assert_eq!(table.get(1, 2), Some(&CellValue::Integer(6)));
        assert_eq!(table.column_count(), 3);
    }

    #[test]
    fn test_no_header_generates_names() {
        let config = ParserConfig {
            has_header: false,
            delimiter: Some(b','),
            ..ParserConfig::default()
        };
        let table = Parser::with_config(config).parse_str("x,1\ny,2").unwrap();
        assert_eq!(table.column_names(), vec!["column_1", "column_2"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let table = Parser::new().parse_bytes(b"name\ncaf\xe9\n", b',').unwrap();
        let value = table.get(0, 0).and_then(CellValue::as_text).unwrap();
        assert!(value.contains('\u{FFFD}'));
    }

    #[test]
    fn test_parse_file_with_invalid_utf8_header() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"name,caf\xe9\nx,y\n").unwrap();

        let (table, source) = Parser::new().parse_file(file.path()).unwrap();
        assert_eq!(source.format, "csv");
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.column_names()[1], "caf\u{FFFD}");
        assert_eq!(table.get(0, 1), Some(&CellValue::from("y")));
    }

    #[test]
    fn test_text_columns_keep_raw_fields() {
        let table = Parser::new().parse_str("d,code,n\n2023-01-05,x,1\n20230106,1,2\nJan 7 2023,0,\n").unwrap();

        let dates = table.column("d").unwrap();
        assert_eq!(dates.kind, ColumnKind::Text);
        assert_eq!(dates.values[1], CellValue::from("20230106"));

        let codes = table.column("code").unwrap();
        assert_eq!(codes.values, vec![CellValue::from("x"), CellValue::from("1"), CellValue::from("0")]);

        assert_eq!(table.column("n").unwrap().values[1], CellValue::Integer(2));
        assert_eq!(table.get(2, 2), Some(&CellValue::Missing));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            Parser::new().parse_str(""),
            Err(DfqaError::EmptyData(_))
        ));
    }
}
