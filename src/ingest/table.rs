//! Raw tabular input.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::error::{EngineError, EngineResult};

/// An uploaded employee table before normalization.
///
/// Cells are kept as strings; an empty cell is stored as `None`. Rows shorter
/// than the header are padded with missing cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Builds a table from headers and rows.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InputParseError`] if a header is repeated or a
    /// row has more cells than there are headers.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> EngineResult<Self> {
        let mut seen = HashSet::new();
        for header in &headers {
            if !seen.insert(header.as_str()) {
                return Err(EngineError::InputParseError {
                    message: format!("duplicate column '{}'", header),
                });
            }
        }

        let width = headers.len();
        let mut padded = Vec::with_capacity(rows.len());
        for (index, mut row) in rows.into_iter().enumerate() {
            if row.len() > width {
                return Err(EngineError::InputParseError {
                    message: format!(
                        "row {} has {} cells but the header has {} columns",
                        index,
                        row.len(),
                        width
                    ),
                });
            }
            row.resize(width, None);
            padded.push(row);
        }

        Ok(Self {
            headers,
            rows: padded,
        })
    }

    /// Reads a CSV table with a header row.
    ///
    /// Cells are trimmed; cells that are empty after trimming are missing.
    pub fn from_reader<R: Read>(reader: R) -> EngineResult<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            rows.push(
                record
                    .iter()
                    .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
                    .collect(),
            );
        }

        Self::new(headers, rows)
    }

    /// Reads a CSV table from a file.
    pub fn from_path(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| EngineError::InputParseError {
            message: format!("{}: {}", path.display(), e),
        })?;
        Self::from_reader(file)
    }

    /// Reads a CSV table held in memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use salary_advisor::ingest::RawTable;
    ///
    /// let table = RawTable::from_csv_str("ID,Name\n1,Asha\n2,\n").unwrap();
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.cell(0, "Name"), Some("Asha"));
    /// assert_eq!(table.cell(1, "Name"), None);
    /// ```
    pub fn from_csv_str(data: &str) -> EngineResult<Self> {
        Self::from_reader(data.as_bytes())
    }

    /// Column headers in table order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All rows, each as wide as the header.
    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the position of a column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Whether the table has the given column.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Returns a cell by row index and column name; `None` if either the
    /// column or the value is missing.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)?.as_deref()
    }
}

fn csv_error(error: csv::Error) -> EngineError {
    EngineError::InputParseError {
        message: error.to_string(),
    }
}
