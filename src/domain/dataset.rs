//! Tabular dataset abstraction
//!
//! The classification engine never assumes a concrete storage format: a
//! [`Dataset`] is a list of named columns whose cells are possibly-missing
//! scalars already coerced to text. CSV is one concrete source, provided
//! for the CLI; callers embedding the engine can build datasets from any
//! tabular backend.

use crate::domain::errors::PrivsenseError;
use crate::domain::result::Result;
use std::io::Read;
use std::path::Path;

/// Default cap on the number of values sampled per column.
///
/// Bounds per-column work on large datasets; classification scans at most
/// this many non-missing values.
pub const DEFAULT_SAMPLE_SIZE: usize = 200;

/// A single named column with possibly-missing text cells
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    cells: Vec<Option<String>>,
}

impl Column {
    /// Create a column from already-coerced cells
    pub fn new(name: impl Into<String>, cells: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Create a column where every cell is present
    pub fn from_values<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            cells: values.into_iter().map(|v| Some(v.into())).collect(),
        }
    }

    /// Column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All cells, including missing ones
    pub fn cells(&self) -> &[Option<String>] {
        &self.cells
    }

    /// Number of rows in the column
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the column has no rows
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Take a bounded ordered sample of the non-missing values.
    ///
    /// Missing cells are skipped; present cells are kept in order up to
    /// `cap` values. Empty strings are kept (they classify as Low later),
    /// matching the contract that malformed input is coerced, never raised.
    pub fn sample(&self, cap: usize) -> ColumnSample {
        let values = self
            .cells
            .iter()
            .filter_map(|c| c.as_deref())
            .take(cap)
            .map(str::to_string)
            .collect();
        ColumnSample {
            name: self.name.clone(),
            values,
        }
    }
}

/// A column name plus a bounded ordered sample of its non-missing values.
///
/// Created per classification call; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSample {
    name: String,
    values: Vec<String>,
}

impl ColumnSample {
    /// Build a sample directly, primarily for embedding callers and tests
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sampled values, in column order
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// A tabular dataset: an ordered collection of named columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    /// Create a dataset from pre-built columns
    pub fn from_columns(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Load a dataset from a CSV file.
    ///
    /// The first record is treated as the header row. Empty cells become
    /// missing values; everything else is kept verbatim as text.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            PrivsenseError::Dataset(format!("Failed to open CSV file {}: {}", path.display(), e))
        })?;
        Self::from_csv_reader(file)
    }

    /// Load a dataset from any CSV byte stream
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| PrivsenseError::Dataset(format!("Failed to read CSV header: {e}")))?
            .clone();

        let mut columns: Vec<Column> = headers
            .iter()
            .map(|h| Column::new(h, Vec::new()))
            .collect();

        for (row_idx, record) in rdr.records().enumerate() {
            let record = record.map_err(|e| {
                PrivsenseError::Dataset(format!("Failed to read CSV record {}: {}", row_idx + 1, e))
            })?;
            for (col_idx, column) in columns.iter_mut().enumerate() {
                let cell = record.get(col_idx).unwrap_or("");
                column.cells.push(if cell.is_empty() {
                    None
                } else {
                    Some(cell.to_string())
                });
            }
        }

        if columns.is_empty() {
            return Err(PrivsenseError::Dataset(
                "CSV input has no columns".to_string(),
            ));
        }

        Ok(Self { columns })
    }

    /// All columns in order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows (length of the longest column)
    pub fn row_count(&self) -> usize {
        self.columns.iter().map(Column::len).max().unwrap_or(0)
    }
}
