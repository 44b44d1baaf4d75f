//! In-memory table
//!
//! Rows keep input order; columns are the first-seen union of every row's
//! keys. Cells a row does not set are null.

use super::cell::Cell;
use crate::error::Result;
use arrow::record_batch::RecordBatch;
use std::collections::HashMap;
use std::fmt;

/// A column key, flat or two-level
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnKey {
    Flat(String),
    /// `(name, sub)`; `sub` is empty for non-date columns of a two-level table
    Nested(String, String),
}

impl ColumnKey {
    pub fn flat(name: impl Into<String>) -> Self {
        Self::Flat(name.into())
    }

    pub fn nested(name: impl Into<String>, sub: impl Into<String>) -> Self {
        Self::Nested(name.into(), sub.into())
    }

    /// Top-level name
    pub fn name(&self) -> &str {
        match self {
            Self::Flat(name) | Self::Nested(name, _) => name,
        }
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Nested(..))
    }

    fn into_nested(self) -> Self {
        match self {
            Self::Flat(name) => Self::Nested(name, String::new()),
            nested => nested,
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat(name) => f.write_str(name),
            Self::Nested(name, sub) if sub.is_empty() => f.write_str(name),
            Self::Nested(name, sub) => write!(f, "{name}.{sub}"),
        }
    }
}

impl From<&str> for ColumnKey {
    fn from(name: &str) -> Self {
        Self::flat(name)
    }
}

impl From<(&str, &str)> for ColumnKey {
    fn from((name, sub): (&str, &str)) -> Self {
        Self::nested(name, sub)
    }
}

/// One row before assembly: keyed cells in property order
pub type Record = Vec<(ColumnKey, Cell)>;

/// A rows-by-columns table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<ColumnKey>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create an empty table with the given columns
    pub fn with_columns(columns: Vec<ColumnKey>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Assemble records into a table
    ///
    /// If any key is two-level, every flat key `x` becomes `(x, "")` so the
    /// column structure stays uniform.
    pub fn from_records(records: Vec<Record>) -> Self {
        let nested = records
            .iter()
            .flat_map(|r| r.iter())
            .any(|(key, _)| key.is_nested());

        let mut columns: Vec<ColumnKey> = Vec::new();
        let mut index: HashMap<ColumnKey, usize> = HashMap::new();
        let mut sparse: Vec<Vec<(usize, Cell)>> = Vec::with_capacity(records.len());

        for record in records {
            let mut row = Vec::with_capacity(record.len());
            for (key, cell) in record {
                let key = if nested { key.into_nested() } else { key };
                let position = match index.get(&key) {
                    Some(&i) => i,
                    None => {
                        columns.push(key.clone());
                        index.insert(key, columns.len() - 1);
                        columns.len() - 1
                    }
                };
                row.push((position, cell));
            }
            sparse.push(row);
        }

        let width = columns.len();
        let rows = sparse
            .into_iter()
            .map(|cells| {
                let mut row = vec![Cell::Null; width];
                for (i, cell) in cells {
                    row[i] = cell;
                }
                row
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[ColumnKey] {
        &self.columns
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether columns are two-level
    pub fn is_multiindex(&self) -> bool {
        self.columns.iter().any(ColumnKey::is_nested)
    }

    /// Position of a column
    pub fn column_index(&self, key: &ColumnKey) -> Option<usize> {
        self.columns.iter().position(|c| c == key)
    }

    /// All cells of one column, top to bottom
    pub fn column(&self, key: &ColumnKey) -> Option<Vec<&Cell>> {
        let i = self.column_index(key)?;
        Some(self.rows.iter().map(|row| &row[i]).collect())
    }

    /// A single cell
    pub fn get(&self, row: usize, key: &ColumnKey) -> Option<&Cell> {
        let i = self.column_index(key)?;
        self.rows.get(row).map(|r| &r[i])
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Convert to an Arrow RecordBatch
    ///
    /// See [`crate::output::table_to_record_batch`].
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        crate::output::table_to_record_batch(self)
    }
}
