use crate::{Column, ColumnLookup, Error, Result};
use itertools::Itertools;

/// Tabular data shown on a table card: a header row of column labels and
/// the data rows below it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Construct a table from a flat, row-major list of cells whose first
    /// `n_columns` entries are the column labels.
    pub fn from_cells(
        name: impl Into<String>,
        cells: impl IntoIterator<Item = impl Into<String>>,
        n_columns: usize,
    ) -> Result<Self> {
        let name = name.into();
        if n_columns == 0 {
            return Err(Error::Table(format!("{name}: a table needs at least one column")));
        }
        let cells = cells.into_iter().map(Into::into).collect_vec();
        if cells.len() < n_columns || cells.len() % n_columns != 0 {
            return Err(Error::Table(format!(
                "{name}: {} cells do not fill rows of {n_columns} columns",
                cells.len()
            )));
        }

        let mut rows = cells
            .into_iter()
            .chunks(n_columns)
            .into_iter()
            .map(|row| row.collect_vec())
            .collect_vec();
        let header = rows.remove(0);
        Ok(Self {
            name,
            columns: header.into_iter().map(Column::new).collect(),
            rows,
        })
    }

    pub fn column_labels(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }
}

impl ColumnLookup for Table {
    fn is_column_label(&self, candidate: &str) -> bool {
        self.columns.iter().any(|c| c.matches(candidate))
    }
}
