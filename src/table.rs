use crate::error::{ExplorerError, Result};
use crate::models::Cell;
use ahash::AHashMap;

/// Candidate identifier columns, in priority order.
pub const IDENTIFIER_COLUMNS: [&str; 3] = ["name", "pais", "country"];

/// Structural columns that are never treated as data.
pub const STRUCTURAL_COLUMNS: [&str; 2] = ["geo", "ano"];

static MISSING: Cell = Cell::Missing;

/// One loaded dataset: a header plus rows of classified cells.
///
/// The identifier column, the value columns and a first-match row index are derived once at
/// construction. A table is never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
    id_col: Option<usize>,
    value_cols: Vec<usize>,
    index: AHashMap<String, usize>,
}

/// Borrowed view of one row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    cells: &'a [Cell],
}

impl<'a> Row<'a> {
    /// Cell under `column`; `Missing` if the table has no such column.
    pub fn get(&self, column: &str) -> &'a Cell {
        match self.table.position(column) {
            Some(i) => &self.cells[i],
            None => &MISSING,
        }
    }

    /// Identifier value of this row, if the table has an identifier column and it is set.
    pub fn key(&self) -> Option<String> {
        self.table.id_col.and_then(|i| self.cells[i].as_key())
    }
}

impl Table {
    /// Build a table. Rows shorter than the header are padded with `Missing`, longer rows
    /// are truncated.
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let name = name.into();
        let width = columns.len();
        let rows: Vec<Vec<Cell>> = rows
            .into_iter()
            .map(|mut r| {
                r.resize(width, Cell::Missing);
                r
            })
            .collect();

        let id_col = IDENTIFIER_COLUMNS
            .iter()
            .find_map(|cand| columns.iter().position(|c| c == cand));
        let value_cols = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| !is_reserved(c))
            .map(|(i, _)| i)
            .collect();

        let mut index = AHashMap::new();
        if let Some(ic) = id_col {
            for (ri, row) in rows.iter().enumerate() {
                if let Some(k) = row[ic].as_key() {
                    // first match wins
                    index.entry(k).or_insert(ri);
                }
            }
        }

        Self {
            name,
            columns,
            rows,
            id_col,
            value_cols,
            index,
        }
    }

    /// Convenience constructor from raw text, classifying every field with [`Cell::parse`].
    pub fn from_text_rows(name: impl Into<String>, headers: &[&str], rows: &[Vec<&str>]) -> Self {
        let columns = headers.iter().map(|h| h.trim().to_string()).collect();
        let rows = rows
            .iter()
            .map(|r| r.iter().map(|f| Cell::parse(f)).collect())
            .collect();
        Self::new(name, columns, rows)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Name of the country key column.
    pub fn identifier_column(&self) -> Result<&str> {
        self.id_col
            .map(|i| self.columns[i].as_str())
            .ok_or_else(|| ExplorerError::Schema {
                table: self.name.clone(),
                reason: format!("none of {:?} is a column", IDENTIFIER_COLUMNS),
            })
    }

    /// Year columns in original order. May be empty.
    pub fn value_columns(&self) -> Vec<&str> {
        self.value_cols
            .iter()
            .map(|&i| self.columns[i].as_str())
            .collect()
    }

    /// The most recent year column.
    pub fn latest_column(&self) -> Option<&str> {
        self.value_cols.last().map(|&i| self.columns[i].as_str())
    }

    /// First and last year columns.
    pub fn year_range(&self) -> Option<(&str, &str)> {
        let first = self.value_cols.first()?;
        let last = self.value_cols.last()?;
        Some((self.columns[*first].as_str(), self.columns[*last].as_str()))
    }

    pub fn is_value_column(&self, column: &str) -> bool {
        self.value_cols.iter().any(|&i| self.columns[i] == column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.position(column).is_some()
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        self.rows.iter().map(move |cells| Row { table: self, cells })
    }

    /// First row whose identifier equals `country`.
    pub fn row_for(&self, country: &str) -> Option<Row<'_>> {
        self.index.get(country).map(|&i| Row {
            table: self,
            cells: &self.rows[i],
        })
    }

    /// Every row whose identifier equals `country`, for long-format tables with an `ano` column.
    pub fn rows_for<'a>(&'a self, country: &'a str) -> impl Iterator<Item = Row<'a>> + 'a {
        self.rows()
            .filter(move |r| r.key().as_deref() == Some(country))
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }
}

fn is_reserved(column: &str) -> bool {
    IDENTIFIER_COLUMNS.contains(&column) || STRUCTURAL_COLUMNS.contains(&column)
}
