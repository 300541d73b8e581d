//! The cell grid
//!
//! A [`Grid`] is the raw table: a header of column names, a leading column of
//! row names and a rectangular block of cell strings. Cell strings are the single
//! source of truth for a cell's content; formula evaluation writes results back
//! into them.

use crate::cell::Address;
use crate::error::{Error, Result};
use crate::keys::{validate_keys, KeyKind};
use ahash::AHashMap;
use std::fmt;

/// A validated table of named columns and rows
#[derive(Debug, Clone)]
pub struct Grid {
    column_names: Vec<String>,
    row_names: Vec<String>,
    column_index: AHashMap<String, usize>,
    row_index: AHashMap<String, usize>,
    /// `row_count` rows of `column_count` cells each
    cells: Vec<Vec<String>>,
    delimiter: u8,
}

impl Grid {
    /// Build a grid from delimiter-split records
    ///
    /// The first record is the header: its first field is ignored and the rest
    /// are column names. In every following record the first field is the row
    /// name and the rest are cell contents.
    pub fn from_records(records: Vec<Vec<String>>, delimiter: u8) -> Result<Self> {
        let mut records = records.into_iter();
        let header = records.next().ok_or(Error::EmptyInput)?;
        let column_names: Vec<String> = header.into_iter().skip(1).collect();

        let mut row_names = Vec::new();
        let mut cells = Vec::new();
        for record in records {
            let mut fields = record.into_iter();
            let row_name = fields.next().ok_or_else(|| Error::RaggedRow {
                row: String::new(),
                expected: column_names.len(),
                actual: 0,
            })?;
            row_names.push(row_name);
            cells.push(fields.collect());
        }

        Self::new(column_names, row_names, cells, delimiter)
    }

    /// Build a grid from its parts, validating column names, then row names,
    /// then the shape of the cell block
    pub fn new(
        column_names: Vec<String>,
        row_names: Vec<String>,
        cells: Vec<Vec<String>>,
        delimiter: u8,
    ) -> Result<Self> {
        validate_keys(&column_names, KeyKind::Column)?;
        validate_keys(&row_names, KeyKind::Row)?;

        if cells.len() != row_names.len() {
            return Err(Error::RaggedRow {
                row: row_names.get(cells.len()).cloned().unwrap_or_default(),
                expected: column_names.len(),
                actual: 0,
            });
        }
        for (row_name, row) in row_names.iter().zip(&cells) {
            if row.len() != column_names.len() {
                return Err(Error::RaggedRow {
                    row: row_name.clone(),
                    expected: column_names.len(),
                    actual: row.len(),
                });
            }
        }

        let column_index = index_names(&column_names);
        let row_index = index_names(&row_names);

        Ok(Self {
            column_names,
            row_names,
            column_index,
            row_index,
            cells,
            delimiter,
        })
    }

    /// Number of columns, excluding the row-name column
    pub fn column_count(&self) -> usize {
        self.column_names.len()
    }

    /// Number of data rows, excluding the header
    pub fn row_count(&self) -> usize {
        self.row_names.len()
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn row_names(&self) -> &[String] {
        &self.row_names
    }

    /// Field delimiter the grid was read with, reused for rendering
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Look up a column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_index.get(name).copied()
    }

    /// Look up a row index by name
    pub fn row_index(&self, name: &str) -> Option<usize> {
        self.row_index.get(name).copied()
    }

    /// Resolve a symbolic (column name, row name) pair to an [`Address`]
    ///
    /// # Examples
    /// ```
    /// use gridcalc_core::{Address, Grid, Error};
    ///
    /// let grid = Grid::new(
    ///     vec!["A".into(), "B".into()],
    ///     vec!["1".into()],
    ///     vec![vec!["1".into(), "2".into()]],
    ///     b',',
    /// ).unwrap();
    ///
    /// assert_eq!(grid.resolve("B", "1").unwrap(), Address::new(1, 0));
    /// assert!(matches!(grid.resolve("Z", "1"), Err(Error::UnknownCellReference { .. })));
    /// ```
    pub fn resolve(&self, column: &str, row: &str) -> Result<Address> {
        match (self.column_index(column), self.row_index(row)) {
            (Some(col), Some(row)) => Ok(Address::new(col, row)),
            _ => Err(Error::UnknownCellReference {
                column: column.to_string(),
                row: row.to_string(),
            }),
        }
    }

    /// Column and row names of an address, if it is in bounds
    pub fn names_of(&self, address: Address) -> Option<(&str, &str)> {
        let column = self.column_names.get(address.col)?.as_str();
        let row = self.row_names.get(address.row)?.as_str();
        Some((column, row))
    }

    /// Whether an address lies inside this grid
    pub fn contains(&self, address: Address) -> bool {
        address.is_within(self.column_count(), self.row_count())
    }

    /// Current content of a cell
    pub fn cell(&self, address: Address) -> Result<&str> {
        self.check_bounds(address)?;
        Ok(&self.cells[address.row][address.col])
    }

    /// Replace the content of a cell
    pub fn set_cell(&mut self, address: Address, value: impl Into<String>) -> Result<()> {
        self.check_bounds(address)?;
        self.cells[address.row][address.col] = value.into();
        Ok(())
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Address, &str)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, value)| (Address::new(col, row), value.as_str()))
        })
    }

    /// Rows of cell strings, without names
    pub fn rows(&self) -> &[Vec<String>] {
        &self.cells
    }

    /// Render the grid as delimited text
    ///
    /// The header line is the delimiter followed by the column names; each
    /// following line is the row name followed by its cells. Lines are joined by
    /// `\n` with no trailing newline.
    pub fn render(&self) -> String {
        let delimiter = self.delimiter as char;
        let mut out = String::with_capacity(self.rendered_len());

        for name in &self.column_names {
            out.push(delimiter);
            out.push_str(name);
        }

        for (row_name, row) in self.row_names.iter().zip(&self.cells) {
            out.push('\n');
            out.push_str(row_name);
            for value in row {
                out.push(delimiter);
                out.push_str(value);
            }
        }

        out
    }

    /// Exact byte length of [`Grid::render`] output
    fn rendered_len(&self) -> usize {
        let delimiter_len = (self.delimiter as char).len_utf8();
        let header: usize = self
            .column_names
            .iter()
            .map(|name| name.len() + delimiter_len)
            .sum();
        let body: usize = self
            .row_names
            .iter()
            .zip(&self.cells)
            .map(|(name, row)| {
                1 + name.len()
                    + row
                        .iter()
                        .map(|value| value.len() + delimiter_len)
                        .sum::<usize>()
            })
            .sum();
        header + body
    }

    fn check_bounds(&self, address: Address) -> Result<()> {
        if self.contains(address) {
            Ok(())
        } else {
            Err(Error::OutOfBoundsAddress {
                address,
                columns: self.column_count(),
                rows: self.row_count(),
            })
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn index_names(names: &[String]) -> AHashMap<String, usize> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect()
}
