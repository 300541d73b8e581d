//! Table pipeline
//!
//! Loading runs strictly in order, with no retries and no partial results:
//!
//! 1. read the delimited grid ([`CsvReader`])
//! 2. validate column names, then row names ([`Grid::from_records`])
//! 3. classify every cell, resolving formula references ([`Table::from_grid`])
//! 4. evaluate every formula and write the results back ([`Table::calculate`])
//! 5. render ([`CalculatedTable::render`])

use std::fmt;
use std::io::{Read, Write};
use std::path::Path;

use crate::calculation::CalculationStats;
use crate::error::{Error, Result};
use gridcalc_core::{Address, Grid};
use gridcalc_csv::{CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};
use gridcalc_formula::{parse_cell, CellContent, Formula, FormulaError, FormulaResult, FormulaSet};

/// A parsed table whose formulas have not all been evaluated yet
#[derive(Debug)]
pub struct Table {
    grid: Grid,
    formulas: FormulaSet,
}

impl Table {
    /// Open a `.csv` (comma) or `.tsv` (tab) file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Table> {
        let path = path.as_ref();
        let delimiter = delimiter_for_path(path)?;
        Self::open_with_options(path, &CsvReadOptions::with_delimiter(delimiter))
    }

    /// Open a `.csv` or `.tsv` file with explicit read options
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> Result<Table> {
        let path = path.as_ref();
        delimiter_for_path(path)?;

        log::debug!("loading {}", path.display());
        let grid = CsvReader::read_file(path, options)?;
        Self::from_grid(grid)
    }

    /// Read a table from any reader
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> Result<Table> {
        let grid = CsvReader::read(reader, options)?;
        Self::from_grid(grid)
    }

    /// Classify every cell of a validated grid
    ///
    /// Literal cells must be integers. Formula cells must match the grammar and
    /// may only reference names present in the grid. The first failing cell in
    /// row-major order is reported.
    pub fn from_grid(grid: Grid) -> Result<Table> {
        let mut formulas = FormulaSet::new();

        for (address, text) in grid.cells() {
            let parsed = parse_formula_cell(&grid, text)
                .map_err(|source| cell_error(&grid, address, source, false))?;
            if let Some(formula) = parsed {
                formulas.insert(address, formula);
            }
        }

        log::debug!(
            "parsed {}x{} grid with {} formulas",
            grid.column_count(),
            grid.row_count(),
            formulas.len()
        );

        Ok(Table { grid, formulas })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn formulas(&self) -> &FormulaSet {
        &self.formulas
    }

    pub fn formula_count(&self) -> usize {
        self.formulas.len()
    }

    /// Evaluate the formula at `address`, memoizing it and everything it
    /// depends on
    pub fn evaluate(&mut self, address: Address) -> Result<i64> {
        self.formulas
            .evaluate(&self.grid, address)
            .map_err(|source| cell_error(&self.grid, address, source, true))
    }

    /// Evaluate every formula and replace its cell text with the result
    ///
    /// Formulas are visited in row-major order; thanks to memoization the
    /// results do not depend on that order.
    pub fn calculate(mut self) -> Result<CalculatedTable> {
        let addresses = self.formulas.addresses();
        let mut results = Vec::with_capacity(addresses.len());

        for address in addresses {
            let value = self.evaluate(address)?;
            results.push((address, value));
        }

        for (address, value) in results {
            self.grid.set_cell(address, value.to_string())?;
        }

        let stats = CalculationStats {
            formula_count: self.formulas.len(),
            computations: self.formulas.computations(),
            max_depth: self.formulas.max_depth(),
        };
        log::debug!("calculated: {}", stats);

        Ok(CalculatedTable {
            grid: self.grid,
            stats,
        })
    }
}

/// A table whose cells all hold integers
#[derive(Debug, Clone)]
pub struct CalculatedTable {
    grid: Grid,
    stats: CalculationStats,
}

impl CalculatedTable {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn stats(&self) -> CalculationStats {
        self.stats
    }

    /// Resolved value of a cell by column and row name
    pub fn value(&self, column: &str, row: &str) -> Option<i64> {
        let address = self.grid.resolve(column, row).ok()?;
        self.grid.cell(address).ok()?.parse().ok()
    }

    /// Delimited text: header line, then one line per row, no trailing newline
    pub fn render(&self) -> String {
        self.grid.render()
    }

    /// Write the table as CSV
    pub fn write_csv<W: Write>(&self, writer: W, options: &CsvWriteOptions) -> Result<()> {
        Ok(CsvWriter::write(&self.grid, writer, options)?)
    }

    /// Write the table to a CSV file
    pub fn save<P: AsRef<Path>>(&self, path: P, options: &CsvWriteOptions) -> Result<()> {
        Ok(CsvWriter::write_file(&self.grid, path, options)?)
    }
}

impl fmt::Display for CalculatedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.grid, f)
    }
}

/// Delimiter implied by a file extension
fn delimiter_for_path(path: &Path) -> Result<u8> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        Some("csv") => Ok(b','),
        Some("tsv") => Ok(b'\t'),
        _ => Err(Error::UnsupportedInputFormat(format!(
            "expected a .csv or .tsv file: {}",
            path.display()
        ))),
    }
}

/// `Some(formula)` for formula cells, `None` for integer literals
fn parse_formula_cell(grid: &Grid, text: &str) -> FormulaResult<Option<Formula>> {
    match parse_cell(text)? {
        CellContent::Number(_) => Ok(None),
        CellContent::Formula(expr) => expr.resolve(grid).map(Some),
    }
}

fn cell_error(grid: &Grid, address: Address, source: FormulaError, evaluating: bool) -> Error {
    let (column, row) = grid.names_of(address).unwrap_or_default();
    let (column, row) = (column.to_string(), row.to_string());
    if evaluating {
        Error::Evaluation {
            column,
            row,
            address,
            source,
        }
    } else {
        Error::Parse {
            column,
            row,
            address,
            source,
        }
    }
}
