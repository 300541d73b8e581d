//! # gridcalc
//!
//! Resolve integer formulas in delimited tables.
//!
//! A table is a header row of column names (letters) and data rows that start
//! with a row name (digits). Every other cell is an integer or a formula with
//! exactly one operator: `=A1+3`, `=B2*C1`, `=9/2`. [`Table`] parses the whole
//! grid, resolves every formula and hands back a [`CalculatedTable`] in which
//! all cells are integers.
//!
//! ## Example
//!
//! ```rust
//! use gridcalc::prelude::*;
//!
//! let input = ",A,B\n1,5,=A1+3\n2,=A1*B1,2\n";
//! let table = Table::read(input.as_bytes(), &CsvReadOptions::default()).unwrap();
//! let calculated = table.calculate().unwrap();
//!
//! assert_eq!(calculated.render(), ",A,B\n1,5,8\n2,40,2");
//! ```

pub mod calculation;
pub mod error;
pub mod prelude;
pub mod table;

pub use calculation::CalculationStats;
pub use error::{Error, ErrorKind, Result};
pub use table::{CalculatedTable, Table};

// Re-export core types
pub use gridcalc_core::{validate_keys, Address, Grid, KeyKind, FORMULA_MARKER};

// Re-export formula types
pub use gridcalc_formula::{
    parse_cell, parse_formula, parse_number, ArithmeticError, CellContent, EvalState, Formula,
    FormulaError, FormulaExpr, FormulaResult, FormulaSet, Operand, Operator, Term,
};

// Re-export I/O types
pub use gridcalc_csv::{
    CsvError, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter, LineTerminator,
};
