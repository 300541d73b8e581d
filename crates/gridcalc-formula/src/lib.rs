//! # gridcalc-formula
//!
//! Formula parser and evaluator for gridcalc.
//!
//! This crate provides:
//! - Cell parsing (text → integer literal or formula)
//! - Name resolution (symbolic `B12` → [`Address`](gridcalc_core::Address))
//! - Memoized, cycle-checked formula evaluation
//!
//! A formula is exactly one operator between two operands, each either a bare
//! constant or a reference: `=A1+3`, `=4*B2`, `=7/2`.
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::{Address, Grid};
//! use gridcalc_formula::{parse_cell, CellContent, FormulaSet};
//!
//! let grid = Grid::new(
//!     vec!["A".into(), "B".into()],
//!     vec!["1".into()],
//!     vec![vec!["5".into(), "=A1*2".into()]],
//!     b',',
//! ).unwrap();
//!
//! let mut formulas = FormulaSet::new();
//! if let CellContent::Formula(expr) = parse_cell("=A1*2").unwrap() {
//!     formulas.insert(Address::new(1, 0), expr.resolve(&grid).unwrap());
//! }
//! assert_eq!(formulas.evaluate(&grid, Address::new(1, 0)).unwrap(), 10);
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod parser;

pub use ast::{ArithmeticError, CellContent, Formula, FormulaExpr, Operand, Operator, Term};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{EvalState, FormulaSet};
pub use parser::{parse_cell, parse_formula, parse_number};
