//! # gridcalc-core
//!
//! Core data structures for gridcalc.
//!
//! This crate provides:
//! - [`Address`] - a validated (column, row) coordinate into a grid
//! - [`Grid`] - column/row names, their index maps and the cell strings
//! - [`validate_keys`] - lexical and uniqueness checks for column and row names
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::{Address, Grid};
//!
//! let records = vec![
//!     vec!["".to_string(), "A".to_string(), "B".to_string()],
//!     vec!["1".to_string(), "5".to_string(), "=A1+3".to_string()],
//! ];
//! let grid = Grid::from_records(records, b',').unwrap();
//!
//! let addr = grid.resolve("B", "1").unwrap();
//! assert_eq!(addr, Address::new(1, 0));
//! assert_eq!(grid.cell(addr).unwrap(), "=A1+3");
//! ```

pub mod cell;
pub mod error;
pub mod grid;
pub mod keys;

// Re-exports for convenience
pub use cell::Address;
pub use error::{Error, Result};
pub use grid::Grid;
pub use keys::{validate_keys, KeyKind};

/// Marker that opens a formula cell
pub const FORMULA_MARKER: char = '=';
