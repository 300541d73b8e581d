//! Error types for gridcalc-core

use crate::cell::Address;
use crate::keys::KeyKind;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gridcalc-core
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A column or row name does not match its lexical pattern
    #[error("Invalid {kind} name {name:?}: expected {}", .kind.expected_shape())]
    InvalidKeyShape { kind: KeyKind, name: String },

    /// A column or row name appears more than once
    #[error("Duplicate {kind} name {name:?}")]
    DuplicateKey { kind: KeyKind, name: String },

    /// A reference names a column or row that is not in the grid
    #[error("Unknown cell reference {column}{row}")]
    UnknownCellReference { column: String, row: String },

    /// An address lies outside the grid
    #[error("Address {address} out of bounds ({columns} columns x {rows} rows)")]
    OutOfBoundsAddress {
        address: Address,
        columns: usize,
        rows: usize,
    },

    /// A data row does not have one cell per column
    #[error("Row {row:?} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: String,
        expected: usize,
        actual: usize,
    },

    /// No header row
    #[error("Input has no header row")]
    EmptyInput,
}
