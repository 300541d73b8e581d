//! Formula error types

use gridcalc_core::Address;
use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during cell parsing or formula evaluation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormulaError {
    /// A non-formula cell is not an integer
    #[error("Malformed number: {0:?}")]
    MalformedNumber(String),

    /// A cell starting with '=' does not match the formula grammar
    #[error("Malformed formula {text:?}: {reason}")]
    MalformedFormula { text: String, reason: String },

    /// A formula names a column or row that is not in the table
    #[error("Unknown cell reference {column}{row}")]
    UnknownCellReference { column: String, row: String },

    /// Operator character outside `+ - * /`
    #[error("Unknown operator {0:?}")]
    UnknownOperator(char),

    /// The divisor of a formula evaluated to zero
    #[error("Division by zero in formula at {at}")]
    DivisionByZero { at: Address },

    /// The result of a formula does not fit in 64 bits
    #[error("Integer overflow in formula at {at}")]
    Overflow { at: Address },

    /// An address outside the table
    #[error("Address {0} is out of bounds")]
    OutOfBoundsAddress(Address),

    /// A formula depends on its own result
    #[error("Circular reference detected at {at}")]
    CircularReference { at: Address },

    /// A formula cell with no parsed formula behind it
    #[error("No formula registered at {0}")]
    MissingFormula(Address),

    /// Any other core error
    #[error(transparent)]
    Core(gridcalc_core::Error),
}

impl From<gridcalc_core::Error> for FormulaError {
    fn from(err: gridcalc_core::Error) -> Self {
        match err {
            gridcalc_core::Error::UnknownCellReference { column, row } => {
                FormulaError::UnknownCellReference { column, row }
            }
            gridcalc_core::Error::OutOfBoundsAddress { address, .. } => {
                FormulaError::OutOfBoundsAddress(address)
            }
            other => FormulaError::Core(other),
        }
    }
}

impl FormulaError {
    pub(crate) fn malformed(text: &str, reason: impl Into<String>) -> Self {
        FormulaError::MalformedFormula {
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}
