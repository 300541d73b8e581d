//! Error types for gridcalc

use gridcalc_core::Address;
use gridcalc_csv::CsvError;
use gridcalc_formula::FormulaError;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the load/evaluate pipeline
///
/// Every error aborts the whole pipeline. Cell-level failures carry the
/// offending cell's names and address.
#[derive(Debug, Error)]
pub enum Error {
    /// Input is not a supported delimited grid
    #[error("Unsupported input format: {0}")]
    UnsupportedInputFormat(String),

    /// Reading or writing failed
    #[error(transparent)]
    Csv(CsvError),

    /// Column or row names are invalid
    #[error(transparent)]
    Core(#[from] gridcalc_core::Error),

    /// A cell could not be parsed
    #[error("Cell {column}{row} {address}: {source}")]
    Parse {
        column: String,
        row: String,
        address: Address,
        source: FormulaError,
    },

    /// A formula could not be evaluated
    #[error("Formula in cell {column}{row} {address} failed: {source}")]
    Evaluation {
        column: String,
        row: String,
        address: Address,
        source: FormulaError,
    },
}

impl From<CsvError> for Error {
    fn from(err: CsvError) -> Self {
        match err {
            CsvError::UnsupportedInputFormat(message) => Error::UnsupportedInputFormat(message),
            CsvError::Core(err) => Error::Core(err),
            other => Error::Csv(other),
        }
    }
}

/// Pipeline-level classification of an [`Error`], independent of wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnsupportedInputFormat,
    InvalidKeyShape,
    DuplicateKey,
    MalformedNumber,
    MalformedFormula,
    UnknownCellReference,
    UnknownOperator,
    DivisionByZero,
    OutOfBoundsAddress,
    CircularReference,
    Overflow,
    Io,
    Internal,
}

impl Error {
    /// What went wrong, without the location
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedInputFormat(_) => ErrorKind::UnsupportedInputFormat,
            Error::Csv(_) => ErrorKind::Io,
            Error::Core(err) => core_kind(err),
            Error::Parse { source, .. } | Error::Evaluation { source, .. } => formula_kind(source),
        }
    }

    /// Address of the offending cell, for cell-level failures
    pub fn address(&self) -> Option<Address> {
        match self {
            Error::Parse { address, .. } | Error::Evaluation { address, .. } => Some(*address),
            _ => None,
        }
    }
}

fn core_kind(err: &gridcalc_core::Error) -> ErrorKind {
    use gridcalc_core::Error as E;
    match err {
        E::InvalidKeyShape { .. } => ErrorKind::InvalidKeyShape,
        E::DuplicateKey { .. } => ErrorKind::DuplicateKey,
        E::UnknownCellReference { .. } => ErrorKind::UnknownCellReference,
        E::OutOfBoundsAddress { .. } => ErrorKind::OutOfBoundsAddress,
        E::RaggedRow { .. } | E::EmptyInput => ErrorKind::UnsupportedInputFormat,
    }
}

fn formula_kind(err: &FormulaError) -> ErrorKind {
    match err {
        FormulaError::MalformedNumber(_) => ErrorKind::MalformedNumber,
        FormulaError::MalformedFormula { .. } => ErrorKind::MalformedFormula,
        FormulaError::UnknownCellReference { .. } => ErrorKind::UnknownCellReference,
        FormulaError::UnknownOperator(_) => ErrorKind::UnknownOperator,
        FormulaError::DivisionByZero { .. } => ErrorKind::DivisionByZero,
        FormulaError::Overflow { .. } => ErrorKind::Overflow,
        FormulaError::OutOfBoundsAddress(_) => ErrorKind::OutOfBoundsAddress,
        FormulaError::CircularReference { .. } => ErrorKind::CircularReference,
        FormulaError::MissingFormula(_) => ErrorKind::Internal,
        FormulaError::Core(err) => core_kind(err),
    }
}
