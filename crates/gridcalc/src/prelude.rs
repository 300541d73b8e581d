//! Prelude module - common imports for gridcalc users
//!
//! ```rust
//! use gridcalc::prelude::*;
//! ```

pub use crate::{
    Address,
    CalculatedTable,
    CalculationStats,

    // I/O types
    CsvReadOptions,
    CsvReader,
    CsvWriteOptions,
    CsvWriter,

    // Error types
    Error,
    ErrorKind,
    Grid,
    Result,

    // Main types
    Table,
};
