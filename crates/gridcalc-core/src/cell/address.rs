//! Cell address type

use std::fmt;

/// A cell address: 0-based column and row indices into a [`Grid`](crate::Grid)
///
/// Addresses carry no names. They are built by [`Grid::resolve`](crate::Grid::resolve)
/// from a symbolic reference such as `B12`, and are only meaningful for the grid
/// that produced them. Ordering is row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address {
    /// Row index (0-based, first data row = 0)
    pub row: usize,
    /// Column index (0-based, first column after the row-name column = 0)
    pub col: usize,
}

impl Address {
    /// Create a new address from a column and a row index
    pub fn new(col: usize, row: usize) -> Self {
        Self { row, col }
    }

    /// Whether this address lies inside a `columns` x `rows` grid
    pub fn is_within(&self, columns: usize, rows: usize) -> bool {
        self.col < columns && self.row < rows
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(col {}, row {})", self.col, self.row)
    }
}
