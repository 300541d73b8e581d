//! Calculation statistics

use std::fmt;

/// Statistics from a calculation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalculationStats {
    /// Number of formula cells
    pub formula_count: usize,
    /// Number of formulas whose arithmetic ran; equals `formula_count` when
    /// every formula was computed exactly once
    pub computations: usize,
    /// Longest chain of formulas evaluated through references
    pub max_depth: usize,
}

impl fmt::Display for CalculationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} formulas, {} computed, max depth {}",
            self.formula_count, self.computations, self.max_depth
        )
    }
}
