//! Formula types
//!
//! Parsing produces a [`FormulaExpr`] that still borrows the symbolic names from
//! the cell text. Resolving it against a [`Grid`] yields a [`Formula`] whose
//! references are plain [`Address`] values.

use crate::error::{FormulaError, FormulaResult};
use gridcalc_core::{Address, Grid};
use std::fmt;

/// Arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Failure of [`Operator::apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    DivisionByZero,
    Overflow,
}

impl ArithmeticError {
    /// Attach the address of the failing formula
    pub fn at(self, at: Address) -> FormulaError {
        match self {
            ArithmeticError::DivisionByZero => FormulaError::DivisionByZero { at },
            ArithmeticError::Overflow => FormulaError::Overflow { at },
        }
    }
}

impl Operator {
    /// Map an operator character
    pub fn from_char(c: char) -> FormulaResult<Self> {
        match c {
            '+' => Ok(Operator::Add),
            '-' => Ok(Operator::Subtract),
            '*' => Ok(Operator::Multiply),
            '/' => Ok(Operator::Divide),
            other => Err(FormulaError::UnknownOperator(other)),
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// Apply the operator with checked 64-bit arithmetic
    ///
    /// Division truncates toward zero. A zero divisor is reported before any
    /// division happens.
    ///
    /// # Example
    /// ```rust
    /// use gridcalc_formula::{ArithmeticError, Operator};
    ///
    /// assert_eq!(Operator::Divide.apply(9, 2), Ok(4));
    /// assert_eq!(Operator::Divide.apply(-9, 2), Ok(-4));
    /// assert_eq!(Operator::Divide.apply(1, 0), Err(ArithmeticError::DivisionByZero));
    /// ```
    pub fn apply(&self, lhs: i64, rhs: i64) -> Result<i64, ArithmeticError> {
        let result = match self {
            Operator::Add => lhs.checked_add(rhs),
            Operator::Subtract => lhs.checked_sub(rhs),
            Operator::Multiply => lhs.checked_mul(rhs),
            Operator::Divide => {
                if rhs == 0 {
                    return Err(ArithmeticError::DivisionByZero);
                }
                lhs.checked_div(rhs)
            }
        };
        result.ok_or(ArithmeticError::Overflow)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// An operand as written in the cell text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term<'a> {
    /// Bare non-negative constant
    Constant(i64),
    /// Column letters followed by row digits, e.g. `B12`
    Reference { column: &'a str, row: &'a str },
}

/// A parsed, unresolved formula
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormulaExpr<'a> {
    pub op: Operator,
    pub lhs: Term<'a>,
    pub rhs: Term<'a>,
}

impl<'a> FormulaExpr<'a> {
    /// Resolve symbolic references against the grid's names
    ///
    /// Fails with [`FormulaError::UnknownCellReference`] if either name of a
    /// reference is missing from the grid.
    pub fn resolve(&self, grid: &Grid) -> FormulaResult<Formula> {
        Ok(Formula {
            op: self.op,
            lhs: resolve_term(self.lhs, grid)?,
            rhs: resolve_term(self.rhs, grid)?,
        })
    }
}

fn resolve_term(term: Term<'_>, grid: &Grid) -> FormulaResult<Operand> {
    match term {
        Term::Constant(value) => Ok(Operand::Constant(value)),
        Term::Reference { column, row } => Ok(Operand::Ref(grid.resolve(column, row)?)),
    }
}

/// A resolved operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Constant(i64),
    Ref(Address),
}

/// A resolved formula: one operator, two operands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Formula {
    pub op: Operator,
    pub lhs: Operand,
    pub rhs: Operand,
}

impl Formula {
    pub fn new(op: Operator, lhs: Operand, rhs: Operand) -> Self {
        Self { op, lhs, rhs }
    }

    /// Addresses this formula reads
    pub fn references(&self) -> impl Iterator<Item = Address> {
        [self.lhs, self.rhs].into_iter().filter_map(|operand| match operand {
            Operand::Ref(addr) => Some(addr),
            Operand::Constant(_) => None,
        })
    }
}

/// Classified cell content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellContent<'a> {
    Number(i64),
    Formula(FormulaExpr<'a>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_from_char() {
        assert_eq!(Operator::from_char('+').unwrap(), Operator::Add);
        assert_eq!(Operator::from_char('-').unwrap(), Operator::Subtract);
        assert_eq!(Operator::from_char('*').unwrap(), Operator::Multiply);
        assert_eq!(Operator::from_char('/').unwrap(), Operator::Divide);
        assert_eq!(
            Operator::from_char('%').unwrap_err(),
            FormulaError::UnknownOperator('%')
        );
    }

    #[test]
    fn test_apply() {
        assert_eq!(Operator::Add.apply(2, 3), Ok(5));
        assert_eq!(Operator::Subtract.apply(5, 9), Ok(-4));
        assert_eq!(Operator::Multiply.apply(4, 3), Ok(12));
        assert_eq!(Operator::Divide.apply(9, 2), Ok(4));
        assert_eq!(Operator::Divide.apply(-7, 2), Ok(-3));
    }

    #[test]
    fn test_apply_division_by_zero() {
        assert_eq!(
            Operator::Divide.apply(0, 0),
            Err(ArithmeticError::DivisionByZero)
        );
        assert_eq!(
            Operator::Divide.apply(i64::MIN, 0),
            Err(ArithmeticError::DivisionByZero)
        );
    }

    #[test]
    fn test_apply_overflow() {
        assert_eq!(Operator::Add.apply(i64::MAX, 1), Err(ArithmeticError::Overflow));
        assert_eq!(
            Operator::Multiply.apply(i64::MAX, 2),
            Err(ArithmeticError::Overflow)
        );
        assert_eq!(
            Operator::Divide.apply(i64::MIN, -1),
            Err(ArithmeticError::Overflow)
        );
    }

    #[test]
    fn test_references() {
        let formula = Formula::new(
            Operator::Add,
            Operand::Ref(Address::new(0, 0)),
            Operand::Constant(3),
        );
        assert_eq!(formula.references().collect::<Vec<_>>(), vec![Address::new(0, 0)]);
    }

    #[test]
    fn test_resolve() {
        let grid = Grid::new(
            vec!["A".into(), "B".into()],
            vec!["1".into(), "2".into()],
            vec![
                vec!["1".into(), "2".into()],
                vec!["3".into(), "4".into()],
            ],
            b',',
        )
        .unwrap();

        let expr = FormulaExpr {
            op: Operator::Multiply,
            lhs: Term::Reference {
                column: "B",
                row: "2",
            },
            rhs: Term::Constant(7),
        };
        assert_eq!(
            expr.resolve(&grid).unwrap(),
            Formula::new(
                Operator::Multiply,
                Operand::Ref(Address::new(1, 1)),
                Operand::Constant(7)
            )
        );

        let dangling = FormulaExpr {
            op: Operator::Add,
            lhs: Term::Constant(1),
            rhs: Term::Reference {
                column: "Z",
                row: "99",
            },
        };
        assert_eq!(
            dangling.resolve(&grid).unwrap_err(),
            FormulaError::UnknownCellReference {
                column: "Z".into(),
                row: "99".into()
            }
        );
    }
}
