//! Cell parser
//!
//! A small hand-written scanner for the cell grammar:
//!
//! ```text
//! cell     := integer | formula
//! formula  := '=' operand operator operand
//! operand  := letters digits | digits
//! operator := '+' | '-' | '*' | '/'
//! ```
//!
//! No whitespace, no nesting, no signed constants inside formulas.

use crate::ast::{CellContent, FormulaExpr, Operator, Term};
use crate::error::{FormulaError, FormulaResult};
use gridcalc_core::FORMULA_MARKER;

/// Classify raw cell text as an integer literal or a formula
///
/// # Example
/// ```rust
/// use gridcalc_formula::{parse_cell, CellContent};
///
/// assert_eq!(parse_cell("-12").unwrap(), CellContent::Number(-12));
/// assert!(matches!(parse_cell("=A1+3").unwrap(), CellContent::Formula(_)));
/// assert!(parse_cell("twelve").is_err());
/// ```
pub fn parse_cell(raw: &str) -> FormulaResult<CellContent<'_>> {
    if raw.starts_with(FORMULA_MARKER) {
        parse_formula(raw).map(CellContent::Formula)
    } else {
        parse_number(raw).map(CellContent::Number)
    }
}

/// Parse a plain base-10 integer literal (optional sign)
pub fn parse_number(raw: &str) -> FormulaResult<i64> {
    raw.parse()
        .map_err(|_| FormulaError::MalformedNumber(raw.to_string()))
}

/// Parse formula text, including the leading '='
pub fn parse_formula(raw: &str) -> FormulaResult<FormulaExpr<'_>> {
    let body = raw
        .strip_prefix(FORMULA_MARKER)
        .ok_or_else(|| FormulaError::malformed(raw, "formula must start with '='"))?;

    let mut scanner = FormulaScanner::new(raw, body);
    let lhs = scanner.scan_operand()?;
    let op = scanner.scan_operator()?;
    let rhs = scanner.scan_operand()?;

    if !scanner.is_at_end() {
        return Err(scanner.unexpected());
    }

    Ok(FormulaExpr { op, lhs, rhs })
}

struct FormulaScanner<'a> {
    /// Full cell text, for error messages
    text: &'a str,
    input: &'a str,
    pos: usize,
}

impl<'a> FormulaScanner<'a> {
    fn new(text: &'a str, input: &'a str) -> Self {
        Self {
            text,
            input,
            pos: 0,
        }
    }

    fn scan_operand(&mut self) -> FormulaResult<Term<'a>> {
        let letters = self.take_while(|b| b.is_ascii_alphabetic());
        let digits = self.take_while(|b| b.is_ascii_digit());

        if digits.is_empty() {
            return Err(if self.is_at_end() {
                FormulaError::malformed(self.text, "expected operand")
            } else {
                self.unexpected()
            });
        }

        if letters.is_empty() {
            let value = digits.parse().map_err(|_| {
                FormulaError::malformed(self.text, format!("constant {} is out of range", digits))
            })?;
            Ok(Term::Constant(value))
        } else {
            Ok(Term::Reference {
                column: letters,
                row: digits,
            })
        }
    }

    fn scan_operator(&mut self) -> FormulaResult<Operator> {
        match self.peek_char() {
            Some(c @ ('+' | '-' | '*' | '/')) => {
                self.pos += 1;
                Operator::from_char(c)
            }
            Some(_) => Err(self.unexpected()),
            None => Err(FormulaError::malformed(self.text, "missing operator")),
        }
    }

    // === Helper methods ===

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let input = self.input;
        let start = self.pos;
        let bytes = input.as_bytes();
        while self.pos < bytes.len() && pred(bytes[self.pos]) {
            self.pos += 1;
        }
        &input[start..self.pos]
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn unexpected(&self) -> FormulaError {
        match self.peek_char() {
            Some(c) => FormulaError::malformed(
                self.text,
                format!("unexpected character {:?} at position {}", c, self.pos + 1),
            ),
            None => FormulaError::malformed(self.text, "unexpected end of formula"),
        }
    }
}
