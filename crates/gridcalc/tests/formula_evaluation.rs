//! Tests for whole-table formula evaluation

use gridcalc::prelude::*;
use gridcalc::FormulaError;
use pretty_assertions::assert_eq;

fn calculate(data: &str) -> Result<CalculatedTable> {
    Table::read(data.as_bytes(), &CsvReadOptions::default())?.calculate()
}

fn error_kind(data: &str) -> ErrorKind {
    calculate(data).unwrap_err().kind()
}

/// Cells that depend on already resolved formulas
#[test]
fn test_end_to_end() {
    let table = calculate(",A,B\n1,5,=A1+3\n2,=A1*B1,2\n").unwrap();
    assert_eq!(table.render(), ",A,B\n1,5,8\n2,40,2");
    assert_eq!(table.value("A", "2"), Some(40));
}

/// The order formulas appear in does not change the result
#[test]
fn test_evaluation_order_independent() {
    // A1 depends on a later formula
    let table = calculate(",A,B,C\n1,=C2*2,1,4\n2,=B1+3,7,=C1-B1\n").unwrap();
    assert_eq!(table.value("C", "2"), Some(3));
    assert_eq!(table.value("A", "1"), Some(6));
    assert_eq!(table.render(), ",A,B,C\n1,6,1,4\n2,4,7,3");
}

#[test]
fn test_constant_formulas() {
    let table = calculate(",A,B,C,D\n1,=4*3,=9/2,=5-9,=0+0\n").unwrap();
    assert_eq!(table.render(), ",A,B,C,D\n1,12,4,-4,0");
}

#[test]
fn test_literals_roundtrip() {
    let table = calculate(",A,B,C\n1,-7,0,123456789\n").unwrap();
    assert_eq!(table.render(), ",A,B,C\n1,-7,0,123456789");
    assert_eq!(table.stats().formula_count, 0);
}

/// Literal cells render exactly as they were read
#[test]
fn test_literal_text_kept_as_written() {
    let table = calculate(",A,B\n1,+5,=A1+0\n").unwrap();
    assert_eq!(table.render(), ",A,B\n1,+5,5");
}

/// Each formula is computed once, however many cells reference it
#[test]
fn test_shared_dependency_computed_once() {
    let table = calculate(",A,B,C,D\n1,=2*3,=A1+1,=A1+2,=B1*C1\n").unwrap();
    assert_eq!(table.value("D", "1"), Some(56));
    assert_eq!(table.stats().formula_count, 4);
    assert_eq!(table.stats().computations, 4);
}

#[test]
fn test_chain_depth() {
    let table = calculate(",A,B,C,D\n1,=B1+1,=C1+1,=D1+1,1\n").unwrap();
    assert_eq!(table.value("A", "1"), Some(4));
    assert_eq!(table.stats().max_depth, 3);
}

#[test]
fn test_division_by_zero() {
    assert_eq!(error_kind(",A,B\n1,0,=7/A1\n"), ErrorKind::DivisionByZero);
    assert_eq!(error_kind(",A\n1,=1/0\n"), ErrorKind::DivisionByZero);
}

/// The failing divisor deep in a chain is reported where it happened
#[test]
fn test_division_by_zero_nested() {
    let err = calculate(",A,B,C\n1,=B1+1,=5/C1,0\n").unwrap_err();
    match err {
        Error::Evaluation {
            column,
            row,
            source,
            ..
        } => {
            // Reported for the first formula in row-major order
            assert_eq!((column.as_str(), row.as_str()), ("A", "1"));
            assert_eq!(
                source,
                FormulaError::DivisionByZero {
                    at: Address::new(1, 0)
                }
            );
        }
        other => panic!("expected evaluation error, got {other:?}"),
    }
}

#[test]
fn test_self_reference() {
    assert_eq!(error_kind(",A\n1,=A1+1\n"), ErrorKind::CircularReference);
}

#[test]
fn test_cycle_through_several_cells() {
    assert_eq!(
        error_kind(",A,B\n1,=B2*1,5\n2,3,=A1+B1\n"),
        ErrorKind::CircularReference
    );
}

#[test]
fn test_unknown_reference() {
    assert_eq!(error_kind(",A,B\n1,1,=Z99+1\n"), ErrorKind::UnknownCellReference);
    // Known column, missing row
    assert_eq!(error_kind(",A,B\n1,1,=A2+1\n"), ErrorKind::UnknownCellReference);
}

#[test]
fn test_malformed_cells() {
    assert_eq!(error_kind(",A\n1,abc\n"), ErrorKind::MalformedNumber);
    assert_eq!(error_kind(",A\n1,\n"), ErrorKind::MalformedNumber);
    assert_eq!(error_kind(",A\n1,1.5\n"), ErrorKind::MalformedNumber);
    assert_eq!(error_kind(",A\n1,=A1+B1+C1\n"), ErrorKind::MalformedFormula);
    assert_eq!(error_kind(",A\n1,=SUM(A1)\n"), ErrorKind::MalformedFormula);
}

#[test]
fn test_key_errors() {
    assert_eq!(error_kind(",A,B,A\n1,1,2,3\n"), ErrorKind::DuplicateKey);
    assert_eq!(error_kind(",A1,B\n1,1,2\n"), ErrorKind::InvalidKeyShape);
    assert_eq!(error_kind(",A\n1,1\n1,2\n"), ErrorKind::DuplicateKey);
    assert_eq!(error_kind(",A\nx,1\n"), ErrorKind::InvalidKeyShape);
}

#[test]
fn test_overflow() {
    assert_eq!(
        error_kind(",A,B\n1,9223372036854775807,=A1*2\n"),
        ErrorKind::Overflow
    );
}

#[test]
fn test_unsupported_shape() {
    assert_eq!(error_kind(",A,B\n1,2\n"), ErrorKind::UnsupportedInputFormat);
    assert_eq!(error_kind(""), ErrorKind::UnsupportedInputFormat);
}

#[test]
fn test_delimiter_preserved() {
    let options = CsvReadOptions::with_delimiter(b';');
    let table = Table::read(";A;B\n1;2;=A1*B1\n".as_bytes(), &options)
        .unwrap()
        .calculate()
        .unwrap();
    assert_eq!(table.to_string(), ";A;B\n1;2;4");
}

/// Only single-byte ASCII delimiters can be rendered back unchanged
#[test]
fn test_non_ascii_delimiter_rejected() {
    let options = CsvReadOptions::with_delimiter(0xa7);
    let err = Table::read(&b"\xa7A\n1\xa72\n"[..], &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedInputFormat);
}

#[test]
fn test_multi_letter_names() {
    let table = calculate(",Price,Qty,Total\n10,3,4,=Price10*Qty10\n").unwrap();
    assert_eq!(table.value("Total", "10"), Some(12));
}

/// A chain of forward references far longer than any call stack could hold
#[test]
fn test_long_forward_chain() {
    const ROWS: usize = 100_000;
    let mut data = String::from(",A\n");
    for row in 1..ROWS {
        data.push_str(&format!("{},=A{}+1\n", row, row + 1));
    }
    data.push_str(&format!("{},1\n", ROWS));

    let table = calculate(&data).unwrap();
    assert_eq!(table.value("A", "1"), Some(ROWS as i64));
    assert_eq!(table.value("A", "50000"), Some(50_001));
    assert_eq!(table.stats().formula_count, ROWS - 1);
    assert_eq!(table.stats().computations, ROWS - 1);
    assert_eq!(table.stats().max_depth, ROWS - 1);
}

/// A cycle at the end of a long chain is still reported, not overflowed
#[test]
fn test_long_chain_into_cycle() {
    const ROWS: usize = 100_000;
    let mut data = String::from(",A\n");
    for row in 1..ROWS {
        data.push_str(&format!("{},=A{}+1\n", row, row + 1));
    }
    data.push_str(&format!("{},=A1*1\n", ROWS));

    assert_eq!(error_kind(&data), ErrorKind::CircularReference);
}
