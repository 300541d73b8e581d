//! Formula evaluator
//!
//! Formulas are stored by [`Address`] in a [`FormulaSet`]. Evaluating one reads
//! its operands from the grid; an operand cell that still holds formula text is
//! evaluated first. Every slot moves `NotStarted -> InProgress -> Done` at most
//! once, so a formula referenced from many places is computed a single time and
//! a formula that re-enters its own evaluation is a circular reference.

use crate::ast::{Formula, Operand};
use crate::error::{FormulaError, FormulaResult};
use crate::parser::parse_number;
use ahash::AHashMap;
use gridcalc_core::{Address, Grid, FORMULA_MARKER};

/// Evaluation state of one formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvalState {
    #[default]
    NotStarted,
    InProgress,
    Done(i64),
}

#[derive(Debug, Clone)]
struct FormulaSlot {
    formula: Formula,
    state: EvalState,
}

/// Formulas of one grid, keyed by the address of the cell that holds them
#[derive(Debug, Default)]
pub struct FormulaSet {
    slots: AHashMap<Address, FormulaSlot>,
    /// Arithmetic steps actually performed
    computations: usize,
    max_depth: usize,
}

/// Value of one operand, or the formula that has to be evaluated first
enum OperandValue {
    Ready(i64),
    Pending(Address),
}

impl FormulaSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a formula, returning the one it replaces
    pub fn insert(&mut self, at: Address, formula: Formula) -> Option<Formula> {
        self.slots
            .insert(
                at,
                FormulaSlot {
                    formula,
                    state: EvalState::NotStarted,
                },
            )
            .map(|slot| slot.formula)
    }

    pub fn get(&self, at: Address) -> Option<&Formula> {
        self.slots.get(&at).map(|slot| &slot.formula)
    }

    pub fn state(&self, at: Address) -> Option<EvalState> {
        self.slots.get(&at).map(|slot| slot.state)
    }

    /// Memoized result, if the formula has been evaluated
    pub fn result(&self, at: Address) -> Option<i64> {
        match self.state(at)? {
            EvalState::Done(value) => Some(value),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Addresses of all formulas in row-major order
    pub fn addresses(&self) -> Vec<Address> {
        let mut addrs: Vec<Address> = self.slots.keys().copied().collect();
        addrs.sort_unstable();
        addrs
    }

    /// Total number of cell references across all formulas
    pub fn reference_count(&self) -> usize {
        self.slots
            .values()
            .map(|slot| slot.formula.references().count())
            .sum()
    }

    /// Number of formulas whose arithmetic has actually run
    pub fn computations(&self) -> usize {
        self.computations
    }

    /// Deepest chain of nested evaluations seen so far
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Evaluate the formula registered at `at`
    ///
    /// Returns the memoized result if there is one. Fails with
    /// [`FormulaError::CircularReference`] if a formula is reached again while
    /// it is still being evaluated. On failure every formula on the pending
    /// chain is left unevaluated.
    ///
    /// Dependencies are tracked on an explicit stack, so arbitrarily long
    /// reference chains do not grow the call stack.
    pub fn evaluate(&mut self, grid: &Grid, at: Address) -> FormulaResult<i64> {
        if let Some(value) = self.begin(at)? {
            return Ok(value);
        }

        let mut pending = vec![at];
        let result = self.run(grid, &mut pending);

        if result.is_err() {
            for addr in pending {
                self.set_state(addr, EvalState::NotStarted);
            }
        }
        result
    }

    /// Evaluate the chain on `pending` until it is empty
    ///
    /// The top of the stack is the formula being worked on. A formula whose
    /// operand is an unevaluated formula stays on the stack below it and is
    /// revisited once that operand is done.
    fn run(&mut self, grid: &Grid, pending: &mut Vec<Address>) -> FormulaResult<i64> {
        let mut value = 0;

        while let Some(&top) = pending.last() {
            self.max_depth = self.max_depth.max(pending.len());
            let formula = self
                .get(top)
                .copied()
                .ok_or(FormulaError::MissingFormula(top))?;

            let lhs = match self.operand_value(grid, formula.lhs)? {
                OperandValue::Ready(value) => value,
                OperandValue::Pending(next) => {
                    self.push(pending, next);
                    continue;
                }
            };
            let rhs = match self.operand_value(grid, formula.rhs)? {
                OperandValue::Ready(value) => value,
                OperandValue::Pending(next) => {
                    self.push(pending, next);
                    continue;
                }
            };

            value = formula.op.apply(lhs, rhs).map_err(|e| e.at(top))?;
            self.computations += 1;
            log::trace!("{} {} {} = {} at {}", lhs, formula.op, rhs, value, top);

            self.set_state(top, EvalState::Done(value));
            pending.pop();
        }

        Ok(value)
    }

    /// Mark `at` as in progress, or return its memoized value
    fn begin(&mut self, at: Address) -> FormulaResult<Option<i64>> {
        let slot = self
            .slots
            .get_mut(&at)
            .ok_or(FormulaError::MissingFormula(at))?;

        match slot.state {
            EvalState::Done(value) => Ok(Some(value)),
            EvalState::InProgress => Err(FormulaError::CircularReference { at }),
            EvalState::NotStarted => {
                slot.state = EvalState::InProgress;
                Ok(None)
            }
        }
    }

    fn push(&mut self, pending: &mut Vec<Address>, at: Address) {
        self.set_state(at, EvalState::InProgress);
        pending.push(at);
    }

    fn set_state(&mut self, at: Address, state: EvalState) {
        if let Some(slot) = self.slots.get_mut(&at) {
            slot.state = state;
        }
    }

    fn operand_value(&self, grid: &Grid, operand: Operand) -> FormulaResult<OperandValue> {
        let addr = match operand {
            Operand::Constant(value) => return Ok(OperandValue::Ready(value)),
            Operand::Ref(addr) => addr,
        };

        let content = grid.cell(addr)?;
        if !content.starts_with(FORMULA_MARKER) {
            return parse_number(content).map(OperandValue::Ready);
        }

        match self.state(addr).ok_or(FormulaError::MissingFormula(addr))? {
            EvalState::Done(value) => Ok(OperandValue::Ready(value)),
            EvalState::InProgress => Err(FormulaError::CircularReference { at: addr }),
            EvalState::NotStarted => Ok(OperandValue::Pending(addr)),
        }
    }
}
