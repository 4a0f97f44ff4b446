//! Typed operations and dispatch
//!
//! One variant per engine call, so a front end can hand the engine a value
//! instead of calling methods directly. Row and column indices are 0-based.

use mme_core::{ChangeRegion, MatrixError};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::engine::MatrixEngine;

fn one() -> f32 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    SetRows { n: usize },
    SetCols { m: usize },
    SetMatrix { rows: Vec<Vec<f32>> },
    Clear {
        #[serde(default)]
        x: f32,
    },
    Get { row: usize, col: usize },
    Set { row: usize, col: usize, value: f32 },
    SwapRows { a: usize, b: usize },
    PlusRows {
        a: usize,
        b: usize,
        #[serde(default = "one")]
        mult: f32,
    },
    MinusRows {
        a: usize,
        b: usize,
        #[serde(default = "one")]
        mult: f32,
    },
    MulRows {
        a: usize,
        b: usize,
        #[serde(default = "one")]
        mult: f32,
    },
    DivRows {
        a: usize,
        b: usize,
        #[serde(default = "one")]
        mult: f32,
    },
    PlusRow { c: usize, x: f32 },
    MinusRow { c: usize, x: f32 },
    MulRow { c: usize, mult: f32 },
    DivRow { c: usize, by: f32 },
    Transpose,
    AddIdentity,
    MulMatrixOnLastRow,
    ToSquareByBareiss,
    Determinant,
    Undo,
}

impl Operation {
    /// Stable name, matching the serialized `op` tag
    pub fn name(&self) -> &'static str {
        match self {
            Operation::SetRows { .. } => "set_rows",
            Operation::SetCols { .. } => "set_cols",
            Operation::SetMatrix { .. } => "set_matrix",
            Operation::Clear { .. } => "clear",
            Operation::Get { .. } => "get",
            Operation::Set { .. } => "set",
            Operation::SwapRows { .. } => "swap_rows",
            Operation::PlusRows { .. } => "plus_rows",
            Operation::MinusRows { .. } => "minus_rows",
            Operation::MulRows { .. } => "mul_rows",
            Operation::DivRows { .. } => "div_rows",
            Operation::PlusRow { .. } => "plus_row",
            Operation::MinusRow { .. } => "minus_row",
            Operation::MulRow { .. } => "mul_row",
            Operation::DivRow { .. } => "div_row",
            Operation::Transpose => "transpose",
            Operation::AddIdentity => "add_identity",
            Operation::MulMatrixOnLastRow => "mul_matrix_on_last_row",
            Operation::ToSquareByBareiss => "to_square_by_bareiss",
            Operation::Determinant => "determinant",
            Operation::Undo => "undo",
        }
    }

    /// Whether applying this may change the matrix or history
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Operation::Get { .. } | Operation::Determinant)
    }
}

/// What applying an operation produced
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Outcome {
    /// Affected region, `None` when nothing changed
    Changed(Option<ChangeRegion>),
    /// Read of a single cell
    Cell(f32),
    /// Determinant of the current matrix
    Determinant(f32),
}

impl MatrixEngine {
    /// Dispatch an operation to the matching engine call
    pub fn apply(&mut self, op: &Operation) -> Result<Outcome, MatrixError> {
        let result = match op {
            Operation::SetRows { n } => self.set_rows(*n).map(Outcome::Changed),
            Operation::SetCols { m } => self.set_cols(*m).map(Outcome::Changed),
            Operation::SetMatrix { rows } => self.set_matrix(rows).map(Outcome::Changed),
            Operation::Clear { x } => self.clear(*x).map(Outcome::Changed),
            Operation::Get { row, col } => self.get(*row, *col).map(Outcome::Cell),
            Operation::Set { row, col, value } => {
                self.set(*row, *col, *value).map(Outcome::Changed)
            }
            Operation::SwapRows { a, b } => self.swap_rows(*a, *b).map(Outcome::Changed),
            Operation::PlusRows { a, b, mult } => {
                self.plus_rows(*a, *b, *mult).map(Outcome::Changed)
            }
            Operation::MinusRows { a, b, mult } => {
                self.minus_rows(*a, *b, *mult).map(Outcome::Changed)
            }
            Operation::MulRows { a, b, mult } => {
                self.mul_rows(*a, *b, *mult).map(Outcome::Changed)
            }
            Operation::DivRows { a, b, mult } => {
                self.div_rows(*a, *b, *mult).map(Outcome::Changed)
            }
            Operation::PlusRow { c, x } => self.plus_row(*c, *x).map(Outcome::Changed),
            Operation::MinusRow { c, x } => self.minus_row(*c, *x).map(Outcome::Changed),
            Operation::MulRow { c, mult } => self.mul_row(*c, *mult).map(Outcome::Changed),
            Operation::DivRow { c, by } => self.div_row(*c, *by).map(Outcome::Changed),
            Operation::Transpose => self.transpose().map(Outcome::Changed),
            Operation::AddIdentity => self.add_identity().map(Outcome::Changed),
            Operation::MulMatrixOnLastRow => self.mul_matrix_on_last_row().map(Outcome::Changed),
            Operation::ToSquareByBareiss => self.to_square_by_bareiss().map(Outcome::Changed),
            Operation::Determinant => self.determinant().map(Outcome::Determinant),
            Operation::Undo => self.undo().map(Outcome::Changed),
        };

        if let Err(ref e) = result {
            warn!(op = op.name(), code = e.code(), "operation rejected: {}", e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_defaults() {
        let op: Operation = serde_json::from_str(r#"{"op": "plus_rows", "a": 0, "b": 1}"#).unwrap();
        assert_eq!(op, Operation::PlusRows { a: 0, b: 1, mult: 1.0 });

        let op: Operation = serde_json::from_str(r#"{"op": "clear"}"#).unwrap();
        assert_eq!(op, Operation::Clear { x: 0.0 });

        let op: Operation = serde_json::from_str(r#"{"op": "undo"}"#).unwrap();
        assert_eq!(op.name(), "undo");
    }

    #[test]
    fn test_name_matches_tag() {
        let ops = [
            Operation::SwapRows { a: 0, b: 1 },
            Operation::DivRow { c: 0, by: 2.0 },
            Operation::MulMatrixOnLastRow,
            Operation::ToSquareByBareiss,
            Operation::SetMatrix { rows: vec![vec![1.0]] },
        ];
        for op in ops {
            let json = serde_json::to_value(&op).unwrap();
            assert_eq!(json["op"], op.name());
        }
    }

    #[test]
    fn test_apply_sequence() {
        let mut engine = MatrixEngine::new(2, 2).unwrap();
        let script = [
            Operation::SetMatrix { rows: vec![vec![2.0, 0.0], vec![0.0, 3.0]] },
            Operation::SwapRows { a: 0, b: 1 },
            Operation::Set { row: 1, col: 1, value: 1.0 },
        ];
        for op in &script {
            assert!(matches!(engine.apply(op).unwrap(), Outcome::Changed(Some(_))));
        }
        assert_eq!(
            engine.apply(&Operation::Get { row: 0, col: 1 }).unwrap(),
            Outcome::Cell(3.0)
        );
        assert_eq!(
            engine.apply(&Operation::Determinant).unwrap(),
            Outcome::Determinant(-6.0)
        );
        assert_eq!(
            engine.apply(&Operation::DivRow { c: 0, by: 0.0 }).unwrap(),
            Outcome::Changed(None)
        );
    }

    #[test]
    fn test_apply_propagates_errors() {
        let mut engine = MatrixEngine::new(2, 3).unwrap();
        let err = engine.apply(&Operation::Determinant).unwrap_err();
        assert_eq!(err.code(), "INVALID_STATE");
        let err = engine.apply(&Operation::MulRow { c: 4, mult: 2.0 }).unwrap_err();
        assert_eq!(err.code(), "INDEX_OUT_OF_RANGE");
        let err = engine.apply(&Operation::SetRows { n: 0 }).unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGUMENT");
        assert_eq!(engine.history_len(), 0);
    }

    #[test]
    fn test_is_mutating() {
        assert!(!Operation::Determinant.is_mutating());
        assert!(!Operation::Get { row: 0, col: 0 }.is_mutating());
        assert!(Operation::Undo.is_mutating());
    }
}
