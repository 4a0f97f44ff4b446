//! The matrix engine
//!
//! Owns the live matrix and its undo history. Every mutating call checks
//! its arguments first, then stores a snapshot, mutates, and reports the
//! affected region to the caller and to subscribed observers.

use std::fmt;
use mme_core::{ChangeRegion, EngineConfig, MatrixError};
use serde::Serialize;
use tracing::debug;

use crate::bareiss;
use crate::helpers::{check_augmented, check_col, check_positive, check_row, check_square};
use crate::history::History;
use crate::observer::ChangeObserver;
use crate::types::Matrix;

/// Result of a mutating call; `None` when nothing changed
pub type Change = Result<Option<ChangeRegion>, MatrixError>;

/// Shape-gated actions that are currently valid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub determinant: bool,
    pub bareiss: bool,
    pub mul_last_column: bool,
}

pub struct MatrixEngine {
    matrix: Matrix,
    history: History,
    observers: Vec<Box<dyn ChangeObserver>>,
}

impl fmt::Debug for MatrixEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixEngine")
            .field("matrix", &self.matrix)
            .field("history", &self.history.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl MatrixEngine {
    /// Zero matrix of the given size with the default undo depth
    pub fn new(rows: usize, cols: usize) -> Result<Self, MatrixError> {
        Self::with_config(&EngineConfig::default().with_size(rows, cols))
    }

    pub fn with_config(config: &EngineConfig) -> Result<Self, MatrixError> {
        config.validate()?;
        Ok(Self {
            matrix: Matrix::zeros(config.initial_rows, config.initial_cols)?,
            history: History::with_capacity(config.history_capacity),
            observers: Vec::new(),
        })
    }

    /// Register an observer for change regions
    pub fn subscribe(&mut self, observer: impl ChangeObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    // ========== Read access ==========

    pub fn row_count(&self) -> usize {
        self.matrix.rows()
    }

    pub fn column_count(&self) -> usize {
        self.matrix.cols()
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn is_square(&self) -> bool {
        self.matrix.is_square()
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f32, MatrixError> {
        check_row(&self.matrix, row)?;
        check_col(&self.matrix, col)?;
        Ok(self.matrix.as_rows()[row][col])
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_capacity(&self) -> usize {
        self.history.capacity()
    }

    pub fn capabilities(&self) -> Capabilities {
        let square = self.matrix.is_square();
        Capabilities {
            determinant: square,
            bareiss: square,
            mul_last_column: self.matrix.cols() == self.matrix.rows() + 1,
        }
    }

    // ========== Shape ==========

    pub fn set_rows(&mut self, n: usize) -> Change {
        check_positive(n, "row count", "set_rows")?;
        debug!(from = self.matrix.rows(), to = n, "set_rows");
        self.backup();
        self.matrix.resize_rows(n);
        Ok(self.notify_full())
    }

    pub fn set_cols(&mut self, m: usize) -> Change {
        check_positive(m, "column count", "set_cols")?;
        debug!(from = self.matrix.cols(), to = m, "set_cols");
        self.backup();
        self.matrix.resize_cols(m);
        Ok(self.notify_full())
    }

    /// Replace the content from ragged rows.
    ///
    /// The width is the longest row; cells beyond a short row are zero.
    pub fn set_matrix(&mut self, rows: &[Vec<f32>]) -> Change {
        let replacement = Matrix::from_ragged(rows)?;
        debug!(rows = replacement.rows(), cols = replacement.cols(), "set_matrix");
        self.replace(replacement)
    }

    /// Set every cell to `x`
    pub fn clear(&mut self, x: f32) -> Change {
        debug!(x, "clear");
        self.backup();
        self.matrix.fill(x);
        Ok(self.notify_full())
    }

    // ========== Cells ==========

    pub fn set(&mut self, row: usize, col: usize, value: f32) -> Change {
        check_row(&self.matrix, row)?;
        check_col(&self.matrix, col)?;
        debug!(row, col, value, "set");
        self.backup();
        self.matrix.set(row, col, value);
        let region = ChangeRegion::cell(row, col, self.matrix.rows(), self.matrix.cols());
        Ok(self.notify(region))
    }

    // ========== Row arithmetic ==========

    pub fn swap_rows(&mut self, a: usize, b: usize) -> Change {
        check_row(&self.matrix, a)?;
        check_row(&self.matrix, b)?;
        debug!(a, b, "swap_rows");
        self.backup();
        self.matrix.swap_rows(a, b);
        Ok(self.notify_rows(a, b))
    }

    /// row[a] += row[b] * mult
    pub fn plus_rows(&mut self, a: usize, b: usize, mult: f32) -> Change {
        debug!(a, b, mult, "plus_rows");
        self.combine_rows(a, b, |x, y| x + y * mult)
    }

    /// row[a] -= row[b] * mult
    pub fn minus_rows(&mut self, a: usize, b: usize, mult: f32) -> Change {
        debug!(a, b, mult, "minus_rows");
        self.combine_rows(a, b, |x, y| x - y * mult)
    }

    /// row[a][i] *= row[b][i] * mult, column by column
    pub fn mul_rows(&mut self, a: usize, b: usize, mult: f32) -> Change {
        debug!(a, b, mult, "mul_rows");
        self.combine_rows(a, b, |x, y| x * (y * mult))
    }

    /// row[a][i] /= row[b][i] * mult, only where row[b][i] is nonzero and
    /// row[a][i] is exactly zero.
    ///
    /// The gate is kept as the editor has always applied it, though it
    /// looks inverted: every other column is left unchanged.
    pub fn div_rows(&mut self, a: usize, b: usize, mult: f32) -> Change {
        debug!(a, b, mult, "div_rows");
        self.combine_rows(a, b, |x, y| {
            if y == 0.0 || x != 0.0 {
                x
            } else {
                x / (y * mult)
            }
        })
    }

    pub fn plus_row(&mut self, c: usize, x: f32) -> Change {
        debug!(row = c, x, "plus_row");
        self.map_row(c, |e| e + x)
    }

    pub fn minus_row(&mut self, c: usize, x: f32) -> Change {
        debug!(row = c, x, "minus_row");
        self.map_row(c, |e| e - x)
    }

    pub fn mul_row(&mut self, c: usize, mult: f32) -> Change {
        debug!(row = c, mult, "mul_row");
        self.map_row(c, |e| e * mult)
    }

    /// Divide the nonzero cells of row `c` by `by`; dividing by zero is a
    /// no-op that stores no snapshot.
    pub fn div_row(&mut self, c: usize, by: f32) -> Change {
        check_row(&self.matrix, c)?;
        if by == 0.0 {
            debug!(row = c, "div_row by zero ignored");
            return Ok(None);
        }
        debug!(row = c, by, "div_row");
        self.map_row(c, |e| if e == 0.0 { e } else { e / by })
    }

    // ========== Structural ==========

    pub fn transpose(&mut self) -> Change {
        debug!(rows = self.matrix.rows(), cols = self.matrix.cols(), "transpose");
        let transposed = self.matrix.transposed();
        self.replace(transposed)
    }

    /// Append an N×N identity block on the right
    pub fn add_identity(&mut self) -> Change {
        debug!(n = self.matrix.rows(), "add_identity");
        self.backup();
        let first_new = self.matrix.cols();
        self.matrix.append_identity();
        let region = ChangeRegion::columns(first_new, self.matrix.rows(), self.matrix.cols());
        Ok(self.notify(region))
    }

    /// Treat `[A | x]` as a square A beside a vector x and replace the
    /// matrix with the N×1 column `A·x`.
    pub fn mul_matrix_on_last_row(&mut self) -> Change {
        check_augmented(&self.matrix, "mul_matrix_on_last_row")?;
        let rows = self.matrix.as_rows();
        let last = self.matrix.cols() - 1;
        let answer: Vec<Vec<f32>> = rows
            .iter()
            .map(|row| {
                let x = (0..last).map(|j| row[j] * rows[j][last]).sum::<f32>();
                vec![x]
            })
            .collect();
        debug!(n = answer.len(), "mul_matrix_on_last_row");
        self.replace(Matrix::from_rows(answer)?)
    }

    // ========== Bareiss ==========

    /// Reduce the live square matrix to row echelon form.
    ///
    /// A zero pivot column ends the pass early and leaves the remaining
    /// rows as they are.
    pub fn to_square_by_bareiss(&mut self) -> Change {
        check_square(&self.matrix, "to_square_by_bareiss")?;
        self.backup();
        let result = bareiss::eliminate(self.matrix.rows_mut());
        debug!(exchanges = result.exchanges, singular = result.singular, "to_square_by_bareiss");
        Ok(self.notify_full())
    }

    /// Determinant of the square matrix. Works on a copy and stores no
    /// snapshot.
    pub fn determinant(&self) -> Result<f32, MatrixError> {
        check_square(&self.matrix, "determinant")?;
        let det = bareiss::determinant(self.matrix.to_rows());
        debug!(det, "determinant");
        Ok(det)
    }

    // ========== Undo ==========

    /// Restore the most recent snapshot, including its shape
    pub fn undo(&mut self) -> Change {
        match self.history.pop() {
            Some(previous) => {
                debug!(remaining = self.history.len(), "undo");
                self.matrix = previous;
                Ok(self.notify_full())
            }
            None => {
                debug!("undo with empty history");
                Ok(None)
            }
        }
    }

    // ========== Internals ==========

    fn backup(&mut self) {
        self.history.push(self.matrix.clone());
    }

    fn replace(&mut self, replacement: Matrix) -> Change {
        self.backup();
        self.matrix = replacement;
        Ok(self.notify_full())
    }

    fn combine_rows(&mut self, a: usize, b: usize, f: impl Fn(f32, f32) -> f32) -> Change {
        check_row(&self.matrix, a)?;
        check_row(&self.matrix, b)?;
        self.backup();
        let source = self.matrix.as_rows()[b].clone();
        for (x, &y) in self.matrix.row_mut(a).iter_mut().zip(&source) {
            *x = f(*x, y);
        }
        Ok(self.notify_rows(a, b))
    }

    fn map_row(&mut self, c: usize, f: impl Fn(f32) -> f32) -> Change {
        check_row(&self.matrix, c)?;
        self.backup();
        for e in self.matrix.row_mut(c) {
            *e = f(*e);
        }
        Ok(self.notify_rows(c, c))
    }

    fn notify_full(&mut self) -> Option<ChangeRegion> {
        let region = ChangeRegion::full(self.matrix.rows(), self.matrix.cols());
        self.notify(region)
    }

    fn notify_rows(&mut self, a: usize, b: usize) -> Option<ChangeRegion> {
        let region = ChangeRegion::rows(a, b, self.matrix.rows(), self.matrix.cols());
        self.notify(region)
    }

    fn notify(&mut self, region: ChangeRegion) -> Option<ChangeRegion> {
        for observer in &mut self.observers {
            observer.matrix_changed(&region);
        }
        Some(region)
    }
}
