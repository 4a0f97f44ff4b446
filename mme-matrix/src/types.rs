//! Dense matrix storage

use std::fmt;
use mme_core::MatrixError;
use nalgebra::DMatrix;
use serde::Serialize;

use crate::helpers::find_largest_row;

/// Rectangular grid of single-precision values.
///
/// Every row holds exactly `cols` elements and both dimensions stay at
/// least 1 once the matrix is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matrix {
    data: Vec<Vec<f32>>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Create a rows×cols matrix with every cell set to `x`
    pub fn filled(rows: usize, cols: usize, x: f32) -> Result<Self, MatrixError> {
        if rows == 0 || cols == 0 {
            return Err(MatrixError::invalid_argument(format!(
                "matrix size must be positive, got {}×{}",
                rows, cols
            )));
        }
        Ok(Self { data: vec![vec![x; cols]; rows], rows, cols })
    }

    pub fn zeros(rows: usize, cols: usize) -> Result<Self, MatrixError> {
        Self::filled(rows, cols, 0.0)
    }

    /// Create from nested rows that must all have the same length
    pub fn from_rows(data: Vec<Vec<f32>>) -> Result<Self, MatrixError> {
        if data.is_empty() {
            return Err(MatrixError::invalid_argument("matrix: empty data"));
        }

        let rows = data.len();
        let cols = data[0].len();
        if cols == 0 {
            return Err(MatrixError::invalid_argument("matrix: rows must not be empty"));
        }

        for (i, row) in data.iter().enumerate() {
            if row.len() != cols {
                return Err(MatrixError::invalid_argument(format!(
                    "matrix: row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
        }

        Ok(Self { data, rows, cols })
    }

    /// Create from ragged rows.
    ///
    /// The width is the longest supplied row; cells a short row does not
    /// reach are zero.
    pub fn from_ragged(data: &[Vec<f32>]) -> Result<Self, MatrixError> {
        let cols = find_largest_row(data);
        if cols == 0 {
            return Err(MatrixError::invalid_argument(
                "import needs at least one non-empty row",
            ));
        }

        let data: Vec<Vec<f32>> = data
            .iter()
            .map(|row| {
                let mut padded = row.clone();
                padded.resize(cols, 0.0);
                padded
            })
            .collect();
        let rows = data.len();

        Ok(Self { data, rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Get element at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        self.data.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Borrow a whole row
    pub fn row(&self, row: usize) -> Option<&[f32]> {
        self.data.get(row).map(Vec::as_slice)
    }

    pub fn as_rows(&self) -> &[Vec<f32>] {
        &self.data
    }

    /// Copy out as nested rows
    pub fn to_rows(&self) -> Vec<Vec<f32>> {
        self.data.clone()
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row][col] = value;
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [f32] {
        &mut self.data[row]
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Vec<f32>] {
        &mut self.data
    }

    pub(crate) fn swap_rows(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
    }

    pub(crate) fn fill(&mut self, x: f32) {
        for row in &mut self.data {
            row.iter_mut().for_each(|e| *e = x);
        }
    }

    /// Grow with zero rows or drop trailing rows until there are `n`
    pub(crate) fn resize_rows(&mut self, n: usize) {
        while self.rows != n {
            if n < self.rows {
                self.data.pop();
                self.rows -= 1;
            } else {
                self.data.push(vec![0.0; self.cols]);
                self.rows += 1;
            }
        }
    }

    /// Grow with zero columns or drop trailing columns until there are `m`
    pub(crate) fn resize_cols(&mut self, m: usize) {
        while self.cols != m {
            if m < self.cols {
                self.data.iter_mut().for_each(|row| {
                    row.pop();
                });
                self.cols -= 1;
            } else {
                self.data.iter_mut().for_each(|row| row.push(0.0));
                self.cols += 1;
            }
        }
    }

    /// Append an rows×rows identity block on the right
    pub(crate) fn append_identity(&mut self) {
        let n = self.rows;
        for (r, row) in self.data.iter_mut().enumerate() {
            row.extend((0..n).map(|i| if i == r { 1.0 } else { 0.0 }));
        }
        self.cols += n;
    }

    pub fn transposed(&self) -> Matrix {
        let data: Vec<Vec<f32>> = (0..self.cols)
            .map(|j| self.data.iter().map(|row| row[j]).collect())
            .collect();
        Matrix { data, rows: self.cols, cols: self.rows }
    }

    /// Convert to f64 DMatrix (for nalgebra operations)
    pub fn to_dmatrix(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.rows, self.cols, |i, j| f64::from(self.data[i][j]))
    }

    /// Create from nalgebra DMatrix, narrowing to f32
    pub fn from_dmatrix(m: &DMatrix<f64>) -> Result<Self, MatrixError> {
        let data: Vec<Vec<f32>> = (0..m.nrows())
            .map(|i| (0..m.ncols()).map(|j| m[(i, j)] as f32).collect())
            .collect();
        Self::from_rows(data)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (j, val) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", val)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}
