//! Argument checks shared by engine operations

use mme_core::MatrixError;
use crate::types::Matrix;

/// Length of the longest row, 0 for no rows
pub fn find_largest_row(rows: &[Vec<f32>]) -> usize {
    rows.iter().map(Vec::len).max().unwrap_or(0)
}

/// Check that a requested dimension is positive
pub fn check_positive(n: usize, what: &str, func: &str) -> Result<(), MatrixError> {
    if n == 0 {
        return Err(MatrixError::invalid_argument(format!(
            "{}: {} must be positive",
            func, what
        )));
    }
    Ok(())
}

/// Check that a row index is inside the matrix
pub fn check_row(m: &Matrix, row: usize) -> Result<(), MatrixError> {
    if row >= m.rows() {
        return Err(MatrixError::row_out_of_range(row, m.rows()));
    }
    Ok(())
}

/// Check that a column index is inside the matrix
pub fn check_col(m: &Matrix, col: usize) -> Result<(), MatrixError> {
    if col >= m.cols() {
        return Err(MatrixError::column_out_of_range(col, m.cols()));
    }
    Ok(())
}

/// Check that a matrix is square
pub fn check_square(m: &Matrix, func: &str) -> Result<(), MatrixError> {
    if !m.is_square() {
        return Err(MatrixError::invalid_state(format!(
            "{}: requires square matrix, got {}×{}",
            func,
            m.rows(),
            m.cols()
        )));
    }
    Ok(())
}

/// Check for an augmented system `[A | x]` with A square
pub fn check_augmented(m: &Matrix, func: &str) -> Result<(), MatrixError> {
    if m.cols() != m.rows() + 1 {
        return Err(MatrixError::invalid_state(format!(
            "{}: requires N×(N+1) matrix, got {}×{}",
            func,
            m.rows(),
            m.cols()
        )));
    }
    Ok(())
}
