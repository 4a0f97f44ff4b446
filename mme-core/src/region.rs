//! Change regions reported after each mutation

use serde::{Deserialize, Serialize};

/// Rectangle of cells touched by a mutation.
///
/// `top..bottom` and `left..right` are half-open. `rows` and `cols` carry the
/// matrix shape after the change so a view can resize itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRegion {
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
    pub rows: usize,
    pub cols: usize,
}

impl ChangeRegion {
    /// Whole matrix
    pub fn full(rows: usize, cols: usize) -> Self {
        Self { top: 0, left: 0, bottom: rows, right: cols, rows, cols }
    }

    /// Rows `a` through `b` (either order), all columns
    pub fn rows(a: usize, b: usize, rows: usize, cols: usize) -> Self {
        let (top, last) = if a <= b { (a, b) } else { (b, a) };
        Self { top, left: 0, bottom: last + 1, right: cols, rows, cols }
    }

    /// A single cell
    pub fn cell(row: usize, col: usize, rows: usize, cols: usize) -> Self {
        Self { top: row, left: col, bottom: row + 1, right: col + 1, rows, cols }
    }

    /// Columns from `first` to the right edge, all rows
    pub fn columns(first: usize, rows: usize, cols: usize) -> Self {
        Self { top: 0, left: first, bottom: rows, right: cols, rows, cols }
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.top && row < self.bottom && col >= self.left && col < self.right
    }

    pub fn is_full(&self) -> bool {
        self.top == 0 && self.left == 0 && self.bottom == self.rows && self.right == self.cols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_any_order() {
        let r = ChangeRegion::rows(2, 0, 3, 4);
        assert_eq!((r.top, r.bottom, r.left, r.right), (0, 3, 0, 4));
        assert!(r.is_full());

        let r = ChangeRegion::rows(1, 1, 3, 4);
        assert!(r.contains(1, 3));
        assert!(!r.contains(0, 0));
        assert!(!r.is_full());
    }

    #[test]
    fn test_cell_and_columns() {
        let c = ChangeRegion::cell(1, 2, 3, 3);
        assert!(c.contains(1, 2));
        assert!(!c.contains(1, 1));

        let cols = ChangeRegion::columns(2, 2, 4);
        assert!(cols.contains(0, 2) && cols.contains(1, 3));
        assert!(!cols.contains(0, 1));
    }
}
