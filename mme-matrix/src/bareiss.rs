//! Bareiss fraction-free elimination with partial pivoting
//!
//! Shared by in-place triangularization and the determinant. Each stage
//! picks the largest magnitude entry of the pivot column, swaps it into
//! place, then updates the rows below with
//! `(a[r][c] * pivot - a[l][c] * a[r][l]) / previous_pivot`.

/// Bookkeeping from one elimination pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Elimination {
    /// Row exchanges performed while pivoting
    pub exchanges: usize,
    /// Stopped early on an all-zero pivot column
    pub singular: bool,
}

/// Reduce a square block to upper-triangular form in place.
///
/// Stops as soon as a pivot column is zero from the diagonal down; rows
/// below that point are left as they are.
pub fn eliminate(m: &mut [Vec<f32>]) -> Elimination {
    let n = m.len();
    let mut denom = 1.0_f32;
    let mut exchanges = 0;

    for l in 0..n.saturating_sub(1) {
        let mut pivot_row = l;
        let mut max_value = m[l][l].abs();
        for r in (l + 1)..n {
            let value = m[r][l].abs();
            if value > max_value {
                pivot_row = r;
                max_value = value;
            }
        }

        if pivot_row > l {
            m.swap(l, pivot_row);
            exchanges += 1;
        } else if max_value == 0.0 {
            return Elimination { exchanges, singular: true };
        }

        let pivot = m[l][l];
        for r in (l + 1)..n {
            let factor = m[r][l];
            m[r][l] = 0.0;
            for c in (l + 1)..n {
                m[r][c] = (m[r][c] * pivot - m[l][c] * factor) / denom;
            }
        }

        denom = pivot;
    }

    Elimination { exchanges, singular: false }
}

/// Determinant of a square block, computed on the owned copy
pub fn determinant(mut m: Vec<Vec<f32>>) -> f32 {
    let n = m.len();
    if n == 0 {
        return 1.0;
    }

    let result = eliminate(&mut m);
    if result.singular {
        return 0.0;
    }

    let last = m[n - 1][n - 1];
    if result.exchanges % 2 == 1 {
        -last
    } else {
        last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_identity() {
        let m = vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]];
        assert_eq!(determinant(m), 1.0);
    }

    #[test]
    fn test_exchange_sign() {
        // det([[1, 2], [3, 4]]) = -2, reached through one exchange
        assert!(approx(determinant(vec![vec![1.0, 2.0], vec![3.0, 4.0]]), -2.0));
        // Anti-diagonal: one exchange, bottom-right 6 negated
        assert!(approx(determinant(vec![vec![0.0, 3.0], vec![2.0, 0.0]]), -6.0));
        assert!(approx(determinant(vec![vec![2.0, 0.0], vec![0.0, 3.0]]), 6.0));
    }

    #[test]
    fn test_tridiagonal() {
        let m = vec![
            vec![2.0, -1.0, 0.0],
            vec![-1.0, 2.0, -1.0],
            vec![0.0, -1.0, 2.0],
        ];
        assert!(approx(determinant(m), 4.0));
    }

    #[test]
    fn test_singular_stops_early() {
        let mut m = vec![vec![0.0, 1.0], vec![0.0, 5.0]];
        let result = eliminate(&mut m);
        assert!(result.singular);
        assert_eq!(result.exchanges, 0);
        // Untouched after the early exit
        assert_eq!(m, vec![vec![0.0, 1.0], vec![0.0, 5.0]]);
        assert_eq!(determinant(m), 0.0);
    }

    #[test]
    fn test_eliminate_upper_triangular() {
        let mut m = vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 10.0],
        ];
        let result = eliminate(&mut m);
        assert!(!result.singular);
        for r in 1..3 {
            for c in 0..r {
                assert_eq!(m[r][c], 0.0);
            }
        }
        // First pivot is the largest entry of column 0
        assert_eq!(m[0], vec![7.0, 8.0, 10.0]);
    }

    #[test]
    fn test_single_cell() {
        assert_eq!(determinant(vec![vec![-4.5]]), -4.5);
    }
}
