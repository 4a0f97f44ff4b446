//! MME Matrix - Engine for manual row operations
//!
//! Provides the editable matrix behind the editor:
//! - Shape (set_rows, set_cols, set_matrix, clear)
//! - Cell access (get, set)
//! - Row arithmetic (swap, plus/minus/mul/div against another row or a scalar)
//! - Structural transforms (transpose, add_identity, mul_matrix_on_last_row)
//! - Bareiss elimination (to_square_by_bareiss, determinant)
//! - Bounded undo history
//!
//! Elements are single-precision floats. Every mutation reports the
//! rectangle it touched, both as a return value and to subscribed
//! observers.

mod bareiss;
mod engine;
mod helpers;
mod history;
mod observer;
mod ops;
mod types;

pub use bareiss::{determinant, eliminate, Elimination};
pub use engine::{Capabilities, Change, MatrixEngine};
pub use helpers::find_largest_row;
pub use history::History;
pub use observer::ChangeObserver;
pub use ops::{Operation, Outcome};
pub use types::Matrix;

pub use mme_core::{ChangeRegion, EngineConfig, MatrixError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_surface() {
        let mut engine = MatrixEngine::with_config(&EngineConfig::default()).unwrap();
        assert_eq!((engine.row_count(), engine.column_count()), (3, 3));

        engine.set_matrix(&[vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]]).unwrap();
        assert_eq!(engine.determinant().unwrap(), 1.0);
        assert_eq!(find_largest_row(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0]]), 3);
    }
}
