//! Change observers

use mme_core::ChangeRegion;

/// Receives the affected region after every mutation
pub trait ChangeObserver {
    fn matrix_changed(&mut self, region: &ChangeRegion);
}

impl<F> ChangeObserver for F
where
    F: FnMut(&ChangeRegion),
{
    fn matrix_changed(&mut self, region: &ChangeRegion) {
        self(region)
    }
}
