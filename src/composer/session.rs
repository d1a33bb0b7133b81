//! # Session
//!
//! Committed permutations, the selection and the swap in flight.

use tracing::debug;

use crate::{
    hexad::{total_labelled, Duad, POINTS},
    permutation::Permutation,
};

/// A transposition chosen by the user and waiting to be animated.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSwap {
    pub duad: Duad,
    /// Transposition of structural positions.
    pub swap: Permutation,
    /// Its image on slots, from the correspondence table.
    pub psi_of_swap: Permutation,
    pub next_phi: Permutation,
    pub next_psi: Permutation,
}

/// Everything a composer changes while the user interacts with it.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub(crate) phi: Permutation,
    pub(crate) psi: Permutation,
    pub(crate) selected: Vec<usize>,
    pub(crate) pending: Option<PendingSwap>,
    pub(crate) t0: Option<f64>,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::new(
            Permutation::identity(POINTS),
            total_labelled(Permutation::identity(POINTS)),
        )
    }
}

impl SessionState {
    pub fn new(phi: Permutation, psi: Permutation) -> Self {
        SessionState {
            phi,
            psi,
            selected: Vec::with_capacity(2),
            pending: None,
            t0: None,
        }
    }

    pub fn phi(&self) -> &Permutation {
        &self.phi
    }

    pub fn psi(&self) -> &Permutation {
        &self.psi
    }

    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    pub fn pending(&self) -> Option<&PendingSwap> {
        self.pending.as_ref()
    }

    pub fn t0(&self) -> Option<f64> {
        self.t0
    }

    pub(crate) fn begin(&mut self, duad: Duad, swap: Permutation, psi_of_swap: Permutation) {
        let next_phi = self.phi.compose(&swap);
        let next_psi = self.psi.compose(&psi_of_swap);
        debug!(%duad, swap = %swap.cycle_notation(), psi_of_swap = %psi_of_swap.cycle_notation(), "swap derived");
        self.pending = Some(PendingSwap {
            duad,
            swap,
            psi_of_swap,
            next_phi,
            next_psi,
        });
    }

    /// Folds the pending swap into the committed pair and starts over with an
    /// empty selection. Returns the committed swap.
    pub(crate) fn commit(&mut self) -> Option<PendingSwap> {
        let pending = self.pending.take()?;
        self.phi = pending.next_phi.clone();
        self.psi = pending.next_psi.clone();
        self.selected.clear();
        self.t0 = None;
        debug!(phi = %self.phi.cycle_notation(), psi = %self.psi.cycle_notation(), "committed");
        Some(pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hexad::CorrespondenceTable;

    #[test]
    fn commit_resets_the_session() {
        let mut session = SessionState::default();
        let duad = Duad::new(1, 3);
        let image = CorrespondenceTable::outer().get(duad).unwrap().clone();
        session.selected.extend([1, 3]);
        session.t0 = Some(12.0);
        session.begin(duad, duad.transposition(), image.clone());

        let pending = session.commit().unwrap();
        assert_eq!(pending.swap, Permutation::transposition(1, 3));
        assert_eq!(session.phi(), &Permutation::from_array(&[0, 3, 2, 1, 4, 5]).unwrap());
        assert_eq!(session.psi(), &image);
        assert!(session.selected().is_empty());
        assert_eq!(session.t0(), None);
        assert!(session.commit().is_none());
    }
}
