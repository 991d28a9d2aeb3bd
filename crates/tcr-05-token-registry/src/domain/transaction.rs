//! # State Transaction
//!
//! All-or-nothing mutation of a `Clone` state. `begin` stages a copy, the
//! caller mutates the copy, and `commit` swaps it in. Dropping the guard
//! without committing discards every staged change.

use tracing::trace;

/// Guard over a staged copy of `S`.
pub struct StateTransaction<'a, S: Clone> {
    target: &'a mut S,
    staged: S,
    committed: bool,
}

impl<'a, S: Clone> StateTransaction<'a, S> {
    /// Stage a copy of `target`.
    pub fn begin(target: &'a mut S) -> Self {
        let staged = target.clone();
        Self {
            target,
            staged,
            committed: false,
        }
    }

    /// The staged state.
    pub fn state(&self) -> &S {
        &self.staged
    }

    /// The staged state, mutably.
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.staged
    }

    /// Publish the staged state.
    pub fn commit(mut self) {
        std::mem::swap(&mut *self.target, &mut self.staged);
        self.committed = true;
    }
}

impl<S: Clone> Drop for StateTransaction<'_, S> {
    fn drop(&mut self) {
        if !self.committed {
            trace!("State transaction rolled back");
        }
    }
}
