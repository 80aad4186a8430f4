use std::collections::VecDeque;

use bitvec::order::Lsb0;
use bitvec::vec::BitVec;

use omega_automata::StateIndex;

/// A first-in first-out queue of states of `A` in which every state occurs at most once.
pub(crate) struct Worklist {
    queued: BitVec<usize, Lsb0>,
    working: VecDeque<StateIndex>,
}

impl Worklist {
    pub(crate) fn new(num_of_states: usize) -> Self {
        Self {
            queued: BitVec::repeat(false, num_of_states),
            working: VecDeque::new(),
        }
    }

    /// Adds the state unless it is already queued.
    pub(crate) fn push(&mut self, state: StateIndex) {
        if !self.queued[state.value()] {
            self.queued.set(state.value(), true);
            self.working.push_back(state);
        }
    }

    pub(crate) fn pop(&mut self) -> Option<StateIndex> {
        let state = self.working.pop_front()?;
        self.queued.set(state.value(), false);
        Some(state)
    }
}
