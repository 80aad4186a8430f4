#![forbid(unsafe_code)]

use std::collections::VecDeque;

use bitvec::bitvec;
use bitvec::order::Lsb0;
use bitvec::vec::BitVec;

use omega_automata::LetterIndex;
use omega_automata::OmegaAutomaton;
use omega_automata::StateIndex;

/// The forward and backward transitions of an automaton per state and letter,
/// built once and read-only afterwards.
///
/// # Details
///
/// Both directions are stored as one flat array with offsets per `(state,
/// letter)` slot, where the slot of `(s, a)` is `s * num_of_letters + a`.
/// Successors and predecessors of a slot are therefore a plain slice.
pub struct AdjacencyIndex {
    initial_state: StateIndex,
    finals: BitVec<usize, Lsb0>,
    num_of_letters: usize,

    forward_offsets: Vec<usize>,
    forward: Vec<StateIndex>,

    backward_offsets: Vec<usize>,
    backward: Vec<StateIndex>,

    enabled: Vec<Vec<LetterIndex>>,
}

impl AdjacencyIndex {
    pub fn new(automaton: &impl OmegaAutomaton) -> Self {
        let num_of_states = automaton.num_of_states();
        let num_of_letters = automaton.num_of_letters();
        let num_of_slots = num_of_states * num_of_letters;

        let mut forward_offsets = Vec::with_capacity(num_of_slots + 1);
        let mut forward = Vec::with_capacity(automaton.num_of_transitions());
        let mut backward_counts = vec![0usize; num_of_slots + 1];
        let mut enabled = Vec::with_capacity(num_of_states);

        for state in automaton.iter_states() {
            for letter in 0..num_of_letters {
                forward_offsets.push(forward.len());
                for to in automaton.successors(state, LetterIndex::new(letter)) {
                    forward.push(to);
                    backward_counts[to.value() * num_of_letters + letter] += 1;
                }
            }
            enabled.push(automaton.enabled_letters(state).collect());
        }

        // Add sentinel slot
        forward_offsets.push(forward.len());

        // Compute the start offsets (prefix sum)
        let mut offset = 0;
        for count in backward_counts.iter_mut() {
            let next = offset + *count;
            *count = offset;
            offset = next;
        }
        let backward_offsets = backward_counts;

        // Place the transitions
        let mut backward = vec![StateIndex::new(0); forward.len()];
        let mut next_free = backward_offsets.clone();
        for state in 0..num_of_states {
            for letter in 0..num_of_letters {
                let slot = state * num_of_letters + letter;
                for to in &forward[forward_offsets[slot]..forward_offsets[slot + 1]] {
                    let target_slot = to.value() * num_of_letters + letter;
                    backward[next_free[target_slot]] = StateIndex::new(state);
                    next_free[target_slot] += 1;
                }
            }
        }

        let mut finals = bitvec![usize, Lsb0; 0; num_of_states];
        for state in automaton.final_states() {
            finals.set(state.value(), true);
        }

        Self {
            initial_state: automaton.initial_state(),
            finals,
            num_of_letters,
            forward_offsets,
            forward,
            backward_offsets,
            backward,
            enabled,
        }
    }

    pub fn initial_state(&self) -> StateIndex {
        self.initial_state
    }

    pub fn num_of_states(&self) -> usize {
        self.enabled.len()
    }

    pub fn num_of_letters(&self) -> usize {
        self.num_of_letters
    }

    pub fn is_final(&self, state: StateIndex) -> bool {
        self.finals[state.value()]
    }

    /// Returns the successors of `state` under `letter`.
    pub fn successors(&self, state: StateIndex, letter: LetterIndex) -> &[StateIndex] {
        let slot = self.slot(state, letter);
        &self.forward[self.forward_offsets[slot]..self.forward_offsets[slot + 1]]
    }

    /// Returns the states that reach `state` by reading `letter`.
    pub fn predecessors(&self, state: StateIndex, letter: LetterIndex) -> &[StateIndex] {
        let slot = self.slot(state, letter);
        &self.backward[self.backward_offsets[slot]..self.backward_offsets[slot + 1]]
    }

    /// Returns the letters with at least one successor, in increasing order.
    pub fn enabled_letters(&self, state: StateIndex) -> &[LetterIndex] {
        &self.enabled[state]
    }

    /// Returns the states reachable from `start` in zero or more steps.
    pub fn forward_reachable(&self, start: impl IntoIterator<Item = StateIndex>) -> BitVec<usize, Lsb0> {
        self.explore(start, |state, letter| self.successors(state, letter))
    }

    /// Returns the states that can reach `target` in zero or more steps.
    pub fn backward_reachable(&self, target: StateIndex) -> BitVec<usize, Lsb0> {
        self.explore([target], |state, letter| self.predecessors(state, letter))
    }

    /// Returns the states that are reachable from `start` and can reach `target`.
    pub fn states_between(&self, start: impl IntoIterator<Item = StateIndex>, target: StateIndex) -> BitVec<usize, Lsb0> {
        let mut result = self.forward_reachable(start);
        result &= self.backward_reachable(target).as_bitslice();
        result
    }

    /// Breadth-first search over the given edges, returns the visited states.
    fn explore<'a, F>(&'a self, start: impl IntoIterator<Item = StateIndex>, edges: F) -> BitVec<usize, Lsb0>
    where
        F: Fn(StateIndex, LetterIndex) -> &'a [StateIndex],
    {
        let mut visited = bitvec![usize, Lsb0; 0; self.num_of_states()];
        let mut queue = VecDeque::new();
        for state in start {
            if !visited[state.value()] {
                visited.set(state.value(), true);
                queue.push_back(state);
            }
        }

        while let Some(state) = queue.pop_front() {
            for letter in 0..self.num_of_letters {
                for next in edges(state, LetterIndex::new(letter)) {
                    if !visited[next.value()] {
                        visited.set(next.value(), true);
                        queue.push_back(*next);
                    }
                }
            }
        }

        visited
    }

    fn slot(&self, state: StateIndex, letter: LetterIndex) -> usize {
        assert!(
            letter.value() < self.num_of_letters,
            "Letter {letter} out of range"
        );
        state.value() * self.num_of_letters + letter.value()
    }
}

#[cfg(test)]
mod tests {
    use omega_automata::random_buchi;
    use omega_utilities::random_test;
    use test_log::test;

    use super::*;

    #[test]
    fn test_random_adjacency_index() {
        random_test(100, |rng| {
            let automaton = random_buchi(rng, 10, 3, 4);
            let index = AdjacencyIndex::new(&automaton);

            // Check that for every forward edge there is a backward edge.
            let mut num_of_edges: isize = 0;
            for state in automaton.iter_states() {
                for letter in automaton.alphabet().iter() {
                    for to in index.successors(state, letter) {
                        assert!(index.predecessors(*to, letter).contains(&state));
                        num_of_edges += 1;
                    }
                    num_of_edges -= index.predecessors(state, letter).len() as isize;
                }

                assert!(
                    index
                        .enabled_letters(state)
                        .iter()
                        .copied()
                        .eq(automaton.enabled_letters(state))
                );
            }

            assert_eq!(num_of_edges, 0, "The number of forward and backward edges should match");
        })
    }

    #[test]
    fn test_random_reachability_is_dual() {
        random_test(100, |rng| {
            let automaton = random_buchi(rng, 8, 2, 3);
            let index = AdjacencyIndex::new(&automaton);

            for target in automaton.iter_states() {
                let backward = index.backward_reachable(target);
                for state in automaton.iter_states() {
                    assert_eq!(backward[state.value()], index.forward_reachable([state])[target.value()]);
                }
            }
        })
    }
}
