#![forbid(unsafe_code)]

use std::fmt;

use bitvec::order::Lsb0;
use bitvec::vec::BitVec;
use itertools::Itertools;

use crate::Alphabet;
use crate::LetterIndex;
use crate::OmegaAutomaton;
use crate::StateIndex;
use crate::Transition;

/// A nondeterministic Büchi automaton.
///
/// # Details
///
/// The transitions are stored as one adjacency array: `states[s]..states[s + 1]`
/// is the range of the outgoing transitions of state `s`, which are sorted by
/// letter and then by target and contain no duplicates. This makes the
/// successors for one letter a contiguous subrange that is found by binary
/// search.
#[derive(Clone, PartialEq, Eq)]
pub struct BuchiAutomaton {
    /// Offsets into the transition arrays, with one sentinel at the end.
    states: Vec<usize>,
    transition_letters: Vec<LetterIndex>,
    transition_to: Vec<StateIndex>,

    finals: BitVec<usize, Lsb0>,
    initial_state: StateIndex,
    alphabet: Alphabet,
}

impl BuchiAutomaton {
    /// Creates an automaton with `num_of_states` states from the given
    /// transitions `(from, letter, to)`, in any order and possibly with
    /// duplicates.
    pub fn new(
        alphabet: Alphabet,
        initial_state: StateIndex,
        num_of_states: usize,
        final_states: impl IntoIterator<Item = StateIndex>,
        transitions: impl IntoIterator<Item = (StateIndex, LetterIndex, StateIndex)>,
    ) -> Self {
        assert!(
            initial_state.value() < num_of_states,
            "Initial state {initial_state} out of bounds (num states: {num_of_states})"
        );

        let mut transitions: Vec<(StateIndex, LetterIndex, StateIndex)> = transitions.into_iter().collect();
        transitions.sort_unstable();
        transitions.dedup();

        let mut states = Vec::with_capacity(num_of_states + 1);
        let mut transition_letters = Vec::with_capacity(transitions.len());
        let mut transition_to = Vec::with_capacity(transitions.len());

        let mut current = 0;
        for (from, letter, to) in transitions {
            assert!(
                from.value() < num_of_states && to.value() < num_of_states,
                "Transition {from} --[{letter}]-> {to} out of bounds (num states: {num_of_states})"
            );
            assert!(
                letter.value() < alphabet.len(),
                "Letter {letter} is not part of an alphabet with {} letters",
                alphabet.len()
            );

            // Close the ranges of all states up to and including from - 1.
            while current <= from.value() {
                states.push(transition_letters.len());
                current += 1;
            }

            transition_letters.push(letter);
            transition_to.push(to);
        }

        while current <= num_of_states {
            states.push(transition_letters.len());
            current += 1;
        }

        let mut finals = BitVec::repeat(false, num_of_states);
        for state in final_states {
            finals.set(state.value(), true);
        }

        BuchiAutomaton {
            states,
            transition_letters,
            transition_to,
            finals,
            initial_state,
            alphabet,
        }
    }

    /// Returns the alphabet of this automaton.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Replaces the alphabet by a larger one that starts with the current
    /// letters, so that two automata read independently share one alphabet.
    pub fn widen_alphabet(&mut self, alphabet: &Alphabet) {
        assert!(
            self.alphabet.is_prefix_of(alphabet),
            "The alphabet can only be extended with new letters"
        );
        self.alphabet = alphabet.clone();
    }

    /// Returns the range in the transition arrays of the outgoing transitions of `state`.
    fn transition_range(&self, state: StateIndex) -> std::ops::Range<usize> {
        self.states[state.value()]..self.states[state.value() + 1]
    }
}

impl OmegaAutomaton for BuchiAutomaton {
    fn initial_state(&self) -> StateIndex {
        self.initial_state
    }

    fn num_of_states(&self) -> usize {
        // Remove the sentinel.
        self.states.len() - 1
    }

    fn num_of_letters(&self) -> usize {
        self.alphabet.len()
    }

    fn num_of_transitions(&self) -> usize {
        self.transition_to.len()
    }

    fn is_final(&self, state: StateIndex) -> bool {
        self.finals[state.value()]
    }

    fn successors(&self, state: StateIndex, letter: LetterIndex) -> impl Iterator<Item = StateIndex> + '_ {
        assert!(
            letter.value() < self.num_of_letters(),
            "Letter {letter} out of range"
        );

        let range = self.transition_range(state);
        let letters = &self.transition_letters[range.clone()];
        let start = range.start + letters.partition_point(|l| *l < letter);
        let end = range.start + letters.partition_point(|l| *l <= letter);

        self.transition_to[start..end].iter().copied()
    }

    fn enabled_letters(&self, state: StateIndex) -> impl Iterator<Item = LetterIndex> + '_ {
        self.transition_letters[self.transition_range(state)]
            .iter()
            .copied()
            .dedup()
    }

    fn outgoing_transitions(&self, state: StateIndex) -> impl Iterator<Item = Transition> + '_ {
        self.transition_range(state)
            .map(move |i| Transition::new(self.transition_letters[i], self.transition_to[i]))
    }
}

impl fmt::Debug for BuchiAutomaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "initial: {}, finals: [{}]",
            self.initial_state,
            self.final_states().format(", ")
        )?;
        for state in self.iter_states() {
            for transition in self.outgoing_transitions(state) {
                writeln!(
                    f,
                    "    {state} --[{}]-> {}",
                    self.alphabet.letter(transition.letter),
                    transition.to
                )?;
            }
        }
        Ok(())
    }
}
