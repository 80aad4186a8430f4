#![forbid(unsafe_code)]

//! The automaton trait and its associated index types.

use omega_utilities::TagIndex;

/// A unique type for the letters.
pub struct LetterTag;

/// A unique type for the states.
pub struct StateTag;

/// The index of a letter in an [crate::Alphabet].
pub type LetterIndex = TagIndex<usize, LetterTag>;

/// The index of a state, states of an automaton are numbered `0..num_of_states`.
pub type StateIndex = TagIndex<usize, StateTag>;

/// Read-only access to a nondeterministic automaton on infinite words with a
/// Büchi acceptance condition.
///
/// Querying a state or letter that is out of range is a contract violation
/// and panics.
pub trait OmegaAutomaton {
    /// Returns the initial state.
    fn initial_state(&self) -> StateIndex;

    /// Returns the number of states.
    fn num_of_states(&self) -> usize;

    /// Returns the number of letters of the alphabet.
    fn num_of_letters(&self) -> usize;

    /// Returns the number of transitions.
    fn num_of_transitions(&self) -> usize;

    /// Returns true iff the given state is accepting.
    fn is_final(&self, state: StateIndex) -> bool;

    /// Returns the successors of `state` under `letter`, without duplicates.
    fn successors(&self, state: StateIndex, letter: LetterIndex) -> impl Iterator<Item = StateIndex> + '_;

    /// Returns the letters for which `state` has at least one successor, in increasing order.
    fn enabled_letters(&self, state: StateIndex) -> impl Iterator<Item = LetterIndex> + '_;

    /// Returns all outgoing transitions of `state`, ordered by letter.
    fn outgoing_transitions(&self, state: StateIndex) -> impl Iterator<Item = Transition> + '_;

    /// Iterates over all states.
    fn iter_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        (0..self.num_of_states()).map(StateIndex::new)
    }

    /// Iterates over all accepting states.
    fn final_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.iter_states().filter(|state| self.is_final(*state))
    }

    /// Returns true iff every state has a successor for every letter.
    fn is_total(&self) -> bool {
        self.iter_states()
            .all(|state| self.enabled_letters(state).count() == self.num_of_letters())
    }
}

/// An outgoing transition, the source state is implicit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transition {
    pub letter: LetterIndex,
    pub to: StateIndex,
}

impl Transition {
    pub fn new(letter: LetterIndex, to: StateIndex) -> Self {
        Self { letter, to }
    }
}
