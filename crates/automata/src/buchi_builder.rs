#![forbid(unsafe_code)]

use std::fmt;

use crate::Alphabet;
use crate::BuchiAutomaton;
use crate::LetterIndex;
use crate::StateIndex;

/// Accumulates the transitions and accepting states of a Büchi automaton.
///
/// # Details
///
/// Letters can be given by name with [BuchiBuilder::add_transition_label], in
/// which case new letters are appended to the alphabet, or directly by index.
/// The number of states is derived from the largest state index seen.
pub struct BuchiBuilder {
    transitions: Vec<(StateIndex, LetterIndex, StateIndex)>,
    finals: Vec<StateIndex>,
    alphabet: Alphabet,

    num_of_states: usize,
}

impl BuchiBuilder {
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            transitions: Vec::new(),
            finals: Vec::new(),
            alphabet,
            num_of_states: 0,
        }
    }

    /// Adds a transition for a letter that is already part of the alphabet.
    pub fn add_transition(&mut self, from: StateIndex, letter: LetterIndex, to: StateIndex) {
        assert!(
            letter.value() < self.alphabet.len(),
            "Letter {letter} is not part of the alphabet"
        );

        self.transitions.push((from, letter, to));
        self.num_of_states = self.num_of_states.max(from.value() + 1).max(to.value() + 1);
    }

    /// Adds a transition with the given letter name, extending the alphabet when necessary.
    pub fn add_transition_label(&mut self, from: StateIndex, letter: &str, to: StateIndex) {
        let letter = self.alphabet.insert(letter);
        self.add_transition(from, letter, to);
    }

    /// Marks the given state as accepting.
    pub fn set_final(&mut self, state: StateIndex) {
        self.finals.push(state);
        self.require_num_of_states(state.value() + 1);
    }

    /// Ensures that the automaton has at least the given number of states.
    pub fn require_num_of_states(&mut self, num_of_states: usize) {
        self.num_of_states = self.num_of_states.max(num_of_states);
    }

    /// Returns the number of states added so far.
    pub fn num_of_states(&self) -> usize {
        self.num_of_states
    }

    /// Returns the number of transitions added so far, including duplicates.
    pub fn num_of_transitions(&self) -> usize {
        self.transitions.len()
    }

    /// Returns the alphabet, including the letters added by transitions.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Finalizes the builder and returns the constructed automaton.
    pub fn finish(self, initial_state: StateIndex) -> BuchiAutomaton {
        let num_of_states = self.num_of_states.max(initial_state.value() + 1);

        BuchiAutomaton::new(
            self.alphabet,
            initial_state,
            num_of_states,
            self.finals,
            self.transitions,
        )
    }
}

impl fmt::Debug for BuchiBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Transitions:")?;
        for (from, letter, to) in &self.transitions {
            writeln!(f, "    {from} --[{}]-> {to}", self.alphabet.letter(*letter))?;
        }
        writeln!(f, "Finals: {:?}", self.finals)
    }
}
