#![forbid(unsafe_code)]

use itertools::Itertools;

use crate::BuchiAutomaton;
use crate::OmegaAutomaton;
use crate::StateIndex;

/// Makes the given automaton total by routing every missing transition to a
/// new non-accepting sink state with self-loops on every letter. The language
/// is unchanged. Returns a copy when the automaton is already total.
pub fn make_total(automaton: &BuchiAutomaton) -> BuchiAutomaton {
    if automaton.is_total() {
        return automaton.clone();
    }

    let sink = StateIndex::new(automaton.num_of_states());
    let mut transitions = Vec::with_capacity(automaton.num_of_transitions());

    for state in automaton.iter_states() {
        let enabled = automaton.enabled_letters(state).collect_vec();
        for transition in automaton.outgoing_transitions(state) {
            transitions.push((state, transition.letter, transition.to));
        }

        // The enabled letters are sorted.
        for letter in automaton.alphabet().iter() {
            if enabled.binary_search(&letter).is_err() {
                transitions.push((state, letter, sink));
            }
        }
    }

    for letter in automaton.alphabet().iter() {
        transitions.push((sink, letter, sink));
    }

    BuchiAutomaton::new(
        automaton.alphabet().clone(),
        automaton.initial_state(),
        automaton.num_of_states() + 1,
        automaton.final_states(),
        transitions,
    )
}
