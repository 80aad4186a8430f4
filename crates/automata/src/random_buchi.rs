#![forbid(unsafe_code)]

use rand::Rng;

use crate::Alphabet;
use crate::BuchiAutomaton;
use crate::BuchiBuilder;
use crate::LetterIndex;
use crate::StateIndex;

/// Returns an alphabet with the letters `a`, `b`, ... of the given size.
pub fn letters(num_of_letters: usize) -> Alphabet {
    assert!(
        num_of_letters <= 26,
        "Too many letters requested, we only support alphabetic letters."
    );

    Alphabet::from_letters((0..num_of_letters as u8).map(|i| char::from(b'a' + i).to_string()))
}

/// Generates a random, possibly partial, Büchi automaton with the given number
/// of states and letters. Every state gets up to `outdegree` transitions and
/// roughly a third of the states is accepting.
pub fn random_buchi(rng: &mut impl Rng, num_of_states: usize, num_of_letters: usize, outdegree: usize) -> BuchiAutomaton {
    let mut builder = BuchiBuilder::new(letters(num_of_letters));
    builder.require_num_of_states(num_of_states.max(1));

    for state in 0..num_of_states {
        for _ in 0..rng.random_range(0..=outdegree) {
            let letter = LetterIndex::new(rng.random_range(0..num_of_letters));
            let to = StateIndex::new(rng.random_range(0..num_of_states));
            builder.add_transition(StateIndex::new(state), letter, to);
        }

        if rng.random_bool(0.3) {
            builder.set_final(StateIndex::new(state));
        }
    }

    builder.finish(StateIndex::new(0))
}

/// Generates a random total Büchi automaton, every state has between one and
/// `outdegree` successors for every letter.
pub fn random_total_buchi(
    rng: &mut impl Rng,
    num_of_states: usize,
    num_of_letters: usize,
    outdegree: usize,
) -> BuchiAutomaton {
    assert!(num_of_states > 0 && outdegree > 0, "A total automaton needs states and transitions");

    let mut builder = BuchiBuilder::new(letters(num_of_letters));
    builder.require_num_of_states(num_of_states);

    for state in 0..num_of_states {
        for letter in 0..num_of_letters {
            for _ in 0..rng.random_range(1..=outdegree) {
                let to = StateIndex::new(rng.random_range(0..num_of_states));
                builder.add_transition(StateIndex::new(state), LetterIndex::new(letter), to);
            }
        }

        if rng.random_bool(0.3) {
            builder.set_final(StateIndex::new(state));
        }
    }

    builder.finish(StateIndex::new(0))
}
