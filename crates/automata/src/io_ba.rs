#![forbid(unsafe_code)]

use std::io::BufRead;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;

use log::info;
use regex::Regex;
use rustc_hash::FxHashMap;
use thiserror::Error;

use omega_utilities::OmegaError;
use omega_utilities::debug_trace;

use crate::Alphabet;
use crate::BuchiBuilder;
use crate::OmegaAutomaton;
use crate::StateIndex;

#[derive(Error, Debug)]
pub enum IOError {
    #[error("The .ba input contains no states")]
    Empty,

    #[error("Invalid line {0}: '{1}'")]
    InvalidLine(usize, String),
}

/// Loads a Büchi automaton in the `.ba` format (as used by RABIT and GOAL)
/// from the given reader.
///
/// The format consists of an optional initial state line `[init]`, followed
/// by one line per transition `letter,[from]->[to]`, followed by one line
/// `[state]` per accepting state. Without the initial state line the source of
/// the first transition is initial. Empty lines are ignored.
///
/// State names are arbitrary tokens, they are numbered in order of first
/// occurrence. Letters are looked up in (and added to) the given alphabet, so
/// that several automata can be read over one shared alphabet.
pub fn read_ba(reader: impl Read, alphabet: &mut Alphabet) -> Result<crate::BuchiAutomaton, OmegaError> {
    info!("Reading Büchi automaton in .ba format...");

    let transition_regex = Regex::new(r"^([^,\[\]\s]+)\s*,\s*\[([^\]]+)\]\s*->\s*\[([^\]]+)\]$")
        .expect("Regex compilation should not fail");
    let state_regex = Regex::new(r"^\[([^\]]+)\]$").expect("Regex compilation should not fail");

    let mut builder = BuchiBuilder::new(alphabet.clone());
    let mut states: FxHashMap<String, StateIndex> = FxHashMap::default();
    let mut state_index = |name: &str, builder: &mut BuchiBuilder| -> StateIndex {
        let next = StateIndex::new(states.len());
        let index = *states.entry(name.to_string()).or_insert(next);
        builder.require_num_of_states(index.value() + 1);
        index
    };

    let mut initial_state: Option<StateIndex> = None;
    let mut first_line = true;
    for (number, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(captures) = transition_regex.captures(line) {
            let (_, [letter, from_txt, to_txt]) = captures.extract();
            let from = state_index(from_txt.trim(), &mut builder);
            let to = state_index(to_txt.trim(), &mut builder);

            debug_trace!("Read transition {from} --[{letter}]-> {to}");
            builder.add_transition_label(from, letter, to);
            initial_state.get_or_insert(from);
        } else if let Some(captures) = state_regex.captures(line) {
            let (_, [name]) = captures.extract();
            let state = state_index(name.trim(), &mut builder);

            if first_line {
                initial_state = Some(state);
            } else {
                builder.set_final(state);
            }
        } else {
            return Err(IOError::InvalidLine(number + 1, line.to_string()).into());
        }

        first_line = false;
    }

    let initial_state = initial_state.ok_or(IOError::Empty)?;
    *alphabet = builder.alphabet().clone();

    info!(
        "Finished reading automaton with {} states and {} transitions",
        builder.num_of_states(),
        builder.num_of_transitions()
    );
    Ok(builder.finish(initial_state))
}

/// Writes the automaton in the `.ba` format, see [read_ba]. States are named
/// by their index.
pub fn write_ba(writer: &mut impl Write, automaton: &crate::BuchiAutomaton) -> Result<(), OmegaError> {
    info!("Writing Büchi automaton in .ba format...");

    let mut writer = BufWriter::new(writer);
    writeln!(writer, "[{}]", automaton.initial_state())?;

    for state in automaton.iter_states() {
        for transition in automaton.outgoing_transitions(state) {
            writeln!(
                writer,
                "{},[{}]->[{}]",
                automaton.alphabet().letter(transition.letter),
                state,
                transition.to
            )?;
        }
    }

    for state in automaton.final_states() {
        writeln!(writer, "[{state}]")?;
    }

    writer.flush()?;
    info!("Finished writing automaton.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use rand::Rng;
    use test_log::test;

    use omega_utilities::random_test;

    use super::*;
    use crate::Lasso;
    use crate::LetterIndex;
    use crate::accepts_lasso;
    use crate::random_buchi;

    #[test]
    fn test_reading_ba() {
        let input = indoc! {"
            [q0]
            a,[q0]->[q0]
            b,[q0]->[q1]
            b,[q1]->[q1]

            [q1]
        "};

        let mut alphabet = Alphabet::new();
        let automaton = read_ba(input.as_bytes(), &mut alphabet).unwrap();

        assert_eq!(automaton.num_of_states(), 2);
        assert_eq!(automaton.num_of_transitions(), 3);
        assert_eq!(automaton.initial_state(), StateIndex::new(0));
        assert_eq!(automaton.final_states().collect::<Vec<_>>(), vec![StateIndex::new(1)]);
        assert_eq!(alphabet.len(), 2);
    }

    #[test]
    fn test_reading_ba_shared_alphabet() {
        let mut alphabet = Alphabet::new();
        let left = read_ba("b,[0]->[0]\n[0]".as_bytes(), &mut alphabet).unwrap();
        let right = read_ba("a,[0]->[0]\nb,[0]->[0]\n[0]".as_bytes(), &mut alphabet).unwrap();

        assert_eq!(left.num_of_letters(), 1);
        assert_eq!(right.alphabet().index_of("b"), Some(LetterIndex::new(0)));
        assert_eq!(right.alphabet().index_of("a"), Some(LetterIndex::new(1)));
        assert_eq!(alphabet.len(), 2);
    }

    #[test]
    fn test_reading_ba_without_initial_line() {
        let mut alphabet = Alphabet::new();
        let automaton = read_ba("a,[s]->[t]\na,[t]->[t]\n[t]".as_bytes(), &mut alphabet).unwrap();

        assert_eq!(automaton.initial_state(), StateIndex::new(0));
        assert!(automaton.is_final(StateIndex::new(1)));
    }

    #[test]
    fn test_ba_failure() {
        let mut alphabet = Alphabet::new();
        assert!(read_ba("[0]\na,[0]-[1]".as_bytes(), &mut alphabet).is_err());
        assert!(read_ba("a,[0]->[1\n".as_bytes(), &mut alphabet).is_err());
        assert!(read_ba("\n\n".as_bytes(), &mut alphabet).is_err());
    }

    #[test]
    fn test_random_ba_io() {
        random_test(100, |rng| {
            let automaton = random_buchi(rng, 6, 2, 3);

            let mut buffer: Vec<u8> = Vec::new();
            write_ba(&mut buffer, &automaton).unwrap();

            let mut alphabet = automaton.alphabet().clone();
            let result = read_ba(&buffer[0..], &mut alphabet).unwrap();

            assert_eq!(automaton.num_of_transitions(), result.num_of_transitions());
            assert_eq!(automaton.final_states().count(), result.final_states().count());

            // States are renumbered, so compare the languages on some lassos.
            for _ in 0..20 {
                let lasso = Lasso::new(
                    (0..rng.random_range(0..4)).map(|_| LetterIndex::new(rng.random_range(0..2))).collect(),
                    (1..rng.random_range(2..5)).map(|_| LetterIndex::new(rng.random_range(0..2))).collect(),
                );
                assert_eq!(accepts_lasso(&automaton, &lasso), accepts_lasso(&result, &lasso));
            }
        })
    }
}
