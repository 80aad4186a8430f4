#![forbid(unsafe_code)]

use std::collections::VecDeque;

use omega_automata::Lasso;
use omega_automata::LetterIndex;
use omega_automata::StateIndex;
use omega_automata::Word;

use crate::AdjacencyIndex;
use crate::StateSet;
use crate::Witnessed;

/// A definitive proof of non-inclusion found for one accepting state `f` of `A`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Violation {
    /// `B` has no run on the prefix `word · letter`, which leads `A` to
    /// `target` from where `f` can be reached.
    EmptyPrefixStep {
        word: Word,
        letter: LetterIndex,
        target: StateIndex,
    },

    /// No state of `B` that can be reached after a prefix to `f` has a run on
    /// `word · letter`, which leads `A` from `f` to `target` from where `f`
    /// can be reached again.
    EmptyPeriodStep {
        word: Word,
        letter: LetterIndex,
        target: StateIndex,
    },

    /// `B` has no accepting run on `prefix · period^ω`.
    Rejected { prefix: Word, period: Word },
}

/// Turns a violation for the accepting state `f` into a lasso that `A`
/// accepts and `B` rejects. The `prefixes` are the prefix antichain at `f`,
/// which are only needed for an empty period step.
///
/// # Details
///
/// Missing parts of the word are filled in by shortest paths in `A`, which
/// exist since the fixpoints only visit states that can reach `f`, and `f` is
/// only checked when it lies on a cycle.
pub fn reconstruct(violation: Violation, a: &AdjacencyIndex, f: StateIndex, prefixes: &[Witnessed<StateSet>]) -> Lasso {
    match violation {
        Violation::EmptyPrefixStep {
            mut word,
            letter,
            target,
        } => {
            word.push(letter);
            word.extend(shortest_path(a, target, f).expect("The target of a prefix step can reach the accepting state"));

            Lasso::new(word, shortest_cycle(a, f).expect("The accepting state lies on a cycle"))
        }
        Violation::EmptyPeriodStep {
            mut word,
            letter,
            target,
        } => {
            word.push(letter);
            word.extend(shortest_path(a, target, f).expect("The target of a period step can reach the accepting state"));

            let prefix = prefixes
                .first()
                .expect("The period is only computed for a non-empty prefix antichain");
            Lasso::new(prefix.word.clone(), word)
        }
        Violation::Rejected { prefix, period } => Lasso::new(prefix, period),
    }
}

/// Returns a shortest word leading `A` from `from` to `to`, the empty word when both are equal.
pub fn shortest_path(a: &AdjacencyIndex, from: StateIndex, to: StateIndex) -> Option<Word> {
    if from == to {
        return Some(Word::new());
    }

    shortest_path_from(a, [(from, None)], to)
}

/// Returns a shortest non-empty word leading `A` from `state` back to itself.
pub fn shortest_cycle(a: &AdjacencyIndex, state: StateIndex) -> Option<Word> {
    let mut first_steps = Vec::new();
    for letter in a.enabled_letters(state) {
        for to in a.successors(state, *letter) {
            first_steps.push((*to, Some((state, *letter))));
        }
    }

    shortest_path_from(a, first_steps, state)
}

/// Breadth-first search from the given start states, each with the step that
/// led to it (if any). Returns the word of the first path that reaches `to`.
fn shortest_path_from(
    a: &AdjacencyIndex,
    start: impl IntoIterator<Item = (StateIndex, Option<(StateIndex, LetterIndex)>)>,
    to: StateIndex,
) -> Option<Word> {
    // The step (predecessor, letter) by which every state was discovered first.
    let mut parent: Vec<Option<Option<(StateIndex, LetterIndex)>>> = vec![None; a.num_of_states()];
    let mut queue = VecDeque::new();

    for (state, step) in start {
        if parent[state].is_none() {
            parent[state] = Some(step);
            queue.push_back(state);
        }
    }

    while let Some(state) = queue.pop_front() {
        if state == to {
            // Walk the parents back to a start state.
            let mut word = Word::new();
            let mut current = state;
            while let Some(Some((previous, letter))) = parent[current] {
                word.push(letter);
                current = previous;
                if current == to {
                    // Reached the start of a cycle.
                    break;
                }
            }
            word.reverse();
            return Some(word);
        }

        for letter in a.enabled_letters(state) {
            for next in a.successors(state, *letter) {
                if parent[*next].is_none() {
                    parent[*next] = Some(Some((state, *letter)));
                    queue.push_back(*next);
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use omega_automata::Alphabet;
    use omega_automata::read_ba;

    use super::*;

    #[test]
    fn test_shortest_path_and_cycle() {
        let mut alphabet = Alphabet::new();
        let automaton = read_ba(
            indoc! {"
                [0]
                a,[0]->[1]
                b,[1]->[2]
                a,[2]->[0]
                b,[0]->[2]
                [2]
            "}
            .as_bytes(),
            &mut alphabet,
        )
        .unwrap();
        let index = AdjacencyIndex::new(&automaton);
        let word = |input: &str| alphabet.parse_word(input).unwrap();
        let s = StateIndex::new;

        assert_eq!(shortest_path(&index, s(0), s(0)), Some(word("")));
        assert_eq!(shortest_path(&index, s(0), s(2)), Some(word("b")));
        assert_eq!(shortest_path(&index, s(1), s(0)), Some(word("ba")));
        assert_eq!(shortest_cycle(&index, s(0)), Some(word("ba")));
        assert_eq!(shortest_cycle(&index, s(1)), Some(word("baa")));
    }

    #[test]
    fn test_shortest_cycle_self_loop() {
        let mut alphabet = Alphabet::new();
        let automaton = read_ba("[0]\na,[0]->[1]\nb,[1]->[1]\n[1]".as_bytes(), &mut alphabet).unwrap();
        let index = AdjacencyIndex::new(&automaton);

        assert_eq!(shortest_cycle(&index, StateIndex::new(1)), Some(alphabet.parse_word("b").unwrap()));
        assert_eq!(shortest_cycle(&index, StateIndex::new(0)), None);
    }

    #[test]
    fn test_reconstruct_period_step() {
        let mut alphabet = Alphabet::new();
        let automaton = read_ba("[0]\na,[0]->[1]\nb,[1]->[0]\n[0]".as_bytes(), &mut alphabet).unwrap();
        let index = AdjacencyIndex::new(&automaton);
        let word = |input: &str| alphabet.parse_word(input).unwrap();
        let prefixes = vec![Witnessed::new(StateSet::new(), word("ab"))];

        let lasso = reconstruct(
            Violation::EmptyPeriodStep {
                word: Word::new(),
                letter: alphabet.index_of("a").unwrap(),
                target: StateIndex::new(1),
            },
            &index,
            StateIndex::new(0),
            &prefixes,
        );
        assert_eq!(lasso, Lasso::new(word("ab"), word("ab")));

        let lasso = reconstruct(
            Violation::EmptyPrefixStep {
                word: word("ab"),
                letter: alphabet.index_of("a").unwrap(),
                target: StateIndex::new(1),
            },
            &index,
            StateIndex::new(0),
            &[],
        );
        assert_eq!(lasso, Lasso::new(word("abab"), word("ab")));
    }
}
